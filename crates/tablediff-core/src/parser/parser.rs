//! MySQL `CREATE TABLE` parser implementation.

use super::error::ParseError;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::schema::{
    ColumnDescription, IndexDescription, PRIMARY_KEY_NAME, PRIMARY_KEY_TYPE, TableDescription,
};

/// A column or index definition inside the table body.
enum Definition {
    Column(ColumnDescription),
    Index(IndexDescription),
}

/// A verbatim clause token under construction.
struct Piece {
    span: Span,
    /// `=` and `,` never join their neighbours.
    standalone: bool,
}

/// Where a clause token sequence ends.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ClauseEnd {
    /// `,` or `)` closing a column or index definition.
    Definition,
    /// `;` or end of input after the table options.
    Statement,
}

/// Parser for a single MySQL `CREATE TABLE` statement.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given statement.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
        }
    }

    /// Parses the statement into a [`TableDescription`].
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is empty, is not a `CREATE TABLE`
    /// statement, is malformed, or is followed by another statement.
    pub fn parse_create_table(&mut self) -> Result<TableDescription, ParseError> {
        if self.current.is_eof() {
            return Err(ParseError::new(
                "Empty statement",
                self.current.span,
                self.source(),
            ));
        }

        self.expect_keyword(Keyword::Create)?;
        // MariaDB only; the dialect gate rejects it for MySQL
        if self.check_keyword(Keyword::Or) {
            self.advance();
            self.expect_keyword(Keyword::Replace)?;
        }
        if self.check_keyword(Keyword::Temporary) {
            self.advance();
        }
        self.expect_keyword(Keyword::Table)?;
        if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
        }

        let name = self.parse_table_name()?;
        self.expect(&TokenKind::LeftParen, "'('")?;

        let mut columns = vec![];
        let mut indexes = vec![];
        loop {
            match self.parse_definition()? {
                Definition::Column(column) => columns.push(column),
                Definition::Index(index) => indexes.push(index),
            }
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen, "',' or ')'")?;

        let options = self.parse_clause_tokens(ClauseEnd::Statement)?;

        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(ParseError::unexpected(
                "end of statement",
                self.current.kind.clone(),
                self.current.span,
                self.source(),
            ));
        }

        Ok(TableDescription {
            name,
            columns,
            indexes,
            options,
            raw_sql: self.source().to_string(),
        })
    }

    /// Parses `[schema.]name`, keeping only the table name.
    fn parse_table_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_name("table name")?;
        while self.check(&TokenKind::Dot) {
            self.advance();
            name = self.expect_name("table name")?;
        }
        Ok(name)
    }

    /// Parses one entry of the table body.
    fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        match self.current.as_keyword() {
            Some(
                Keyword::Constraint
                | Keyword::Primary
                | Keyword::Unique
                | Keyword::Key
                | Keyword::Index
                | Keyword::Fulltext
                | Keyword::Spatial
                | Keyword::Foreign
                | Keyword::Check,
            ) => Ok(Definition::Index(self.parse_index_definition()?)),
            _ => Ok(Definition::Column(self.parse_column_definition()?)),
        }
    }

    /// Parses `name type[(args)] [UNSIGNED|SIGNED|ZEROFILL ...] clause...`.
    fn parse_column_definition(&mut self) -> Result<ColumnDescription, ParseError> {
        let start = self.current.span.start;
        let name = self.expect_name("column name or index definition")?;

        self.expect_name("data type")?;
        let mut data_type = self.previous.span.text(self.source()).to_string();
        if self.check(&TokenKind::LeftParen) {
            let args = self.parse_group()?;
            data_type.push_str(args.text(self.source()));
        }
        while self
            .current
            .as_keyword()
            .is_some_and(|kw| kw.is_type_modifier())
        {
            data_type.push(' ');
            data_type.push_str(self.current.span.text(self.source()));
            self.advance();
        }

        let specs = self.parse_clause_tokens(ClauseEnd::Definition)?;

        Ok(ColumnDescription {
            name,
            data_type,
            specs,
            raw_sql: self.text_since(start),
        })
    }

    /// Parses a key, index or table constraint definition.
    fn parse_index_definition(&mut self) -> Result<IndexDescription, ParseError> {
        let start = self.current.span.start;

        let mut symbol = None;
        if self.check_keyword(Keyword::Constraint) {
            self.advance();
            if let TokenKind::Identifier(name) = &self.current.kind {
                symbol = Some(name.clone());
                self.advance();
            }
        }

        let mut words = vec![];
        match self.current.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                words.extend([Keyword::Primary, Keyword::Key]);
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                words.extend([Keyword::Foreign, Keyword::Key]);
            }
            Some(kw @ (Keyword::Unique | Keyword::Fulltext | Keyword::Spatial)) => {
                self.advance();
                words.push(kw);
                if let Some(kw @ (Keyword::Key | Keyword::Index)) = self.current.as_keyword() {
                    self.advance();
                    words.push(kw);
                }
            }
            Some(kw @ (Keyword::Key | Keyword::Index | Keyword::Check)) => {
                self.advance();
                words.push(kw);
            }
            _ => {
                return Err(ParseError::unexpected(
                    "PRIMARY KEY, UNIQUE, KEY, INDEX, FULLTEXT, SPATIAL, FOREIGN KEY or CHECK",
                    self.current.kind.clone(),
                    self.current.span,
                    self.source(),
                ));
            }
        }
        let index_type = words
            .iter()
            .map(Keyword::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let mut index_name = None;
        if words != [Keyword::Check] {
            if let TokenKind::Identifier(name) = &self.current.kind {
                if !name.eq_ignore_ascii_case("USING") {
                    index_name = Some(name.clone());
                    self.advance();
                }
            }
        }

        let specs = self.parse_clause_tokens(ClauseEnd::Definition)?;

        let name = if index_type == PRIMARY_KEY_TYPE {
            PRIMARY_KEY_NAME.to_string()
        } else {
            match index_name.or(symbol) {
                Some(name) => name,
                None => unnamed_index_key(&index_type, &specs),
            }
        };

        Ok(IndexDescription {
            name,
            index_type,
            specs,
            raw_sql: self.text_since(start),
        })
    }

    /// Collects the verbatim clause tokens up to the end of a definition or of
    /// the statement.
    ///
    /// A balanced parenthesised group is a single token, and lexemes written
    /// without whitespace between them are joined (`CURRENT_TIMESTAMP(3)`,
    /// `-1`), except that `=` and `,` always stand alone.
    fn parse_clause_tokens(&mut self, end: ClauseEnd) -> Result<Vec<String>, ParseError> {
        let mut pieces: Vec<Piece> = vec![];

        loop {
            let span = self.current.span;
            let piece = match (&self.current.kind, end) {
                (TokenKind::Comma | TokenKind::RightParen, ClauseEnd::Definition)
                | (TokenKind::Semicolon | TokenKind::Eof, ClauseEnd::Statement) => break,
                (TokenKind::Eof, ClauseEnd::Definition) => {
                    return Err(ParseError::unexpected_eof("',' or ')'", span, self.source()));
                }
                (TokenKind::Semicolon | TokenKind::RightParen | TokenKind::Error(_), _) => {
                    return Err(ParseError::unexpected(
                        "a clause token",
                        self.current.kind.clone(),
                        span,
                        self.source(),
                    ));
                }
                (TokenKind::LeftParen, _) => Piece {
                    span: self.parse_group()?,
                    standalone: false,
                },
                (TokenKind::Eq | TokenKind::Comma, _) => {
                    self.advance();
                    Piece {
                        span,
                        standalone: true,
                    }
                }
                _ => {
                    self.advance();
                    Piece {
                        span,
                        standalone: false,
                    }
                }
            };

            match pieces.last_mut() {
                Some(last)
                    if !last.standalone && !piece.standalone && last.span.touches(&piece.span) =>
                {
                    last.span = last.span.merge(piece.span);
                }
                _ => pieces.push(piece),
            }
        }

        Ok(pieces
            .iter()
            .map(|piece| piece.span.text(self.source()).to_string())
            .collect())
    }

    /// Consumes a balanced `( ... )` group and returns its span.
    fn parse_group(&mut self) -> Result<Span, ParseError> {
        let open = self.current.span;
        self.expect(&TokenKind::LeftParen, "'('")?;
        let mut depth = 1usize;

        while depth > 0 {
            match &self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::unexpected_eof(
                        "')'",
                        self.current.span,
                        self.source(),
                    ));
                }
                TokenKind::Error(_) => {
                    return Err(ParseError::unexpected(
                        "')'",
                        self.current.kind.clone(),
                        self.current.span,
                        self.source(),
                    ));
                }
                _ => {}
            }
            self.advance();
        }

        Ok(open.merge(self.previous.span))
    }

    // ================================================================
    // Token helpers
    // ================================================================

    fn source(&self) -> &'a str {
        self.lexer.source()
    }

    /// Source text from `start` to the end of the last consumed token.
    fn text_since(&self, start: usize) -> String {
        Span::new(start, self.previous.span.end)
            .text(self.source())
            .to_string()
    }

    fn advance(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.lexer.next_token());
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                expected,
                self.current.kind.clone(),
                self.current.span,
                self.source(),
            ))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
                self.source(),
            ))
        }
    }

    /// Expects an identifier (or a keyword used as a name) and returns it.
    fn expect_name(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.current.as_name(self.source()) {
            Some(name) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            None => Err(ParseError::unexpected(
                expected,
                self.current.kind.clone(),
                self.current.span,
                self.source(),
            )),
        }
    }
}

/// Key for an index written without a name (`UNIQUE (email)`, an unnamed
/// `CHECK`), derived from its kind and its first clause token so that it stays
/// stable across snapshots of the same definition.
fn unnamed_index_key(index_type: &str, specs: &[String]) -> String {
    let kind = index_type.replace(' ', "_");
    match specs.first() {
        Some(first) => format!("__{kind}__{first}"),
        None => format!("__{kind}__"),
    }
}
