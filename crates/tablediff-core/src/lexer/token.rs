//! Token types for the MySQL DDL lexer.

use super::Span;

/// Keywords the DDL parser dispatches on.
///
/// Every other bare word (including `COMMENT`, `DEFAULT`, `AUTO_INCREMENT`, ...)
/// is lexed as an [`TokenKind::Identifier`]: the parser keeps those words as
/// verbatim clause tokens and never needs to interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statement head
    Create,
    Or,
    Replace,
    Temporary,
    Table,
    If,
    Not,
    Exists,

    // Index and constraint definitions
    Primary,
    Unique,
    Key,
    Index,
    Fulltext,
    Spatial,
    Constraint,
    Foreign,
    Check,

    // Numeric type modifiers
    Unsigned,
    Signed,
    Zerofill,
}

impl Keyword {
    /// Attempts to parse a keyword from a bare word (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "OR" => Some(Self::Or),
            "REPLACE" => Some(Self::Replace),
            "TEMPORARY" => Some(Self::Temporary),
            "TABLE" => Some(Self::Table),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "PRIMARY" => Some(Self::Primary),
            "UNIQUE" => Some(Self::Unique),
            "KEY" => Some(Self::Key),
            "INDEX" => Some(Self::Index),
            "FULLTEXT" => Some(Self::Fulltext),
            "SPATIAL" => Some(Self::Spatial),
            "CONSTRAINT" => Some(Self::Constraint),
            "FOREIGN" => Some(Self::Foreign),
            "CHECK" => Some(Self::Check),
            "UNSIGNED" => Some(Self::Unsigned),
            "SIGNED" => Some(Self::Signed),
            "ZEROFILL" => Some(Self::Zerofill),
            _ => None,
        }
    }

    /// Returns the canonical (upper-case) spelling of the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Or => "OR",
            Self::Replace => "REPLACE",
            Self::Temporary => "TEMPORARY",
            Self::Table => "TABLE",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::Primary => "PRIMARY",
            Self::Unique => "UNIQUE",
            Self::Key => "KEY",
            Self::Index => "INDEX",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
            Self::Constraint => "CONSTRAINT",
            Self::Foreign => "FOREIGN",
            Self::Check => "CHECK",
            Self::Unsigned => "UNSIGNED",
            Self::Signed => "SIGNED",
            Self::Zerofill => "ZEROFILL",
        }
    }

    /// Returns true for the modifiers that belong to a numeric column type.
    #[must_use]
    pub const fn is_type_modifier(&self) -> bool {
        matches!(self, Self::Unsigned | Self::Signed | Self::Zerofill)
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (e.g. `804`, `0.00`, `1e3`)
    Number(String),
    /// String literal with quotes removed and escapes resolved
    String(String),

    // Identifiers and keywords
    /// Bare word or backtick-quoted identifier (unquoted name)
    Identifier(String),
    /// DDL keyword
    Keyword(Keyword),

    // Punctuation
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// =
    Eq,
    /// .
    Dot,
    /// Any other operator character (`-`, `+`, `*`, `<`, `@`, ...)
    Operator(char),

    // Special
    /// End of input
    Eof,
    /// Invalid input (unterminated literal, identifier or comment)
    Error(String),
}

/// A token with its span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the name carried by an identifier or keyword token.
    ///
    /// Keywords are accepted so that words like `temporary` can still be used as
    /// column names.
    #[must_use]
    pub fn as_name<'a>(&'a self, source: &'a str) -> Option<&'a str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            TokenKind::Keyword(_) => Some(self.span.text(source)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("PRIMARY"), Some(Keyword::Primary));
        assert_eq!(Keyword::from_str("primary"), Some(Keyword::Primary));
        assert_eq!(Keyword::from_str("FullText"), Some(Keyword::Fulltext));
        assert_eq!(Keyword::from_str("COMMENT"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::Unique.as_str(), "UNIQUE");
        assert_eq!(Keyword::Key.as_str(), "KEY");
    }

    #[test]
    fn test_type_modifiers() {
        assert!(Keyword::Unsigned.is_type_modifier());
        assert!(Keyword::Zerofill.is_type_modifier());
        assert!(!Keyword::Key.is_type_modifier());
    }

    #[test]
    fn test_token_as_name() {
        let sql = "temporary `key`";
        let kw = Token::new(TokenKind::Keyword(Keyword::Temporary), Span::new(0, 9));
        let ident = Token::new(TokenKind::Identifier("key".to_string()), Span::new(10, 15));
        let comma = Token::new(TokenKind::Comma, Span::new(0, 1));
        assert_eq!(kw.as_name(sql), Some("temporary"));
        assert_eq!(ident.as_name(sql), Some("key"));
        assert_eq!(comma.as_name(sql), None);
    }
}
