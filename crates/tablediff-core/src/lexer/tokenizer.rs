//! MySQL DDL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes MySQL DDL input.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the input this lexer reads from.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    ///
    /// Returns `false` when a block comment is left unterminated.
    fn skip_whitespace_and_comments(&mut self) -> bool {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // `-- ` needs trailing whitespace in MySQL; `--1` is two minus signs.
            let dash_comment = self.peek() == Some('-')
                && self.peek_next() == Some('-')
                && self.input[self.pos + 2..]
                    .chars()
                    .next()
                    .is_none_or(char::is_whitespace);
            if dash_comment || self.peek() == Some('#') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Block comments, including versioned `/*!50100 ... */` ones
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.pos;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => return false,
                        _ => {}
                    }
                }
                continue;
            }

            return true;
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    /// Scans a bare word: a keyword or an unquoted identifier.
    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a backtick-quoted identifier such as `` `user id` ``.
    fn scan_quoted_identifier(&mut self) -> Token {
        self.advance(); // opening backtick
        let mut name = String::new();

        loop {
            match self.advance() {
                Some('`') if self.peek() == Some('`') => {
                    self.advance();
                    name.push('`');
                }
                Some('`') => break,
                Some(c) => name.push(c),
                None => {
                    return self.make_token(TokenKind::Error(
                        "Unterminated quoted identifier".to_string(),
                    ));
                }
            }
        }

        self.make_token(TokenKind::Identifier(name))
    }

    /// Scans a numeric literal, keeping its source text.
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let after = self.peek_next();
            let signed_exponent = matches!(after, Some('+' | '-'))
                && self.input[self.pos + 2..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit());
            if signed_exponent || after.is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                if signed_exponent {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Number(text.to_string()))
    }

    /// Scans a string literal delimited by `quote`.
    ///
    /// Both the SQL doubled-quote escape and MySQL backslash escapes are
    /// resolved in the token value; the span still covers the raw literal.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote && self.peek() == Some(quote) => {
                    self.advance();
                    value.push(quote);
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) => value.push(c),
                None => {
                    return self
                        .make_token(TokenKind::Error("Unterminated string literal".to_string()));
                }
            }
        }

        if !self.input[..self.pos].ends_with(quote) {
            return self.make_token(TokenKind::Error("Unterminated string literal".to_string()));
        }
        self.make_token(TokenKind::String(value))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if !self.skip_whitespace_and_comments() {
            return self.make_token(TokenKind::Error("Unterminated block comment".to_string()));
        }
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '\'' | '"' => self.scan_string(c),
            '`' => self.scan_quoted_identifier(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' || c == '$' => self.scan_word(),
            _ => {
                self.advance();
                let kind = match c {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    '=' => TokenKind::Eq,
                    '.' => TokenKind::Dot,
                    c => TokenKind::Operator(c),
                };
                self.make_token(kind)
            }
        }
    }

    /// Tokenizes the entire input, ending with an EOF (or error) token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof() || matches!(token.kind, TokenKind::Error(_));
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }
}
