//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// A DDL parse error.
///
/// Carries the offending statement so that a failure while bulk-loading many
/// tables still identifies which DDL could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error within `sql`.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
    /// The statement being parsed.
    pub sql: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span, sql: &str) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
            sql: sql.to_string(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span, sql: &str) -> Self {
        let expected: String = expected.into();
        if matches!(found, TokenKind::Eof) {
            return Self::unexpected_eof(expected, span, sql);
        }
        let message = match &found {
            TokenKind::Error(reason) => reason.clone(),
            other => format!("Unexpected token: expected {expected}, found {other:?}"),
        };
        Self {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
            sql: sql.to_string(),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span, sql: &str) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof),
            sql: sql.to_string(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at position {}..{} in `{}`",
            self.message,
            self.span.start,
            self.span.end,
            self.sql.trim()
        )
    }
}

impl std::error::Error for ParseError {}
