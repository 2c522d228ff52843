//! Splitting SQL scripts into statements.

use crate::lexer::{Lexer, TokenKind};

/// Splits a SQL script (such as a `mysqldump --no-data` file) into statements.
///
/// Statements are separated by top-level `;` tokens, so semicolons inside
/// string literals, quoted identifiers and comments do not split. Comments
/// between statements are dropped and the returned slices are trimmed. If the
/// lexer hits malformed input, the rest of the script is returned as the last
/// statement so that parsing it reports the error.
#[must_use]
pub fn split_statements(script: &str) -> Vec<&str> {
    let mut lexer = Lexer::new(script);
    let mut statements = vec![];
    let mut start: Option<usize> = None;

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof => {
                if let Some(begin) = start {
                    statements.push(script[begin..].trim());
                }
                break;
            }
            TokenKind::Error(_) => {
                let begin = start.unwrap_or(token.span.start);
                statements.push(script[begin..].trim());
                break;
            }
            TokenKind::Semicolon => {
                if let Some(begin) = start.take() {
                    statements.push(script[begin..token.span.start].trim());
                }
            }
            _ => {
                start.get_or_insert(token.span.start);
            }
        }
    }

    statements.retain(|s| !s.is_empty());
    statements
}
