//! MySQL DDL lexer.
//!
//! A hand-written lexer producing tokens that carry byte spans into the input,
//! so that every parsed entity can be reported with its exact original text.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
