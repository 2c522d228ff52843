//! MySQL `CREATE TABLE` parser.
//!
//! A hand-written recursive descent parser over the DDL lexer. Clause details
//! are kept as verbatim token sequences; only the statement head and the
//! column/index/option boundaries are structurally parsed.

mod error;
mod parser;
mod script;

pub use error::ParseError;
pub use parser::Parser;
pub use script::split_statements;
