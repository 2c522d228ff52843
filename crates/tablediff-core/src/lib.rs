//! # tablediff-core
//!
//! Parses MySQL `CREATE TABLE` statements into structured descriptions and
//! computes feature-aware differences between two schema snapshots.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for MySQL table DDL,
//!   as printed by `SHOW CREATE TABLE` and `mysqldump --no-data`
//! - A schema model whose clause details are kept as verbatim token sequences
//! - A differencing engine that can ignore cosmetic details such as comments,
//!   index storage types, `AUTO_INCREMENT` counters and row formats
//! - A JSON snapshot format for schemas and diffs
//!
//! ## Comparing two schemas
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! use tablediff_core::prelude::*;
//!
//! let staging = SchemaDescription::from_script(
//!     "CREATE TABLE t (id INT, PRIMARY KEY (id)) COMMENT='x';",
//!     Dialect::MySql,
//!     LoadPolicy::Strict,
//! )
//! .unwrap();
//! let production = SchemaDescription::from_script(
//!     "CREATE TABLE t (id INT, PRIMARY KEY (id)) COMMENT='y';",
//!     Dialect::MySql,
//!     LoadPolicy::Strict,
//! )
//! .unwrap();
//!
//! let result = diff(&staging, &production, &BTreeSet::new());
//! assert_eq!(result.inside_tables.len(), 1);
//!
//! let ignores = SqlFeature::parse_list("comment").unwrap();
//! assert!(diff(&staging, &production, &ignores).is_empty());
//! ```

pub mod dialect;
pub mod diff;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod schema;

pub use dialect::Dialect;
pub use diff::{
    SchemaDiff, SqlFeature, StringDiff, TableDdl, TableDetailDiff, TableMissingDiff, diff, diff_at,
};
pub use error::{Error, Result};
pub use parser::{ParseError, Parser, split_statements};
pub use schema::{
    ColumnDescription, IndexDescription, LoadPolicy, SchemaDescription, TableDescription,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialect::Dialect;
    pub use crate::diff::{
        SchemaDiff, SqlFeature, StringDiff, TableDdl, TableDetailDiff, TableMissingDiff, diff,
        diff_at,
    };
    pub use crate::error::{Error, Result};
    pub use crate::parser::{ParseError, Parser, split_statements};
    pub use crate::schema::{
        ColumnDescription, IndexDescription, LoadPolicy, PRIMARY_KEY_NAME, PRIMARY_KEY_TYPE,
        SchemaDescription, TableDescription,
    };
    pub use crate::parse_create_table;
}

/// Parses a single `CREATE TABLE` statement in the given dialect.
///
/// The dialect gate runs first, so a statement of another kind is reported as
/// [`Error::UnsupportedDialect`] without being parsed.
///
/// # Errors
///
/// Returns [`Error::UnsupportedDialect`] or [`Error::Parse`].
pub fn parse_create_table(sql: &str, dialect: Dialect) -> Result<TableDescription> {
    dialect.ensure_create_table(sql)?;
    Ok(TableDescription::parse(sql)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_table_gates_dialect() {
        assert!(matches!(
            parse_create_table("SELECT 1", Dialect::MySql),
            Err(Error::UnsupportedDialect(_))
        ));
        assert!(matches!(
            parse_create_table("CREATE TABLE t (id", Dialect::MySql),
            Err(Error::Parse(_))
        ));
        let table = parse_create_table("CREATE TABLE t (id INT)", Dialect::MariaDb).unwrap();
        assert_eq!(table.name, "t");
    }
}
