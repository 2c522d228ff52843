//! Structured descriptions of MySQL tables.
//!
//! These types are what the DDL parser produces and what the differencing
//! engine compares. Specs and options are kept as flat, verbatim token
//! sequences rather than a typed AST of every clause, so that ignore rules can
//! strip well-known token windows without modelling each clause.
//!
//! The serialized form (camelCase fields, `type` for column and index types)
//! is the snapshot file format.

mod snapshot;

pub use snapshot::{LoadPolicy, SchemaDescription};

use serde::{Deserialize, Serialize};

use crate::parser::{ParseError, Parser};

/// Index type of a table's primary key.
pub const PRIMARY_KEY_TYPE: &str = "PRIMARY KEY";

/// Name given to primary key indexes, which carry no name of their own.
pub const PRIMARY_KEY_NAME: &str = "__PK__";

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescription {
    /// Column name (unquoted).
    pub name: String,
    /// Data type including its arguments and numeric modifiers, e.g.
    /// `varchar(255)` or `int(10) unsigned`.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Remaining clause tokens in source order, e.g.
    /// `["NOT", "NULL", "DEFAULT", "'0'", "COMMENT", "'id'"]`.
    pub specs: Vec<String>,
    /// The column definition exactly as written.
    pub raw_sql: String,
}

/// An index or constraint definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDescription {
    /// Index name, [`PRIMARY_KEY_NAME`] for the primary key.
    pub name: String,
    /// Upper-cased index kind, e.g. `PRIMARY KEY`, `UNIQUE KEY`, `KEY`.
    #[serde(rename = "type")]
    pub index_type: String,
    /// Clause tokens after the name: column list, `USING BTREE`, `COMMENT '...'`.
    pub specs: Vec<String>,
    /// The index definition exactly as written.
    pub raw_sql: String,
}

impl IndexDescription {
    /// Returns true if this is the table's primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.index_type == PRIMARY_KEY_TYPE
    }
}

/// A parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescription {
    /// Table name (unquoted, without schema qualifier).
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescription>,
    /// Indexes and constraints in declaration order.
    pub indexes: Vec<IndexDescription>,
    /// Table option tokens, e.g. `["ENGINE", "=", "InnoDB"]`.
    pub options: Vec<String>,
    /// The full statement as given.
    pub raw_sql: String,
}

impl TableDescription {
    /// Parses a single MySQL `CREATE TABLE` statement.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the statement cannot be parsed.
    pub fn parse(sql: &str) -> Result<Self, ParseError> {
        Parser::new(sql).parse_create_table()
    }

    /// Gets a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Gets an index by name.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexDescription> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Returns the primary key, if the table declares one.
    #[must_use]
    pub fn primary_key(&self) -> Option<&IndexDescription> {
        self.index(PRIMARY_KEY_NAME)
    }
}
