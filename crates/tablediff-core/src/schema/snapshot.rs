//! Schema snapshots: every table of a database at a point in time.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TableDescription;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::parser::{Parser, split_statements};

/// What to do with a `CREATE TABLE` statement that fails to parse while
/// loading many tables at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Propagate the first error.
    #[default]
    Strict,
    /// Log a warning naming the statement and leave the table out.
    SkipInvalid,
}

/// A snapshot of a database schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    /// Tables in the order they were captured.
    pub tables: Vec<TableDescription>,
    /// When the snapshot was taken (local time).
    pub timestamp: NaiveDateTime,
}

impl SchemaDescription {
    /// Creates a snapshot stamped with the current local time.
    #[must_use]
    pub fn new(tables: Vec<TableDescription>) -> Self {
        Self::with_timestamp(tables, Local::now().naive_local())
    }

    /// Creates a snapshot with an explicit timestamp.
    #[must_use]
    pub const fn with_timestamp(tables: Vec<TableDescription>, timestamp: NaiveDateTime) -> Self {
        Self { tables, timestamp }
    }

    /// Parses every `CREATE TABLE` statement of a SQL script into a snapshot.
    ///
    /// Statements of other kinds (`SET`, `DROP TABLE`, `INSERT`, ...) are
    /// skipped. The dialect gate runs on each statement before it is parsed,
    /// so input the lexer cannot read is an error even outside `CREATE TABLE`.
    ///
    /// # Errors
    ///
    /// With [`LoadPolicy::Strict`], returns the first parse error.
    pub fn from_script(script: &str, dialect: Dialect, policy: LoadPolicy) -> Result<Self> {
        let mut tables = vec![];

        for statement in split_statements(script) {
            match dialect.ensure_create_table(statement) {
                Ok(()) => {}
                Err(Error::UnsupportedDialect(reason)) => {
                    debug!(%reason, "Skipping statement");
                    continue;
                }
                Err(e) if policy == LoadPolicy::SkipInvalid => {
                    warn!(error = %e, "Skipping statement that could not be read");
                    continue;
                }
                Err(e) => return Err(e),
            }

            match Parser::new(statement).parse_create_table() {
                Ok(table) => {
                    debug!(table = %table.name, columns = table.columns.len(), "Parsed table");
                    tables.push(table);
                }
                Err(e) if policy == LoadPolicy::SkipInvalid => {
                    warn!(error = %e, "Skipping table whose DDL could not be parsed");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self::new(tables))
    }

    /// Gets a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableDescription> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns table names in snapshot order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Reads a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the text is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
