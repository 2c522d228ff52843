//! SQL dialect selection.
//!
//! Only MySQL-family `SHOW CREATE TABLE` output is understood. Other dialects
//! are rejected up front instead of failing somewhere in the middle of a parse.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::lexer::{Keyword, Lexer, TokenKind};
use crate::parser::ParseError;

/// A supported SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// MySQL.
    #[default]
    MySql,
    /// MariaDB, whose `SHOW CREATE TABLE` output is MySQL-shaped.
    MariaDb,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
        }
    }

    /// Checks that `sql` starts like a `CREATE [OR REPLACE] [TEMPORARY] TABLE`
    /// statement. `OR REPLACE` is only accepted for MariaDB.
    ///
    /// Only the head of a `CREATE TABLE` statement is checked; its body is
    /// left to the parser.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for an empty statement, for input the lexer
    /// cannot read (an unclosed comment or quote) and for `OR REPLACE` outside
    /// MariaDB. Returns [`Error::UnsupportedDialect`] for anything else that is
    /// not `CREATE TABLE` shaped.
    pub fn ensure_create_table(&self, sql: &str) -> Result<()> {
        let mut lexer = Lexer::new(sql);
        let mut next = || {
            let token = lexer.next_token();
            if matches!(token.kind, TokenKind::Error(_)) {
                return Err(ParseError::unexpected(
                    "CREATE TABLE",
                    token.kind,
                    token.span,
                    sql,
                ));
            }
            Ok(token)
        };

        let first = next()?;
        if first.is_eof() {
            return Err(ParseError::new("Empty statement", first.span, sql).into());
        }

        let mut token = next()?;
        if first.as_keyword() == Some(Keyword::Create) && token.as_keyword() == Some(Keyword::Or) {
            let replace = next()?;
            if replace.as_keyword() == Some(Keyword::Replace) && *self != Self::MariaDb {
                return Err(ParseError::new(
                    format!("CREATE OR REPLACE TABLE is not {} syntax", self.name()),
                    token.span.merge(replace.span),
                    sql,
                )
                .into());
            }
            token = next()?;
        }
        if token.as_keyword() == Some(Keyword::Temporary) {
            token = next()?;
        }

        let is_create_table = first.as_keyword() == Some(Keyword::Create)
            && token.as_keyword() == Some(Keyword::Table);
        if is_create_table {
            return Ok(());
        }

        // Skipped statements must still lex, or the rest of a script is lost
        while !next()?.is_eof() {}

        let head: String = sql.trim().chars().take(40).collect();
        Err(Error::UnsupportedDialect(format!(
            "expected a {} `CREATE TABLE` statement, found `{head}`",
            self.name()
        )))
    }

    /// Returns true for dialect names that are known but not supported.
    fn is_foreign_name(name: &str) -> bool {
        matches!(
            name,
            "postgres" | "postgresql" | "sqlite" | "mssql" | "sqlserver" | "oracle" | "duckdb"
        )
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "mysql" => Ok(Self::MySql),
            "mariadb" => Ok(Self::MariaDb),
            other if Self::is_foreign_name(other) => Err(Error::UnsupportedDialect(format!(
                "{other} (only mysql and mariadb are supported)"
            ))),
            other => Err(Error::UnsupportedDialect(format!("unknown dialect `{other}`"))),
        }
    }
}
