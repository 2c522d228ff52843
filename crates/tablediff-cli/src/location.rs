//! Where snapshots and diffs are read from and written to.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use tablediff_core::{Dialect, LoadPolicy, SchemaDescription};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

/// A console stream or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Standard input when reading, standard output when writing.
    Console,
    /// A file on the local file system.
    File(PathBuf),
}

impl Location {
    /// Reads the whole content.
    pub async fn read(&self) -> anyhow::Result<String> {
        match self {
            Self::Console => {
                let mut content = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut content)
                    .await
                    .context("Failed to read from console")?;
                Ok(content)
            }
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Writes `content`, replacing any existing file.
    pub async fn write(&self, content: &str) -> anyhow::Result<()> {
        match self {
            Self::Console => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(content.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
                Ok(())
            }
            Self::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                tokio::fs::write(path, content)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))
            }
        }
    }

    /// Loads a schema snapshot.
    ///
    /// Content starting with `{` is read as a JSON snapshot, anything else as
    /// a SQL script of `CREATE TABLE` statements.
    pub async fn load_schema(
        &self,
        dialect: Dialect,
        policy: LoadPolicy,
    ) -> anyhow::Result<SchemaDescription> {
        let content = self.read().await?;
        let schema = if content.trim_start().starts_with('{') {
            debug!(location = %self, "Reading JSON snapshot");
            SchemaDescription::from_json(&content)
        } else {
            debug!(location = %self, %dialect, "Reading SQL script");
            SchemaDescription::from_script(&content, dialect, policy)
        };
        schema.with_context(|| format!("Failed to load schema from \"{self}\""))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console => f.write_str("console"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for Location {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("console") || s == "-" {
            Ok(Self::Console)
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}
