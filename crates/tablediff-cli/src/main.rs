//! tablediff CLI
//!
//! Command-line tool for taking MySQL schema snapshots and comparing them.

mod location;

use anyhow::bail;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use tablediff_core::prelude::*;

use crate::location::Location;

/// Snapshot and diff MySQL table schemas.
#[derive(Parser)]
#[command(name = "tablediff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect of the input scripts.
    #[arg(short, long, env = "TABLEDIFF_DIALECT", default_value = "mysql", global = true)]
    dialect: Dialect,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a DDL script into a JSON schema snapshot.
    Snapshot {
        /// SQL script to read (`console` for standard input).
        input: Location,

        /// Where to write the snapshot (`console` or a file path).
        #[arg(short, long, default_value = "console")]
        to: Location,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,

        /// Skip tables whose DDL cannot be parsed instead of failing.
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Compare two schemas given as JSON snapshots or DDL scripts.
    Diff {
        /// Left side (e.g. staging).
        left: Location,

        /// Right side (e.g. production).
        right: Location,

        /// Where to write the diff (`console` or a file path).
        #[arg(short, long, default_value = "console")]
        to: Location,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        pretty: bool,

        /// Comma separated features to leave out of the comparison:
        /// comment, index_storage_type, auto_increment_id, row_format.
        #[arg(short, long, env = "TABLEDIFF_IGNORE", default_value = "")]
        ignore: String,

        /// Skip tables whose DDL cannot be parsed instead of failing.
        #[arg(long)]
        skip_invalid: bool,
    },
}

const fn load_policy(skip_invalid: bool) -> LoadPolicy {
    if skip_invalid {
        LoadPolicy::SkipInvalid
    } else {
        LoadPolicy::Strict
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    cli.command.run(cli.dialect).await
}

impl Commands {
    async fn run(self, dialect: Dialect) -> anyhow::Result<()> {
        match self {
            Self::Snapshot {
                input,
                to,
                pretty,
                skip_invalid,
            } => {
                let schema = input
                    .load_schema(dialect, load_policy(skip_invalid))
                    .await?;
                to.write(&schema.to_json(pretty)?).await?;
                info!(
                    "{} table description(s) have been written to \"{}\" .",
                    schema.tables.len(),
                    to
                );
            }

            Self::Diff {
                left,
                right,
                to,
                pretty,
                ignore,
                skip_invalid,
            } => {
                // Validate the feature list before doing any work
                let ignores = SqlFeature::parse_list(&ignore)?;

                if left == Location::Console && right == Location::Console {
                    bail!("Only one side of a diff can be read from the console");
                }

                let policy = load_policy(skip_invalid);
                let (left_schema, right_schema) = tokio::try_join!(
                    left.load_schema(dialect, policy),
                    right.load_schema(dialect, policy),
                )?;
                info!(
                    "Left side descriptions have been loaded from \"{}\" ({} table(s)).",
                    left,
                    left_schema.tables.len()
                );
                info!(
                    "Right side descriptions have been loaded from \"{}\" ({} table(s)).",
                    right,
                    right_schema.tables.len()
                );

                let result = diff(&left_schema, &right_schema, &ignores);
                if result.is_empty() {
                    info!("(No differences.)");
                } else {
                    to.write(&result.to_json(pretty)?).await?;
                    info!(
                        "{} missing table(s) and {} changed table(s) have been written to \"{}\" .",
                        result.tables.len(),
                        result.inside_tables.len(),
                        to
                    );
                }
            }
        }

        Ok(())
    }
}
