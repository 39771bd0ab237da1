use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Log level options for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    }
}

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "quarry - load tabular files into an embedded analytical store and query them in SQL or plain language")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ./quarry.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Set output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl Cli {
    /// Explicit `--log-level` wins, then `--verbose`, then the default.
    pub fn effective_log_level(&self) -> LogLevel {
        match self.log_level {
            Some(level) => level,
            None if self.verbose => LogLevel::Debug,
            None => LogLevel::Info,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load data files (CSV, Parquet, JSON) into the store
    Load {
        /// Files to ingest; each becomes one table named after the file
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List loaded tables with row counts and column types
    Tables,
    /// Ask a question in plain language and run the generated SQL
    Ask {
        /// The question to answer
        question: String,

        /// Focus generation on one table (others stay visible as context)
        #[arg(short, long)]
        table: Option<String>,
    },
    /// Validate and execute a literal SQL statement
    Sql {
        /// The SELECT statement to run
        statement: String,
    },
    /// Preview rows from a loaded table
    Sample {
        /// Table to sample
        table: String,

        /// Maximum rows to return
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },
    /// Record or inspect feedback on generated queries
    Feedback {
        #[command(subcommand)]
        command: FeedbackCommands,
    },
}

#[derive(Subcommand)]
pub enum FeedbackCommands {
    /// Record feedback for a generated query
    Add {
        /// The original question
        question: String,

        /// The SQL that was produced for it
        #[arg(long)]
        sql: String,

        /// Mark the result as wrong or unhelpful
        #[arg(long)]
        negative: bool,

        /// Free-form note
        #[arg(long)]
        comment: Option<String>,
    },
    /// Show aggregate feedback counts
    Stats,
    /// Show the most recent feedback entries
    Recent {
        /// Maximum entries to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}
