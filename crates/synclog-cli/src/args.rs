use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "synclog")]
#[command(
    about = "Reconstruct accounts, calendars and sync queues from calendar-sync diagnostic logs",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/synclog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse logs, exported documents, directories or zip archives and print
    /// what they contain
    Parse {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Write every parsed source as `<source>.json`
    Export {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory for the documents (defaults to next to each source)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
