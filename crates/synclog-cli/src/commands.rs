use anyhow::Result;

use super::args::{Cli, Commands, ConfigCommand};
use super::handlers;
use crate::config::Config;
use crate::types::LogLevel;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command {
        Commands::Parse { paths } => {
            let config = Config::load_from(&config_path)?;
            handlers::parse::handle(&config, &paths, cli.format)
        }

        Commands::Export { paths, out_dir } => {
            let config = Config::load_from(&config_path)?;
            handlers::export::handle(&config, &paths, out_dir.as_deref())
        }

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&config_path, cli.format),
            ConfigCommand::Init { force } => handlers::config::init(&config_path, force),
        },
    }
}

/// Library logs go to stderr; `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: LogLevel) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.to_string()))
        .target(env_logger::Target::Stderr)
        .try_init();
}
