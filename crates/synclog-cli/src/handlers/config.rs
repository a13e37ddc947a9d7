use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::types::OutputFormat;

pub fn show(config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load_from(config_path)?;
    match format {
        OutputFormat::Plain => print!("{}", config.to_toml()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    Config::default().save_to(config_path)?;
    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}
