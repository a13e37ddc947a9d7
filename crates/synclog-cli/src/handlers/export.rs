use anyhow::{Context, Result};
use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::for_each_source;
use crate::config::Config;

pub fn handle(config: &Config, paths: &[PathBuf], out_dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let summary = for_each_source(paths, &config.sources, |log| {
        let target = document_path(&log.log_file, out_dir);
        log.export_json(&target, config.export.pretty)
            .with_context(|| format!("{}: failed to write {}", log.log_file, target.display()))?;
        info!("exported {} to {}", log.log_file, target.display());
        println!("{} -> {}", log.log_file, target.display());
        Ok(())
    });

    summary.finish()
}

/// `<source>.json`, next to the source or inside `out_dir`.
fn document_path(log_file: &str, out_dir: Option<&Path>) -> PathBuf {
    let source = Path::new(log_file);
    let mut name = source
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("log"));
    name.push(".json");

    match out_dir {
        Some(dir) => dir.join(name),
        None => source.with_file_name(name),
    }
}
