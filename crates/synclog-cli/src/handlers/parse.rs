use anyhow::Result;
use std::path::PathBuf;
use synclog_types::ParsedLog;

use super::for_each_source;
use crate::config::Config;
use crate::types::OutputFormat;
use crate::views::{Palette, render_log};

pub fn handle(config: &Config, paths: &[PathBuf], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            let palette = Palette::for_stdout();
            let mut first = true;
            let summary = for_each_source(paths, &config.sources, |log| {
                if !first {
                    println!();
                }
                first = false;
                println!("{}", render_log(&log, &palette));
                Ok(())
            });
            summary.finish()
        }
        OutputFormat::Json => {
            let mut logs: Vec<ParsedLog> = Vec::new();
            let summary = for_each_source(paths, &config.sources, |log| {
                logs.push(log);
                Ok(())
            });

            let text = if config.export.pretty {
                serde_json::to_string_pretty(&logs)?
            } else {
                serde_json::to_string(&logs)?
            };
            println!("{}", text);
            summary.finish()
        }
    }
}
