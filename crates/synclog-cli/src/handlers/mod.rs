pub mod config;
pub mod export;
pub mod parse;

use anyhow::Result;
use log::warn;
use std::path::PathBuf;
use synclog_parser::{SourceConfig, process_path};
use synclog_types::ParsedLog;

use crate::views::Palette;

/// Tally of one batch run over the command line paths.
#[derive(Debug, Default)]
pub(crate) struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Error out once every source has been handled if any of them failed.
    pub fn finish(self) -> Result<()> {
        if self.failed > 0 {
            anyhow::bail!(
                "{} of {} sources failed",
                self.failed,
                self.processed + self.failed
            );
        }
        Ok(())
    }
}

/// Run `handle` on every source found under `paths`.
///
/// Failures, whether from parsing or from `handle`, are reported on stderr
/// and counted; the remaining sources are still processed.
pub(crate) fn for_each_source(
    paths: &[PathBuf],
    config: &SourceConfig,
    mut handle: impl FnMut(ParsedLog) -> Result<()>,
) -> BatchSummary {
    let palette = Palette::for_stderr();
    let mut summary = BatchSummary::default();

    for path in paths {
        let mut found = 0;
        for result in process_path(path, config) {
            found += 1;
            // Parser errors already name their source and cause
            let outcome = match result {
                Ok(log) => handle(log),
                Err(err) => Err(anyhow::anyhow!("{}", err)),
            };
            match outcome {
                Ok(()) => summary.processed += 1,
                Err(err) => {
                    eprintln!("{} {:#}", palette.error("error:"), err);
                    summary.failed += 1;
                }
            }
        }
        if found == 0 {
            warn!("no sources found in {}", path.display());
        }
    }

    summary
}
