use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use synclog_types::ParsedLog;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::config::{SourceConfig, SourceKind};
use crate::sections::parse_log_file;
use crate::{Error, Result};

/// Parse a single log or exported document.
///
/// Returns `Ok(None)` for files that are not single sources: unrecognized
/// extensions and archives (use [`process_path`] for those).
pub fn parse_file(path: &Path, config: &SourceConfig) -> Result<Option<ParsedLog>> {
    match config.classify(path) {
        Some(SourceKind::Log) => parse_log_file(path).map(Some),
        Some(SourceKind::Document) => Ok(Some(ParsedLog::import_json(path)?)),
        Some(SourceKind::Archive) | None => Ok(None),
    }
}

/// Every parsed source under `path`, one result per source.
///
/// Directories are walked recursively in file-name order and archives are
/// expanded. A failing source yields an [`Error::Source`] in its place and
/// the remaining sources are still processed.
pub fn process_path<'a>(
    path: &'a Path,
    config: &'a SourceConfig,
) -> Box<dyn Iterator<Item = Result<ParsedLog>> + 'a> {
    if !path.is_dir() {
        return Box::new(process_file(path, config).into_iter());
    }

    let walk = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .flat_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => process_file(entry.path(), config),
            Ok(_) => Vec::new(),
            Err(err) => {
                let failed = err.path().unwrap_or(path).to_path_buf();
                vec![Err(Error::from(err).in_source(failed))]
            }
        });
    Box::new(walk)
}

fn process_file(path: &Path, config: &SourceConfig) -> Vec<Result<ParsedLog>> {
    match config.classify(path) {
        Some(SourceKind::Archive) => {
            expand_archive(path, config).unwrap_or_else(|err| vec![Err(err.in_source(path))])
        }
        Some(_) => match parse_file(path, config) {
            Ok(Some(log)) => vec![Ok(log)],
            Ok(None) => Vec::new(),
            Err(err) => vec![Err(err.in_source(path))],
        },
        None => {
            debug!("skipping unsupported file {}", path.display());
            Vec::new()
        }
    }
}

/// Extract an archive into a temporary directory, parse everything in it,
/// then remove the directory.
///
/// The directory is created under [`SourceConfig::extract_dir`] when set.
/// It is removed when `temp_dir` drops, on success and on every error
/// return alike.
///
/// All results are collected before the directory goes away, and paths are
/// reported relative to the archive rather than the temporary location.
fn expand_archive(path: &Path, config: &SourceConfig) -> Result<Vec<Result<ParsedLog>>> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("synclog-");
    let temp_dir = match &config.extract_dir {
        Some(parent) => builder.tempdir_in(parent)?,
        None => builder.tempdir()?,
    };

    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    archive.extract(temp_dir.path())?;
    debug!(
        "expanded {} ({} entries) into {}",
        path.display(),
        archive.len(),
        temp_dir.path().display()
    );

    let relabel = |inner: &Path| -> PathBuf {
        inner
            .strip_prefix(temp_dir.path())
            .map(|rel| path.join(rel))
            .unwrap_or_else(|_| inner.to_path_buf())
    };

    let results = process_path(temp_dir.path(), config)
        .map(|result| match result {
            Ok(mut log) => {
                log.log_file = relabel(Path::new(&log.log_file)).display().to_string();
                Ok(log)
            }
            Err(Error::Source { path, source }) => Err(Error::Source {
                path: relabel(&path),
                source,
            }),
            Err(err) => Err(err),
        })
        .collect();

    Ok(results)
}
