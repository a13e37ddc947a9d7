use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a file is treated when it turns up in a batch of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Raw diagnostic log text
    Log,
    /// Previously exported JSON document
    Document,
    /// Archive whose contents are processed in turn
    Archive,
}

/// File extensions recognized for each kind of source (case-insensitive,
/// with or without the leading dot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_log_extensions")]
    pub log_extensions: Vec<String>,
    #[serde(default = "default_document_extensions")]
    pub document_extensions: Vec<String>,
    #[serde(default = "default_archive_extensions")]
    pub archive_extensions: Vec<String>,
    /// Where archives are extracted while they are processed (the system
    /// temporary directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_dir: Option<PathBuf>,
}

fn default_log_extensions() -> Vec<String> {
    vec!["log".to_string()]
}

fn default_document_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

fn default_archive_extensions() -> Vec<String> {
    vec!["zip".to_string()]
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            log_extensions: default_log_extensions(),
            document_extensions: default_document_extensions(),
            archive_extensions: default_archive_extensions(),
            extract_dir: None,
        }
    }
}

impl SourceConfig {
    /// Classify a path by extension; `None` means the file is skipped.
    pub fn classify(&self, path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?;
        let matches = |list: &[String]| {
            list.iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
        };

        if matches(&self.log_extensions) {
            Some(SourceKind::Log)
        } else if matches(&self.document_extensions) {
            Some(SourceKind::Document)
        } else if matches(&self.archive_extensions) {
            Some(SourceKind::Archive)
        } else {
            None
        }
    }
}
