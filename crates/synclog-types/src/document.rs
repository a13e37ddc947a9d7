//! Exported document form of a [`ParsedLog`].
//!
//! The document is a JSON object with PascalCase keys (`HeaderLine`,
//! `SystemVersion`, `LogFile`, `Accounts`, ...). Exporting and importing the
//! same document yields an equal `ParsedLog`.

use std::path::Path;

use crate::{ParsedLog, Result};

impl ParsedLog {
    pub fn to_document_string(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    pub fn from_document_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn export_json(&self, path: &Path, pretty: bool) -> Result<()> {
        let text = self.to_document_string(pretty)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Read a previously exported document.
    ///
    /// `log_file` is replaced with `path` so the result reports where it was
    /// actually loaded from.
    pub fn import_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut log = Self::from_document_str(&text)?;
        log.log_file = path.display().to_string();
        Ok(log)
    }
}
