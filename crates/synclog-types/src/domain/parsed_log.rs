use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Account;

/// Everything reconstructed from one log source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParsedLog {
    /// First line(s) of the log, before the first timestamped entry.
    #[serde(default)]
    pub header_line: String,
    #[serde(default)]
    pub system_version: Option<String>,
    /// Where the log came from (usually its file path).
    #[serde(default)]
    pub log_file: String,
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

impl ParsedLog {
    pub fn new(log_file: impl Into<String>) -> Self {
        Self {
            log_file: log_file.into(),
            ..Self::default()
        }
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Total number of calendars across all accounts.
    pub fn calendar_count(&self) -> usize {
        self.accounts.values().map(|a| a.calendars.len()).sum()
    }
}
