use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sync state of one account: when it last completed and what is still queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SyncQueue {
    pub account_id: String,
    /// `None` means the account never synced (or the time was unreadable).
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl SyncQueue {
    pub fn new(
        account_id: impl Into<String>,
        last_sync: Option<DateTime<Utc>>,
        items: Vec<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            last_sync,
            items,
        }
    }

    pub fn is_synced(&self) -> bool {
        self.last_sync.is_some()
    }
}
