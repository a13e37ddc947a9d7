use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use regex::Regex;
use std::sync::LazyLock;
use synclog_types::SyncQueue;

/// One queue description inside a `Sync queues` entry:
///
/// ```text
/// CalDAVAccountHandler / acct-1 (me@example.com, last sync: 2023-06-01 08:00:00 +0000, ...): <FBSyncQueue: 0x6000> (
///     "queued item",
///     "another \"quoted\" item"
/// )>
/// ```
static SYNC_QUEUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?xsmi)
        # source handler name and account id
        ^(?P<name>\w+)\s+/\s+(?P<account>\S+)\s

        # owner and last sync
        \(
          (?P<owner>[^,]+),\s+
          last\ssync:\s(?P<last>\(null\)|[^,)]*)
          [^)]*
        \):\s+

        # the queue
        <\w+:[^(]+\(\s*

          # optional log data
          (?P<items>(?:"(?:\\.|[^"\\])*"(?:\s*,\s*)?)*)

        \s*^\)>(?:\n|$)
        "#,
    )
    .unwrap()
});

/// A single quoted queue item
static QUEUE_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:\\.|[^"\\])*)""#).unwrap());

const LAST_SYNC_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y/%m/%d %H:%M:%S %z",
];

const LAST_SYNC_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Queue description pulled out of a `Sync queues` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncQueueMatch {
    /// Source handler name (informational)
    pub handler: String,
    pub account_id: String,
    /// Owner description (informational)
    pub owner: String,
    pub last_sync: Option<DateTime<Utc>>,
    pub items: Vec<String>,
}

impl SyncQueueMatch {
    pub fn into_sync_queue(self) -> SyncQueue {
        SyncQueue::new(self.account_id, self.last_sync, self.items)
    }
}

/// Find every queue description in `value`, in order of appearance.
pub fn extract_sync_queues(value: &str) -> Vec<SyncQueueMatch> {
    SYNC_QUEUE_REGEX
        .captures_iter(value)
        .map(|caps| SyncQueueMatch {
            handler: caps["name"].to_string(),
            account_id: caps["account"].to_string(),
            owner: caps["owner"].trim().to_string(),
            last_sync: parse_last_sync(&caps["last"]),
            items: QUEUE_ITEM_REGEX
                .captures_iter(&caps["items"])
                .map(|item| unescape_item(&item[1]))
                .collect(),
        })
        .collect()
}

/// `\n` becomes a newline, any other backslash is dropped.
fn unescape_item(raw: &str) -> String {
    raw.replace("\\n", "\n").replace('\\', "")
}

/// Best-effort timestamp parse; anything unreadable counts as never synced.
pub(crate) fn parse_last_sync(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() || text == "(null)" {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in LAST_SYNC_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in LAST_SYNC_NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    warn!("unreadable last sync time {:?}, treating as never synced", text);
    None
}
