mod account;
mod calendar;
mod parsed_log;
mod sync_queue;

pub use account::Account;
pub use calendar::Calendar;
pub use parsed_log::ParsedLog;
pub use sync_queue::SyncQueue;

/// Split a group item into `count` trimmed comma-separated fields.
///
/// The last field swallows any remaining text. Returns `None` when fewer
/// than `count - 1` separators are present.
pub(crate) fn split_fields(entry: &str, count: usize) -> Option<Vec<&str>> {
    let fields: Vec<&str> = entry.trim().splitn(count, ',').map(str::trim).collect();
    if fields.len() < count - 1 {
        return None;
    }
    Some(fields)
}

/// Drop one pair of surrounding double quotes.
pub(crate) fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(field)
}
