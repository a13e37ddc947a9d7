use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

/// Start of a timestamped log line, including the newline(s) before it.
/// Example: "\n2023/06/01 08:00:00:123  "
static ENTRY_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+[0-9/]{10} {1,2}[0-9:.]{12}  ").unwrap());

/// Log text split at timestamp markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Text before the first marker (the whole text when there is none)
    pub header: &'a str,
    /// Entry bodies in log order, markers removed
    pub entries: VecDeque<&'a str>,
}

/// Split raw log text into a header and timestamp-delimited entries.
///
/// Entries can span lines; only a newline followed by a timestamp starts a
/// new one.
pub fn segment_entries(text: &str) -> Segments<'_> {
    let mut parts = ENTRY_MARKER_REGEX.split(text);
    let header = parts.next().unwrap_or_default();
    Segments {
        header,
        entries: parts.collect(),
    }
}
