use log::{debug, trace};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use synclog_types::{Account, Calendar, ParsedLog};

use crate::builder::LogBuilder;
use crate::group::read_group;
use crate::segment::segment_entries;
use crate::sync_queue::extract_sync_queues;
use crate::verbose::{VerboseTarget, read_verbose_items};
use crate::{Error, Result};

/// `Label: value`, where the value runs to the end of the entry
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(?P<label>[^:]+):\s*(?P<value>.*)").unwrap());

/// Sections the parser understands, keyed by their entry label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    SystemVersion,
    Accounts,
    Calendars,
    SyncQueues,
    VerboseSources,
    VerboseCalendars,
}

impl Section {
    /// Exact, case-sensitive label match.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "System version" => Some(Self::SystemVersion),
            "Accounts" => Some(Self::Accounts),
            "Calendars" => Some(Self::Calendars),
            "Sync queues" => Some(Self::SyncQueues),
            "Verbose sources" => Some(Self::VerboseSources),
            "Verbose calendars" => Some(Self::VerboseCalendars),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SystemVersion => "System version",
            Self::Accounts => "Accounts",
            Self::Calendars => "Calendars",
            Self::SyncQueues => "Sync queues",
            Self::VerboseSources => "Verbose sources",
            Self::VerboseCalendars => "Verbose calendars",
        }
    }
}

/// Split an entry into its label and value.
fn split_label(entry: &str) -> Option<(&str, &str)> {
    let caps = LABEL_REGEX.captures(entry)?;
    let label = caps.name("label")?.as_str();
    let value = caps.name("value").map_or("", |m| m.as_str());
    Some((label, value))
}

/// Parse the full text of one log.
///
/// `source_id` is recorded as the log's origin. Either the whole log is
/// returned or the first structural error; never a partial model.
pub fn parse_log_str(text: &str, source_id: &str) -> Result<ParsedLog> {
    let segments = segment_entries(text);
    let mut entries = segments.entries;
    let mut builder = LogBuilder::new(source_id);
    builder.set_header_line(segments.header);

    while let Some(entry) = entries.pop_front() {
        let Some((label, value)) = split_label(entry) else {
            continue;
        };
        let Some(section) = Section::from_label(label) else {
            debug!("skipping entry labelled {:?}", label);
            continue;
        };
        trace!("reading section {:?}", section.label());

        match section {
            Section::SystemVersion => builder.set_system_version(value),
            Section::Accounts => {
                for item in read_group(&mut entries) {
                    let account = Account::from_log_entry(item).ok_or_else(|| {
                        Error::MalformedEntry {
                            section: section.label(),
                            entry: item.to_string(),
                        }
                    })?;
                    builder.insert_account(account);
                }
            }
            Section::Calendars => {
                for item in read_group(&mut entries) {
                    let calendar = Calendar::from_log_entry(item).ok_or_else(|| {
                        Error::MalformedEntry {
                            section: section.label(),
                            entry: item.to_string(),
                        }
                    })?;
                    builder.add_calendar(calendar)?;
                }
            }
            Section::SyncQueues => {
                for queue in extract_sync_queues(value) {
                    builder.attach_sync_queue(queue.into_sync_queue())?;
                }
            }
            Section::VerboseSources => {
                read_verbose_items(&mut entries, &mut builder, VerboseTarget::Accounts)?;
            }
            Section::VerboseCalendars => {
                read_verbose_items(&mut entries, &mut builder, VerboseTarget::Calendars)?;
            }
        }
    }

    Ok(builder.finish())
}

/// Read a log file in full and parse it; the path becomes the source id.
pub fn parse_log_file(path: &Path) -> Result<ParsedLog> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    parse_log_str(&text, &path.display().to_string())
}
