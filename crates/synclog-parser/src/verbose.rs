use log::trace;
use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;
use synclog_types::ExtraData;

use crate::builder::LogBuilder;
use crate::object_literal::decode_object_literal;
use crate::{Error, Result};

/// `<CalDAVSource: 0x7fd1c2a0> {` followed by the object literal body
static VERBOSE_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^<\w+:\s0x[0-9a-fA-F]+> (\{.*)").unwrap());

/// What the verbose entries describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerboseTarget {
    /// `Verbose sources`: one entry per account
    Accounts,
    /// `Verbose calendars`: one entry per calendar
    Calendars,
}

/// Object literal body of a verbose entry, if the entry is one.
pub fn verbose_body(entry: &str) -> Option<&str> {
    VERBOSE_ITEM_REGEX
        .captures(entry)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Consume the run of verbose entries at the front of `entries` and attach
/// each decoded object to its account or calendar.
///
/// Stops at the first entry that is not a verbose item and leaves it queued.
pub(crate) fn read_verbose_items(
    entries: &mut VecDeque<&str>,
    builder: &mut LogBuilder,
    target: VerboseTarget,
) -> Result<usize> {
    let mut count = 0;
    while let Some(body) = entries.front().copied().and_then(verbose_body) {
        entries.pop_front();

        let data = decode_extra_data(body)?;
        let id = required_field(&data, "identifier", body)?;

        match target {
            VerboseTarget::Accounts => builder.attach_account_data(&id, data)?,
            VerboseTarget::Calendars => {
                let account_id = required_field(&data, "sourceIdentifier", body)?;
                builder.attach_calendar_data(&account_id, &id, data)?;
            }
        }
        trace!("attached verbose data to {:?} {}", target, id);
        count += 1;
    }
    Ok(count)
}

fn decode_extra_data(body: &str) -> Result<ExtraData> {
    let value = decode_object_literal(body)?;
    ExtraData::from_value(value).ok_or_else(|| Error::NotAnObject {
        raw: body.to_string(),
    })
}

fn required_field(data: &ExtraData, field: &'static str, body: &str) -> Result<String> {
    data.identifier_field(field)
        .ok_or_else(|| Error::MissingField {
            field,
            raw: body.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use synclog_types::{Account, Calendar};

    const SOURCE_ITEM: &str = "<CalDAVSource: 0x7fd1c2a0> {\n    identifier = acct-1;\n    serverURL = https://p12-caldav.icloud.com/;\n}";
    const CALENDAR_ITEM: &str = "<CalDAVCalendar: 0x7fd1c3b0> {\n    identifier = cal-1;\n    sourceIdentifier = acct-1;\n    color = \"sRGB IEC61966-2.1 colorspace 1 0 0 1\";\n}";

    fn builder() -> LogBuilder {
        let mut builder = LogBuilder::new("test.log");
        let mut account = Account::new("iCloud", "acct-1");
        account.add_calendar(Calendar::new("Work", "acct-1", "cal-1"));
        builder.insert_account(account);
        builder
    }

    #[test]
    fn test_verbose_body() {
        assert!(verbose_body(SOURCE_ITEM).unwrap().starts_with("{\n    identifier"));
        assert_eq!(verbose_body("Calendars:"), None);
        assert_eq!(verbose_body("<Thing: 0xZZ> {}"), None);
        assert_eq!(verbose_body("<Thing: 0x1f>{}"), None);
    }

    #[test]
    fn test_reads_sources_until_non_matching_entry() {
        let mut entries = VecDeque::from(vec![SOURCE_ITEM, "Calendars:"]);
        let mut builder = builder();
        let count = read_verbose_items(&mut entries, &mut builder, VerboseTarget::Accounts).unwrap();

        assert_eq!(count, 1);
        assert_eq!(Vec::from(entries), vec!["Calendars:"]);
        let log = builder.finish();
        assert_eq!(
            log.accounts["acct-1"].icon_url(),
            "https://icons.duckduckgo.com/ip3/icloud.com.ico"
        );
    }

    #[test]
    fn test_reads_calendars() {
        let mut entries = VecDeque::from(vec![CALENDAR_ITEM]);
        let mut builder = builder();
        read_verbose_items(&mut entries, &mut builder, VerboseTarget::Calendars).unwrap();

        let log = builder.finish();
        assert_eq!(log.accounts["acct-1"].calendars["cal-1"].color_hex(), "#FF0000");
    }

    #[test]
    fn test_unknown_account_fails() {
        let item = "<CalDAVSource: 0x1> {\n    identifier = acct-9;\n}";
        let mut entries = VecDeque::from(vec![item]);
        let err = read_verbose_items(&mut entries, &mut builder(), VerboseTarget::Accounts)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAccount { .. }));
    }

    #[test]
    fn test_calendar_without_source_identifier_fails() {
        let item = "<CalDAVCalendar: 0x1> {\n    identifier = cal-1;\n}";
        let mut entries = VecDeque::from(vec![item]);
        let err = read_verbose_items(&mut entries, &mut builder(), VerboseTarget::Calendars)
            .unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "sourceIdentifier", .. }));
    }

    #[test]
    fn test_undecodable_literal_fails() {
        let item = "<CalDAVSource: 0x1> {\n    identifier = {{\n}";
        let mut entries = VecDeque::from(vec![item]);
        let err = read_verbose_items(&mut entries, &mut builder(), VerboseTarget::Accounts)
            .unwrap_err();
        assert!(matches!(err, Error::ObjectLiteral { .. }));
    }
}
