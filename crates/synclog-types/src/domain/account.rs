use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use url::Url;

use super::{Calendar, SyncQueue, split_fields, unquote};
use crate::ExtraData;

const DEFAULT_ICON: &str = "https://icons.duckduckgo.com/ip3/example.com.ico";

/// Registrable tail of a host name (`p12-caldav.icloud.com` -> `icloud.com`)
static DOMAIN_TAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*(\b[^.]+\....?)$").unwrap());

/// A calendar account, as listed in the `Accounts` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub calendars: BTreeMap<String, Calendar>,
    #[serde(default)]
    pub sync_queue: Option<SyncQueue>,
    #[serde(default)]
    pub extra_data: Option<ExtraData>,
}

impl Account {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            calendars: BTreeMap::new(),
            sync_queue: None,
            extra_data: None,
        }
    }

    /// Build an account from a group item of the form `name, id[, ...]`.
    ///
    /// Returns `None` when the id is missing or empty.
    pub fn from_log_entry(entry: &str) -> Option<Self> {
        let fields = split_fields(entry, 3)?;
        let id = fields[1];
        if id.is_empty() {
            return None;
        }
        Some(Self::new(unquote(fields[0]), id))
    }

    /// Insert (or replace) a calendar under its id.
    pub fn add_calendar(&mut self, calendar: Calendar) {
        self.calendars.insert(calendar.id.clone(), calendar);
    }

    pub fn calendar(&self, id: &str) -> Option<&Calendar> {
        self.calendars.get(id)
    }

    pub fn calendar_mut(&mut self, id: &str) -> Option<&mut Calendar> {
        self.calendars.get_mut(id)
    }

    /// Favicon of the account's server domain, derived from `serverURL`.
    pub fn icon_url(&self) -> String {
        let Some(server_url) = self
            .extra_data
            .as_ref()
            .and_then(|data| data.get_string_field("serverURL"))
        else {
            return DEFAULT_ICON.to_string();
        };

        let Some(host) = Url::parse(server_url.trim())
            .ok()
            .and_then(|url| url.host_str().map(str::to_owned))
        else {
            return DEFAULT_ICON.to_string();
        };

        let host = DOMAIN_TAIL_REGEX
            .captures(&host)
            .and_then(|caps| caps.get(1))
            .map_or(host.as_str(), |m| m.as_str());

        format!("https://icons.duckduckgo.com/ip3/{}.ico", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_server(url: serde_json::Value) -> Account {
        let mut account = Account::new("Work", "acct-1");
        account.extra_data = ExtraData::from_value(json!({ "serverURL": url }));
        account
    }

    #[test]
    fn test_from_log_entry_trims_fields() {
        let account = Account::from_log_entry("  Home ,  acct-1  ").unwrap();
        assert_eq!(account.name, "Home");
        assert_eq!(account.id, "acct-1");
        assert!(account.calendars.is_empty());
        assert!(account.sync_queue.is_none());
    }

    #[test]
    fn test_from_log_entry_ignores_trailing_fields() {
        let account = Account::from_log_entry("iCloud, 1A2B, enabled, extra, stuff").unwrap();
        assert_eq!(account.name, "iCloud");
        assert_eq!(account.id, "1A2B");
    }

    #[test]
    fn test_from_log_entry_strips_quotes_from_name() {
        let account = Account::from_log_entry("\"Home\", acct-1").unwrap();
        assert_eq!(account.name, "Home");
    }

    #[test]
    fn test_from_log_entry_requires_id() {
        assert!(Account::from_log_entry("Home").is_none());
        assert!(Account::from_log_entry("Home,   ").is_none());
        assert!(Account::from_log_entry("").is_none());
    }

    #[test]
    fn test_icon_url_uses_registrable_domain() {
        let account = with_server(json!("https://p12-caldav.icloud.com:443/1234/calendars/"));
        assert_eq!(
            account.icon_url(),
            "https://icons.duckduckgo.com/ip3/icloud.com.ico"
        );
    }

    #[test]
    fn test_icon_url_normalizes_host() {
        let account = with_server(json!("https://P12-CalDAV.iCloud.COM/x"));
        assert_eq!(
            account.icon_url(),
            "https://icons.duckduckgo.com/ip3/icloud.com.ico"
        );

        let account = with_server(json!("https://caldav.example.com%2Fevil/"));
        assert!(!account.icon_url().contains("%2F"));
    }

    #[test]
    fn test_icon_url_defaults() {
        assert_eq!(Account::new("a", "b").icon_url(), DEFAULT_ICON);
        assert_eq!(with_server(json!(42)).icon_url(), DEFAULT_ICON);
        assert_eq!(with_server(json!("not a url")).icon_url(), DEFAULT_ICON);
        assert_eq!(with_server(json!("mailto:me@icloud.com")).icon_url(), DEFAULT_ICON);
    }
}
