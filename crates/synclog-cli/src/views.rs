use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use synclog_types::{Account, ParsedLog};

/// Terminal styling, switched off when the stream is not a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn for_stdout() -> Self {
        Self {
            enabled: std::io::stdout().is_terminal(),
        }
    }

    pub fn for_stderr() -> Self {
        Self {
            enabled: std::io::stderr().is_terminal(),
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn good(&self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn render_log(log: &ParsedLog, palette: &Palette) -> String {
    let mut lines = vec![
        format!("{} {}", palette.heading("Source:        "), log.log_file),
        format!("{} {}", palette.heading("Header:        "), log.header_line),
        format!(
            "{} {}",
            palette.heading("System version:"),
            log.system_version.as_deref().unwrap_or("unknown")
        ),
        format!(
            "{} {} ({} calendars)",
            palette.heading("Accounts:      "),
            log.accounts.len(),
            log.calendar_count()
        ),
    ];

    for account in log.accounts.values() {
        lines.push(String::new());
        render_account(account, palette, &mut lines);
    }

    lines.join("\n")
}

fn render_account(account: &Account, palette: &Palette, lines: &mut Vec<String>) {
    lines.push(format!(
        "  {} {}",
        palette.heading(&account.name),
        palette.dim(&format!("[{}]", account.id))
    ));
    lines.push(format!("    Icon: {}", account.icon_url()));

    let sync = match &account.sync_queue {
        Some(queue) => {
            let status = match queue.last_sync {
                Some(at) => palette.good(&format!("synced {}", at.format("%Y-%m-%d %H:%M:%S UTC"))),
                None => palette.warning("never synced"),
            };
            format!("{}, {} queued items", status, queue.items.len())
        }
        None => palette.dim("no sync queue"),
    };
    lines.push(format!("    Sync: {}", sync));

    if account.calendars.is_empty() {
        lines.push(format!("    Calendars: {}", palette.dim("none")));
        return;
    }
    lines.push("    Calendars:".to_string());
    for calendar in account.calendars.values() {
        lines.push(format!(
            "      {} {} {}",
            calendar.title,
            palette.dim(&format!("[{}]", calendar.id)),
            calendar.color_hex()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synclog_types::{Calendar, ExtraData, SyncQueue};

    fn sample_log() -> ParsedLog {
        let mut log = ParsedLog::new("agent.log");
        log.header_line = "Calendar Agent diagnostics".to_string();

        let mut account = Account::new("iCloud", "acct-1");
        account.extra_data = ExtraData::from_value(serde_json::json!({
            "serverURL": "https://p12-caldav.icloud.com/",
        }));
        let mut calendar = Calendar::new("Work", "acct-1", "cal-1");
        calendar.extra_data = ExtraData::from_value(serde_json::json!({
            "color": "sRGB IEC61966-2.1 colorspace 1 0 0 1",
        }));
        account.add_calendar(calendar);
        account.sync_queue = Some(SyncQueue::new("acct-1", None, vec!["x".to_string()]));
        log.accounts.insert(account.id.clone(), account);

        let bare = Account::new("On My Mac", "local");
        log.accounts.insert(bare.id.clone(), bare);
        log
    }

    #[test]
    fn test_render_log_plain() {
        insta::assert_snapshot!(render_log(&sample_log(), &Palette::plain()), @r###"
        Source:         agent.log
        Header:         Calendar Agent diagnostics
        System version: unknown
        Accounts:       2 (1 calendars)

          iCloud [acct-1]
            Icon: https://icons.duckduckgo.com/ip3/icloud.com.ico
            Sync: never synced, 1 queued items
            Calendars:
              Work [cal-1] #FF0000

          On My Mac [local]
            Icon: https://icons.duckduckgo.com/ip3/example.com.ico
            Sync: no sync queue
            Calendars: none
        "###);
    }

    #[test]
    fn test_plain_palette_adds_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.heading("x"), "x");
        assert_eq!(palette.error("x"), "x");
        assert_eq!(palette.good("x"), "x");
    }
}
