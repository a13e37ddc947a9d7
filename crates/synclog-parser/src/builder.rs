use synclog_types::{Account, Calendar, ExtraData, ParsedLog, SyncQueue};

use crate::{Error, Result};

/// Owns the in-progress [`ParsedLog`] for a single parse.
///
/// Everything that refers to an account or calendar goes through a
/// lookup-or-fail accessor, so a dangling reference surfaces as an error
/// instead of a half-built model. The log is only handed out by
/// [`LogBuilder::finish`].
#[derive(Debug)]
pub struct LogBuilder {
    log: ParsedLog,
}

impl LogBuilder {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            log: ParsedLog::new(source_id),
        }
    }

    pub fn set_header_line(&mut self, header: impl Into<String>) {
        self.log.header_line = header.into();
    }

    pub fn set_system_version(&mut self, version: impl Into<String>) {
        self.log.system_version = Some(version.into());
    }

    /// Insert an account; a later account with the same id replaces it.
    pub fn insert_account(&mut self, account: Account) {
        self.log.accounts.insert(account.id.clone(), account);
    }

    pub fn account_mut(&mut self, section: &'static str, account_id: &str) -> Result<&mut Account> {
        self.log
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| Error::UnknownAccount {
                section,
                account_id: account_id.to_string(),
            })
    }

    pub fn calendar_mut(&mut self, account_id: &str, calendar_id: &str) -> Result<&mut Calendar> {
        self.account_mut("Verbose calendars", account_id)?
            .calendar_mut(calendar_id)
            .ok_or_else(|| Error::UnknownCalendar {
                account_id: account_id.to_string(),
                calendar_id: calendar_id.to_string(),
            })
    }

    pub fn add_calendar(&mut self, calendar: Calendar) -> Result<()> {
        self.account_mut("Calendars", &calendar.account_id)?
            .add_calendar(calendar);
        Ok(())
    }

    pub fn attach_sync_queue(&mut self, queue: SyncQueue) -> Result<()> {
        let account = self.account_mut("Sync queues", &queue.account_id)?;
        account.sync_queue = Some(queue);
        Ok(())
    }

    pub fn attach_account_data(&mut self, account_id: &str, data: ExtraData) -> Result<()> {
        self.account_mut("Verbose sources", account_id)?.extra_data = Some(data);
        Ok(())
    }

    pub fn attach_calendar_data(
        &mut self,
        account_id: &str,
        calendar_id: &str,
        data: ExtraData,
    ) -> Result<()> {
        self.calendar_mut(account_id, calendar_id)?.extra_data = Some(data);
        Ok(())
    }

    pub fn finish(self) -> ParsedLog {
        self.log
    }
}
