//! Append-only audit trail, newest entry first.

use parkr_shared::constants::LOGS_KEY;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::models::AuditLog;
use crate::store::Store;

impl Store {
    /// Prepend `log`, drop everything past the retention cap, persist and
    /// announce [`StoreEvent::AuditUpdated`].
    pub fn add_log(&self, log: AuditLog) -> Result<()> {
        let mut logs: Vec<AuditLog> = self.collection(LOGS_KEY);
        tracing::debug!(action = %log.action, user = %log.user_id, "audit");

        logs.insert(0, log);
        logs.truncate(self.options().log_retention);

        self.set(LOGS_KEY, &logs)?;
        self.emit(StoreEvent::AuditUpdated);
        Ok(())
    }

    /// Audit trail, newest first.
    pub fn get_logs(&self) -> Vec<AuditLog> {
        self.collection(LOGS_KEY)
    }

    /// Entries recorded for one action, newest first.
    pub fn logs_for_action(&self, action: &str) -> Vec<AuditLog> {
        self.get_logs()
            .into_iter()
            .filter(|l| l.action == action)
            .collect()
    }
}
