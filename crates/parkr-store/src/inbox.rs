//! Simulated mail. Nothing leaves the process; messages land in the in-app
//! inbox instead.

use parkr_shared::constants::SYSTEM_MESSAGES_KEY;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::models::{same_email, SystemMessage};
use crate::store::Store;

impl Store {
    pub fn get_system_messages(&self) -> Vec<SystemMessage> {
        self.collection(SYSTEM_MESSAGES_KEY)
    }

    /// Messages addressed to `to`, compared ignoring case.
    pub fn inbox_for(&self, to: &str) -> Vec<SystemMessage> {
        self.get_system_messages()
            .into_iter()
            .filter(|m| same_email(&m.to, to))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.get_system_messages().iter().filter(|m| !m.read).count()
    }

    /// Append and announce [`StoreEvent::NewMail`].
    pub fn save_system_message(&self, message: SystemMessage) -> Result<()> {
        let mut all = self.get_system_messages();
        all.push(message);
        self.set(SYSTEM_MESSAGES_KEY, &all)?;
        self.emit(StoreEvent::NewMail);
        Ok(())
    }

    pub fn mark_all_read(&self) -> Result<()> {
        let mut all = self.get_system_messages();
        for m in &mut all {
            m.read = true;
        }
        self.set(SYSTEM_MESSAGES_KEY, &all)
    }
}
