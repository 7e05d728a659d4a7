//! Accounts provisioned ahead of time and redeemed with an invite code.

use chrono::Utc;

use parkr_shared::codes::{invite_code, new_record_id};
use parkr_shared::constants::{ACTION_ACCOUNT_INVITED, APP_NAME, PENDING_KEY};
use parkr_shared::types::UserRole;

use crate::error::Result;
use crate::models::{AuditLog, PendingAccount, SystemMessage};
use crate::store::Store;

impl Store {
    pub fn get_pending_accounts(&self) -> Vec<PendingAccount> {
        self.collection(PENDING_KEY)
    }

    pub fn save_pending_account(&self, account: PendingAccount) -> Result<()> {
        let mut all = self.get_pending_accounts();
        all.push(account);
        self.set(PENDING_KEY, &all)
    }

    /// Remove and return the pending account whose code equals `code`
    /// ignoring case. Each code redeems once.
    pub fn consume_pending_account(&self, code: &str) -> Result<Option<PendingAccount>> {
        let mut all = self.get_pending_accounts();
        let Some(idx) = all.iter().position(|a| a.code.eq_ignore_ascii_case(code)) else {
            return Ok(None);
        };

        let account = all.remove(idx);
        self.set(PENDING_KEY, &all)?;
        Ok(Some(account))
    }

    /// Provision an account for `email` and mail the invitee its code.
    pub fn issue_pending_account(
        &self,
        email: &str,
        name: &str,
        role: UserRole,
        created_by: &str,
    ) -> Result<PendingAccount> {
        let account = PendingAccount {
            code: invite_code(&mut rand::thread_rng()),
            email: email.to_string(),
            name: name.to_string(),
            role,
            created_by: created_by.to_string(),
        };
        self.save_pending_account(account.clone())?;

        self.save_system_message(SystemMessage {
            id: new_record_id(),
            to: email.to_string(),
            subject: format!("Your {APP_NAME} invitation"),
            body: format!(
                "Hello {name}, an account has been prepared for you as {role}. \
                 Use the code below to activate it."
            ),
            code: Some(account.code.clone()),
            timestamp: Utc::now(),
            read: false,
        })?;

        self.add_log(
            AuditLog::new(
                ACTION_ACCOUNT_INVITED,
                format!("Invite issued to {email} as {role}."),
                created_by,
            )
            .with_target(email),
        )?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(code: &str) -> PendingAccount {
        PendingAccount {
            code: code.into(),
            email: "new@x.com".into(),
            name: "New Hire".into(),
            role: UserRole::Team,
            created_by: "admin".into(),
        }
    }

    #[test]
    fn consume_once() {
        let store = Store::in_memory();
        store.save_pending_account(pending("ABCD2345")).unwrap();
        store.save_pending_account(pending("ZZZZ9999")).unwrap();

        let first = store.consume_pending_account("abcd2345").unwrap();
        assert_eq!(first, Some(pending("ABCD2345")));

        let second = store.consume_pending_account("ABCD2345").unwrap();
        assert_eq!(second, None);
        assert_eq!(store.get_pending_accounts().len(), 1);
    }

    #[test]
    fn partial_code_does_not_match() {
        let store = Store::in_memory();
        store.save_pending_account(pending("ABCD2345")).unwrap();
        assert_eq!(store.consume_pending_account("ABCD").unwrap(), None);
    }

    #[test]
    fn issue_delivers_code_to_inbox() {
        let store = Store::in_memory();
        let account = store
            .issue_pending_account("new@x.com", "New Hire", UserRole::Team, "admin")
            .unwrap();

        let inbox = store.inbox_for("new@x.com");
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].code.as_deref(), Some(account.code.as_str()));
        assert_eq!(store.logs_for_action(ACTION_ACCOUNT_INVITED).len(), 1);

        let redeemed = store.consume_pending_account(&account.code).unwrap().unwrap();
        assert_eq!(redeemed.email, "new@x.com");
    }
}
