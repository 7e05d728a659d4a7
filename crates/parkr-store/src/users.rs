//! User accounts: upsert, GDPR redaction, strikes, credentials.

use parkr_shared::constants::{
    ACTION_DATA_PORTABILITY_EXPORT, ACTION_GDPR_FORGET_ME, ACTION_USER_REGISTERED, MAX_STRIKES,
    REDACTED_EMAIL_DOMAIN, REDACTED_NAME, USERS_KEY,
};

use crate::error::Result;
use crate::events::StoreEvent;
use crate::models::{same_email, AuditLog, User};
use crate::store::Store;

impl Store {
    pub fn get_users(&self) -> Vec<User> {
        self.collection(USERS_KEY)
    }

    pub fn find_user(&self, id: &str) -> Option<User> {
        self.get_users().into_iter().find(|u| u.id == id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.get_users()
            .into_iter()
            .find(|u| !u.email.is_empty() && same_email(&u.email, email))
    }

    /// Insert or merge `user`.
    ///
    /// The first stored record with the same id, or the same email ignoring
    /// case, absorbs the incoming values. Otherwise the user is appended and
    /// a `USER_REGISTERED` entry is written. Both [`StoreEvent::AuditUpdated`]
    /// and [`StoreEvent::UsersUpdated`] are emitted either way.
    pub fn save_user(&self, user: User) -> Result<()> {
        let mut users = self.get_users();

        let registered = match users.iter().position(|u| u.matches(&user)) {
            Some(idx) => {
                users[idx].merge_from(user);
                None
            }
            None => {
                let log = AuditLog::new(
                    ACTION_USER_REGISTERED,
                    format!(
                        "New account created: {} ({}) as {}.",
                        user.name, user.email, user.role
                    ),
                    user.id.clone(),
                )
                .with_target(user.id.clone());
                users.push(user);
                Some(log)
            }
        };

        self.set(USERS_KEY, &users)?;

        if let Some(log) = registered {
            self.add_log(log)?;
        }

        self.emit(StoreEvent::AuditUpdated);
        self.emit(StoreEvent::UsersUpdated);
        Ok(())
    }

    /// Redact a user's identifying fields in place.
    ///
    /// The record stays (so bookings, spaces and messages keep pointing at
    /// it) but name, email and avatar are replaced by placeholders, the
    /// credential and company details are cleared and the deleted flag is
    /// set. Returns `false` if no such user exists.
    pub fn anonymize_user(&self, user_id: &str, operator_id: &str) -> Result<bool> {
        let mut users = self.get_users();
        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            tracing::debug!(user_id, "anonymize: no such user");
            return Ok(false);
        };

        let original_email = std::mem::replace(
            &mut user.email,
            format!("deleted_{user_id}@{REDACTED_EMAIL_DOMAIN}"),
        );
        user.name = REDACTED_NAME.to_string();
        user.avatar = Some(String::new());
        user.password_hash = None;
        user.company_name = None;
        user.company_id = None;
        user.company_role = None;
        user.is_deleted = true;

        self.set(USERS_KEY, &users)?;

        self.add_log(
            AuditLog::new(
                ACTION_GDPR_FORGET_ME,
                format!("User {original_email} anonymized per GDPR request."),
                operator_id,
            )
            .with_target(user_id),
        )?;

        tracing::info!(user_id, operator_id, "user anonymized");
        self.emit(StoreEvent::UsersUpdated);
        Ok(true)
    }

    /// Add a strike to `user_id`, suspending the account once it reaches
    /// the limit. Returns the updated user.
    pub fn record_violation(&self, user_id: &str) -> Result<Option<User>> {
        let Some(mut user) = self.find_user(user_id) else {
            return Ok(None);
        };

        user.strikes += 1;
        if user.strikes >= MAX_STRIKES {
            user.is_suspended = true;
            tracing::info!(user_id, strikes = user.strikes, "user suspended");
        }

        self.save_user(user.clone())?;
        Ok(Some(user))
    }

    /// Pretty-printed JSON of the user's stored record, for a subject access
    /// request. The export itself is audited.
    pub fn export_user_data(&self, user_id: &str, operator_id: &str) -> Result<Option<String>> {
        let Some(mut user) = self.find_user(user_id) else {
            return Ok(None);
        };
        user.password_hash = None;

        let data = serde_json::to_string_pretty(&user)?;

        self.add_log(
            AuditLog::new(
                ACTION_DATA_PORTABILITY_EXPORT,
                format!("Full PII export generated for user {}", user.email),
                operator_id,
            )
            .with_target(user_id)
            .with_reason("User Access Request"),
        )?;

        Ok(Some(data))
    }

    /// Store a bcrypt hash of `password` for `user_id`.
    pub fn set_password(&self, user_id: &str, password: &str) -> Result<bool> {
        let Some(mut user) = self.find_user(user_id) else {
            return Ok(false);
        };

        user.password_hash = Some(bcrypt::hash(password, self.options().bcrypt_cost)?);
        self.save_user(user)?;
        Ok(true)
    }

    /// The active account matching `email` and `password`, if any.
    ///
    /// Deleted and suspended accounts never authenticate.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_user_by_email(email) else {
            return Ok(None);
        };
        if user.is_deleted || user.is_suspended {
            return Ok(None);
        }
        let Some(hash) = user.password_hash.as_deref() else {
            return Ok(None);
        };

        if bcrypt::verify(password, hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::store::StoreOptions;
    use parkr_shared::types::UserRole;

    fn parker(id: &str, email: &str) -> User {
        User::new(id, format!("User {id}"), email, UserRole::Parker)
    }

    fn fast_store() -> Store {
        let options = StoreOptions {
            bcrypt_cost: 4,
            ..StoreOptions::default()
        };
        Store::new(Box::new(MemoryBackend::new()), options)
    }

    #[test]
    fn upsert_by_id_replaces_in_place() {
        let store = Store::in_memory();
        store.save_user(parker("u1", "one@x.com")).unwrap();
        store.save_user(parker("u2", "two@x.com")).unwrap();

        let mut edited = parker("u1", "one@x.com");
        edited.name = "Renamed".into();
        store.save_user(edited).unwrap();

        let users = store.get_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[0].name, "Renamed");
        assert_eq!(store.logs_for_action(ACTION_USER_REGISTERED).len(), 2);
    }

    #[test]
    fn new_user_appends_and_registers_once() {
        let store = Store::in_memory();
        store.save_user(parker("u1", "one@x.com")).unwrap();
        let before = store.get_users().len();

        store.save_user(parker("u2", "two@x.com")).unwrap();

        assert_eq!(store.get_users().len(), before + 1);
        let registered: Vec<_> = store
            .logs_for_action(ACTION_USER_REGISTERED)
            .into_iter()
            .filter(|l| l.target_id.as_deref() == Some("u2"))
            .collect();
        assert_eq!(registered.len(), 1);
        assert!(registered[0].details.contains("two@x.com"));
        assert!(registered[0].details.contains("PARKER"));
    }

    #[test]
    fn email_match_is_case_insensitive() {
        let store = Store::in_memory();
        store.save_user(parker("u1", "A@x.com")).unwrap();
        store.save_user(parker("u9", "a@x.com")).unwrap();

        let users = store.get_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@x.com");
        assert_eq!(store.logs_for_action(ACTION_USER_REGISTERED).len(), 1);
    }

    #[test]
    fn email_match_folds_non_ascii_case() {
        let store = fast_store();
        store.save_user(parker("u1", "Émile@x.com")).unwrap();
        store.save_user(parker("u2", "émile@x.com")).unwrap();

        assert_eq!(store.get_users().len(), 1);
        assert!(store.find_user_by_email("ÉMILE@X.COM").is_some());

        store.set_password("u2", "mot de passe").unwrap();
        assert!(store.verify_credentials("Émile@x.com", "mot de passe").unwrap().is_some());
    }

    #[test]
    fn malformed_user_does_not_wipe_the_rest() {
        let store = Store::in_memory();
        store.save_user(parker("u1", "one@x.com")).unwrap();
        store.save_user(parker("u2", "two@x.com")).unwrap();

        let mut rows: Vec<serde_json::Value> = store.get(USERS_KEY, Vec::new());
        rows.push(serde_json::json!({
            "id": "u3",
            "name": "No Date",
            "email": "three@x.com",
            "type": "PARKER"
        }));
        store.set(USERS_KEY, &rows).unwrap();

        let ids = |store: &Store| -> Vec<String> {
            store.get_users().into_iter().map(|u| u.id).collect()
        };
        assert_eq!(ids(&store), vec!["u1", "u2"]);

        store.save_user(parker("u4", "four@x.com")).unwrap();
        assert_eq!(ids(&store), vec!["u1", "u2", "u4"]);
    }

    #[test]
    fn save_user_emits_audit_then_users() {
        let store = Store::in_memory();
        store.save_user(parker("u1", "one@x.com")).unwrap();

        let mut rx = store.subscribe();
        store.save_user(parker("u1", "one@x.com")).unwrap();

        assert_eq!(rx.try_recv(), Ok(StoreEvent::AuditUpdated));
        assert_eq!(rx.try_recv(), Ok(StoreEvent::UsersUpdated));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn anonymize_redacts_in_place() {
        let store = Store::in_memory();
        let mut user = parker("u1", "one@x.com");
        user.avatar = Some("face.png".into());
        store.save_user(user).unwrap();
        store.save_user(parker("u2", "two@x.com")).unwrap();

        assert!(store.anonymize_user("u1", "admin-1").unwrap());

        let users = store.get_users();
        assert_eq!(users.len(), 2);
        let redacted = &users[0];
        assert!(redacted.is_deleted);
        assert_eq!(redacted.name, REDACTED_NAME);
        assert_eq!(redacted.email, "deleted_u1@parkr.internal");
        assert_eq!(redacted.avatar.as_deref(), Some(""));

        let forget = store.logs_for_action(ACTION_GDPR_FORGET_ME);
        assert_eq!(forget.len(), 1);
        assert_eq!(forget[0].user_id, "admin-1");
        assert_eq!(forget[0].target_id.as_deref(), Some("u1"));
        assert!(forget[0].details.contains("one@x.com"));
    }

    #[test]
    fn anonymize_clears_credential_and_company() {
        let store = fast_store();
        let mut user = parker("u1", "one@x.com");
        user.is_corporate = Some(true);
        user.company_name = Some("Acme".into());
        user.company_id = Some("ACME-1".into());
        user.company_role = Some("Fleet Manager".into());
        store.save_user(user).unwrap();
        store.set_password("u1", "hunter22").unwrap();

        store.anonymize_user("u1", "admin-1").unwrap();

        let redacted = store.find_user("u1").unwrap();
        assert!(redacted.password_hash.is_none());
        assert!(redacted.company_name.is_none());
        assert!(redacted.company_id.is_none());
        assert!(redacted.company_role.is_none());
        assert_eq!(redacted.is_corporate, Some(true));
    }

    #[test]
    fn anonymize_unknown_user_is_noop() {
        let store = Store::in_memory();
        assert!(!store.anonymize_user("ghost", "admin").unwrap());
        assert!(store.get_logs().is_empty());
    }

    #[test]
    fn third_strike_suspends() {
        let store = Store::in_memory();
        store.save_user(parker("u1", "one@x.com")).unwrap();

        let first = store.record_violation("u1").unwrap().unwrap();
        assert_eq!(first.strikes, 1);
        assert!(!first.is_suspended);

        store.record_violation("u1").unwrap();
        let third = store.record_violation("u1").unwrap().unwrap();
        assert_eq!(third.strikes, 3);
        assert!(third.is_suspended);
        assert!(store.find_user("u1").unwrap().is_suspended);

        assert!(store.record_violation("ghost").unwrap().is_none());
    }

    #[test]
    fn export_is_audited_and_omits_hash() {
        let store = fast_store();
        store.save_user(parker("u1", "one@x.com")).unwrap();
        store.set_password("u1", "hunter22").unwrap();

        let data = store.export_user_data("u1", "admin-1").unwrap().unwrap();
        assert!(data.contains("one@x.com"));
        assert!(!data.contains("passwordHash"));

        let exports = store.logs_for_action(ACTION_DATA_PORTABILITY_EXPORT);
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].reason.as_deref(), Some("User Access Request"));

        assert!(store.export_user_data("ghost", "admin-1").unwrap().is_none());
    }

    #[test]
    fn credentials_round_trip() {
        let store = fast_store();
        store.save_user(parker("u1", "One@x.com")).unwrap();
        assert!(store.set_password("u1", "correct horse").unwrap());

        let stored = store.find_user("u1").unwrap();
        assert_ne!(stored.password_hash.as_deref(), Some("correct horse"));

        assert!(store.verify_credentials("one@X.com", "correct horse").unwrap().is_some());
        assert!(store.verify_credentials("one@x.com", "wrong").unwrap().is_none());
        assert!(store.verify_credentials("nobody@x.com", "correct horse").unwrap().is_none());

        store.anonymize_user("u1", "admin").unwrap();
        assert!(store
            .verify_credentials("deleted_u1@parkr.internal", "correct horse")
            .unwrap()
            .is_none());
    }
}
