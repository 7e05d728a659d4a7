//! Built-in accounts every fresh install starts with.

use parkr_shared::types::UserRole;

use crate::error::Result;
use crate::models::User;
use crate::store::Store;

pub const COMPLIANCE_ADMIN_ID: &str = "system-root-primary";
pub const DEV_ADMIN_ID: &str = "admin-dev";
pub const DEMO_HOST_ID: &str = "user-theo-parkee";
const DEMO_HOST_NAME: &str = "Theo";

impl Store {
    /// Upsert the two operator accounts and create the demo host unless a
    /// user with its name already exists, so manual edits survive reseeding.
    ///
    /// Seeded accounts have no credential; set one with
    /// [`Store::set_password`].
    pub fn seed_special_users(&self) -> Result<()> {
        let demo_host_missing = !self.get_users().iter().any(|u| u.name == DEMO_HOST_NAME);

        let mut compliance = User::new(
            COMPLIANCE_ADMIN_ID,
            "Compliance Operations",
            "compliance@parkr.co.uk",
            UserRole::Admin,
        );
        compliance.verified = true;
        compliance.mfa_enabled = true;
        self.save_user(compliance)?;

        let mut dev = User::new(DEV_ADMIN_ID, "Developer Admin", "admin", UserRole::Admin);
        dev.verified = true;
        self.save_user(dev)?;

        if demo_host_missing {
            let mut theo = User::new(DEMO_HOST_ID, DEMO_HOST_NAME, "theo@example.com", UserRole::Parkee);
            theo.verified = true;
            self.save_user(theo)?;
        }

        tracing::info!(users = self.get_users().len(), "seeded built-in accounts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkr_shared::constants::ACTION_USER_REGISTERED;

    #[test]
    fn seeding_is_idempotent() {
        let store = Store::in_memory();
        store.seed_special_users().unwrap();
        store.seed_special_users().unwrap();

        let users = store.get_users();
        assert_eq!(users.len(), 3);
        assert_eq!(store.logs_for_action(ACTION_USER_REGISTERED).len(), 3);
        assert!(users.iter().all(|u| u.password_hash.is_none()));
    }

    #[test]
    fn edited_demo_host_is_preserved() {
        let store = Store::in_memory();
        store.seed_special_users().unwrap();

        let mut theo = store.find_user(DEMO_HOST_ID).unwrap();
        theo.strikes = 2;
        store.save_user(theo).unwrap();

        store.seed_special_users().unwrap();
        assert_eq!(store.find_user(DEMO_HOST_ID).unwrap().strikes, 2);
    }
}
