//! CLI configuration loaded from environment variables and flags.
//!
//! Every setting has a default so the tool runs with zero configuration.
//! Flags given on the command line win over the environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use parkr_shared::constants::LOG_RETENTION;
use parkr_shared::types::UserRole;
use parkr_store::StoreOptions;

#[derive(Parser, Debug)]
#[command(name = "parkr", about = "Inspect and administer a Parkr store", version)]
pub struct Cli {
    /// Path to the store file
    #[arg(long)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the built-in operator and demo accounts
    Seed,
    /// List the collections present in the store
    Keys,
    /// Print every user as JSON
    Users,
    /// Print the audit trail, newest first
    Logs {
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Redact a user's identifying fields
    Forget {
        user_id: String,
        #[arg(long)]
        operator: String,
    },
    /// Print a user's stored record for a subject access request
    Export {
        user_id: String,
        #[arg(long)]
        operator: String,
    },
    /// Marketplace totals and the last seven days of revenue
    Stats,
    /// Provision an account and mail its invite code
    Invite {
        email: String,
        name: String,
        #[arg(long, value_parser = parse_role)]
        role: UserRole,
        #[arg(long)]
        operator: String,
    },
    /// Redeem an invite code
    Redeem { code: String },
}

fn parse_role(s: &str) -> Result<UserRole, String> {
    s.parse().map_err(|e: parkr_shared::error::SharedError| e.to_string())
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Store file. `None` means the platform data directory.
    /// Env: `PARKR_DB_PATH`
    pub db_path: Option<PathBuf>,

    /// bcrypt work factor for new credentials.
    /// Env: `PARKR_BCRYPT_COST`
    /// Default: `12`
    pub bcrypt_cost: u32,

    /// Audit entries retained.
    /// Env: `PARKR_LOG_RETENTION`
    /// Default: `10000`
    pub log_retention: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            bcrypt_cost: StoreOptions::default().bcrypt_cost,
            log_retention: LOG_RETENTION,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("PARKR_DB_PATH") {
            if !path.is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("PARKR_BCRYPT_COST") {
            match val.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => config.bcrypt_cost = cost,
                _ => tracing::warn!(value = %val, "Invalid PARKR_BCRYPT_COST, using default"),
            }
        }

        if let Some(val) = lookup("PARKR_LOG_RETENTION") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.log_retention = n,
                _ => tracing::warn!(value = %val, "Invalid PARKR_LOG_RETENTION, using default"),
            }
        }

        config
    }

    /// Apply command-line overrides.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(db) = &cli.db {
            self.db_path = Some(db.clone());
        }
        self
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            log_retention: self.log_retention,
            bcrypt_cost: self.bcrypt_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::from_lookup(lookup(&[]));
        assert_eq!(config.db_path, None);
        assert_eq!(config.log_retention, 10_000);
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("PARKR_DB_PATH", "/tmp/parkr.db"),
            ("PARKR_BCRYPT_COST", "6"),
            ("PARKR_LOG_RETENTION", "500"),
        ]));
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/parkr.db")));
        assert_eq!(config.store_options().bcrypt_cost, 6);
        assert_eq!(config.store_options().log_retention, 500);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = CliConfig::from_lookup(lookup(&[
            ("PARKR_BCRYPT_COST", "99"),
            ("PARKR_LOG_RETENTION", "zero"),
        ]));
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.log_retention, 10_000);
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = Cli::parse_from(["parkr", "--db", "/data/other.db", "stats"]);
        let config = CliConfig::from_lookup(lookup(&[("PARKR_DB_PATH", "/tmp/parkr.db")])).with_cli(&cli);
        assert_eq!(config.db_path, Some(PathBuf::from("/data/other.db")));
    }

    #[test]
    fn test_parse_invite_role() {
        let cli = Cli::parse_from([
            "parkr", "invite", "new@x.com", "New Hire", "--role", "team", "--operator", "admin",
        ]);
        match cli.command {
            Command::Invite { role, .. } => assert_eq!(role, UserRole::Team),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
