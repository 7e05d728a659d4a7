//! # parkr
//!
//! Operator tool for a local Parkr store: seed accounts, inspect users and
//! the audit trail, honour GDPR requests and issue invites.

mod config;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parkr_store::{SqliteBackend, Store};

use crate::config::{Cli, CliConfig, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,parkr_store=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_cli(&cli);
    info!(?config, "Loaded configuration");

    let backend = match &config.db_path {
        Some(path) => SqliteBackend::open_at(path),
        None => SqliteBackend::open_default(),
    }
    .context("opening store")?;
    let store = Store::new(Box::new(backend), config.store_options());

    run(&store, cli.command)
}

fn run(store: &Store, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Seed => {
            store.seed_special_users()?;
            println!("{} users", store.get_users().len());
        }
        Command::Keys => {
            for key in store.backend().keys()? {
                println!("{key}");
            }
        }
        Command::Users => {
            let mut users = store.get_users();
            for u in &mut users {
                u.password_hash = None;
            }
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::Logs { limit } => {
            let logs: Vec<_> = store.get_logs().into_iter().take(limit).collect();
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
        Command::Forget { user_id, operator } => {
            if !store.anonymize_user(&user_id, &operator)? {
                anyhow::bail!("no user with id {user_id}");
            }
            println!("{user_id} anonymized");
        }
        Command::Export { user_id, operator } => {
            let data = store
                .export_user_data(&user_id, &operator)?
                .with_context(|| format!("no user with id {user_id}"))?;
            println!("{data}");
        }
        Command::Stats => {
            let stats = store.admin_stats(chrono::Utc::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Invite {
            email,
            name,
            role,
            operator,
        } => {
            let account = store.issue_pending_account(&email, &name, role, &operator)?;
            println!("{}", account.code);
        }
        Command::Redeem { code } => match store.consume_pending_account(&code)? {
            Some(account) => println!("{}", serde_json::to_string_pretty(&account)?),
            None => anyhow::bail!("invite code not found"),
        },
    }
    Ok(())
}
