// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use montra::config::Config;
use montra::db::{Backend, MirroredBackend, RemoteBackend, SqliteBackend};
use montra::insight::{GeminiProvider, InsightProvider};
use montra::ledger::Ledger;
use montra::store::RecordStore;
use montra::{cli, commands};

fn open_backend(cfg: &Config) -> Result<Box<dyn Backend>> {
    let local = SqliteBackend::open(&cfg.db_path)?;
    match &cfg.sync_url {
        Some(url) => {
            tracing::info!(%url, "cloud sync enabled");
            Ok(Box::new(MirroredBackend::new(RemoteBackend::new(url)?, local)))
        }
        None => Ok(Box::new(local)),
    }
}

/// `--db` is global, so it may sit at any depth of the subcommand chain.
fn db_override(m: &clap::ArgMatches) -> Option<&String> {
    let mut found = m.get_one::<String>("db");
    let mut cur = m;
    while let Some((_, sub)) = cur.subcommand() {
        found = sub.get_one::<String>("db").or(found);
        cur = sub;
    }
    found
}

fn main() -> Result<()> {
    let mut cfg = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter)),
        )
        .init();

    let matches = cli::build_cli().get_matches();
    if let Some(path) = db_override(&matches) {
        cfg.db_path = PathBuf::from(path);
    }

    let store = RecordStore::new(open_backend(&cfg)?);
    let state = store
        .load()
        .with_context(|| format!("Loading data from {}", cfg.db_path.display()))?;
    let mut ledger = Ledger::new(state);
    ledger.subscribe(Box::new(store));

    let provider = match &cfg.insight_api_key {
        Some(key) => Some(GeminiProvider::new(key, &cfg.insight_model)?),
        None => None,
    };

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("tags", sub)) => commands::transactions::handle_tags(&mut ledger, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(
            &ledger,
            sub,
            provider.as_ref().map(|p| p as &dyn InsightProvider),
        )?,
        Some(("settings", sub)) => commands::settings::handle(&mut ledger, sub)?,
        Some(("login", sub)) => commands::settings::login(&mut ledger, sub)?,
        Some(("logout", _)) => {
            ledger.logout()?;
            println!("Signed out");
        }
        Some(("reset", sub)) => commands::settings::reset(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(ledger.transactions(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
