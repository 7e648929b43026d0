// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use montra::db::{Backend, MemoryBackend, MirroredBackend, SqliteBackend};
use montra::error::StoreError;
use montra::models::{Category, GoalIcon, TransactionType, UserSettings, Wallet};
use montra::store::*;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Backend whose every call fails, standing in for an unreachable server.
struct Offline;

impl Backend for Offline {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Remote {
            key: key.to_string(),
            status: 503,
        })
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Remote {
            key: key.to_string(),
            status: 503,
        })
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Err(StoreError::Remote {
            key: "*".into(),
            status: 503,
        })
    }
}

#[test]
fn empty_store_loads_defaults() {
    let store = RecordStore::new(MemoryBackend::new());
    let state = store.load().unwrap();
    assert!(state.transactions.is_empty());
    assert_eq!(state.budgets, starter_budgets());
    assert_eq!(state.goals, starter_goals());
    assert_eq!(state.settings, UserSettings::default());
    assert_eq!(state.settings.currency, "$");
    assert_eq!(state.settings.profile.year, "Freshman");
    assert!(!state.authenticated);

    let groceries = state
        .budgets
        .iter()
        .find(|b| b.category == Category::Groceries)
        .unwrap();
    assert_eq!(groceries.limit, dec("250"));
}

#[test]
fn corrupt_key_is_reported_by_name() {
    let mut backend = MemoryBackend::new();
    backend.set(GOALS_KEY, "{not json").unwrap();
    let err = RecordStore::new(backend).load().unwrap_err();
    match err {
        StoreError::Corrupt { key, .. } => assert_eq!(key, GOALS_KEY),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_shape_is_corrupt_too() {
    let mut backend = MemoryBackend::new();
    backend
        .set(TRANSACTIONS_KEY, r#"[{"id":"1","amount":"abc"}]"#)
        .unwrap();
    assert!(matches!(
        RecordStore::new(backend).load(),
        Err(StoreError::Corrupt { .. })
    ));
}

#[test]
fn legacy_records_are_migrated_on_load() {
    let mut backend = MemoryBackend::new();
    backend
        .set(
            TRANSACTIONS_KEY,
            r#"[
                {"id":"a","description":"Chipotle","amount":12.5,"type":"expense",
                 "category":"Food","date":"2025-03-01T12:00:00.000Z","wallet":"upi",
                 "tags":["lunch"]},
                {"id":"b","description":"Stipend","amount":300,"type":"income",
                 "category":"Income Source","date":"2025-03-02T12:00:00.000Z",
                 "source":"Campus job"},
                {"id":"c","description":"Bus","amount":"2.75","type":"expense",
                 "category":"Transportation","date":"2025-03-03T12:00:00.000Z","wallet":"cash"}
            ]"#,
        )
        .unwrap();
    backend
        .set(
            GOALS_KEY,
            r#"[
                {"id":"1","name":"Spring Break","targetAmount":1200,"currentAmount":450,"icon":"✈️"},
                {"id":"2","name":"Laptop","targetAmount":2000,"currentAmount":800,"icon":"💻"},
                {"id":"3","name":"Rainy day","targetAmount":500,"currentAmount":0,"icon":"🌧"},
                {"id":"4","name":"Camera","targetAmount":700,"currentAmount":10,"icon":"camera"}
            ]"#,
        )
        .unwrap();
    backend.set(AUTH_KEY, "true").unwrap();

    let state = RecordStore::new(backend).load().unwrap();
    let txs = &state.transactions;
    assert_eq!(txs[0].amount, dec("12.5"));
    assert_eq!(txs[0].wallet, Wallet::Bank);
    assert!(txs[0].tags.contains("lunch"));
    assert_eq!(txs[1].kind, TransactionType::Income);
    assert_eq!(txs[1].category, Category::IncomeSource);
    assert_eq!(txs[1].source.as_deref(), Some("Campus job"));
    assert_eq!(txs[1].wallet, Wallet::Bank);
    assert_eq!(txs[2].wallet, Wallet::Cash);

    let icons: Vec<GoalIcon> = state.goals.iter().map(|g| g.icon).collect();
    assert_eq!(
        icons,
        vec![GoalIcon::Travel, GoalIcon::Tech, GoalIcon::Target, GoalIcon::Camera]
    );
    assert!(state.authenticated);
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("montra.sqlite");

    let mut state = RecordStore::new(SqliteBackend::open(&path).unwrap())
        .load()
        .unwrap();
    state.settings.currency = "€".into();
    state.authenticated = true;
    state.budgets.truncate(2);
    {
        let mut store = RecordStore::new(SqliteBackend::open(&path).unwrap());
        store.persist(&state).unwrap();
    }

    let reopened = RecordStore::new(SqliteBackend::open(&path).unwrap())
        .load()
        .unwrap();
    assert_eq!(reopened, state);
}

#[test]
fn sqlite_clear_removes_every_key() {
    let mut backend = SqliteBackend::open_in_memory().unwrap();
    backend.set("montra.other", "1").unwrap();
    backend.set(AUTH_KEY, "true").unwrap();
    backend.set(AUTH_KEY, "false").unwrap();
    assert_eq!(backend.get(AUTH_KEY).unwrap().as_deref(), Some("false"));

    backend.clear().unwrap();
    assert!(backend.get("montra.other").unwrap().is_none());
    assert!(backend.get(AUTH_KEY).unwrap().is_none());
}

#[test]
fn reset_change_clears_then_writes_empty_state() {
    let mut backend = MemoryBackend::new();
    backend.set("montra.other", "1").unwrap();
    let mut store = RecordStore::new(backend);
    let empty = montra::models::State::default();
    store.persist_change(&empty, Change::Reset).unwrap();

    let keys: Vec<&str> = store.backend().keys().collect();
    assert!(!keys.contains(&"montra.other"));
    assert_eq!(store.load().unwrap(), empty);
}

#[test]
fn mirrored_backend_falls_back_to_local_when_offline() {
    let mut local = MemoryBackend::new();
    local.set(SETTINGS_KEY, r#"{"currency":"£","theme":"vibrant","isDarkMode":true}"#).unwrap();
    let store = RecordStore::new(MirroredBackend::new(Offline, local));

    let settings = store.load().unwrap().settings;
    assert_eq!(settings.currency, "£");
    assert!(settings.is_dark_mode);
    assert_eq!(settings.profile.year, "Freshman");

    let mut mirrored = store.into_inner();
    mirrored.set(AUTH_KEY, "true").unwrap();
    assert_eq!(mirrored.local().get(AUTH_KEY).unwrap().as_deref(), Some("true"));
    mirrored.clear().unwrap();
    assert!(mirrored.local().get(AUTH_KEY).unwrap().is_none());
}

#[test]
fn mirrored_backend_prefers_remote_copy() {
    let mut remote = MemoryBackend::new();
    remote.set(AUTH_KEY, "true").unwrap();
    let mut local = MemoryBackend::new();
    local.set(AUTH_KEY, "false").unwrap();
    local.set(SETTINGS_KEY, r#"{"currency":"₹","theme":"vibrant","isDarkMode":false}"#).unwrap();

    let store = RecordStore::new(MirroredBackend::new(remote, local));
    let state = store.load().unwrap();
    assert!(state.authenticated);
    // missing remotely, found locally
    assert_eq!(state.settings.currency, "₹");
}
