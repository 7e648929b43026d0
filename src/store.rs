// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::db::Backend;
use crate::error::StoreError;
use crate::migrate::{self, Migration};
use crate::models::{Budget, Category, GoalIcon, SavingsGoal, State};

pub const TRANSACTIONS_KEY: &str = "montra.transactions";
pub const BUDGETS_KEY: &str = "montra.budgets";
pub const GOALS_KEY: &str = "montra.goals";
pub const SETTINGS_KEY: &str = "montra.settings";
pub const AUTH_KEY: &str = "montra.auth";

/// Which part of the state a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Transactions,
    Budgets,
    Goals,
    Settings,
    Auth,
    /// Everything was wiped; the backing store must be cleared too.
    Reset,
}

/// Notified by the ledger after every successful mutation.
pub trait Observer {
    fn state_changed(&mut self, state: &State, change: Change) -> Result<(), StoreError>;
}

pub fn starter_budgets() -> Vec<Budget> {
    [
        (Category::Utilities, 150),
        (Category::Shopping, 200),
        (Category::Groceries, 250),
        (Category::Transportation, 80),
        (Category::PersonalCare, 50),
    ]
    .into_iter()
    .map(|(category, limit)| Budget {
        category,
        limit: Decimal::from(limit),
    })
    .collect()
}

pub fn starter_goals() -> Vec<SavingsGoal> {
    vec![
        SavingsGoal {
            id: "1".into(),
            name: "Spring Break '25".into(),
            target_amount: Decimal::from(1200),
            current_amount: Decimal::from(450),
            icon: GoalIcon::Travel,
        },
        SavingsGoal {
            id: "2".into(),
            name: "New MacBook Pro".into(),
            target_amount: Decimal::from(2000),
            current_amount: Decimal::from(800),
            icon: GoalIcon::Tech,
        },
    ]
}

/// Loads and persists [`State`] against a key-value [`Backend`].
pub struct RecordStore<B> {
    backend: B,
}

impl<B: Backend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Missing keys fall back to their documented defaults. A key that is
    /// present but unparseable is an error naming that key.
    pub fn load(&self) -> Result<State, StoreError> {
        let transactions = self
            .read(TRANSACTIONS_KEY, migrate::TRANSACTION_MIGRATIONS)?
            .unwrap_or_default();
        let budgets = self.read(BUDGETS_KEY, &[])?.unwrap_or_else(starter_budgets);
        let goals = self
            .read(GOALS_KEY, migrate::GOAL_MIGRATIONS)?
            .unwrap_or_else(starter_goals);
        let settings = self.read(SETTINGS_KEY, &[])?.unwrap_or_default();
        let authenticated = self
            .backend
            .get(AUTH_KEY)?
            .is_some_and(|v| v.trim() == "true");

        let state = State {
            transactions,
            budgets,
            goals,
            settings,
            authenticated,
        };
        tracing::debug!(
            transactions = state.transactions.len(),
            budgets = state.budgets.len(),
            goals = state.goals.len(),
            "state loaded"
        );
        Ok(state)
    }

    /// Write every key.
    pub fn persist(&mut self, state: &State) -> Result<(), StoreError> {
        for change in [
            Change::Transactions,
            Change::Budgets,
            Change::Goals,
            Change::Settings,
            Change::Auth,
        ] {
            self.persist_change(state, change)?;
        }
        Ok(())
    }

    pub fn persist_change(&mut self, state: &State, change: Change) -> Result<(), StoreError> {
        match change {
            Change::Transactions => self.write(TRANSACTIONS_KEY, &state.transactions),
            Change::Budgets => self.write(BUDGETS_KEY, &state.budgets),
            Change::Goals => self.write(GOALS_KEY, &state.goals),
            Change::Settings => self.write(SETTINGS_KEY, &state.settings),
            Change::Auth => {
                let flag = if state.authenticated { "true" } else { "false" };
                self.backend.set(AUTH_KEY, flag)
            }
            Change::Reset => {
                self.backend.clear()?;
                self.persist(state)
            }
        }
    }

    fn read<T: DeserializeOwned>(
        &self,
        key: &str,
        migrations: &[Migration],
    ) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        let corrupt = |source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        };
        let mut value: Value = serde_json::from_str(&raw).map_err(corrupt)?;
        let migrated = migrate::apply(&mut value, migrations);
        if migrated > 0 {
            tracing::info!(key, migrated, "migrated legacy records");
        }
        serde_json::from_value(value).map(Some).map_err(corrupt)
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        tracing::debug!(key, bytes = json.len(), "persisting");
        self.backend.set(key, &json)
    }
}

impl<B: Backend> Observer for RecordStore<B> {
    fn state_changed(&mut self, state: &State, change: Change) -> Result<(), StoreError> {
        self.persist_change(state, change)
    }
}

impl<O: Observer> Observer for Rc<RefCell<O>> {
    fn state_changed(&mut self, state: &State, change: Change) -> Result<(), StoreError> {
        self.borrow_mut().state_changed(state, change)
    }
}
