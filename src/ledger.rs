// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{LedgerError, ValidationError};
use crate::models::{
    Budget, Category, NewGoal, NewTransaction, SavingsGoal, State, Transaction, TransactionType,
    UserSettings,
};
use crate::store::{Change, Observer};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Owns the application state and is the only way to change it.
///
/// Each mutation is built on a copy of the state and handed to the observers
/// (normally a [`crate::store::RecordStore`]); the copy only becomes the
/// current state once every observer has accepted it. Rejected input and
/// failed writes leave the state untouched. Removing something that is
/// already gone is a no-op.
pub struct Ledger {
    state: State,
    observers: Vec<Box<dyn Observer>>,
}

impl Ledger {
    pub fn new(state: State) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.state.transactions.iter().find(|t| t.id == id)
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.state.budgets
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.state.goals
    }

    pub fn settings(&self) -> &UserSettings {
        &self.state.settings
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    fn commit(&mut self, next: State, changes: &[Change]) -> Result<()> {
        for change in changes {
            for obs in self.observers.iter_mut() {
                obs.state_changed(&next, *change)?;
            }
        }
        self.state = next;
        Ok(())
    }

    /// Totals per type must stay representable once `amount` joins them.
    fn check_running_total(
        &self,
        kind: TransactionType,
        amount: Decimal,
        replacing: Option<&str>,
    ) -> std::result::Result<(), ValidationError> {
        self.state
            .transactions
            .iter()
            .filter(|t| t.kind == kind && Some(t.id.as_str()) != replacing)
            .try_fold(amount, |acc, t| acc.checked_add(t.amount))
            .map(|_| ())
            .ok_or(ValidationError::AmountOutOfRange(amount))
    }

    /// Newest entries go first.
    pub fn add_transaction(&mut self, data: NewTransaction) -> Result<Transaction> {
        validate_amount(data.amount)?;
        self.check_running_total(data.kind, data.amount, None)?;
        let tx = data.with_id(Uuid::new_v4().to_string());
        let mut next = self.state.clone();
        next.transactions.insert(0, tx.clone());
        self.commit(next, &[Change::Transactions])?;
        tracing::info!(id = %tx.id, kind = %tx.kind, category = %tx.category, "transaction added");
        Ok(tx)
    }

    /// Replace a transaction wholesale, keeping its id. Returns `None` when
    /// the id is unknown.
    pub fn update_transaction(
        &mut self,
        id: &str,
        data: NewTransaction,
    ) -> Result<Option<Transaction>> {
        validate_amount(data.amount)?;
        self.check_running_total(data.kind, data.amount, Some(id))?;
        let Some(pos) = self.state.transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let updated = data.with_id(id.to_string());
        let mut next = self.state.clone();
        next.transactions[pos] = updated.clone();
        self.commit(next, &[Change::Transactions])?;
        tracing::info!(id, "transaction updated");
        Ok(Some(updated))
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        if self.transaction(id).is_none() {
            return Ok(false);
        }
        let mut next = self.state.clone();
        next.transactions.retain(|t| t.id != id);
        self.commit(next, &[Change::Transactions])?;
        tracing::info!(id, "transaction deleted");
        Ok(true)
    }

    /// Strip `tag` from every transaction. Returns how many were touched.
    pub fn remove_tag(&mut self, tag: &str) -> Result<usize> {
        let tag = tag.trim();
        let mut next = self.state.clone();
        let touched = next
            .transactions
            .iter_mut()
            .map(|t| t.tags.remove(tag))
            .filter(|removed| *removed)
            .count();
        if touched > 0 {
            self.commit(next, &[Change::Transactions])?;
            tracing::info!(tag, touched, "tag removed");
        }
        Ok(touched)
    }

    /// Insert or replace the budget for `budget.category`.
    pub fn save_budget(&mut self, budget: Budget) -> Result<()> {
        if budget.category.is_income() {
            return Err(ValidationError::IncomeCategoryBudget(budget.category).into());
        }
        if budget.limit <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveLimit(budget.limit).into());
        }
        let mut next = self.state.clone();
        match next
            .budgets
            .iter_mut()
            .find(|b| b.category == budget.category)
        {
            Some(existing) => *existing = budget.clone(),
            None => next.budgets.push(budget.clone()),
        }
        self.commit(next, &[Change::Budgets])?;
        tracing::info!(category = %budget.category, limit = %budget.limit, "budget saved");
        Ok(())
    }

    pub fn delete_budget(&mut self, category: Category) -> Result<bool> {
        if !self.state.budgets.iter().any(|b| b.category == category) {
            return Ok(false);
        }
        let mut next = self.state.clone();
        next.budgets.retain(|b| b.category != category);
        self.commit(next, &[Change::Budgets])?;
        tracing::info!(category = %category, "budget deleted");
        Ok(true)
    }

    pub fn add_goal(&mut self, data: NewGoal) -> Result<SavingsGoal> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankGoalName.into());
        }
        if data.target_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveTarget(data.target_amount).into());
        }
        if data.current_amount < Decimal::ZERO {
            return Err(ValidationError::NegativeSavedAmount(data.current_amount).into());
        }
        let goal = SavingsGoal {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            target_amount: data.target_amount,
            current_amount: data.current_amount,
            icon: data.icon,
        };
        let mut next = self.state.clone();
        next.goals.push(goal.clone());
        self.commit(next, &[Change::Goals])?;
        tracing::info!(id = %goal.id, icon = %goal.icon, "goal added");
        Ok(goal)
    }

    /// Add `amount` to a goal's saved total. Returns the updated goal, or
    /// `None` when the id is unknown.
    pub fn contribute_to_goal(&mut self, id: &str, amount: Decimal) -> Result<Option<SavingsGoal>> {
        validate_amount(amount)?;
        let Some(pos) = self.state.goals.iter().position(|g| g.id == id) else {
            return Ok(None);
        };
        let mut next = self.state.clone();
        let goal = &mut next.goals[pos];
        goal.current_amount = goal
            .current_amount
            .checked_add(amount)
            .ok_or(ValidationError::AmountOutOfRange(amount))?;
        let updated = goal.clone();
        self.commit(next, &[Change::Goals])?;
        tracing::info!(id, %amount, saved = %updated.current_amount, "goal contribution");
        Ok(Some(updated))
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<bool> {
        if !self.state.goals.iter().any(|g| g.id == id) {
            return Ok(false);
        }
        let mut next = self.state.clone();
        next.goals.retain(|g| g.id != id);
        self.commit(next, &[Change::Goals])?;
        tracing::info!(id, "goal deleted");
        Ok(true)
    }

    pub fn update_settings(&mut self, settings: UserSettings) -> Result<()> {
        let mut next = self.state.clone();
        next.settings = settings;
        self.commit(next, &[Change::Settings])
    }

    pub fn login(&mut self, name: &str) -> Result<()> {
        let mut next = self.state.clone();
        next.settings.profile.name = name.trim().to_string();
        next.authenticated = true;
        self.commit(next, &[Change::Settings, Change::Auth])
    }

    pub fn logout(&mut self) -> Result<()> {
        let mut next = self.state.clone();
        next.authenticated = false;
        self.commit(next, &[Change::Auth])
    }

    /// Wipe everything, including backing-store keys this app never wrote.
    pub fn reset_all(&mut self) -> Result<()> {
        self.commit(State::default(), &[Change::Reset])?;
        tracing::warn!("all data reset");
        Ok(())
    }
}

fn validate_amount(amount: Decimal) -> std::result::Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}
