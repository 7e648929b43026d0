// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Category;

/// Input rejected at the mutation boundary. Nothing is mutated or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount is required")]
    MissingAmount,
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Budget limit must be greater than zero (got {0})")]
    NonPositiveLimit(Decimal),
    #[error("{0} is an income category and cannot have a budget")]
    IncomeCategoryBudget(Category),
    #[error("Goal target must be greater than zero (got {0})")]
    NonPositiveTarget(Decimal),
    #[error("Saved amount cannot be negative (got {0})")]
    NegativeSavedAmount(Decimal),
    #[error("Goal name must not be blank")]
    BlankGoalName,
    #[error("Date {0} has no representable local noon")]
    InvalidDate(NaiveDate),
    #[error("Amount {0} is too large to track")]
    AmountOutOfRange(Decimal),
}

impl ValidationError {
    /// The form field the message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingAmount
            | ValidationError::NonPositiveAmount(_)
            | ValidationError::AmountOutOfRange(_) => "amount",
            ValidationError::NonPositiveLimit(_) => "limit",
            ValidationError::IncomeCategoryBudget(_) => "category",
            ValidationError::NonPositiveTarget(_) => "targetAmount",
            ValidationError::NegativeSavedAmount(_) => "currentAmount",
            ValidationError::BlankGoalName => "name",
            ValidationError::InvalidDate(_) => "date",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value for '{key}' is malformed: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("remote store answered {status} for '{key}'")]
    Remote { key: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
