// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use montra::insight::*;
use montra::models::{Category, Transaction, TransactionType, Wallet};
use rust_decimal::Decimal;

struct Canned(&'static str);

impl InsightProvider for Canned {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Broken;

impl InsightProvider for Broken {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("quota exceeded"))
    }
}

#[derive(Default)]
struct Recording {
    prompts: RefCell<Vec<String>>,
}

impl InsightProvider for Recording {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok("Nice saving streak! 💪".into())
    }
}

fn txs(n: usize) -> Vec<Transaction> {
    (0..n)
        .map(|i| Transaction {
            id: i.to_string(),
            description: format!("Latte {i}"),
            amount: Decimal::new(450, 2),
            kind: TransactionType::Expense,
            category: Category::Food,
            date: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            source: None,
            wallet: Wallet::Bank,
            tags: BTreeSet::new(),
        })
        .collect()
}

#[test]
fn no_transactions_means_no_call() {
    let rec = Recording::default();
    assert_eq!(financial_insight(Some(&rec), &[]), NO_DATA_MESSAGE);
    assert!(rec.prompts.borrow().is_empty());
}

#[test]
fn provider_failures_become_fixed_messages() {
    let data = txs(3);
    assert_eq!(financial_insight(Some(&Broken), &data), FAILURE_MESSAGE);
    assert_eq!(financial_insight(None, &data), FAILURE_MESSAGE);
    assert_eq!(financial_insight(Some(&Canned("  \n")), &data), EMPTY_REPLY_MESSAGE);
    assert_eq!(
        financial_insight(Some(&Canned("  Too many lattes ☕ ")), &data),
        "Too many lattes ☕"
    );
}

#[test]
fn payload_is_capped_and_compact() {
    let data = txs(80);
    let payload = insight_payload(&data);
    assert_eq!(payload.len(), MAX_INSIGHT_TRANSACTIONS);
    assert_eq!(payload[0].description, "Latte 0");

    let rec = Recording::default();
    assert_eq!(financial_insight(Some(&rec), &data), "Nice saving streak! 💪");
    let prompts = rec.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(r#""a":"#));
    assert!(prompts[0].contains(r#""c":"Food""#));
    assert!(prompts[0].contains(r#""t":"expense""#));
    assert!(prompts[0].contains("Latte 49"));
    assert!(!prompts[0].contains("Latte 50"));
    assert!(!prompts[0].contains(r#""s":"#));
}
