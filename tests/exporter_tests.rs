// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::fs;

use chrono::{TimeZone, Utc};
use montra::commands::exporter::export_transactions;
use montra::models::{Category, Transaction, TransactionType, Wallet};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "new".into(),
            description: "Textbook, used".into(),
            amount: Decimal::new(3499, 2),
            kind: TransactionType::Expense,
            category: Category::Academics,
            date: Utc.with_ymd_and_hms(2025, 3, 12, 12, 0, 0).unwrap(),
            source: None,
            wallet: Wallet::Cash,
            tags: ["books".to_string(), "spring".to_string()].into_iter().collect(),
        },
        Transaction {
            id: "old".into(),
            description: "Grant".into(),
            amount: Decimal::from(500),
            kind: TransactionType::Income,
            category: Category::Scholarship,
            date: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            source: Some("Financial aid".into()),
            wallet: Wallet::Bank,
            tags: BTreeSet::new(),
        },
    ]
}

#[test]
fn json_export_is_oldest_first() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    export_transactions(&sample(), "json", out.to_str().unwrap()).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "old");
    assert_eq!(items[0]["source"], "Financial aid");
    assert_eq!(items[1]["type"], "expense");
    assert_eq!(items[1]["tags"][0], "books");
}

#[test]
fn csv_export_quotes_and_joins_tags() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    export_transactions(&sample(), "csv", out.to_str().unwrap()).unwrap();

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][3], "Textbook, used");
    assert_eq!(&rows[1][4], "34.99");
    assert_eq!(&rows[1][8], "books;spring");
    assert_eq!(&rows[0][6], "Financial aid");
}

#[test]
fn unknown_format_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.xml");
    assert!(export_transactions(&sample(), "xml", out.to_str().unwrap()).is_err());
    assert!(!out.exists());
}
