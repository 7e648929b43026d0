// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{
    balance, daily_expense_series, recent_transactions, total_expense, total_income, DailyTotal,
};
use crate::insight::{financial_insight, InsightProvider};
use crate::ledger::Ledger;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub const SERIES_DAYS: usize = 7;
pub const RECENT_COUNT: usize = 5;

#[derive(Serialize)]
struct Summary {
    name: String,
    balance: Decimal,
    income: Decimal,
    expense: Decimal,
    last_7_days: Vec<DailyTotal>,
    recent: Vec<RecentRow>,
    insight: Option<String>,
}

#[derive(Serialize)]
struct RecentRow {
    date: String,
    description: String,
    category: String,
    kind: String,
    amount: Decimal,
}

pub fn handle(
    ledger: &Ledger,
    m: &clap::ArgMatches,
    provider: Option<&dyn InsightProvider>,
) -> Result<()> {
    let txs = ledger.transactions();
    let now = Local::now();
    let insight = if m.get_flag("no-insight") {
        None
    } else {
        Some(financial_insight(provider, txs))
    };
    let summary = Summary {
        name: ledger.settings().profile.name.clone(),
        balance: balance(txs),
        income: total_income(txs),
        expense: total_expense(txs),
        last_7_days: daily_expense_series(txs, SERIES_DAYS, &now),
        recent: recent_transactions(txs, RECENT_COUNT)
            .into_iter()
            .map(|t| RecentRow {
                date: t.date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
                description: t.description.clone(),
                category: t.category.to_string(),
                kind: t.kind.to_string(),
                amount: t.amount,
            })
            .collect(),
        insight,
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &summary)? {
        return Ok(());
    }

    let ccy = &ledger.settings().currency;
    if !summary.name.is_empty() {
        println!("Hi, {}!", summary.name);
    }
    println!(
        "{}",
        pretty_table(
            &["Balance", "Income", "Expense"],
            vec![vec![
                fmt_money(&summary.balance, ccy),
                fmt_money(&summary.income, ccy),
                fmt_money(&summary.expense, ccy),
            ]],
        )
    );
    let days = summary
        .last_7_days
        .iter()
        .map(|d| vec![format!("{} {}", d.label, d.day.format("%b %d")), fmt_money(&d.total, ccy)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], days));
    let recent = summary
        .recent
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.description.clone(),
                r.category.clone(),
                r.kind.clone(),
                fmt_money(&r.amount, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Type", "Amount"], recent)
    );
    if let Some(text) = &summary.insight {
        println!("{}", text);
    }
    Ok(())
}
