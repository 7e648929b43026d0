// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::aggregate::{all_tags, filter_transactions, SortOrder, TransactionQuery};
use crate::ledger::Ledger;
use crate::models::{Category, NewTransaction, Transaction, TransactionDraft, TransactionType, Wallet};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_list, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if ledger.delete_transaction(id)? {
                println!("Deleted transaction {}", id);
            } else {
                println!("No transaction with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_tags(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let tags: Vec<String> = all_tags(ledger.transactions()).into_iter().collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tags)? {
                let rows = tags.into_iter().map(|t| vec![t]).collect();
                println!("{}", pretty_table(&["Tag"], rows));
            }
        }
        Some(("rm", sub)) => {
            let tag = sub.get_one::<String>("tag").unwrap();
            let n = ledger.remove_tag(tag)?;
            println!("Removed tag '{}' from {} transaction(s)", tag.trim(), n);
        }
        _ => {}
    }
    Ok(())
}

/// Read the entry form arguments. The category defaults by type: Income for
/// income, Food for expenses.
pub fn draft_from_args<Tz: TimeZone>(
    sub: &clap::ArgMatches,
    now: &DateTime<Tz>,
) -> Result<TransactionDraft> {
    let kind: TransactionType = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or(TransactionType::Expense);
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.parse::<Category>().map_err(|e| anyhow!(e))?,
        None if kind == TransactionType::Income => Category::Income,
        None => Category::Food,
    };
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let day = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => now.date_naive(),
    };
    let wallet = sub
        .get_one::<String>("wallet")
        .map(|s| s.parse::<Wallet>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    Ok(TransactionDraft {
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        amount,
        kind,
        category,
        day,
        source: sub.get_one::<String>("source").cloned(),
        wallet,
        tags: sub
            .get_one::<String>("tags")
            .map(|s| parse_list(s))
            .unwrap_or_default(),
    })
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let now = Local::now();
    let draft = draft_from_args(sub, &now)?;
    let new = draft.finalize(&now)?;
    let tx = ledger.add_transaction(new)?;
    println!(
        "Recorded {} {} '{}' ({}) id={}",
        tx.kind,
        fmt_money(&tx.amount, &ledger.settings().currency),
        tx.description,
        tx.category,
        tx.id
    );
    Ok(())
}

/// Overlay the arguments the user passed on top of a stored transaction.
/// The date is kept as stored unless `--date` is given.
pub fn edit_from_args<Tz: TimeZone>(
    existing: &Transaction,
    sub: &clap::ArgMatches,
    now: &DateTime<Tz>,
) -> Result<NewTransaction> {
    let kind = match sub.get_one::<String>("type") {
        Some(s) => s.parse::<TransactionType>().map_err(|e| anyhow!(e))?,
        None => existing.kind,
    };
    let category = match sub.get_one::<String>("category") {
        Some(c) => c.parse::<Category>().map_err(|e| anyhow!(e))?,
        None => existing.category,
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => existing.amount,
    };
    let wallet = match sub.get_one::<String>("wallet") {
        Some(s) => s.parse::<Wallet>().map_err(|e| anyhow!(e))?,
        None => existing.wallet,
    };
    let day = sub
        .get_one::<String>("date")
        .map(|d| parse_date(d))
        .transpose()?;

    let draft = TransactionDraft {
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_else(|| existing.description.clone()),
        amount: Some(amount),
        kind,
        category,
        day: day.unwrap_or_else(|| existing.date.with_timezone(&now.timezone()).date_naive()),
        source: sub
            .get_one::<String>("source")
            .cloned()
            .or_else(|| existing.source.clone()),
        wallet,
        tags: match sub.get_one::<String>("tags") {
            Some(s) => parse_list(s),
            None => existing.tags.iter().cloned().collect(),
        },
    };
    let mut new = draft.finalize(now)?;
    if day.is_none() {
        new.date = existing.date;
    }
    Ok(new)
}

fn edit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    let Some(existing) = ledger.transaction(&id) else {
        println!("No transaction with id {}", id);
        return Ok(());
    };
    let new = edit_from_args(existing, sub, &Local::now())?;
    if let Some(tx) = ledger
        .update_transaction(&id, new)
        .with_context(|| format!("Updating transaction {}", id))?
    {
        println!("Updated {} '{}'", tx.id, tx.description);
    }
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.wallet.clone(),
                    r.tags.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Description", "Amount", "Category", "Wallet", "Tags", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub wallet: String,
    pub tags: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let query = TransactionQuery {
        search: sub.get_one::<String>("search").cloned().unwrap_or_default(),
        kind: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<TransactionType>())
            .transpose()
            .map_err(|e| anyhow!(e))?,
        order: if sub.get_flag("asc") {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        },
    };
    let mut found = filter_transactions(ledger.transactions(), &query);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        found.truncate(*limit);
    }
    let ccy = &ledger.settings().currency;
    Ok(found
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            kind: t.kind.to_string(),
            description: t.description.clone(),
            amount: fmt_money(&t.amount, ccy),
            category: t.category.to_string(),
            wallet: t.wallet.to_string(),
            tags: t.tags.iter().cloned().collect::<Vec<_>>().join(", "),
        })
        .collect())
}
