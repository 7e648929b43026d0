// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use chrono::Local;

use crate::aggregate::{budget_overview, BudgetStatus};
use crate::categorize::category_presentation;
use crate::ledger::Ledger;
use crate::models::{Budget, Category};
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("rm", sub)) => {
            let cat = parse_category(sub.get_one::<String>("category").unwrap())?;
            if ledger.delete_budget(cat)? {
                println!("Removed budget for {}", cat);
            } else {
                println!("No budget for {}", cat);
            }
        }
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_category(s: &str) -> Result<Category> {
    s.parse::<Category>().map_err(|e| anyhow!(e))
}

fn set(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let category = parse_category(sub.get_one::<String>("category").unwrap())?;
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    ledger.save_budget(Budget { category, limit })?;
    println!(
        "Budget set for {} = {}",
        category,
        fmt_money(&limit, &ledger.settings().currency)
    );
    Ok(())
}

fn status_label(s: BudgetStatus) -> &'static str {
    match s {
        BudgetStatus::OnTrack => "on track",
        BudgetStatus::NearLimit => "near limit",
        BudgetStatus::Exceeded => "exceeded",
    }
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let lines = budget_overview(ledger.budgets(), ledger.transactions(), &Local::now());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &lines)? {
        return Ok(());
    }
    let ccy = &ledger.settings().currency;
    let rows = lines
        .iter()
        .map(|l| {
            vec![
                format!("{} ({})", l.category, category_presentation(l.category).icon),
                fmt_money(&l.limit, ccy),
                fmt_money(&l.progress.spent, ccy),
                fmt_money(&l.progress.remaining, ccy),
                fmt_pct(&l.progress.percentage),
                status_label(l.progress.status).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Limit", "Spent", "Remaining", "Used", "Status"],
            rows
        )
    );
    Ok(())
}
