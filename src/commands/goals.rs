// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use crate::aggregate::goal_overview;
use crate::categorize::suggest_goal_icon;
use crate::ledger::Ledger;
use crate::models::{GoalIcon, NewGoal};
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("contribute", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            match ledger.contribute_to_goal(id, amount)? {
                Some(g) => println!(
                    "Saved {} towards '{}' (now {})",
                    fmt_money(&amount, &ledger.settings().currency),
                    g.name,
                    fmt_money(&g.current_amount, &ledger.settings().currency)
                ),
                None => println!("No goal with id {}", id),
            }
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            if ledger.delete_goal(id)? {
                println!("Deleted goal {}", id);
            } else {
                println!("No goal with id {}", id);
            }
        }
        Some(("suggest-icon", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            println!("{}", suggest_goal_icon(name));
        }
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().to_string();
    let target_amount = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let icon = match sub.get_one::<String>("icon") {
        Some(k) => k.parse::<GoalIcon>().map_err(|e| anyhow!(e))?,
        None => suggest_goal_icon(&name),
    };
    let goal = ledger.add_goal(NewGoal {
        name,
        target_amount,
        current_amount: Decimal::ZERO,
        icon,
    })?;
    println!(
        "Added goal '{}' [{}] target {} id={}",
        goal.name,
        goal.icon,
        fmt_money(&goal.target_amount, &ledger.settings().currency),
        goal.id
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let data = goal_overview(ledger.goals());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = &ledger.settings().currency;
    let rows = data
        .iter()
        .map(|l| {
            vec![
                l.goal.name.clone(),
                l.goal.icon.to_string(),
                fmt_money(&l.goal.current_amount, ccy),
                fmt_money(&l.goal.target_amount, ccy),
                fmt_pct(&l.progress.percentage),
                if l.progress.is_completed {
                    "completed".to_string()
                } else {
                    format!("{} left", fmt_money(&l.progress.remaining, ccy))
                },
                l.goal.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Goal", "Icon", "Saved", "Target", "Progress", "Status", "Id"],
            rows
        )
    );
    Ok(())
}
