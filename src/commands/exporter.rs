// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::models::Transaction;

pub fn handle(transactions: &[Transaction], m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            export_transactions(transactions, &fmt, out)?;
            println!("Exported {} transactions to {}", transactions.len(), out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Oldest first, ties in stored order.
pub fn export_transactions(transactions: &[Transaction], fmt: &str, out: &str) -> Result<()> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Creating {}", out))?;
            wtr.write_record([
                "id", "date", "type", "description", "amount", "category", "source", "wallet",
                "tags",
            ])?;
            for t in rows {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_rfc3339(),
                    t.kind.to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.category.to_string(),
                    t.source.clone().unwrap_or_default(),
                    t.wallet.to_string(),
                    t.tags.iter().cloned().collect::<Vec<_>>().join(";"),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date, "type": t.kind, "description": t.description,
                        "amount": t.amount, "category": t.category, "source": t.source,
                        "wallet": t.wallet, "tags": t.tags
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Writing {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
