// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use crate::ledger::Ledger;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = ledger.settings();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
                let rows = vec![
                    vec!["currency".into(), s.currency.clone()],
                    vec!["theme".into(), s.theme.clone()],
                    vec!["dark mode".into(), s.is_dark_mode.to_string()],
                    vec!["name".into(), s.profile.name.clone()],
                    vec!["school".into(), s.profile.school.clone()],
                    vec!["year".into(), s.profile.year.clone()],
                    vec!["signed in".into(), ledger.is_authenticated().to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let mut s = ledger.settings().clone();
            if let Some(v) = sub.get_one::<String>("currency") {
                s.currency = v.trim().to_string();
            }
            if let Some(v) = sub.get_one::<String>("theme") {
                s.theme = v.trim().to_string();
            }
            if let Some(v) = sub.get_one::<bool>("dark") {
                s.is_dark_mode = *v;
            }
            if let Some(v) = sub.get_one::<String>("name") {
                s.profile.name = v.trim().to_string();
            }
            if let Some(v) = sub.get_one::<String>("school") {
                s.profile.school = v.trim().to_string();
            }
            if let Some(v) = sub.get_one::<String>("year") {
                s.profile.year = v.trim().to_string();
            }
            ledger.update_settings(s)?;
            println!("Settings updated");
        }
        _ => {}
    }
    Ok(())
}

pub fn login(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    let name = m.get_one::<String>("name").unwrap().trim();
    if name.is_empty() {
        bail!("Name must not be blank");
    }
    ledger.login(name)?;
    println!("Welcome, {}!", name);
    Ok(())
}

pub fn reset(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("Refusing to wipe all data without --yes");
    }
    ledger.reset_all()?;
    println!("All data cleared");
    Ok(())
}
