// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::Utc;
use montra::cli;
use montra::commands::{budgets, dashboard, goals, settings};
use montra::db::MemoryBackend;
use montra::ledger::Ledger;
use montra::models::{
    Budget, Category, GoalIcon, NewTransaction, SavingsGoal, State, TransactionType, Wallet,
};
use montra::store::RecordStore;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn parse(argv: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["montra"];
    full.extend_from_slice(argv);
    cli::build_cli().get_matches_from(full)
}

/// Ledger loaded from an empty store, so starter budgets and goals are present.
fn setup() -> Ledger {
    let state = RecordStore::new(MemoryBackend::new()).load().unwrap();
    let mut ledger = Ledger::new(state);
    ledger
        .add_transaction(NewTransaction {
            description: "Trader Joe's".into(),
            amount: dec("42.10"),
            kind: TransactionType::Expense,
            category: Category::Groceries,
            date: Utc::now(),
            source: None,
            wallet: Wallet::Bank,
            tags: BTreeSet::new(),
        })
        .unwrap();
    ledger
}

#[test]
fn budget_set_then_list() {
    let mut ledger = setup();
    let m = parse(&["budget", "set", "--category", "Food", "--limit", "120"]);
    budgets::handle(&mut ledger, m.subcommand_matches("budget").unwrap()).unwrap();
    let food = ledger
        .budgets()
        .iter()
        .find(|b| b.category == Category::Food)
        .unwrap();
    assert_eq!(food.limit, dec("120"));

    let m = parse(&["budget", "list", "--json"]);
    budgets::handle(&mut ledger, m.subcommand_matches("budget").unwrap()).unwrap();
    let m = parse(&["budget", "list"]);
    budgets::handle(&mut ledger, m.subcommand_matches("budget").unwrap()).unwrap();
}

#[test]
fn budget_set_rejects_bad_input() {
    let mut ledger = setup();
    let before = ledger.budgets().to_vec();
    for argv in [
        ["budget", "set", "--category", "Scholarship", "--limit", "100"],
        ["budget", "set", "--category", "Food", "--limit", "0"],
        ["budget", "set", "--category", "Nope", "--limit", "10"],
    ] {
        let m = parse(&argv);
        assert!(budgets::handle(&mut ledger, m.subcommand_matches("budget").unwrap()).is_err());
    }
    assert_eq!(ledger.budgets(), &before[..]);
}

#[test]
fn budget_list_survives_invalid_stored_rows() {
    let state = State {
        budgets: vec![
            Budget {
                category: Category::Food,
                limit: Decimal::ZERO,
            },
            Budget {
                category: Category::Gift,
                limit: dec("50"),
            },
        ],
        goals: vec![SavingsGoal {
            id: "z".into(),
            name: "Broken".into(),
            target_amount: Decimal::ZERO,
            current_amount: dec("5"),
            icon: GoalIcon::Target,
        }],
        ..State::default()
    };
    let mut ledger = Ledger::new(state);
    let m = parse(&["budget", "list", "--json"]);
    budgets::handle(&mut ledger, m.subcommand_matches("budget").unwrap()).unwrap();
    let m = parse(&["goal", "list"]);
    goals::handle(&mut ledger, m.subcommand_matches("goal").unwrap()).unwrap();
}

#[test]
fn goal_add_contribute_and_list() {
    let mut ledger = setup();
    let m = parse(&["goal", "add", "--name", "New MacBook Pro", "--target", "2000"]);
    goals::handle(&mut ledger, m.subcommand_matches("goal").unwrap()).unwrap();
    let goal = ledger.goals().last().unwrap().clone();
    assert_eq!(goal.name, "New MacBook Pro");
    assert_eq!(goal.icon, GoalIcon::Tech);
    assert_eq!(goal.current_amount, Decimal::ZERO);

    let m = parse(&["goal", "contribute", "--id", goal.id.as_str(), "--amount", "250"]);
    goals::handle(&mut ledger, m.subcommand_matches("goal").unwrap()).unwrap();
    let saved = ledger.goals().iter().find(|g| g.id == goal.id).unwrap();
    assert_eq!(saved.current_amount, dec("250"));

    let m = parse(&["goal", "contribute", "--id", goal.id.as_str(), "--amount", "0"]);
    assert!(goals::handle(&mut ledger, m.subcommand_matches("goal").unwrap()).is_err());

    let m = parse(&["goal", "list", "--json"]);
    goals::handle(&mut ledger, m.subcommand_matches("goal").unwrap()).unwrap();

    let m = parse(&["goal", "rm", "--id", goal.id.as_str()]);
    goals::handle(&mut ledger, m.subcommand_matches("goal").unwrap()).unwrap();
    assert!(ledger.goals().iter().all(|g| g.id != goal.id));
}

#[test]
fn dashboard_renders_without_an_insight_provider() {
    let ledger = setup();
    for argv in [
        &["dashboard", "--no-insight", "--json"][..],
        &["dashboard", "--no-insight"][..],
        &["dashboard", "--jsonl"][..],
    ] {
        let m = parse(argv);
        dashboard::handle(&ledger, m.subcommand_matches("dashboard").unwrap(), None).unwrap();
    }
}

#[test]
fn settings_set_only_touches_given_fields() {
    let mut ledger = setup();
    let m = parse(&["settings", "set", "--currency", "€", "--dark", "true"]);
    settings::handle(&mut ledger, m.subcommand_matches("settings").unwrap()).unwrap();
    let s = ledger.settings();
    assert_eq!(s.currency, "€");
    assert!(s.is_dark_mode);
    assert_eq!(s.profile.year, "Freshman");

    let m = parse(&["settings", "show", "--json"]);
    settings::handle(&mut ledger, m.subcommand_matches("settings").unwrap()).unwrap();
}

#[test]
fn login_signs_in_and_blank_name_is_refused() {
    let mut ledger = setup();
    let m = parse(&["login", "--name", "   "]);
    assert!(settings::login(&mut ledger, m.subcommand_matches("login").unwrap()).is_err());
    assert!(!ledger.is_authenticated());

    let m = parse(&["login", "--name", "Sam"]);
    settings::login(&mut ledger, m.subcommand_matches("login").unwrap()).unwrap();
    assert!(ledger.is_authenticated());
    assert_eq!(ledger.settings().profile.name, "Sam");
}

#[test]
fn reset_needs_confirmation() {
    let mut ledger = setup();
    let before = ledger.state().clone();
    let m = parse(&["reset"]);
    assert!(settings::reset(&mut ledger, m.subcommand_matches("reset").unwrap()).is_err());
    assert_eq!(ledger.state(), &before);

    let m = parse(&["reset", "--yes"]);
    settings::reset(&mut ledger, m.subcommand_matches("reset").unwrap()).unwrap();
    assert_eq!(ledger.state(), &State::default());
}
