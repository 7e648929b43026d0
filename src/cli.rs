// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

/// Entry form fields. When `editing`, nothing is required or defaulted so
/// that omitted fields keep their stored values.
fn tx_fields(cmd: Command, editing: bool) -> Command {
    let kind = Arg::new("type").long("type").help("income|expense");
    let wallet = Arg::new("wallet").long("wallet").help("cash|bank");
    let (kind, wallet) = if editing {
        (kind, wallet)
    } else {
        (kind.default_value("expense"), wallet.default_value("bank"))
    };
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(!editing)
            .help("Positive amount, e.g. 12.50"),
    )
    .arg(kind)
    .arg(
        Arg::new("category")
            .long("category")
            .help("Category name, e.g. Food or \"Personal Care\""),
    )
    .arg(Arg::new("description").long("description").short('d'))
    .arg(
        Arg::new("date")
            .long("date")
            .help("Calendar day YYYY-MM-DD (default: today)"),
    )
    .arg(
        Arg::new("source")
            .long("source")
            .help("Where the income came from"),
    )
    .arg(wallet)
    .arg(
        Arg::new("tags")
            .long("tags")
            .help("Comma separated labels"),
    )
}

pub fn build_cli() -> Command {
    Command::new("montra")
        .about("Student money tracker: transactions, budgets, savings goals")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the data file (overrides MONTRA_DB)"),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add").about("Record a transaction"), false))
                .subcommand(
                    tx_fields(
                        Command::new("edit").about("Change fields of a transaction"),
                        true,
                    )
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(
                            Arg::new("asc")
                                .long("asc")
                                .action(ArgAction::SetTrue)
                                .help("Oldest first"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("tags")
                .about("Manage transaction tags")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a tag from every transaction")
                        .arg(Arg::new("tag").long("tag").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create or replace a budget")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Budgets with this month's spend"),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("icon")
                                .long("icon")
                                .help("Icon key; guessed from the name when omitted"),
                        ),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(
                    Command::new("suggest-icon").arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Balance, last 7 days and recent activity")
                .arg(
                    Arg::new("no-insight")
                        .long("no-insight")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(
            Command::new("settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("currency").long("currency"))
                        .arg(Arg::new("theme").long("theme"))
                        .arg(
                            Arg::new("dark")
                                .long("dark")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("school").long("school"))
                        .arg(Arg::new("year").long("year")),
                ),
        )
        .subcommand(
            Command::new("login").arg(Arg::new("name").long("name").required(true)),
        )
        .subcommand(Command::new("logout"))
        .subcommand(
            Command::new("reset").about("Delete all data").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm the wipe"),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
