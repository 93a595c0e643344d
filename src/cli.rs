// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn limit_arg(default: Option<&'static str>) -> Arg {
    let a = Arg::new("limit")
        .long("limit")
        .value_parser(value_parser!(usize))
        .help("Show at most N rows");
    match default {
        Some(d) => a.default_value(d),
        None => a,
    }
}

fn order_cmd() -> Command {
    Command::new("order")
        .about("Customer orders")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a new order; the first line of the text names the customer")
                .arg(Arg::new("details").long("details").help("Full order text"))
                .arg(
                    Arg::new("file")
                        .long("file")
                        .help("Read the order text from a file"),
                )
                .group(
                    ArgGroup::new("source")
                        .args(["details", "file"])
                        .required(true),
                )
                .arg(
                    Arg::new("payment")
                        .long("payment")
                        .value_parser(["paid", "not-paid"])
                        .default_value("not-paid"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List orders, newest first")
                .arg(
                    Arg::new("status")
                        .long("status")
                        .value_parser(["pending", "completed"]),
                )
                .arg(limit_arg(None))
                .args(json_args()),
        )
        .subcommand(Command::new("show").arg(Arg::new("id").required(true)))
        .subcommand(
            Command::new("complete")
                .about("Deduct the order's items from stock and mark it completed")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("revert")
                .about("Move a completed order back to pending")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("print")
                .about("Print the job slip")
                .arg(Arg::new("id").required(true)),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Shop expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(Arg::new("note").long("note").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Most recent expenses")
                .arg(limit_arg(Some("10")))
                .args(json_args()),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly totals, newest month first")
                .args(json_args()),
        )
        .subcommand(
            Command::new("print")
                .about("Print one month's expense report")
                .arg(
                    Arg::new("month")
                        .required(true)
                        .help("YYYY-MM, or \"Legacy Data\""),
                ),
        )
}

fn stock_cmd() -> Command {
    Command::new("stock")
        .about("Workshop stock")
        .subcommand_required(true)
        .subcommand(Command::new("list").args(json_args()))
        .subcommand(
            Command::new("produce")
                .about("Add produced quantities to stock")
                .arg(
                    Arg::new("add")
                        .long("add")
                        .required(true)
                        .action(ArgAction::Append)
                        .value_name("ITEM=QTY"),
                ),
        )
}

pub fn build_cli() -> Command {
    Command::new("decora")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Order, expense, and stock tracker for a decor workshop")
        .subcommand(Command::new("init").about("Create the database and seed the stock catalog"))
        .subcommand(order_cmd())
        .subcommand(expense_cmd())
        .subcommand(stock_cmd())
        .subcommand(
            Command::new("dashboard")
                .about("Pending/completed order counts and total expenses")
                .args(json_args()),
        )
        .subcommand(
            Command::new("view")
                .about("Admin or workshop overview")
                .arg(
                    Arg::new("tab")
                        .value_parser(["admin", "workshop"])
                        .default_value("admin"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Shop settings")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("shop_name").long("shop-name"))
                        .arg(Arg::new("currency").long("currency")),
                ),
        )
}
