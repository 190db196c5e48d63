// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const KINDS: [&str; 3] = ["income", "expense", "investment"];

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to work on (defaults to the current month)")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .required(true)
        .value_parser(KINDS)
        .help("Transaction category")
}

fn item_args() -> [Arg; 6] {
    [
        Arg::new("name").long("name").help("Description"),
        Arg::new("value").long("value").allow_hyphen_values(true).help("Realized amount"),
        Arg::new("planned").long("planned").help("Planned amount (expenses)"),
        Arg::new("date").long("date").value_name("YYYY-MM-DD").help("Due or purchase date"),
        Arg::new("type")
            .long("type")
            .help("Investment type: Reserva, Ações, FIIs, Renda Fixa or free text"),
        Arg::new("color").long("color").help("Item color, e.g. #04d361"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("fintec")
        .about("FinTec Pro: monthly income, expense and investment tracker")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Ledger database file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create or upgrade the local ledger"))
        .subcommand(
            Command::new("summary")
                .about("Totals, investment breakdown and chart series for a month")
                .arg(month_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions of a month")
                .subcommand(
                    Command::new("add")
                        .about("Add an income, expense or investment")
                        .arg(kind_arg())
                        .args(item_args())
                        .mut_arg("name", |a| a.required(true))
                        .mut_arg("value", |a| a.required(true))
                        .arg(month_arg()),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(KINDS)
                                .help("Only this category"),
                        )
                        .arg(month_arg())
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a transaction by id")
                        .arg(kind_arg())
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(u64)))
                        .arg(month_arg()),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; blank or zero values keep the current field")
                        .arg(kind_arg())
                        .arg(Arg::new("id").required(true).value_parser(value_parser!(u64)))
                        .args(item_args())
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Category colors and theme")
                .subcommand(Command::new("show").args(json_args()))
                .subcommand(
                    Command::new("color")
                        .about("Set a category color")
                        .arg(
                            Arg::new("category")
                                .required(true)
                                .value_parser(["income", "expense", "invest"]),
                        )
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(
                    Command::new("theme")
                        .about("Switch between dark and light")
                        .arg(Arg::new("theme").required(true).value_parser(["dark", "light"])),
                ),
        )
        .subcommand(
            Command::new("backup")
                .about("Exchange backup files")
                .subcommand(
                    Command::new("export")
                        .about("Write FinTec-Pro-Backup-<date>.json")
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .value_name("DIR")
                                .default_value(".")
                                .help("Directory to write the backup into"),
                        ),
                )
                .subcommand(
                    Command::new("import")
                        .about("Replace the ledger with a backup file")
                        .arg(Arg::new("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data in other formats")
                .subcommand(
                    Command::new("transactions")
                        .about("Export one month's transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .required(true)
                                .help("csv or json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .arg(month_arg()),
                ),
        )
        .subcommand(Command::new("save").about("Save the ledger locally"))
}
