// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn path_arg() -> Arg {
    Arg::new("path")
        .long("path")
        .short('p')
        .required(true)
        .help("Ledger file: CSV, or a workbook (.xlsx, .xls, .ods)")
}

fn delimiter_arg() -> Arg {
    Arg::new("delimiter")
        .long("delimiter")
        .short('d')
        .value_parser(clap::value_parser!(char))
        .help("CSV field delimiter (default from settings, ';')")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("transferclip")
        .version(crate_version!())
        .about("Reconcile inter-account transfers and summarize them per month")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Settings TOML file (default: platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(
            Command::new("reconcile")
                .about("Match transfer legs and print the monthly summary")
                .arg(path_arg())
                .arg(delimiter_arg())
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .conflicts_with_all(["json", "jsonl"])
                        .help("Write the rendered report to this file instead of stdout"),
                )
                .args(json_args())
                .arg(
                    Arg::new("table")
                        .long("table")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["json", "jsonl", "out"])
                        .help("Print summary rows as a table"),
                )
                .arg(
                    Arg::new("stats")
                        .long("stats")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["json", "jsonl"])
                        .help("Also print row and match counts"),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("List transfer legs that found no counterpart")
                .arg(path_arg())
                .arg(delimiter_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("settings")
                .about("Inspect settings")
                .subcommand(Command::new("show").about("Print effective settings as TOML"))
                .subcommand(Command::new("path").about("Print the default settings file path")),
        )
}
