// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_ledger;
use crate::config::Settings;
use crate::engine::{ReconOutcome, ReconStats, reconcile};
use crate::utils::{format_amount, maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub const EMPTY_MESSAGE: &str = "Nenhuma transferência entre contas (saída e entrada correspondentes) foi encontrada no arquivo.";

pub fn handle(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let outcome = run(settings, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let printed = if jsonl_flag {
        let rows = match &outcome {
            ReconOutcome::Reconciled { summary, .. } => summary.clone(),
            ReconOutcome::NothingToReport { .. } => Vec::new(),
        };
        maybe_print_json(false, true, &rows)?
    } else {
        maybe_print_json(json_flag, false, &outcome)?
    };
    if printed {
        return Ok(());
    }

    if let Some(out) = sub.get_one::<String>("out") {
        let out = out.trim();
        let mut body = if outcome.is_empty() {
            EMPTY_MESSAGE.to_string()
        } else {
            outcome.lines().join("\n")
        };
        body.push('\n');
        std::fs::write(out, body).with_context(|| format!("Write report {}", out))?;
        println!("Wrote reconciliation report to {}", out);
    } else if outcome.is_empty() {
        println!("{}", EMPTY_MESSAGE);
    } else if sub.get_flag("table") {
        print_table(settings, &outcome);
    } else {
        for line in outcome.lines() {
            println!("{}", line);
        }
    }

    if sub.get_flag("stats") {
        println!("{}", stats_table(outcome.stats()));
    }
    Ok(())
}

/// Load the ledger named on the command line and run the full pipeline.
pub fn run(settings: &Settings, sub: &clap::ArgMatches) -> Result<ReconOutcome> {
    let table = load_ledger(settings, sub)?;
    Ok(reconcile(&table, settings)?)
}

fn print_table(settings: &Settings, outcome: &ReconOutcome) {
    let ReconOutcome::Reconciled { summary, .. } = outcome else {
        return;
    };
    let fmt = &settings.report;
    let rows: Vec<Vec<String>> = summary
        .iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                r.source_account.clone(),
                r.dest_account.clone(),
                format_amount(r.total, fmt.thousands_separator, fmt.decimal_separator),
            ]
        })
        .collect();
    let amount_header = format!("Amount ({})", fmt.currency_symbol);
    println!(
        "{}",
        pretty_table(&["Month", "From", "To", amount_header.as_str()], rows)
    );
}

pub fn stats_table(stats: &ReconStats) -> comfy_table::Table {
    let rows = vec![
        vec!["rows read".to_string(), stats.rows_read.to_string()],
        vec![
            "excluded (bad date)".to_string(),
            stats.excluded_bad_date.to_string(),
        ],
        vec![
            "excluded (bad amount)".to_string(),
            stats.excluded_bad_amount.to_string(),
        ],
        vec!["outgoing legs".to_string(), stats.outgoing_legs.to_string()],
        vec!["incoming legs".to_string(), stats.incoming_legs.to_string()],
        vec!["matched pairs".to_string(), stats.matched_pairs.to_string()],
    ];
    pretty_table(&["Stat", "Count"], rows)
}
