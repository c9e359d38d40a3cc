// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::load_ledger;
use crate::config::Settings;
use crate::engine::analyze;
use crate::models::{Direction, TransferLeg};
use crate::utils::{format_amount, format_date, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub excluded_rows: usize,
    pub unmatched: Vec<TransferLeg>,
}

pub fn handle(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let report = diagnose(settings, sub)?;

    let printed = if jsonl_flag {
        maybe_print_json(false, true, &report.unmatched)?
    } else {
        maybe_print_json(json_flag, false, &report)?
    };
    if printed {
        return Ok(());
    }

    if report.unmatched.is_empty() && report.excluded_rows == 0 {
        println!("✅ doctor: no issues found");
        return Ok(());
    }

    let fmt = &settings.report;
    let mut rows = Vec::new();
    if report.excluded_rows > 0 {
        rows.push(vec![
            "excluded_rows".into(),
            format!("{} row(s) with an unreadable date or amount", report.excluded_rows),
        ]);
    }
    for leg in &report.unmatched {
        let issue = match leg.direction {
            Direction::Outgoing => "unmatched_outgoing",
            Direction::Incoming => "unmatched_incoming",
        };
        rows.push(vec![
            issue.into(),
            format!(
                "row {}: {} {} {}",
                leg.row + 1,
                format_date(leg.date),
                leg.account,
                format_amount(leg.abs_amount, fmt.thousands_separator, fmt.decimal_separator)
            ),
        ]);
    }
    println!("{}", pretty_table(&["Issue", "Detail"], rows));
    Ok(())
}

/// Unmatched legs in input-row order, both directions interleaved.
pub fn diagnose(settings: &Settings, sub: &clap::ArgMatches) -> Result<DoctorReport> {
    let table = load_ledger(settings, sub)?;
    let analysis = analyze(&table, settings)?;
    let matches = analysis.matches;

    let mut unmatched = matches.unmatched_outgoing;
    unmatched.extend(matches.unmatched_incoming);
    unmatched.sort_by_key(|leg| leg.row);

    Ok(DoctorReport {
        excluded_rows: analysis.stats.excluded(),
        unmatched,
    })
}
