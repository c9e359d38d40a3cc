// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ReportSettings;
use crate::models::{MonthBlock, MonthlySummaryRow, Report, ReportEntry};
use crate::utils::{format_amount, format_date, round_money};

pub const MONTH_SEPARATOR: &str = "---";

/// Months ascending; inside a month, source then destination, lexicographic.
pub fn build_report(mut rows: Vec<MonthlySummaryRow>, settings: &ReportSettings) -> Report {
    rows.sort_by(|a, b| {
        a.month
            .cmp(&b.month)
            .then_with(|| a.source_account.cmp(&b.source_account))
            .then_with(|| a.dest_account.cmp(&b.dest_account))
    });

    let mut months: Vec<MonthBlock> = Vec::new();
    for row in rows {
        let entry = ReportEntry {
            formatted: format_amount(
                row.total,
                settings.thousands_separator,
                settings.decimal_separator,
            ),
            total: round_money(row.total),
            source_account: row.source_account,
            dest_account: row.dest_account,
        };
        match months.last_mut() {
            Some(block) if block.month == row.month => block.entries.push(entry),
            _ => {
                let start = row.month.first_day().map(format_date).unwrap_or_default();
                let end = row.month.last_day().map(format_date).unwrap_or_default();
                months.push(MonthBlock {
                    month: row.month,
                    start,
                    end,
                    entries: vec![entry],
                });
            }
        }
    }

    Report {
        currency_symbol: settings.currency_symbol.clone(),
        months,
    }
}

pub fn month_heading(block: &MonthBlock) -> String {
    format!("### {} a {}", block.start, block.end)
}

pub fn entry_line(entry: &ReportEntry, currency_symbol: &str) -> String {
    format!(
        "- **Transferência de {} para {}:** {} {}",
        entry.source_account, entry.dest_account, currency_symbol, entry.formatted
    )
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Heading, one bullet per entry, separator; repeated per month.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for block in &self.months {
            out.push(month_heading(block));
            for entry in &block.entries {
                out.push(entry_line(entry, &self.currency_symbol));
            }
            out.push(MONTH_SEPARATOR.to_string());
        }
        out
    }
}
