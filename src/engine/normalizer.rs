// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ColumnMap;
use crate::error::ReconError;
use crate::models::{NormalizedRecord, RawAmount, RawCell, RawRecord, RawTable};
use crate::utils::{LEDGER_DATE_FORMAT, parse_plain_decimal};
use chrono::NaiveDate;
use rust_decimal::Decimal;

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    BadDate,
    BadAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub records: Vec<NormalizedRecord>,
    pub rows_read: usize,
    pub bad_date: usize,
    pub bad_amount: usize,
}

/// Positions of the required fields in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub amount: usize,
    pub category: usize,
    pub account: usize,
}

impl ColumnIndex {
    pub fn resolve(headers: &[String], columns: &ColumnMap) -> Result<Self, ReconError> {
        let mut missing = Vec::new();
        let mut locate = |name: &str| match headers.iter().position(|h| h == name) {
            Some(i) => i,
            None => {
                missing.push(name.to_string());
                0
            }
        };
        let index = ColumnIndex {
            date: locate(&columns.date),
            amount: locate(&columns.amount),
            category: locate(&columns.category),
            account: locate(&columns.account),
        };
        if missing.is_empty() {
            Ok(index)
        } else {
            Err(ReconError::Schema { missing })
        }
    }

    pub fn view<'a>(&self, row: usize, cells: &'a [RawCell]) -> RawRecord<'a> {
        let cell = |i: usize| cells.get(i).unwrap_or(&EMPTY_CELL);
        RawRecord {
            row,
            date: cell(self.date),
            amount: cell(self.amount),
            category: cell(self.category),
            account: cell(self.account),
        }
    }
}

/// `d/m/yyyy`: one or two digit day and month, exactly four digit year.
/// chrono alone would take `01/03/24` as year 24.
fn has_ledger_date_shape(s: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    match s.split('/').collect::<Vec<_>>().as_slice() {
        [d, m, y] => digits(d, 1, 2) && digits(m, 1, 2) && digits(y, 4, 4),
        _ => false,
    }
}

/// Text must be `dd/mm/yyyy`; typed spreadsheet dates pass through.
pub fn parse_ledger_date(cell: &RawCell) -> Option<NaiveDate> {
    match cell {
        RawCell::Date(d) => Some(*d),
        RawCell::Text(s) => {
            let s = s.trim();
            if !has_ledger_date_shape(s) {
                return None;
            }
            NaiveDate::parse_from_str(s, LEDGER_DATE_FORMAT).ok()
        }
        _ => None,
    }
}

pub fn raw_amount(cell: &RawCell) -> Option<RawAmount<'_>> {
    match cell {
        RawCell::Number(d) => Some(RawAmount::Numeric(*d)),
        RawCell::Text(s) => Some(RawAmount::Text(s)),
        RawCell::Empty | RawCell::Date(_) => None,
    }
}

/// Numeric amounts pass through. Text drops every `.` (grouping) and turns
/// `,` into the decimal point: `"-1.234,56"` -> `-1234.56`.
pub fn parse_amount(raw: RawAmount<'_>) -> Option<Decimal> {
    match raw {
        RawAmount::Numeric(d) => Some(d),
        RawAmount::Text(s) => {
            let cleaned = s.trim().replace('.', "").replace(',', ".");
            parse_plain_decimal(&cleaned)
        }
    }
}

pub fn normalize_record(raw: &RawRecord<'_>) -> Result<NormalizedRecord, Exclusion> {
    let date = parse_ledger_date(raw.date).ok_or(Exclusion::BadDate)?;
    let amount = raw_amount(raw.amount)
        .and_then(parse_amount)
        .ok_or(Exclusion::BadAmount)?;
    Ok(NormalizedRecord {
        row: raw.row,
        date,
        amount,
        category: raw.category.as_label(),
        account: raw.account.as_label(),
    })
}

/// Fails only when a required column is absent; bad rows are counted and skipped.
pub fn normalize(table: &RawTable, columns: &ColumnMap) -> Result<Normalized, ReconError> {
    let index = match ColumnIndex::resolve(&table.headers, columns) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!(error = %e, "input rejected");
            return Err(e);
        }
    };

    let mut out = Normalized {
        rows_read: table.rows.len(),
        ..Normalized::default()
    };
    for (row, cells) in table.rows.iter().enumerate() {
        match normalize_record(&index.view(row, cells)) {
            Ok(rec) => out.records.push(rec),
            Err(Exclusion::BadDate) => out.bad_date += 1,
            Err(Exclusion::BadAmount) => out.bad_amount += 1,
        }
    }
    tracing::debug!(
        rows = out.rows_read,
        kept = out.records.len(),
        bad_date = out.bad_date,
        bad_amount = out.bad_amount,
        "normalized ledger rows"
    );
    Ok(out)
}
