// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single cell as handed over by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(Decimal),
    /// Typed date cell from a workbook.
    Date(NaiveDate),
}

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        RawCell::Text(s.into())
    }

    /// Text rendering used for free-form fields (category, account).
    pub fn as_label(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(d) => d.to_string(),
            RawCell::Date(d) => d.format("%d/%m/%Y").to_string(),
        }
    }
}

/// Header row plus data rows. Rows may be shorter than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// Borrowed view over the four fields of one input row.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    pub row: usize,
    pub date: &'a RawCell,
    pub amount: &'a RawCell,
    pub category: &'a RawCell,
    pub account: &'a RawCell,
}

/// Amount as it arrived: already numeric, or locale-formatted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAmount<'a> {
    Numeric(Decimal),
    Text(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub row: usize, // zero-based data row in the input table
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub account: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Grouping key used on each side of the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchGroupKey {
    pub date: NaiveDate,
    pub abs_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLeg {
    pub row: usize,
    pub direction: Direction,
    pub date: NaiveDate,
    pub abs_amount: Decimal,
    pub account: String,
    pub sequence: usize,
}

impl TransferLeg {
    pub fn group_key(&self) -> MatchGroupKey {
        MatchGroupKey {
            date: self.date,
            abs_amount: self.abs_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub date: NaiveDate,
    pub abs_amount: Decimal,
    pub source_account: String,
    pub dest_account: String,
}

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummaryRow {
    pub month: YearMonth,
    pub source_account: String,
    pub dest_account: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub source_account: String,
    pub dest_account: String,
    pub total: Decimal, // rounded to cents
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBlock {
    pub month: YearMonth,
    pub start: String, // dd/mm/yyyy
    pub end: String,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub currency_symbol: String,
    pub months: Vec<MonthBlock>,
}
