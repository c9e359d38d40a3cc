// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{RawCell, RawTable};
use crate::utils::parse_plain_decimal;
use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| WORKBOOK_EXTENSIONS.iter().any(|w| e.eq_ignore_ascii_case(w)))
        .unwrap_or(false)
}

/// Spreadsheet files go through the workbook reader, everything else is CSV.
pub fn load_ledger(path: &Path, delimiter: u8) -> Result<RawTable> {
    if is_workbook(path) {
        load_workbook(path)
    } else {
        load_csv(path, delimiter)
    }
}

/// UTF-8 when valid, otherwise Windows-1252 (what spreadsheet exports in
/// Portuguese locales usually are). A leading BOM is dropped.
pub fn read_file_as_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Open CSV {}", path.display()))?;
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(path = %path.display(), "not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    };
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// First record is the header. Short rows are padded with `Empty`.
pub fn parse_table(text: &str, delimiter: u8) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .context("Read CSV header")?
        .iter()
        .map(String::from)
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result.with_context(|| format!("Read CSV record {}", i + 1))?;
        raw_rows.push(rec.iter().map(String::from).collect());
    }

    let width = raw_rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(headers.len());
    let numeric: Vec<bool> = (0..width)
        .map(|col| is_numeric_column(&raw_rows, col))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|fields| {
            fields
                .into_iter()
                .enumerate()
                .map(|(col, field)| to_cell(field, numeric[col]))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

/// A column is numeric when it has at least one value and every non-empty
/// value is a plain machine decimal.
fn is_numeric_column(rows: &[Vec<String>], col: usize) -> bool {
    let mut values = rows
        .iter()
        .filter_map(|r| r.get(col))
        .filter(|s| !s.trim().is_empty())
        .peekable();
    values.peek().is_some() && values.all(|s| parse_plain_decimal(s).is_some())
}

fn to_cell(field: String, numeric: bool) -> RawCell {
    if field.trim().is_empty() {
        return RawCell::Empty;
    }
    if numeric {
        if let Some(d) = parse_plain_decimal(&field) {
            return RawCell::Number(d);
        }
    }
    RawCell::Text(field)
}

pub fn load_csv(path: &Path, delimiter: u8) -> Result<RawTable> {
    let text = read_file_as_utf8(path)?;
    let table =
        parse_table(&text, delimiter).with_context(|| format!("Parse CSV {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded ledger"
    );
    Ok(table)
}

/// First worksheet; first row is the header. Cells keep their spreadsheet
/// types: numbers stay numeric and date-formatted cells become dates.
pub fn load_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Open workbook {}", path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook {} contains no sheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("Read sheet '{}' of {}", sheet, path.display()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(header_text).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<RawCell>> = rows.map(|r| r.iter().map(workbook_cell).collect()).collect();

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet,
        columns = headers.len(),
        rows = rows.len(),
        "loaded workbook ledger"
    );
    Ok(RawTable { headers, rows })
}

fn header_text(cell: &Data) -> String {
    match workbook_cell(cell) {
        RawCell::Empty => String::new(),
        other => other.as_label(),
    }
}

fn workbook_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) if s.trim().is_empty() => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(n) => RawCell::Number(Decimal::from(*n)),
        Data::Float(f) => Decimal::try_from(*f)
            .map(RawCell::Number)
            .unwrap_or(RawCell::Empty),
        Data::Bool(b) => RawCell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| RawCell::Date(d.date()))
            .unwrap_or(RawCell::Empty),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(RawCell::Date)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}
