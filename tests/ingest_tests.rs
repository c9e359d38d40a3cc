// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use transferclip::ingest::{
    is_workbook, load_csv, load_ledger, load_workbook, parse_table, read_file_as_utf8,
};
use transferclip::models::RawCell;

/// Two transfer legs: the outgoing one with a typed date cell, the incoming
/// one with the date typed in as text.
fn write_ledger_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("ledger.xlsx");
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    {
        let sheet = workbook.add_worksheet();
        for (col, header) in [
            "Data movimento",
            "Valor (R$)",
            "Categoria 1",
            "Conta bancária",
        ]
        .iter()
        .enumerate()
        {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        let march_first = ExcelDateTime::from_ymd(2024, 3, 1).unwrap();
        sheet
            .write_datetime_with_format(1, 0, &march_first, &date_format)
            .unwrap();
        sheet.write_number(1, 1, -1234.5).unwrap();
        sheet.write_string(1, 2, "Transferência de Saída").unwrap();
        sheet.write_string(1, 3, "Itaú").unwrap();

        sheet.write_string(2, 0, "01/03/2024").unwrap();
        sheet.write_number(2, 1, 1234.5).unwrap();
        sheet.write_string(2, 2, "Transferência de Entrada").unwrap();
        sheet.write_string(2, 3, "Nubank").unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

#[test]
fn numeric_column_keeps_machine_numbers() {
    let table = parse_table("d;v;n\n01/03/2024;-100.5;x\n02/03/2024;;y\n", b';').unwrap();
    assert_eq!(table.headers, vec!["d", "v", "n"]);
    assert_eq!(
        table.rows[0][1],
        RawCell::Number(Decimal::from_str("-100.5").unwrap())
    );
    assert_eq!(table.rows[1][1], RawCell::Empty);
    assert_eq!(table.rows[0][0], RawCell::text("01/03/2024"));
    assert_eq!(table.rows[0][2], RawCell::text("x"));
}

#[test]
fn one_locale_value_makes_the_column_text() {
    let table = parse_table("v\n100\n1.234,56\n", b';').unwrap();
    assert_eq!(table.rows[0][0], RawCell::text("100"));
    assert_eq!(table.rows[1][0], RawCell::text("1.234,56"));
}

#[test]
fn short_rows_are_allowed() {
    let table = parse_table("a;b;c\n1\n", b';').unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].len(), 1);
}

#[test]
fn latin1_files_are_decoded() {
    let mut file = NamedTempFile::new().unwrap();
    // "Conta bancária" in Latin-1
    file.write_all(b"Conta banc\xe1ria;x\nA;1\n").unwrap();
    file.flush().unwrap();

    let text = read_file_as_utf8(file.path()).unwrap();
    assert!(text.starts_with("Conta bancária"));

    let table = load_csv(file.path(), b';').unwrap();
    assert_eq!(table.headers[0], "Conta bancária");
}

#[test]
fn utf8_bom_is_dropped() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all("\u{feff}Data movimento;x\n".as_bytes()).unwrap();
    file.flush().unwrap();
    let table = load_csv(file.path(), b';').unwrap();
    assert_eq!(table.headers[0], "Data movimento");
}

#[test]
fn missing_file_is_an_error() {
    let err = load_csv(std::path::Path::new("/nonexistent/ledger.csv"), b';').unwrap_err();
    assert!(err.to_string().contains("Open CSV"));
}

#[test]
fn workbook_extensions_are_detected() {
    assert!(is_workbook(Path::new("extrato.xlsx")));
    assert!(is_workbook(Path::new("EXTRATO.XLS")));
    assert!(is_workbook(Path::new("extrato.ods")));
    assert!(!is_workbook(Path::new("extrato.csv")));
    assert!(!is_workbook(Path::new("extrato")));
}

#[test]
fn workbook_cells_keep_their_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_ledger_workbook(dir.path());

    let table = load_workbook(&path).unwrap();
    assert_eq!(
        table.headers,
        vec!["Data movimento", "Valor (R$)", "Categoria 1", "Conta bancária"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(
        table.rows[0][0],
        RawCell::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    );
    assert_eq!(
        table.rows[0][1],
        RawCell::Number(Decimal::from_str("-1234.5").unwrap())
    );
    assert_eq!(table.rows[0][3], RawCell::text("Itaú"));
    assert_eq!(table.rows[1][0], RawCell::text("01/03/2024"));
}

#[test]
fn ledger_loader_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_ledger_workbook(dir.path());
    // The delimiter is irrelevant for workbooks.
    let table = load_ledger(&path, b',').unwrap();
    assert_eq!(table.headers[1], "Valor (R$)");
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn unreadable_workbook_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();
    let err = load_workbook(&path).unwrap_err();
    assert!(err.to_string().contains("Open workbook"));
}
