// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use transferclip::config::ColumnMap;
use transferclip::engine::normalizer::{normalize, parse_amount, parse_ledger_date};
use transferclip::error::ReconError;
use transferclip::models::{RawAmount, RawCell, RawTable};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn headers() -> Vec<String> {
    let c = ColumnMap::default();
    vec![c.date, c.amount, c.category, c.account]
}

fn text_row(date: &str, amount: &str, category: &str, account: &str) -> Vec<RawCell> {
    vec![
        RawCell::text(date),
        RawCell::text(amount),
        RawCell::text(category),
        RawCell::text(account),
    ]
}

#[test]
fn text_amounts_use_locale_separators() {
    assert_eq!(parse_amount(RawAmount::Text("1.234,56")), Some(dec("1234.56")));
    assert_eq!(parse_amount(RawAmount::Text("-100,00")), Some(dec("-100")));
    assert_eq!(parse_amount(RawAmount::Text(" 50 ")), Some(dec("50")));
    // grouping dots are stripped even when there is no comma
    assert_eq!(parse_amount(RawAmount::Text("1.000")), Some(dec("1000")));
    assert_eq!(parse_amount(RawAmount::Text("R$ 10,00")), None);
    assert_eq!(parse_amount(RawAmount::Text("")), None);
}

#[test]
fn numeric_amounts_pass_through() {
    assert_eq!(
        parse_amount(RawAmount::Numeric(dec("1.5"))),
        Some(dec("1.5"))
    );
}

#[test]
fn dates_are_day_month_year() {
    assert_eq!(
        parse_ledger_date(&RawCell::text("05/01/2024")),
        NaiveDate::from_ymd_opt(2024, 1, 5)
    );
    assert_eq!(parse_ledger_date(&RawCell::text("2024-01-05")), None);
    assert_eq!(parse_ledger_date(&RawCell::text("31/02/2024")), None);
    assert_eq!(parse_ledger_date(&RawCell::Number(dec("45000"))), None);
    assert_eq!(parse_ledger_date(&RawCell::Empty), None);
    assert_eq!(
        parse_ledger_date(&RawCell::text("5/1/2024")),
        NaiveDate::from_ymd_opt(2024, 1, 5)
    );
    assert_eq!(
        parse_ledger_date(&RawCell::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())),
        NaiveDate::from_ymd_opt(2024, 1, 5)
    );
}

#[test]
fn dates_need_a_four_digit_year() {
    assert_eq!(parse_ledger_date(&RawCell::text("01/03/24")), None);
    assert_eq!(parse_ledger_date(&RawCell::text("01/03/+2024")), None);
    assert_eq!(parse_ledger_date(&RawCell::text("01/03/02024")), None);
    assert_eq!(parse_ledger_date(&RawCell::text("001/03/2024")), None);
    assert_eq!(parse_ledger_date(&RawCell::text("01/03/2024/1")), None);
}

#[test]
fn missing_columns_fail_the_whole_run() {
    let table = RawTable {
        headers: vec!["Data movimento".into(), "Conta bancária".into()],
        rows: vec![vec![RawCell::text("01/03/2024"), RawCell::text("A")]],
    };
    let err = normalize(&table, &ColumnMap::default()).unwrap_err();
    assert_eq!(
        err,
        ReconError::Schema {
            missing: vec!["Valor (R$)".to_string(), "Categoria 1".to_string()]
        }
    );
    assert!(err.to_string().contains("Valor (R$), Categoria 1"));
    assert_eq!(err.missing_columns().len(), 2);
}

#[test]
fn bad_rows_are_dropped_and_counted() {
    let table = RawTable {
        headers: headers(),
        rows: vec![
            text_row("01/03/2024", "-100,00", "X", "A"),
            text_row("not a date", "10,00", "X", "A"),
            text_row("02/03/2024", "abc", "X", "A"),
            text_row("03/03/2024", "", "X", "A"),
            vec![RawCell::text("04/03/2024")],
        ],
    };
    let out = normalize(&table, &ColumnMap::default()).unwrap();
    assert_eq!(out.rows_read, 5);
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.bad_date, 1);
    assert_eq!(out.bad_amount, 3);

    let rec = &out.records[0];
    assert_eq!(rec.row, 0);
    assert_eq!(rec.amount, dec("-100"));
    assert_eq!(rec.account, "A");
}

#[test]
fn column_order_does_not_matter() {
    let c = ColumnMap::default();
    let table = RawTable {
        headers: vec![
            c.account.clone(),
            "Extra".into(),
            c.category.clone(),
            c.amount.clone(),
            c.date.clone(),
        ],
        rows: vec![vec![
            RawCell::Number(dec("42")),
            RawCell::text("ignored"),
            RawCell::text("Cat"),
            RawCell::Number(dec("-7.25")),
            RawCell::text("10/10/2023"),
        ]],
    };
    let out = normalize(&table, &c).unwrap();
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].account, "42");
    assert_eq!(out.records[0].category, "Cat");
    assert_eq!(out.records[0].amount, dec("-7.25"));
    assert_eq!(
        out.records[0].date,
        NaiveDate::from_ymd_opt(2023, 10, 10).unwrap()
    );
}
