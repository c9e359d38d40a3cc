// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ReconError;
use crate::models::{MatchedPair, MonthlySummaryRow, YearMonth};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum matched amounts per (month, source, destination). Exact decimal sums;
/// a total past `Decimal::MAX` is an error rather than a panic.
pub fn aggregate(pairs: &[MatchedPair]) -> Result<Vec<MonthlySummaryRow>, ReconError> {
    let mut totals: BTreeMap<(YearMonth, &str, &str), Decimal> = BTreeMap::new();
    for p in pairs {
        let key = (
            YearMonth::of(p.date),
            p.source_account.as_str(),
            p.dest_account.as_str(),
        );
        let total = totals.entry(key).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(p.abs_amount)
            .ok_or_else(|| ReconError::AmountOverflow {
                month: key.0.to_string(),
                source_account: p.source_account.clone(),
                dest_account: p.dest_account.clone(),
            })?;
    }

    Ok(totals
        .into_iter()
        .map(|((month, src, dst), total)| MonthlySummaryRow {
            month,
            source_account: src.to_string(),
            dest_account: dst.to_string(),
            total,
        })
        .collect())
}
