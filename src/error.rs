// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures that stop a reconciliation run. Bad individual rows are not
/// errors; they are dropped by the normalizer and only show up in stats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconError {
    #[error("missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("total for {source_account} -> {dest_account} in {month} exceeds the decimal range")]
    AmountOverflow {
        month: String,
        source_account: String,
        dest_account: String,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl ReconError {
    pub fn missing_columns(&self) -> &[String] {
        match self {
            ReconError::Schema { missing } => missing,
            _ => &[],
        }
    }
}
