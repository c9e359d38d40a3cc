// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregator;
pub mod matcher;
pub mod normalizer;
pub mod reporter;

use crate::config::Settings;
use crate::error::ReconError;
use crate::models::{MonthlySummaryRow, RawTable, Report};
use matcher::MatchOutput;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconStats {
    pub rows_read: usize,
    pub excluded_bad_date: usize,
    pub excluded_bad_amount: usize,
    pub outgoing_legs: usize,
    pub incoming_legs: usize,
    pub matched_pairs: usize,
}

impl ReconStats {
    /// Rows dropped for an unreadable date or amount.
    pub fn excluded(&self) -> usize {
        self.excluded_bad_date + self.excluded_bad_amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// No row carried either transfer label.
    NoTransferRows,
    /// Transfer rows existed but none paired up.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReconOutcome {
    Reconciled {
        summary: Vec<MonthlySummaryRow>,
        report: Report,
        stats: ReconStats,
    },
    NothingToReport {
        reason: EmptyReason,
        stats: ReconStats,
    },
}

impl ReconOutcome {
    pub fn stats(&self) -> &ReconStats {
        match self {
            ReconOutcome::Reconciled { stats, .. } => stats,
            ReconOutcome::NothingToReport { stats, .. } => stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ReconOutcome::NothingToReport { .. })
    }

    /// Rendered report lines; empty when there is nothing to report.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ReconOutcome::Reconciled { report, .. } => report.lines(),
            ReconOutcome::NothingToReport { .. } => Vec::new(),
        }
    }
}

/// Normalizer and matcher output, before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub matches: MatchOutput,
    pub stats: ReconStats,
}

pub fn analyze(table: &RawTable, settings: &Settings) -> Result<Analysis, ReconError> {
    settings.validate()?;
    let normalized = normalizer::normalize(table, &settings.columns)?;
    let matches = matcher::match_transfers(&normalized.records, &settings.labels);
    let stats = ReconStats {
        rows_read: normalized.rows_read,
        excluded_bad_date: normalized.bad_date,
        excluded_bad_amount: normalized.bad_amount,
        outgoing_legs: matches.outgoing_legs,
        incoming_legs: matches.incoming_legs,
        matched_pairs: matches.pairs.len(),
    };
    Ok(Analysis { matches, stats })
}

/// Full pipeline: normalize, match, aggregate, report. Pure; each call is
/// independent of any other.
pub fn reconcile(table: &RawTable, settings: &Settings) -> Result<ReconOutcome, ReconError> {
    let Analysis { matches, stats } = analyze(table, settings)?;

    if matches.pairs.is_empty() {
        let reason = if matches.has_transfer_rows() {
            EmptyReason::NoMatches
        } else {
            EmptyReason::NoTransferRows
        };
        tracing::info!(?reason, "no reconciled transfers");
        return Ok(ReconOutcome::NothingToReport { reason, stats });
    }

    let summary = aggregator::aggregate(&matches.pairs)?;
    let report = reporter::build_report(summary.clone(), &settings.report);
    tracing::info!(
        pairs = stats.matched_pairs,
        summary_rows = summary.len(),
        months = report.months.len(),
        "reconciliation complete"
    );
    Ok(ReconOutcome::Reconciled {
        summary,
        report,
        stats,
    })
}
