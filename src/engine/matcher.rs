// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pairs outgoing and incoming transfer legs.
//!
//! The ledger carries no link between the two legs of a transfer, only the
//! date and the magnitude. Legs are grouped by `(date, |amount|)` on each
//! side and numbered in input order; the Nth outgoing leg of a group pairs
//! with the Nth incoming leg of the same group. When several same-day,
//! same-amount transfers exist and the real pairing differs from input
//! order, the result follows input order anyway.

use crate::config::TransferLabels;
use crate::models::{Direction, MatchGroupKey, MatchedPair, NormalizedRecord, TransferLeg};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutput {
    pub pairs: Vec<MatchedPair>,
    pub outgoing_legs: usize,
    pub incoming_legs: usize,
    pub unmatched_outgoing: Vec<TransferLeg>,
    pub unmatched_incoming: Vec<TransferLeg>,
}

impl MatchOutput {
    pub fn has_transfer_rows(&self) -> bool {
        self.outgoing_legs + self.incoming_legs > 0
    }
}

pub fn direction_of(category: &str, labels: &TransferLabels) -> Option<Direction> {
    if category == labels.outgoing {
        Some(Direction::Outgoing)
    } else if category == labels.incoming {
        Some(Direction::Incoming)
    } else {
        None
    }
}

/// Split into outgoing and incoming legs, keeping input order on each side.
/// Rows with any other category are ignored.
pub fn split_legs(
    records: &[NormalizedRecord],
    labels: &TransferLabels,
) -> (Vec<TransferLeg>, Vec<TransferLeg>) {
    let mut outgoing = Vec::new();
    let mut incoming = Vec::new();
    for rec in records {
        let Some(direction) = direction_of(&rec.category, labels) else {
            continue;
        };
        let leg = TransferLeg {
            row: rec.row,
            direction,
            date: rec.date,
            // normalized so 100 and 100.00 share a group
            abs_amount: rec.amount.abs().normalize(),
            account: rec.account.clone(),
            sequence: 0,
        };
        match direction {
            Direction::Outgoing => outgoing.push(leg),
            Direction::Incoming => incoming.push(leg),
        }
    }
    (outgoing, incoming)
}

/// Zero-based occurrence counter per `(date, abs_amount)`, in slice order.
pub fn assign_sequence(legs: &mut [TransferLeg]) {
    let mut seen: HashMap<MatchGroupKey, usize> = HashMap::new();
    for leg in legs.iter_mut() {
        let counter = seen.entry(leg.group_key()).or_insert(0);
        leg.sequence = *counter;
        *counter += 1;
    }
}

/// Inner join on `(date, abs_amount, sequence)`. Pairs come out in
/// outgoing-leg order.
pub fn join_legs(outgoing: Vec<TransferLeg>, incoming: Vec<TransferLeg>) -> MatchOutput {
    let outgoing_legs = outgoing.len();
    let incoming_legs = incoming.len();

    let mut by_key: BTreeMap<(MatchGroupKey, usize), TransferLeg> = incoming
        .into_iter()
        .map(|leg| ((leg.group_key(), leg.sequence), leg))
        .collect();

    let mut pairs = Vec::new();
    let mut unmatched_outgoing = Vec::new();
    for out in outgoing {
        match by_key.remove(&(out.group_key(), out.sequence)) {
            Some(inc) => pairs.push(MatchedPair {
                date: out.date,
                abs_amount: out.abs_amount,
                source_account: out.account,
                dest_account: inc.account,
            }),
            None => unmatched_outgoing.push(out),
        }
    }

    let mut unmatched_incoming: Vec<TransferLeg> = by_key.into_values().collect();
    unmatched_incoming.sort_by_key(|leg| leg.row);

    MatchOutput {
        pairs,
        outgoing_legs,
        incoming_legs,
        unmatched_outgoing,
        unmatched_incoming,
    }
}

pub fn match_transfers(records: &[NormalizedRecord], labels: &TransferLabels) -> MatchOutput {
    let (mut outgoing, mut incoming) = split_legs(records, labels);
    assign_sequence(&mut outgoing);
    assign_sequence(&mut incoming);
    let out = join_legs(outgoing, incoming);
    tracing::debug!(
        outgoing = out.outgoing_legs,
        incoming = out.incoming_legs,
        pairs = out.pairs.len(),
        "matched transfer legs"
    );
    out
}
