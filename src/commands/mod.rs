// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod doctor;
pub mod reconcile;
pub mod settings;

use crate::config::{Settings, parse_delimiter};
use crate::ingest::load_ledger as load_path;
use crate::models::RawTable;
use anyhow::{Context, Result};
use std::path::Path;

/// Shared by subcommands that read a ledger: `--path` (CSV or workbook) plus
/// optional `--delimiter` for CSV.
pub(crate) fn load_ledger(settings: &Settings, sub: &clap::ArgMatches) -> Result<RawTable> {
    let path = sub
        .get_one::<String>("path")
        .context("--path is required")?
        .trim();
    let delimiter = match sub.get_one::<char>("delimiter") {
        Some(c) => parse_delimiter(*c)?,
        None => settings.delimiter_byte()?,
    };
    load_path(Path::new(path), delimiter)
}
