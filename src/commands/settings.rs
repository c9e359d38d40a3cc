// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, config_path};
use anyhow::Result;

pub fn handle(settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => print!("{}", render(settings)?),
        Some(("path", _)) => println!("{}", config_path()?.display()),
        _ => {}
    }
    Ok(())
}

pub fn render(settings: &Settings) -> Result<String> {
    Ok(toml::to_string_pretty(settings)?)
}
