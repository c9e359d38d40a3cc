// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;

use transferclip::{cli, commands, config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init_tracing(matches.get_flag("verbose"));
    let settings = config::load(matches.get_one::<String>("config").map(Path::new))?;

    match matches.subcommand() {
        Some(("reconcile", sub)) => commands::reconcile::handle(&settings, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&settings, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&settings, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
