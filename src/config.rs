// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ReconError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Transferclip", "transferclip"));

/// Header names of the four required ledger fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub account: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            date: "Data movimento".into(),
            amount: "Valor (R$)".into(),
            category: "Categoria 1".into(),
            account: "Conta bancária".into(),
        }
    }
}

/// Category labels that mark a row as one leg of a transfer. Exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferLabels {
    pub outgoing: String,
    pub incoming: String,
}

impl Default for TransferLabels {
    fn default() -> Self {
        TransferLabels {
            outgoing: "Transferência de Saída".into(),
            incoming: "Transferência de Entrada".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSettings {
    pub delimiter: char,
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings { delimiter: ';' }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub currency_symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            currency_symbol: "R$".into(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub columns: ColumnMap,
    pub labels: TransferLabels,
    pub csv: CsvSettings,
    pub report: ReportSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ReconError> {
        let labels = &self.labels;
        if labels.outgoing.is_empty() || labels.incoming.is_empty() {
            return Err(ReconError::InvalidSettings(
                "transfer labels must not be empty".into(),
            ));
        }
        if labels.outgoing == labels.incoming {
            return Err(ReconError::InvalidSettings(format!(
                "outgoing and incoming labels are both '{}'",
                labels.outgoing
            )));
        }
        if self.report.thousands_separator == self.report.decimal_separator {
            return Err(ReconError::InvalidSettings(
                "thousands and decimal separators must differ".into(),
            ));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8, ReconError> {
        parse_delimiter(self.csv.delimiter)
    }
}

pub fn parse_delimiter(c: char) -> Result<u8, ReconError> {
    if c.is_ascii() && c != '"' && c != '\n' && c != '\r' {
        Ok(c as u8)
    } else {
        Err(ReconError::InvalidSettings(format!(
            "unsupported CSV delimiter {:?}",
            c
        )))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn from_toml(s: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(s).context("Invalid settings TOML")?;
    settings.validate()?;
    Ok(settings)
}

/// An explicit path must exist; the default location is optional.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path()?, false),
    };
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Read settings {}", path.display()))?;
    let settings =
        from_toml(&raw).with_context(|| format!("Load settings {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}
