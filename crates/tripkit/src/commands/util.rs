//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;

use tripkit_core::Entity;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("{}: {e}", path.display()),
    })
}

/// Parse a `--filter` JSON object into the entity's filter type.
pub fn parse_filter<E: Entity>(raw: &str) -> Result<E::Filter, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Validation {
        field: "filter".into(),
        reason: format!("expected a {} filter object: {e}", E::NAME),
    })
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.into()
}

pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}
