//! Application settings loaded from `config.toml`.
//!
//! The file names the account whose rows the dashboard works on, the prediction
//! service endpoint and the shareholders to seed an empty account with.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Opaque id every stored row is scoped to
    pub account_id: String,
    /// Prediction service settings; predictions are disabled when absent
    #[serde(default)]
    pub predictions: Option<PredictionSettings>,
    /// Shareholders inserted when the account has none yet
    #[serde(default)]
    pub shareholders: Vec<ShareholderSeed>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionSettings {
    /// URL of the prediction function
    pub endpoint: String,
    /// Environment variable holding the bearer token, if any
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// How many of the newest transactions are sent along with the aggregates
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,
    /// Request timeout; the transport default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShareholderSeed {
    pub name: String,
    pub designation: String,
    pub ownership_percentage: f64,
}

fn default_api_key_env() -> String {
    "PREDICTIONS_API_KEY".to_string()
}

const fn default_recent_transactions() -> usize {
    20
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses settings from TOML text.
pub fn parse_config(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `DASHBOARD_CONFIG`, or `./config.toml` when unset.
pub fn load_default_config() -> Result<Settings> {
    let path = std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
