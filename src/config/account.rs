//! Account and secret resolution from environment variables.
//!
//! The `.env` file is loaded by the binary before any of these are read.

use super::settings::{PredictionSettings, Settings};

/// Environment override for the configured account id.
pub const ACCOUNT_ID_VAR: &str = "DASHBOARD_ACCOUNT_ID";

/// Returns the account id to scope all store calls to.
///
/// `DASHBOARD_ACCOUNT_ID` wins over the value in `config.toml` when it is set
/// and non-empty.
#[must_use]
pub fn resolve_account_id(settings: &Settings) -> String {
    pick_account_id(std::env::var(ACCOUNT_ID_VAR).ok(), &settings.account_id)
}

fn pick_account_id(env_value: Option<String>, configured: &str) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Reads the prediction service API key named by the settings, if present.
#[must_use]
pub fn prediction_api_key(settings: &PredictionSettings) -> Option<String> {
    std::env::var(&settings.api_key_env)
        .ok()
        .filter(|key| !key.is_empty())
}
