/// Account id and secret resolution from the environment
pub mod account;

/// Database configuration and connection management
pub mod database;

/// Settings loading from config.toml
pub mod settings;

pub use settings::{PredictionSettings, Settings, ShareholderSeed, load_config, load_default_config};
