//! Unified error type for the dashboard core.
//!
//! Every fallible operation in the crate returns [`Result`]. Display strings are
//! written to be shown to the user as-is.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Input rejected before any store call was made.
    #[error("{message}")]
    Validation { message: String },

    #[error("Please enter a valid amount (got {amount})")]
    InvalidAmount { amount: f64 },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A stored row that does not match the expected schema.
    #[error("Invalid {table} record: {message}")]
    InvalidRecord { table: &'static str, message: String },

    /// A store call that failed; `action` reads like "add transaction".
    #[error("Failed to {action}")]
    Store {
        action: String,
        #[source]
        source: Box<Error>,
    },

    #[error("All EMIs already paid")]
    LoanCompleted { id: i64 },

    #[error("Rate limits exceeded, please try again later.")]
    RateLimited,

    #[error("Payment required, please add funds.")]
    PaymentRequired,

    #[error("Failed to generate predictions: {message}")]
    Prediction { status: Option<u16>, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wraps a store failure so that it names the attempted action.
    pub fn store(action: impl Into<String>, source: Self) -> Self {
        Self::Store {
            action: action.into(),
            source: Box::new(source),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for errors raised before the store was contacted.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidAmount { .. } | Self::LoanCompleted { .. }
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
