//! Prediction service access.
//!
//! The service itself is opaque: it takes the [`FinancialData`] aggregate and
//! returns [`Predictions`]. [`PredictionService`] is the seam the application
//! state depends on; [`HttpPredictionClient`] is the real implementation.

use crate::{
    core::predictions::{FinancialData, Predictions},
    errors::Result,
};
use async_trait::async_trait;

mod client;

pub use client::{HttpPredictionClient, classify_failure};

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Asks the service for insights on the given aggregates.
    ///
    /// # Errors
    /// [`crate::errors::Error::RateLimited`] and
    /// [`crate::errors::Error::PaymentRequired`] for the service's quota
    /// responses, [`crate::errors::Error::Prediction`] for anything else.
    async fn predict(&self, data: &FinancialData) -> Result<Predictions>;
}
