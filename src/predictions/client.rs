//! HTTP client for the prediction function.

use super::PredictionService;
use crate::{
    config::{PredictionSettings, account::prediction_api_key},
    core::predictions::{FinancialData, Predictions},
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictionRequest<'a> {
    financial_data: &'a FinancialData,
}

#[derive(Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    predictions: Option<Predictions>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPredictionClient {
    /// Builds a client for `endpoint`, with an optional request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Builds a client from the `[predictions]` settings, reading the API key
    /// from the environment variable they name.
    pub fn from_settings(settings: &PredictionSettings) -> Result<Self> {
        Self::new(
            settings.endpoint.clone(),
            prediction_api_key(settings),
            settings.timeout_secs.map(Duration::from_secs),
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    #[instrument(skip(self, data), fields(endpoint = %self.endpoint))]
    async fn predict(&self, data: &FinancialData) -> Result<Predictions> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&PredictionRequest {
                financial_data: data,
            });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| Error::Prediction {
            status: None,
            message: e.to_string(),
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| Error::Prediction {
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!("Prediction service answered {status}");
            return Err(classify_failure(status, &body));
        }

        let parsed: PredictionResponse = serde_json::from_str(&body)?;
        match (parsed.predictions, parsed.error) {
            (Some(predictions), _) => {
                debug!("Received predictions");
                Ok(predictions)
            }
            (None, Some(message)) => Err(Error::Prediction {
                status: Some(status.as_u16()),
                message,
            }),
            (None, None) => Err(Error::Prediction {
                status: Some(status.as_u16()),
                message: "Response carried no predictions".to_string(),
            }),
        }
    }
}

/// Maps an unsuccessful response to an error.
///
/// 429 and 402 get their own variants; any other status becomes a generic
/// prediction error carrying the body's `error` message when there is one.
#[must_use]
pub fn classify_failure(status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        StatusCode::PAYMENT_REQUIRED => Error::PaymentRequired,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            Error::Prediction {
                status: Some(status.as_u16()),
                message,
            }
        }
    }
}
