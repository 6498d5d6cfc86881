//! The `{success, data | error | message}` wrapper every endpoint answers with.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{HistoryEntry, RecommendationSet};

use super::client::ApiResult;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning `success: false` into [`ApiError::Rejected`]
    /// carrying `error`, else `message`.
    pub fn into_payload(self) -> ApiResult<T> {
        if self.success {
            return Ok(self.payload);
        }

        let reason = self.error.or(self.message).unwrap_or_default();
        Err(ApiError::Rejected(reason))
    }
}

/// Payload-less acknowledgement.
#[derive(Debug, Default, Deserialize)]
pub struct Ack {}

#[derive(Debug, Deserialize)]
pub struct DataPayload<T> {
    pub data: Option<T>,
}

impl<T> DataPayload<T> {
    pub fn require(self, what: &str) -> ApiResult<T> {
        self.data
            .ok_or_else(|| ApiError::InvalidResponse(format!("{} response carried no data", what)))
    }
}

#[derive(Debug, Deserialize)]
pub struct SettingsPayload {
    #[serde(default)]
    pub settings: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsPayload {
    #[serde(default)]
    pub recommendations: Option<RecommendationSet>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
}
