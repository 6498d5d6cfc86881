use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::envelope::Envelope;
use super::error::ApiError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Pooled HTTP client bound to one REST base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        let base = Url::parse(base)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", base, e)))?;

        Ok(Self { client, base })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Append path segments to the base URL. Segments are percent-encoded, so
    /// a backup or profile name can never escape its path position.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Decode an envelope from a response.
///
/// The backend reports application failures as 4xx/5xx with a regular
/// envelope body, so the status is only consulted when the body is not one.
pub async fn decode_envelope<T: DeserializeOwned>(response: Response) -> ApiResult<Envelope<T>> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(e) if status.is_success() => Err(ApiError::InvalidResponse(format!(
            "Failed to parse response from {}: {}",
            url.path(),
            e
        ))),
        Err(_) if status == reqwest::StatusCode::NOT_FOUND => {
            Err(ApiError::NotFound(url.path().to_string()))
        }
        Err(_) => Err(ApiError::ServerError {
            status: status.as_u16(),
            message: if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body
            },
        }),
    }
}
