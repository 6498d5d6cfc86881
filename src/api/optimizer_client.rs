use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::models::{
    HistoryEntry, PerformanceSnapshot, RecommendationSet, RuntimeSettings,
};

use super::client::{decode_envelope, ApiClient, ApiResult};
use super::envelope::{Ack, DataPayload, Envelope, HistoryPayload, RecommendationsPayload};
use super::traits::OptimizerApi;

#[derive(Clone)]
pub struct OptimizerClient {
    client: ApiClient,
}

// Request types
#[derive(Debug, Serialize)]
struct OptimizeRequest<'a> {
    settings: &'a RuntimeSettings,
}

#[derive(Debug, Serialize)]
struct ApplyRequest<'a> {
    recommendations: &'a RecommendationSet,
}

#[derive(Debug, Serialize)]
struct RollbackRequest<'a> {
    timestamp: &'a str,
}

impl OptimizerClient {
    pub fn new(base: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::new(base, timeout)?,
        })
    }
}

#[async_trait]
impl OptimizerApi for OptimizerClient {
    async fn request_recommendations(
        &self,
        settings: &RuntimeSettings,
    ) -> ApiResult<RecommendationSet> {
        let url = self.client.endpoint(&["ai-optimize"])?;
        let response = self
            .client
            .client()
            .post(url)
            .json(&OptimizeRequest { settings })
            .send()
            .await?;

        let envelope: Envelope<RecommendationsPayload> = decode_envelope(response).await?;
        Ok(envelope.into_payload()?.recommendations.unwrap_or_default())
    }

    async fn apply_recommendations(&self, recommendations: &RecommendationSet) -> ApiResult<()> {
        let url = self.client.endpoint(&["apply-recommendations"])?;
        let response = self
            .client
            .client()
            .post(url)
            .json(&ApplyRequest { recommendations })
            .send()
            .await?;

        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }

    async fn optimization_history(&self) -> ApiResult<Vec<HistoryEntry>> {
        let url = self.client.endpoint(&["optimization-history"])?;
        let response = self.client.client().get(url).send().await?;

        let envelope: Envelope<HistoryPayload> = decode_envelope(response).await?;
        Ok(envelope.into_payload()?.history.unwrap_or_default())
    }

    async fn rollback(&self, timestamp: &str) -> ApiResult<()> {
        let url = self.client.endpoint(&["rollback"])?;
        let response = self
            .client
            .client()
            .post(url)
            .json(&RollbackRequest { timestamp })
            .send()
            .await?;

        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }

    async fn performance_data(&self) -> ApiResult<PerformanceSnapshot> {
        let url = self.client.endpoint(&["performance-data"])?;
        let response = self.client.client().get(url).send().await?;

        let envelope: Envelope<DataPayload<PerformanceSnapshot>> =
            decode_envelope(response).await?;
        envelope.into_payload()?.require("performance")
    }
}
