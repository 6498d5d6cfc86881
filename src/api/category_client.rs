use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::models::Category;

use super::client::{decode_envelope, ApiClient, ApiResult};
use super::envelope::{Ack, Envelope, SettingsPayload};
use super::traits::CategoryApi;

#[derive(Clone)]
pub struct CategoryClient {
    client: ApiClient,
}

impl CategoryClient {
    pub fn new(base: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::new(base, timeout)?,
        })
    }
}

#[async_trait]
impl CategoryApi for CategoryClient {
    async fn load_settings(&self) -> ApiResult<Map<String, Value>> {
        let url = self.client.endpoint(&["api", "settings"])?;
        let response = self.client.client().get(url).send().await?;

        let envelope: Envelope<SettingsPayload> = decode_envelope(response).await?;
        Ok(envelope.into_payload()?.settings.unwrap_or_default())
    }

    async fn save_category(&self, category: Category, record: &Value) -> ApiResult<()> {
        let url = self.client.endpoint(&["api", "settings", category.as_str()])?;
        let response = self.client.client().post(url).json(record).send().await?;

        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }
}
