use async_trait::async_trait;
use reqwest::Request;
use serde::Serialize;
use std::time::Duration;

use crate::models::{Backup, Profile, Settings};

use super::client::{decode_envelope, ApiClient, ApiResult};
use super::envelope::{Ack, DataPayload, Envelope};
use super::traits::SettingsApi;

#[derive(Clone)]
pub struct SettingsClient {
    client: ApiClient,
}

#[derive(Debug, Serialize)]
struct CreateProfileRequest<'a> {
    name: &'a str,
    settings: &'a Settings,
}

impl SettingsClient {
    pub fn new(base: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            client: ApiClient::new(base, timeout)?,
        })
    }

    fn delete_backup_request(&self, name: &str) -> ApiResult<Request> {
        let url = self.client.endpoint(&["api", "settings", "restore", name])?;
        Ok(self.client.client().delete(url).build()?)
    }

    async fn post_ack(&self, segments: &[&str]) -> ApiResult<()> {
        let url = self.client.endpoint(segments)?;
        let response = self.client.client().post(url).send().await?;
        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }
}

#[async_trait]
impl SettingsApi for SettingsClient {
    async fn load_settings(&self) -> ApiResult<Settings> {
        let url = self.client.endpoint(&["api", "settings"])?;
        let response = self.client.client().get(url).send().await?;

        let envelope: Envelope<DataPayload<Settings>> = decode_envelope(response).await?;
        envelope.into_payload()?.require("settings")
    }

    async fn save_settings(&self, settings: &Settings) -> ApiResult<()> {
        let url = self.client.endpoint(&["api", "settings"])?;
        let response = self.client.client().post(url).json(settings).send().await?;

        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }

    async fn reset_settings(&self) -> ApiResult<()> {
        self.post_ack(&["api", "settings", "reset"]).await
    }

    async fn create_backup(&self) -> ApiResult<()> {
        self.post_ack(&["api", "settings", "backup"]).await
    }

    async fn list_backups(&self) -> ApiResult<Vec<Backup>> {
        let url = self.client.endpoint(&["api", "settings", "backups"])?;
        let response = self.client.client().get(url).send().await?;

        let envelope: Envelope<DataPayload<Vec<Backup>>> = decode_envelope(response).await?;
        Ok(envelope.into_payload()?.data.unwrap_or_default())
    }

    async fn restore_backup(&self, name: &str) -> ApiResult<()> {
        self.post_ack(&["api", "settings", "restore", name]).await
    }

    async fn delete_backup(&self, name: &str) -> ApiResult<()> {
        let request = self.delete_backup_request(name)?;
        let response = self.client.client().execute(request).await?;

        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }

    async fn list_profiles(&self) -> ApiResult<Vec<Profile>> {
        let url = self.client.endpoint(&["api", "settings", "v2", "profiles"])?;
        let response = self.client.client().get(url).send().await?;

        let envelope: Envelope<DataPayload<Vec<Profile>>> = decode_envelope(response).await?;
        Ok(envelope.into_payload()?.data.unwrap_or_default())
    }

    async fn create_profile(&self, name: &str, settings: &Settings) -> ApiResult<()> {
        let url = self.client.endpoint(&["api", "settings", "v2", "profiles"])?;
        let request = CreateProfileRequest { name, settings };
        let response = self.client.client().post(url).json(&request).send().await?;

        let envelope: Envelope<Ack> = decode_envelope(response).await?;
        envelope.into_payload().map(|_| ())
    }

    async fn apply_profile(&self, name: &str) -> ApiResult<()> {
        self.post_ack(&["api", "settings", "v2", "profiles", name, "apply"])
            .await
    }
}
