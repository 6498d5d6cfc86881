use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::models::{
    Backup, Category, HistoryEntry, PerformanceSnapshot, Profile, RecommendationSet,
    RuntimeSettings, Settings,
};

use super::client::ApiResult;

/// Whole-object settings endpoints used by the settings form.
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// `GET /api/settings`
    async fn load_settings(&self) -> ApiResult<Settings>;

    /// `POST /api/settings`
    async fn save_settings(&self, settings: &Settings) -> ApiResult<()>;

    /// `POST /api/settings/reset`
    async fn reset_settings(&self) -> ApiResult<()>;

    /// `POST /api/settings/backup`
    async fn create_backup(&self) -> ApiResult<()>;

    /// `GET /api/settings/backups`
    async fn list_backups(&self) -> ApiResult<Vec<Backup>>;

    /// `POST /api/settings/restore/{name}`
    async fn restore_backup(&self, name: &str) -> ApiResult<()>;

    /// `DELETE /api/settings/restore/{name}`
    async fn delete_backup(&self, name: &str) -> ApiResult<()>;

    async fn list_profiles(&self) -> ApiResult<Vec<Profile>>;

    async fn create_profile(&self, name: &str, settings: &Settings) -> ApiResult<()>;

    async fn apply_profile(&self, name: &str) -> ApiResult<()>;
}

/// Per-category endpoints used by the quick settings binder.
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// Raw `settings` object, merged category by category by the caller.
    async fn load_settings(&self) -> ApiResult<Map<String, Value>>;

    /// `POST /api/settings/{category}`
    async fn save_category(&self, category: Category, record: &Value) -> ApiResult<()>;
}

#[async_trait]
pub trait OptimizerApi: Send + Sync {
    async fn request_recommendations(
        &self,
        settings: &RuntimeSettings,
    ) -> ApiResult<RecommendationSet>;

    async fn apply_recommendations(&self, recommendations: &RecommendationSet) -> ApiResult<()>;

    async fn optimization_history(&self) -> ApiResult<Vec<HistoryEntry>>;

    async fn rollback(&self, timestamp: &str) -> ApiResult<()>;

    async fn performance_data(&self) -> ApiResult<PerformanceSnapshot>;
}
