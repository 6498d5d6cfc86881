use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::ApiError;
use crate::models::{
    Backup, Category, HistoryEntry, Profile, RecommendationSet, Settings,
};

#[derive(Debug, Clone)]
pub struct AsyncOperation {
    pub id: Uuid,
    pub operation_type: OperationType,
    pub status: AsyncStatus,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationType {
    // Settings form
    LoadSettings,
    SaveSettings,
    ResetSettings,
    CreateBackup,
    LoadBackups,
    RestoreBackup(String),
    DeleteBackup(String),

    // Profiles
    LoadProfiles,
    CreateProfile(String),
    ApplyProfile(String),

    // Quick settings
    LoadCategories,
    SaveCategory(Category),

    // Optimizer panel
    RequestRecommendations,
    ApplyRecommendations,
    LoadHistory,
    Rollback(String),
}

/// Where an operation's outcome is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Toast notification queue.
    Notification,
    /// The optimizer panel's status line.
    OptimizerStatus,
    /// Log file only.
    Silent,
}

#[derive(Debug, Clone)]
pub enum AsyncStatus {
    InProgress,
    Completed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum AsyncOperationResult {
    SettingsLoaded(Settings),
    SettingsSaved(Settings),
    SettingsReset,
    BackupCreated,
    BackupsLoaded(Vec<Backup>),
    BackupRestored(String),
    BackupDeleted(String),
    ProfilesLoaded(Vec<Profile>),
    ProfileCreated(String),
    ProfileApplied(String),
    CategoriesLoaded(Map<String, Value>),
    CategorySaved(Category),
    RecommendationsReceived(RecommendationSet),
    RecommendationsApplied,
    HistoryLoaded(Vec<HistoryEntry>),
    RolledBack(String),
}

impl OperationType {
    pub fn surface(&self) -> Surface {
        match self {
            OperationType::LoadBackups | OperationType::LoadCategories => Surface::Silent,
            OperationType::RequestRecommendations
            | OperationType::ApplyRecommendations
            | OperationType::LoadHistory
            | OperationType::Rollback(_) => Surface::OptimizerStatus,
            _ => Surface::Notification,
        }
    }

    /// User-facing text for a failed operation. Refusals (`success: false`)
    /// and transport failures get different lead-ins.
    pub fn describe_failure(&self, error: &ApiError) -> String {
        if let OperationType::SaveCategory(_) = self {
            return match error {
                ApiError::Rejected(reason) if !reason.is_empty() => reason.clone(),
                _ => "Failed to save settings".to_string(),
            };
        }

        let (refused, failed) = match self {
            OperationType::LoadSettings => ("Failed to load settings", "Error loading settings"),
            OperationType::SaveSettings => ("Failed to save settings", "Error saving settings"),
            OperationType::ResetSettings => ("Failed to reset settings", "Error resetting settings"),
            OperationType::CreateBackup => ("Failed to create backup", "Error creating backup"),
            OperationType::LoadBackups => ("Failed to load backups", "Error loading backups"),
            OperationType::RestoreBackup(_) => ("Failed to restore backup", "Error restoring backup"),
            OperationType::DeleteBackup(_) => ("Failed to delete backup", "Error deleting backup"),
            OperationType::LoadProfiles => ("Failed to load profiles", "Error loading profiles"),
            OperationType::CreateProfile(_) => ("Failed to create profile", "Error creating profile"),
            OperationType::ApplyProfile(_) => ("Failed to apply profile", "Error applying profile"),
            OperationType::LoadCategories => ("Failed to load settings", "Failed to load settings"),
            OperationType::RequestRecommendations => (
                "Failed to get recommendations",
                "Error getting recommendations",
            ),
            OperationType::ApplyRecommendations => (
                "Failed to apply recommendations",
                "Error applying recommendations",
            ),
            OperationType::LoadHistory => ("Failed to load history", "Error loading history"),
            OperationType::Rollback(_) => ("Rollback failed", "Error during rollback"),
            OperationType::SaveCategory(_) => unreachable!("handled above"),
        };

        let lead = if error.is_rejection() { refused } else { failed };
        format!("{}: {}", lead, error)
    }
}

impl AsyncOperation {
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_type,
            status: AsyncStatus::InProgress,
            started_at: Utc::now(),
        }
    }

    pub fn complete(&mut self) {
        self.status = AsyncStatus::Completed;
    }

    pub fn fail(&mut self, error: String) {
        self.status = AsyncStatus::Failed(error);
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, AsyncStatus::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, AsyncStatus::Failed(_))
    }

    /// The user-facing failure text, once the operation has failed.
    pub fn error(&self) -> Option<String> {
        match &self.status {
            AsyncStatus::Failed(error) => Some(error.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_and_transport_lead_ins() {
        let refused = ApiError::Rejected("disk full".to_string());
        let broken = ApiError::InvalidResponse("not json".to_string());

        assert_eq!(
            OperationType::SaveSettings.describe_failure(&refused),
            "Failed to save settings: disk full"
        );
        assert_eq!(
            OperationType::SaveSettings.describe_failure(&broken),
            "Error saving settings: Invalid response: not json"
        );
        assert_eq!(
            OperationType::Rollback("t".to_string()).describe_failure(&refused),
            "Rollback failed: disk full"
        );
    }

    #[test]
    fn test_category_save_prefers_server_message() {
        let op = OperationType::SaveCategory(Category::Network);

        assert_eq!(
            op.describe_failure(&ApiError::Rejected("Port in use".to_string())),
            "Port in use"
        );
        assert_eq!(
            op.describe_failure(&ApiError::Rejected(String::new())),
            "Failed to save settings"
        );
        assert_eq!(
            op.describe_failure(&ApiError::NotFound("/api/settings/network".to_string())),
            "Failed to save settings"
        );
    }

    #[test]
    fn test_surfaces() {
        assert_eq!(OperationType::LoadBackups.surface(), Surface::Silent);
        assert_eq!(OperationType::LoadHistory.surface(), Surface::OptimizerStatus);
        assert_eq!(OperationType::DeleteBackup("b".into()).surface(), Surface::Notification);
    }

    #[test]
    fn test_lifecycle() {
        let mut op = AsyncOperation::new(OperationType::CreateBackup);
        assert!(!op.is_completed() && !op.is_failed());

        op.fail("boom".to_string());
        assert!(op.is_failed());

        op.complete();
        assert!(op.is_completed());
    }

    #[test]
    fn test_failure_text_kept_on_operation() {
        let mut op = AsyncOperation::new(OperationType::LoadHistory);
        assert_eq!(op.error(), None);

        op.fail("Error loading history: timed out".to_string());
        assert!(op.is_failed());
        assert!(!op.is_completed());
        assert_eq!(op.error().as_deref(), Some("Error loading history: timed out"));
    }
}
