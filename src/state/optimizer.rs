use chrono::{DateTime, Duration, Utc};

use crate::models::{
    HistoryEntry, MetricsDisplay, PerformanceSnapshot, RecommendationSet, RuntimeSettings,
};

use super::app_state::NotificationLevel;

/// The optimizer panel's single status line.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub level: NotificationLevel,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OptimizerPanel {
    pub metrics: MetricsDisplay,
    pub runtime_settings: RuntimeSettings,

    // Recommendation flow
    pub current_recommendations: Option<RecommendationSet>,
    pub recommendations_visible: bool,

    // History flow
    pub history: Vec<HistoryEntry>,
    pub history_visible: bool,

    pub status: Option<StatusMessage>,
    pub status_ttl: Duration,
    pub is_monitoring: bool,
}

impl OptimizerPanel {
    pub fn new(status_ttl: Duration) -> Self {
        Self {
            metrics: MetricsDisplay::default(),
            runtime_settings: RuntimeSettings::default(),
            current_recommendations: None,
            recommendations_visible: false,
            history: Vec::new(),
            history_visible: false,
            status: None,
            status_ttl,
            is_monitoring: false,
        }
    }

    /// Replace the status line. Each message carries its own expiry.
    pub fn show_status(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.status = Some(StatusMessage {
            message: message.into(),
            level,
            expires_at: Utc::now() + self.status_ttl,
        });
    }

    pub fn clear_expired_status(&mut self, now: DateTime<Utc>) {
        if self.status.as_ref().is_some_and(|s| s.expires_at <= now) {
            self.status = None;
        }
    }

    pub fn update_metrics(&mut self, snapshot: PerformanceSnapshot) {
        self.metrics = MetricsDisplay::from(snapshot);
    }

    pub fn show_recommendations(&mut self, recommendations: RecommendationSet) {
        self.current_recommendations = Some(recommendations);
        self.recommendations_visible = true;
    }

    /// Whether the list offers an apply action. An empty set is displayed
    /// but cannot be applied from the list.
    pub fn can_apply(&self) -> bool {
        self.current_recommendations
            .as_ref()
            .is_some_and(|set| !set.is_empty())
    }

    pub fn recommendations_applied(&mut self) {
        self.current_recommendations = None;
        self.recommendations_visible = false;
    }

    pub fn show_history(&mut self, history: Vec<HistoryEntry>) {
        self.history = history;
        self.history_visible = true;
    }

    /// Hide the history after a rollback. The list is not re-fetched.
    pub fn rolled_back(&mut self) {
        self.history_visible = false;
    }
}
