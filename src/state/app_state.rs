use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::binder::Binder;
use crate::config::{load_config, ConsoleConfig};
use crate::events::Action;
use crate::form::{build_settings_form, populate_settings, Form};
use crate::models::{Backup, Profile, Settings};
use crate::ui::Screen;

use super::async_ops::AsyncOperation;
use super::optimizer::OptimizerPanel;
use super::selection::{clamp, SelectionState};

const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone)]
pub struct AppState {
    // Settings form
    pub form: Form,
    /// Last settings object confirmed by the backend.
    pub settings: Settings,
    pub backups: Vec<Backup>,
    pub profiles: Vec<Profile>,

    // Quick settings and optimizer
    pub binder: Binder,
    pub optimizer: OptimizerPanel,

    // UI state
    pub current_screen: Screen,
    pub previous_screen: Vec<Screen>,
    pub selection_state: SelectionState,
    pub confirm: Option<PendingConfirm>,
    /// Name being typed for a new profile.
    pub profile_prompt: Option<String>,

    // Async operations tracking
    pub pending_operations: Vec<AsyncOperation>,
    pub notifications: VecDeque<Notification>,
    pub notification_ttl: Duration,

    // Configuration
    pub config_path: PathBuf,
    pub config: ConsoleConfig,
    /// Set when this run wrote the default config file.
    pub config_created: bool,

    // Application control
    pub should_quit: bool,
}

/// A destructive action waiting for a yes/no answer.
#[derive(Debug, Clone)]
pub struct PendingConfirm {
    pub message: String,
    pub action: Box<Action>,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl AppState {
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let loaded = load_config(&config_path)?;
        let mut state = Self::with_config(config_path, loaded.config);
        state.config_created = loaded.created;
        Ok(state)
    }

    pub fn with_config(config_path: PathBuf, config: ConsoleConfig) -> Self {
        let settings = Settings::default();
        let mut form = build_settings_form();
        populate_settings(&mut form, &settings);

        Self {
            form,
            settings,
            backups: Vec::new(),
            profiles: Vec::new(),
            binder: Binder::new(),
            optimizer: OptimizerPanel::new(config.timing.status_ttl()),
            current_screen: Screen::default(),
            previous_screen: Vec::new(),
            selection_state: SelectionState::default(),
            confirm: None,
            profile_prompt: None,
            pending_operations: Vec::new(),
            notifications: VecDeque::new(),
            notification_ttl: config.timing.notification_ttl(),
            config_path,
            config,
            config_created: false,
            should_quit: false,
        }
    }

    // Navigation methods
    pub fn navigate_to(&mut self, screen: Screen) {
        if self.current_screen == screen {
            return;
        }
        self.previous_screen.push(self.current_screen.clone());
        self.current_screen = screen;
    }

    pub fn navigate_back(&mut self) {
        if let Some(previous) = self.previous_screen.pop() {
            self.current_screen = previous;
        }
    }

    /// The form shown on the current screen, if it has one.
    pub fn active_form(&self) -> Option<&Form> {
        match self.current_screen {
            Screen::Settings => Some(&self.form),
            Screen::QuickSettings => Some(&self.binder.form),
            _ => None,
        }
    }

    pub fn active_form_mut(&mut self) -> Option<&mut Form> {
        match self.current_screen {
            Screen::Settings => Some(&mut self.form),
            Screen::QuickSettings => Some(&mut self.binder.form),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.active_form().is_some_and(|form| form.editing)
    }

    // Settings cache

    /// Replace the cached settings and repopulate the form from them.
    pub fn apply_settings(&mut self, settings: Settings) {
        populate_settings(&mut self.form, &settings);
        self.settings = settings;
    }

    pub fn set_backups(&mut self, backups: Vec<Backup>) {
        self.backups = backups;
        self.selection_state.backups_index =
            clamp(self.selection_state.backups_index, self.backups.len());
    }

    pub fn set_profiles(&mut self, profiles: Vec<Profile>) {
        self.profiles = profiles;
        self.selection_state.profiles_index =
            clamp(self.selection_state.profiles_index, self.profiles.len());
    }

    pub fn selected_backup(&self) -> Option<&Backup> {
        self.backups.get(self.selection_state.backups_index)
    }

    pub fn selected_profile(&self) -> Option<&Profile> {
        self.profiles.get(self.selection_state.profiles_index)
    }

    /// The history entry under the cursor, only while the list is shown.
    pub fn selected_history_timestamp(&self) -> Option<&str> {
        if !self.optimizer.history_visible {
            return None;
        }
        self.optimizer
            .history
            .get(self.selection_state.history_index)
            .map(|entry| entry.timestamp.as_str())
    }

    // Notification methods
    pub fn add_notification(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let notification = Notification::new(message, level, self.notification_ttl);
        self.push_notification(notification);
    }

    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.push_back(notification);

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.pop_front();
    }

    /// Drop expired toasts and the optimizer's stale status line.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) {
        self.notifications.retain(|n| n.expires_at > now);
        self.optimizer.clear_expired_status(now);
    }
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Utc::now() + ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::with_config(PathBuf::from("unused.toml"), ConsoleConfig::default())
    }

    #[test]
    fn test_starts_with_defaults_in_form() {
        let state = state();
        assert_eq!(state.current_screen, Screen::Settings);
        assert_eq!(state.form.text("max-sessions"), "10");
        assert!(state.form.checkbox("enable-firewall"));
        assert_eq!(state.binder.form.text("port"), "3389");
    }

    #[test]
    fn test_new_reports_first_run_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        assert!(AppState::new(path.clone()).unwrap().config_created);
        assert!(!AppState::new(path).unwrap().config_created);
    }

    #[test]
    fn test_notifications_are_capped() {
        let mut state = state();
        for i in 0..60 {
            state.add_notification(format!("n{}", i), NotificationLevel::Info);
        }

        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications.front().unwrap().message, "n10");
    }

    #[test]
    fn test_prune_expired() {
        let mut state = state();
        state.add_notification("old", NotificationLevel::Info);
        state.optimizer.show_status("Loading optimization history...", NotificationLevel::Info);

        state.prune_expired(Utc::now() + Duration::seconds(2));
        assert_eq!(state.notifications.len(), 1);
        assert!(state.optimizer.status.is_some());

        state.prune_expired(Utc::now() + Duration::seconds(10));
        assert!(state.notifications.is_empty());
        assert!(state.optimizer.status.is_none());
    }

    #[test]
    fn test_navigation_stack() {
        let mut state = state();
        state.navigate_to(Screen::Backups);
        state.navigate_to(Screen::Optimizer);
        state.navigate_back();
        assert_eq!(state.current_screen, Screen::Backups);
        state.navigate_back();
        assert_eq!(state.current_screen, Screen::Settings);
        state.navigate_back();
        assert_eq!(state.current_screen, Screen::Settings);
    }

    #[test]
    fn test_backup_cursor_clamped_on_shrink() {
        let mut state = state();
        state.set_backups(vec![Backup::new("a", ""), Backup::new("b", ""), Backup::new("c", "")]);
        state.selection_state.backups_index = 2;

        state.set_backups(vec![Backup::new("a", "")]);
        assert_eq!(state.selected_backup().unwrap().name, "a");
    }

    #[test]
    fn test_active_form_follows_screen() {
        let mut state = state();
        assert!(state.active_form().unwrap().field("allowed-ips").is_some());

        state.navigate_to(Screen::QuickSettings);
        assert!(state.active_form().unwrap().field("ip-whitelist").is_some());

        state.navigate_to(Screen::Optimizer);
        assert!(state.active_form().is_none());
    }
}
