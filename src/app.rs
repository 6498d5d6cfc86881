use anyhow::Result;
use chrono::Utc;
use crossterm::event;
use ratatui::DefaultTerminal;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{
    ApiResult, CategoryApi, CategoryClient, OptimizerApi, OptimizerClient, SettingsApi,
    SettingsClient,
};
use crate::events::{handle_event, Action};
use crate::form::collect_settings;
use crate::state::selection::step;
use crate::state::{
    AppState, AsyncOperation, AsyncOperationResult, NotificationLevel, OperationType,
    PendingConfirm, Surface,
};
use crate::ui::{render, Screen};

const TICK_RATE: Duration = Duration::from_millis(250);

pub struct App {
    pub state: AppState,
    pub settings_api: Arc<dyn SettingsApi>,
    pub category_api: Arc<dyn CategoryApi>,
    pub optimizer_api: Arc<dyn OptimizerApi>,
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub action_rx: mpsc::UnboundedReceiver<Action>,
    poll_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let state = AppState::new(config_path)?;
        let endpoints = &state.config.endpoints;
        let timeout = state.config.timing.request_timeout();

        let settings_api = Arc::new(SettingsClient::new(&endpoints.settings_base, timeout)?);
        let category_api = Arc::new(CategoryClient::new(&endpoints.settings_base, timeout)?);
        let optimizer_api = Arc::new(OptimizerClient::new(&endpoints.optimizer_base, timeout)?);

        Ok(Self::with_clients(state, settings_api, category_api, optimizer_api))
    }

    pub fn with_clients(
        state: AppState,
        settings_api: Arc<dyn SettingsApi>,
        category_api: Arc<dyn CategoryApi>,
        optimizer_api: Arc<dyn OptimizerApi>,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            state,
            settings_api,
            category_api,
            optimizer_api,
            action_tx,
            action_rx,
            poll_handle: None,
        }
    }

    /// Main event loop following The Elm Architecture pattern
    pub async fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        self.spawn_input_reader();

        for action in [
            Action::LoadSettings,
            Action::LoadCategories,
            Action::LoadProfiles,
            Action::StartPerformancePolling,
        ] {
            self.update(action)?;
        }

        let mut tick = tokio::time::interval(TICK_RATE);

        loop {
            // Render (TEA View)
            terminal.draw(|frame| render(frame, &self.state))?;

            // Input, async results and the clock all arrive as actions
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.update(action)?;
                }

                _ = tick.tick() => {
                    self.update(Action::Tick)?;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Forward terminal events from a dedicated thread. The thread ends once
    /// the app's receiver is gone.
    fn spawn_input_reader(&self) {
        let tx = self.action_tx.clone();

        std::thread::spawn(move || {
            while !tx.is_closed() {
                match event::poll(TICK_RATE) {
                    Ok(true) => match event::read() {
                        Ok(event) => {
                            if tx.send(Action::Input(event)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to read terminal event");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "failed to poll terminal events");
                        break;
                    }
                }
            }
        });
    }

    /// Update function (TEA Update) - processes Actions and updates state
    pub fn update(&mut self, action: Action) -> Result<()> {
        match action {
            // Navigation
            Action::NavigateTo(screen) => {
                self.state.navigate_to(screen);
            }

            Action::NavigateBack => {
                self.state.navigate_back();
            }

            Action::Input(event) => {
                let action = handle_event(event, &self.state);
                if !matches!(action, Action::None) {
                    self.update(action)?;
                }
            }

            Action::Tick => {
                self.state.prune_expired(Utc::now());
            }

            // Form navigation and editing
            Action::NextTab => {
                if let Some(form) = self.state.active_form_mut() {
                    form.next_tab();
                }
            }

            Action::PreviousTab => {
                if let Some(form) = self.state.active_form_mut() {
                    form.previous_tab();
                }
            }

            Action::NextField => {
                if let Some(form) = self.state.active_form_mut() {
                    form.next_field();
                }
            }

            Action::PreviousField => {
                if let Some(form) = self.state.active_form_mut() {
                    form.previous_field();
                }
            }

            Action::ToggleField => {
                if let Some(field) = self.selected_field_mut() {
                    field.toggle();
                }
            }

            Action::CycleOption(forward) => {
                if let Some(field) = self.selected_field_mut() {
                    field.cycle(forward);
                }
            }

            Action::BeginEdit => {
                if let Some(form) = self.state.active_form_mut() {
                    form.begin_edit();
                }
            }

            Action::EditChar(c) => {
                if let Some(field) = self.selected_field_mut() {
                    field.push_char(c);
                }
            }

            Action::EditNewline => {
                if let Some(field) = self.selected_field_mut() {
                    field.push_char('\n');
                }
            }

            Action::EditBackspace => {
                if let Some(field) = self.selected_field_mut() {
                    field.pop_char();
                }
            }

            Action::FinishEdit => {
                let invalid = match self.state.active_form_mut() {
                    Some(form) => form.finish_edit(),
                    None => Vec::new(),
                };

                if !invalid.is_empty() {
                    self.state.add_notification(
                        format!("Invalid IP addresses: {}", invalid.join(", ")),
                        NotificationLevel::Error,
                    );
                }
            }

            // Settings form
            Action::LoadSettings => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::LoadSettings, async move {
                    api.load_settings()
                        .await
                        .map(AsyncOperationResult::SettingsLoaded)
                });
            }

            Action::SaveSettings => match collect_settings(&self.state.form) {
                Ok(settings) => {
                    let api = self.settings_api.clone();
                    self.spawn_operation(OperationType::SaveSettings, async move {
                        api.save_settings(&settings).await?;
                        Ok(AsyncOperationResult::SettingsSaved(settings))
                    });
                }
                Err(e) => {
                    self.state.add_notification(
                        format!("Error saving settings: {}", e),
                        NotificationLevel::Error,
                    );
                }
            },

            Action::ResetSettings => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::ResetSettings, async move {
                    api.reset_settings().await?;
                    Ok(AsyncOperationResult::SettingsReset)
                });
            }

            Action::CreateBackup => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::CreateBackup, async move {
                    api.create_backup().await?;
                    Ok(AsyncOperationResult::BackupCreated)
                });
            }

            Action::LoadBackups => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::LoadBackups, async move {
                    api.list_backups()
                        .await
                        .map(AsyncOperationResult::BackupsLoaded)
                });
            }

            Action::RestoreBackup(name) => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::RestoreBackup(name.clone()), async move {
                    api.restore_backup(&name).await?;
                    Ok(AsyncOperationResult::BackupRestored(name))
                });
            }

            Action::DeleteBackup(name) => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::DeleteBackup(name.clone()), async move {
                    api.delete_backup(&name).await?;
                    Ok(AsyncOperationResult::BackupDeleted(name))
                });
            }

            // Confirmation prompt
            Action::RequestConfirm(message, action) => {
                self.state.confirm = Some(PendingConfirm { message, action });
            }

            Action::ConfirmAccepted => {
                if let Some(pending) = self.state.confirm.take() {
                    self.update(*pending.action)?;
                }
            }

            Action::ConfirmRejected => {
                self.state.confirm = None;
            }

            // Profiles
            Action::LoadProfiles => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::LoadProfiles, async move {
                    api.list_profiles()
                        .await
                        .map(AsyncOperationResult::ProfilesLoaded)
                });
            }

            Action::BeginProfileName => {
                self.state.profile_prompt = Some(String::new());
            }

            Action::ProfileNameChar(c) => {
                if let Some(name) = self.state.profile_prompt.as_mut() {
                    name.push(c);
                }
            }

            Action::ProfileNameBackspace => {
                if let Some(name) = self.state.profile_prompt.as_mut() {
                    name.pop();
                }
            }

            Action::SubmitProfileName => {
                let name = self.state.profile_prompt.take().unwrap_or_default();
                let name = name.trim().to_string();

                if name.is_empty() {
                    self.state
                        .add_notification("Profile name is required", NotificationLevel::Warning);
                } else {
                    let api = self.settings_api.clone();
                    let settings = self.state.settings.clone();
                    self.spawn_operation(OperationType::CreateProfile(name.clone()), async move {
                        api.create_profile(&name, &settings).await?;
                        Ok(AsyncOperationResult::ProfileCreated(name))
                    });
                }
            }

            Action::CancelProfileName => {
                self.state.profile_prompt = None;
            }

            Action::ApplyProfile(name) => {
                let api = self.settings_api.clone();
                self.spawn_operation(OperationType::ApplyProfile(name.clone()), async move {
                    api.apply_profile(&name).await?;
                    Ok(AsyncOperationResult::ProfileApplied(name))
                });
            }

            // Quick settings
            Action::LoadCategories => {
                let api = self.category_api.clone();
                self.spawn_operation(OperationType::LoadCategories, async move {
                    api.load_settings()
                        .await
                        .map(AsyncOperationResult::CategoriesLoaded)
                });
            }

            Action::SaveCategory(category) => match self.state.binder.prepare_save(category) {
                Ok(record) => {
                    let api = self.category_api.clone();
                    self.spawn_operation(OperationType::SaveCategory(category), async move {
                        api.save_category(category, &record).await?;
                        Ok(AsyncOperationResult::CategorySaved(category))
                    });
                }
                Err(e) => {
                    self.state.add_notification(
                        format!("Failed to save settings: {}", e),
                        NotificationLevel::Error,
                    );
                }
            },

            // Optimizer panel
            Action::StartPerformancePolling => {
                self.start_performance_polling();
            }

            Action::PerformanceUpdated(snapshot) => {
                self.state.optimizer.update_metrics(snapshot);
            }

            Action::RequestRecommendations => {
                self.state
                    .optimizer
                    .show_status("Getting AI recommendations...", NotificationLevel::Info);

                let api = self.optimizer_api.clone();
                let runtime = self.state.optimizer.runtime_settings.clone();
                self.spawn_operation(OperationType::RequestRecommendations, async move {
                    api.request_recommendations(&runtime)
                        .await
                        .map(AsyncOperationResult::RecommendationsReceived)
                });
            }

            Action::ApplyRecommendations => {
                match self.state.optimizer.current_recommendations.clone() {
                    None => {
                        self.state
                            .optimizer
                            .show_status("No recommendations to apply", NotificationLevel::Warning);
                    }
                    Some(recommendations) => {
                        self.state
                            .optimizer
                            .show_status("Applying recommendations...", NotificationLevel::Info);

                        let api = self.optimizer_api.clone();
                        self.spawn_operation(OperationType::ApplyRecommendations, async move {
                            api.apply_recommendations(&recommendations).await?;
                            Ok(AsyncOperationResult::RecommendationsApplied)
                        });
                    }
                }
            }

            Action::LoadHistory => {
                self.state
                    .optimizer
                    .show_status("Loading optimization history...", NotificationLevel::Info);

                let api = self.optimizer_api.clone();
                self.spawn_operation(OperationType::LoadHistory, async move {
                    api.optimization_history()
                        .await
                        .map(AsyncOperationResult::HistoryLoaded)
                });
            }

            Action::Rollback(timestamp) => {
                self.state
                    .optimizer
                    .show_status("Rolling back optimization...", NotificationLevel::Info);

                let api = self.optimizer_api.clone();
                self.spawn_operation(OperationType::Rollback(timestamp.clone()), async move {
                    api.rollback(&timestamp).await?;
                    Ok(AsyncOperationResult::RolledBack(timestamp))
                });
            }

            // Selection navigation
            Action::SelectNext => self.move_selection(true),
            Action::SelectPrevious => self.move_selection(false),

            // Async operation results
            Action::AsyncOperationCompleted(op_id, result) => {
                let Some(index) = self
                    .state
                    .pending_operations
                    .iter()
                    .position(|o| o.id == op_id)
                else {
                    tracing::warn!(%op_id, "result for unknown operation");
                    return Ok(());
                };
                let mut op = self.state.pending_operations.remove(index);

                match result {
                    Ok(async_result) => {
                        op.complete();
                        self.handle_async_result(async_result)?;
                    }
                    Err(message) => {
                        op.fail(message);
                        self.report_failure(&op);
                    }
                }

                tracing::debug!(
                    operation = ?op.operation_type,
                    completed = op.is_completed(),
                    failed = op.is_failed(),
                    elapsed_ms = (Utc::now() - op.started_at).num_milliseconds(),
                    "operation finished"
                );
            }

            // Notifications
            Action::DismissNotification => {
                self.state.dismiss_notification();
            }

            // System
            Action::Quit => {
                self.state.should_quit = true;
            }

            Action::None => {}
        }

        Ok(())
    }

    fn selected_field_mut(&mut self) -> Option<&mut crate::form::Field> {
        self.state.active_form_mut()?.selected_mut()
    }

    fn move_selection(&mut self, forward: bool) {
        let state = &mut self.state;
        let selection = &mut state.selection_state;

        match state.current_screen {
            Screen::Backups => {
                selection.backups_index = step(selection.backups_index, state.backups.len(), forward);
            }
            Screen::Profiles => {
                selection.profiles_index =
                    step(selection.profiles_index, state.profiles.len(), forward);
            }
            Screen::Optimizer => {
                selection.history_index =
                    step(selection.history_index, state.optimizer.history.len(), forward);
            }
            _ => {}
        }
    }

    fn report_failure(&mut self, op: &AsyncOperation) {
        let Some(message) = op.error() else {
            return;
        };

        match op.operation_type.surface() {
            Surface::Notification => {
                self.state.add_notification(message, NotificationLevel::Error);
            }
            Surface::OptimizerStatus => {
                self.state
                    .optimizer
                    .show_status(message, NotificationLevel::Error);
            }
            Surface::Silent => {}
        }
    }

    fn handle_async_result(&mut self, result: AsyncOperationResult) -> Result<()> {
        match result {
            AsyncOperationResult::SettingsLoaded(settings) => {
                self.state.apply_settings(settings);
                self.update(Action::LoadBackups)?;
            }

            AsyncOperationResult::SettingsSaved(settings) => {
                self.state.settings = settings;
                self.state
                    .add_notification("Settings saved successfully", NotificationLevel::Success);
            }

            AsyncOperationResult::SettingsReset => {
                self.state
                    .add_notification("Settings reset to defaults", NotificationLevel::Success);
                self.update(Action::LoadSettings)?;
            }

            AsyncOperationResult::BackupCreated => {
                self.state
                    .add_notification("Backup created successfully", NotificationLevel::Success);
                self.update(Action::LoadBackups)?;
            }

            AsyncOperationResult::BackupsLoaded(backups) => {
                self.state.set_backups(backups);
            }

            AsyncOperationResult::BackupRestored(name) => {
                tracing::info!(backup = %name, "settings restored");
                self.state
                    .add_notification("Settings restored successfully", NotificationLevel::Success);
                self.update(Action::LoadSettings)?;
            }

            AsyncOperationResult::BackupDeleted(name) => {
                tracing::info!(backup = %name, "backup deleted");
                self.state
                    .add_notification("Backup deleted successfully", NotificationLevel::Success);
                self.update(Action::LoadBackups)?;
            }

            AsyncOperationResult::ProfilesLoaded(profiles) => {
                self.state.set_profiles(profiles);
            }

            AsyncOperationResult::ProfileCreated(name) => {
                self.state.add_notification(
                    format!("Profile {} created", name),
                    NotificationLevel::Success,
                );
                self.update(Action::LoadProfiles)?;
            }

            AsyncOperationResult::ProfileApplied(name) => {
                self.state.add_notification(
                    format!("Profile {} applied", name),
                    NotificationLevel::Success,
                );
                self.update(Action::LoadSettings)?;
            }

            AsyncOperationResult::CategoriesLoaded(settings) => {
                if let Err(e) = self.state.binder.apply_loaded(&settings) {
                    tracing::error!(error = %e, "failed to merge loaded settings");
                }
            }

            AsyncOperationResult::CategorySaved(category) => {
                tracing::info!(%category, "category saved");
                self.state
                    .add_notification("Settings saved successfully", NotificationLevel::Success);
            }

            AsyncOperationResult::RecommendationsReceived(recommendations) => {
                self.state.optimizer.show_recommendations(recommendations);
                self.state.optimizer.show_status(
                    "Recommendations received successfully",
                    NotificationLevel::Success,
                );
            }

            AsyncOperationResult::RecommendationsApplied => {
                self.state.optimizer.recommendations_applied();
                self.state.optimizer.show_status(
                    "Recommendations applied successfully",
                    NotificationLevel::Success,
                );
            }

            AsyncOperationResult::HistoryLoaded(history) => {
                self.state.selection_state.history_index = 0;
                self.state.optimizer.show_history(history);
            }

            AsyncOperationResult::RolledBack(timestamp) => {
                tracing::info!(%timestamp, "optimization rolled back");
                self.state.optimizer.rolled_back();
                self.state.optimizer.show_status(
                    "Rollback completed successfully",
                    NotificationLevel::Success,
                );
            }
        }

        Ok(())
    }

    /// Track an operation and run it on the runtime. The outcome comes back
    /// through the action channel.
    fn spawn_operation<F>(&mut self, operation_type: OperationType, task: F)
    where
        F: Future<Output = ApiResult<AsyncOperationResult>> + Send + 'static,
    {
        let op = AsyncOperation::new(operation_type.clone());
        let op_id = op.id;
        self.state.pending_operations.push(op);

        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let result = task.await.map_err(|e| {
                tracing::warn!(operation = ?operation_type, error = %e, "operation failed");
                operation_type.describe_failure(&e)
            });

            let _ = tx.send(Action::AsyncOperationCompleted(op_id, result));
        });
    }

    /// Fetch metrics now and then on every interval. Overlapping requests
    /// are not deduplicated.
    fn start_performance_polling(&mut self) {
        if self.state.optimizer.is_monitoring {
            return;
        }

        let api = self.optimizer_api.clone();
        let tx = self.action_tx.clone();
        let period = self.state.config.timing.poll_interval();

        self.poll_handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;
                if tx.is_closed() {
                    break;
                }

                let api = api.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    match api.performance_data().await {
                        Ok(snapshot) => {
                            let _ = tx.send(Action::PerformanceUpdated(snapshot));
                        }
                        Err(e) => tracing::error!(error = %e, "failed to fetch performance data"),
                    }
                });
            }
        }));
        self.state.optimizer.is_monitoring = true;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.poll_handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::ConsoleConfig;
    use crate::models::{
        Backup, Category, HistoryEntry, PerformanceSnapshot, Profile, Recommendation,
        RecommendationSet, RuntimeSettings, Settings,
    };
    use async_trait::async_trait;
    use serde_json::{json, Map, Value};
    use std::sync::Mutex;

    /// In-memory stand-in for all three backends.
    #[derive(Default)]
    struct FakeBackend {
        settings: Mutex<Settings>,
        backups: Vec<Backup>,
        save_rejection: Option<String>,
        category_rejection: Option<String>,
        recommendations: RecommendationSet,
        history: Vec<HistoryEntry>,
        calls: Mutex<Vec<String>>,
        saved_records: Mutex<Vec<Value>>,
        applied: Mutex<Vec<RecommendationSet>>,
    }

    impl FakeBackend {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SettingsApi for FakeBackend {
        async fn load_settings(&self) -> ApiResult<Settings> {
            self.record("load_settings");
            Ok(self.settings.lock().unwrap().clone())
        }

        async fn save_settings(&self, settings: &Settings) -> ApiResult<()> {
            self.record("save_settings");
            if let Some(reason) = &self.save_rejection {
                return Err(ApiError::Rejected(reason.clone()));
            }
            *self.settings.lock().unwrap() = settings.clone();
            Ok(())
        }

        async fn reset_settings(&self) -> ApiResult<()> {
            self.record("reset_settings");
            Ok(())
        }

        async fn create_backup(&self) -> ApiResult<()> {
            self.record("create_backup");
            Ok(())
        }

        async fn list_backups(&self) -> ApiResult<Vec<Backup>> {
            self.record("list_backups");
            Ok(self.backups.clone())
        }

        async fn restore_backup(&self, name: &str) -> ApiResult<()> {
            self.record(format!("restore_backup {}", name));
            Ok(())
        }

        async fn delete_backup(&self, name: &str) -> ApiResult<()> {
            self.record(format!("delete_backup {}", name));
            Ok(())
        }

        async fn list_profiles(&self) -> ApiResult<Vec<Profile>> {
            Ok(Vec::new())
        }

        async fn create_profile(&self, name: &str, _settings: &Settings) -> ApiResult<()> {
            self.record(format!("create_profile {}", name));
            Ok(())
        }

        async fn apply_profile(&self, name: &str) -> ApiResult<()> {
            self.record(format!("apply_profile {}", name));
            Ok(())
        }
    }

    #[async_trait]
    impl CategoryApi for FakeBackend {
        async fn load_settings(&self) -> ApiResult<Map<String, Value>> {
            let loaded = json!({"network": {"port": 3390, "adapter": "ethernet"}});
            Ok(loaded.as_object().cloned().unwrap_or_default())
        }

        async fn save_category(&self, category: Category, record: &Value) -> ApiResult<()> {
            self.record(format!("save_category {}", category.as_str()));
            if let Some(reason) = &self.category_rejection {
                return Err(ApiError::Rejected(reason.clone()));
            }
            self.saved_records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl OptimizerApi for FakeBackend {
        async fn request_recommendations(
            &self,
            _settings: &RuntimeSettings,
        ) -> ApiResult<RecommendationSet> {
            self.record("request_recommendations");
            Ok(self.recommendations.clone())
        }

        async fn apply_recommendations(&self, recommendations: &RecommendationSet) -> ApiResult<()> {
            self.record("apply_recommendations");
            self.applied.lock().unwrap().push(recommendations.clone());
            Ok(())
        }

        async fn optimization_history(&self) -> ApiResult<Vec<HistoryEntry>> {
            Ok(self.history.clone())
        }

        async fn rollback(&self, timestamp: &str) -> ApiResult<()> {
            self.record(format!("rollback {}", timestamp));
            Ok(())
        }

        async fn performance_data(&self) -> ApiResult<PerformanceSnapshot> {
            Ok(PerformanceSnapshot {
                cpu_usage: 45.5,
                memory_usage: 60.0,
                network_latency: 12.0,
            })
        }
    }

    fn app_with(backend: Arc<FakeBackend>) -> App {
        let state = AppState::with_config(PathBuf::from("unused.toml"), ConsoleConfig::default());
        App::with_clients(state, backend.clone(), backend.clone(), backend)
    }

    /// Apply the next action that arrives on the channel.
    async fn settle(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        app.update(action).unwrap();
    }

    fn last_notification(app: &App) -> String {
        app.state.notifications.back().unwrap().message.clone()
    }

    fn status(app: &App) -> (String, NotificationLevel) {
        let status = app.state.optimizer.status.as_ref().unwrap();
        (status.message.clone(), status.level)
    }

    fn recommendation() -> Recommendation {
        serde_json::from_value(json!({
            "setting": "timeout",
            "confidence": 0.9,
            "current_value": 30,
            "recommended_value": 60,
            "reason": "Sessions drop under load",
            "impact": "Fewer reconnects"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_rejection_keeps_cached_settings() {
        let backend = Arc::new(FakeBackend {
            save_rejection: Some("Settings file is read-only".to_string()),
            ..Default::default()
        });
        let mut app = app_with(backend.clone());
        app.state.form.set_text("max-sessions", "20");

        app.update(Action::SaveSettings).unwrap();
        settle(&mut app).await;

        assert_eq!(app.state.settings, Settings::default());
        assert_eq!(
            last_notification(&app),
            "Failed to save settings: Settings file is read-only"
        );
        assert!(app.state.pending_operations.is_empty());
    }

    #[tokio::test]
    async fn test_save_success_replaces_cache() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());
        app.state.form.set_text("max-sessions", "20");

        app.update(Action::SaveSettings).unwrap();
        settle(&mut app).await;

        assert_eq!(app.state.settings.general.max_sessions, Some(20));
        assert_eq!(backend.settings.lock().unwrap().general.max_sessions, Some(20));
        assert_eq!(last_notification(&app), "Settings saved successfully");
    }

    #[tokio::test]
    async fn test_empty_number_is_saved_as_null() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());
        app.state.form.set_text("max-bandwidth", "");

        app.update(Action::SaveSettings).unwrap();
        assert_eq!(app.state.pending_operations.len(), 1);
        settle(&mut app).await;

        assert_eq!(backend.settings.lock().unwrap().performance.max_bandwidth, None);
        assert_eq!(app.state.settings.performance.max_bandwidth, None);
        assert_eq!(last_notification(&app), "Settings saved successfully");
    }

    #[tokio::test]
    async fn test_load_populates_form_then_loads_backups() {
        let mut remote = Settings::default();
        remote.security.allowed_ips = vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()];
        let backend = Arc::new(FakeBackend {
            settings: Mutex::new(remote.clone()),
            backups: vec![Backup::new("settings_backup_1.json", "2024-01-01T10:00:00")],
            ..Default::default()
        });
        let mut app = app_with(backend.clone());

        app.update(Action::LoadSettings).unwrap();
        settle(&mut app).await;

        assert_eq!(app.state.settings, remote);
        assert_eq!(app.state.form.text("allowed-ips"), "10.0.0.1\n10.0.0.2");

        settle(&mut app).await;
        assert_eq!(app.state.backups.len(), 1);
        assert_eq!(backend.calls(), vec!["load_settings", "list_backups"]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads_backups() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        app.update(Action::RequestConfirm(
            "Are you sure you want to delete old.json?".to_string(),
            Box::new(Action::DeleteBackup("old.json".to_string())),
        ))
        .unwrap();
        assert!(backend.calls().is_empty());

        app.update(Action::ConfirmAccepted).unwrap();
        assert!(app.state.confirm.is_none());
        settle(&mut app).await;
        assert_eq!(last_notification(&app), "Backup deleted successfully");

        settle(&mut app).await;
        assert_eq!(backend.calls(), vec!["delete_backup old.json", "list_backups"]);
    }

    #[tokio::test]
    async fn test_rejected_confirm_does_nothing() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        app.update(Action::RequestConfirm(
            "Are you sure you want to reset all settings to defaults?".to_string(),
            Box::new(Action::ResetSettings),
        ))
        .unwrap();
        app.update(Action::ConfirmRejected).unwrap();

        assert!(app.state.confirm.is_none());
        assert!(app.state.pending_operations.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_ips_reported_on_blur() {
        let mut app = app_with(Arc::new(FakeBackend::default()));
        app.state.form.select_tab(1);
        while app.state.form.selected().unwrap().id != "allowed-ips" {
            app.state.form.next_field();
        }
        app.update(Action::BeginEdit).unwrap();
        for c in "10.0.0.1\nbogus".chars() {
            app.update(Action::EditChar(c)).unwrap();
        }
        app.update(Action::FinishEdit).unwrap();

        assert!(!app.state.form.editing);
        assert_eq!(last_notification(&app), "Invalid IP addresses: bogus");
        assert_eq!(app.state.form.invalid_fields(), vec!["allowed-ips"]);
    }

    #[tokio::test]
    async fn test_apply_clears_recommendations() {
        let backend = Arc::new(FakeBackend {
            recommendations: RecommendationSet {
                recommendations: vec![recommendation()],
                ..Default::default()
            },
            ..Default::default()
        });
        let mut app = app_with(backend.clone());

        app.update(Action::RequestRecommendations).unwrap();
        assert_eq!(status(&app).0, "Getting AI recommendations...");
        settle(&mut app).await;
        assert!(app.state.optimizer.recommendations_visible);
        assert_eq!(status(&app).0, "Recommendations received successfully");

        app.update(Action::ApplyRecommendations).unwrap();
        settle(&mut app).await;

        assert!(app.state.optimizer.current_recommendations.is_none());
        assert!(!app.state.optimizer.recommendations_visible);
        assert_eq!(
            status(&app),
            ("Recommendations applied successfully".to_string(), NotificationLevel::Success)
        );
        assert_eq!(backend.applied.lock().unwrap()[0].recommendations.len(), 1);
    }

    #[tokio::test]
    async fn test_apply_without_recommendations_warns() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        app.update(Action::ApplyRecommendations).unwrap();

        assert_eq!(
            status(&app),
            ("No recommendations to apply".to_string(), NotificationLevel::Warning)
        );
        assert!(app.state.pending_operations.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rollback_hides_history() {
        let backend = Arc::new(FakeBackend {
            history: vec![HistoryEntry {
                timestamp: "2024-03-01T12:00:00".to_string(),
                settings_changed: json!(["timeout"]),
                performance_impact: json!("+12% throughput"),
            }],
            ..Default::default()
        });
        let mut app = app_with(backend.clone());

        app.update(Action::LoadHistory).unwrap();
        settle(&mut app).await;
        assert!(app.state.optimizer.history_visible);

        app.update(Action::Rollback("2024-03-01T12:00:00".to_string()))
            .unwrap();
        settle(&mut app).await;

        assert!(!app.state.optimizer.history_visible);
        assert_eq!(status(&app).0, "Rollback completed successfully");
        assert_eq!(backend.calls(), vec!["rollback 2024-03-01T12:00:00"]);
    }

    #[tokio::test]
    async fn test_category_save_messages() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());
        app.state.binder.form.set_text("port", "3390");

        app.update(Action::SaveCategory(Category::Network)).unwrap();
        settle(&mut app).await;

        assert_eq!(last_notification(&app), "Settings saved successfully");
        assert_eq!(backend.saved_records.lock().unwrap()[0]["port"], 3390);

        let rejecting = Arc::new(FakeBackend {
            category_rejection: Some("Port already in use".to_string()),
            ..Default::default()
        });
        let mut app = app_with(rejecting);
        app.update(Action::SaveCategory(Category::Network)).unwrap();
        settle(&mut app).await;
        assert_eq!(last_notification(&app), "Port already in use");
    }

    #[tokio::test]
    async fn test_loaded_categories_merge_into_binder() {
        let mut app = app_with(Arc::new(FakeBackend::default()));

        app.update(Action::LoadCategories).unwrap();
        settle(&mut app).await;

        assert_eq!(app.state.binder.settings.network.port, Some(3390));
        assert_eq!(app.state.binder.form.text("adapter"), "ethernet");
        assert_eq!(app.state.binder.settings.general.max_sessions, Some(10));
    }

    #[tokio::test]
    async fn test_polling_updates_metrics() {
        let mut app = app_with(Arc::new(FakeBackend::default()));
        assert_eq!(app.state.optimizer.metrics.cpu_usage, "--");

        app.update(Action::StartPerformancePolling).unwrap();
        settle(&mut app).await;

        assert!(app.state.optimizer.is_monitoring);
        assert_eq!(app.state.optimizer.metrics.cpu_usage, "45.5%");
        assert_eq!(app.state.optimizer.metrics.network_latency, "12ms");
    }

    #[tokio::test]
    async fn test_polling_starts_once() {
        let mut app = app_with(Arc::new(FakeBackend::default()));
        app.state.optimizer.is_monitoring = true;

        app.update(Action::StartPerformancePolling).unwrap();
        assert!(app.poll_handle.is_none());
    }

    #[tokio::test]
    async fn test_profile_prompt_creates_profile() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = app_with(backend.clone());

        app.update(Action::BeginProfileName).unwrap();
        for c in " night ".chars() {
            app.update(Action::ProfileNameChar(c)).unwrap();
        }
        app.update(Action::SubmitProfileName).unwrap();
        settle(&mut app).await;

        assert!(app.state.profile_prompt.is_none());
        assert_eq!(last_notification(&app), "Profile night created");
        assert_eq!(backend.calls()[0], "create_profile night");
    }
}
