use crossterm::event::Event;
use uuid::Uuid;

use crate::models::{Category, PerformanceSnapshot};
use crate::state::AsyncOperationResult;
use crate::ui::Screen;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateTo(Screen),
    NavigateBack,

    // Terminal plumbing
    Input(Event),
    Tick,

    // Form navigation and editing
    NextTab,
    PreviousTab,
    NextField,
    PreviousField,
    ToggleField,
    CycleOption(bool),
    BeginEdit,
    EditChar(char),
    EditBackspace,
    EditNewline,
    FinishEdit,

    // Settings form
    LoadSettings,
    SaveSettings,
    ResetSettings,
    CreateBackup,
    LoadBackups,
    RestoreBackup(String),
    DeleteBackup(String),

    // Confirmation prompt
    RequestConfirm(String, Box<Action>),
    ConfirmAccepted,
    ConfirmRejected,

    // Profiles
    LoadProfiles,
    BeginProfileName,
    ProfileNameChar(char),
    ProfileNameBackspace,
    SubmitProfileName,
    CancelProfileName,
    ApplyProfile(String),

    // Quick settings
    LoadCategories,
    SaveCategory(Category),

    // Optimizer panel
    StartPerformancePolling,
    PerformanceUpdated(PerformanceSnapshot),
    RequestRecommendations,
    ApplyRecommendations,
    LoadHistory,
    Rollback(String),

    // Selection/UI
    SelectNext,
    SelectPrevious,

    // Async operation results
    AsyncOperationCompleted(Uuid, Result<AsyncOperationResult, String>),

    // Notifications
    DismissNotification,

    // System
    Quit,

    // No-op
    None,
}
