use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Action;
use crate::state::AppState;
use crate::ui::Screen;

/// Convert crossterm events to Actions.
///
/// Modal input wins over everything else: an open confirmation, then the
/// profile name prompt, then a field being edited.
pub fn handle_event(event: Event, state: &AppState) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            handle_key_event(key_event, state)
        }
        _ => Action::None,
    }
}

fn handle_key_event(key: KeyEvent, state: &AppState) -> Action {
    if state.confirm.is_some() {
        return handle_confirm_keys(key);
    }
    if state.profile_prompt.is_some() {
        return handle_prompt_keys(key);
    }
    if state.is_editing() {
        return handle_edit_keys(key, state);
    }

    // Global key bindings (work on all screens)
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
            return Action::Quit
        }
        (KeyCode::Char('?'), _) => return Action::NavigateTo(Screen::Help),
        (KeyCode::Esc, _) => return Action::NavigateBack,
        (KeyCode::Char('x'), KeyModifiers::NONE) => return Action::DismissNotification,
        (KeyCode::Char(c @ '1'..='5'), KeyModifiers::NONE) => {
            let index = c as usize - '1' as usize;
            return Action::NavigateTo(Screen::MENU[index].clone());
        }
        _ => {}
    }

    // Screen-specific key bindings
    match state.current_screen {
        Screen::Settings => handle_settings_keys(key),
        Screen::QuickSettings => handle_quick_settings_keys(key, state),
        Screen::Backups => handle_backups_keys(key, state),
        Screen::Profiles => handle_profiles_keys(key, state),
        Screen::Optimizer => handle_optimizer_keys(key, state),
        Screen::Help => Action::None,
    }
}

fn handle_confirm_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmAccepted,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmRejected,
        _ => Action::None,
    }
}

fn handle_prompt_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::SubmitProfileName,
        KeyCode::Esc => Action::CancelProfileName,
        KeyCode::Backspace => Action::ProfileNameBackspace,
        KeyCode::Char(c) => Action::ProfileNameChar(c),
        _ => Action::None,
    }
}

fn handle_edit_keys(key: KeyEvent, state: &AppState) -> Action {
    let multiline = state
        .active_form()
        .and_then(|form| form.selected())
        .is_some_and(|field| field.is_multiline());

    match key.code {
        KeyCode::Esc => Action::FinishEdit,
        KeyCode::Enter if multiline => Action::EditNewline,
        KeyCode::Enter => Action::FinishEdit,
        KeyCode::Backspace => Action::EditBackspace,
        KeyCode::Char(c) => Action::EditChar(c),
        _ => Action::None,
    }
}

/// Keys shared by both form screens. Returns `None` for keys they leave to
/// the screen.
fn handle_form_keys(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PreviousTab,
        KeyCode::Down | KeyCode::Char('j') => Action::NextField,
        KeyCode::Up | KeyCode::Char('k') => Action::PreviousField,
        KeyCode::Char(' ') => Action::ToggleField,
        KeyCode::Left => Action::CycleOption(false),
        KeyCode::Right => Action::CycleOption(true),
        KeyCode::Enter => Action::BeginEdit,
        _ => return None,
    };
    Some(action)
}

fn handle_settings_keys(key: KeyEvent) -> Action {
    if let Some(action) = handle_form_keys(key) {
        return action;
    }

    match key.code {
        KeyCode::Char('s') => Action::SaveSettings,
        KeyCode::Char('R') => Action::RequestConfirm(
            "Are you sure you want to reset all settings to defaults?".to_string(),
            Box::new(Action::ResetSettings),
        ),
        KeyCode::Char('b') => Action::CreateBackup,
        KeyCode::Char('l') => Action::LoadSettings,
        _ => Action::None,
    }
}

fn handle_quick_settings_keys(key: KeyEvent, state: &AppState) -> Action {
    if let Some(action) = handle_form_keys(key) {
        return action;
    }

    match key.code {
        KeyCode::Char('s') => Action::SaveCategory(state.binder.active_category()),
        KeyCode::Char('l') => Action::LoadCategories,
        _ => Action::None,
    }
}

fn handle_backups_keys(key: KeyEvent, state: &AppState) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('b') => Action::CreateBackup,
        KeyCode::Char('l') => Action::LoadBackups,
        KeyCode::Char('r') => match state.selected_backup() {
            Some(backup) => Action::RequestConfirm(
                format!("Are you sure you want to restore from {}?", backup.name),
                Box::new(Action::RestoreBackup(backup.name.clone())),
            ),
            None => Action::None,
        },
        KeyCode::Char('d') => match state.selected_backup() {
            Some(backup) => Action::RequestConfirm(
                format!("Are you sure you want to delete {}?", backup.name),
                Box::new(Action::DeleteBackup(backup.name.clone())),
            ),
            None => Action::None,
        },
        _ => Action::None,
    }
}

fn handle_profiles_keys(key: KeyEvent, state: &AppState) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('n') => Action::BeginProfileName,
        KeyCode::Char('l') => Action::LoadProfiles,
        KeyCode::Char('a') => match state.selected_profile() {
            Some(profile) => Action::RequestConfirm(
                format!("Are you sure you want to apply profile {}?", profile.name),
                Box::new(Action::ApplyProfile(profile.name.clone())),
            ),
            None => Action::None,
        },
        _ => Action::None,
    }
}

fn handle_optimizer_keys(key: KeyEvent, state: &AppState) -> Action {
    let panel = &state.optimizer;

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('g') => Action::RequestRecommendations,
        KeyCode::Char('h') => Action::LoadHistory,
        // An empty set is shown without an apply action
        KeyCode::Char('a') if panel.current_recommendations.is_some() && !panel.can_apply() => {
            Action::None
        }
        KeyCode::Char('a') => Action::ApplyRecommendations,
        KeyCode::Char('r') => match state.selected_history_timestamp() {
            Some(timestamp) => Action::Rollback(timestamp.to_string()),
            None => Action::None,
        },
        _ => Action::None,
    }
}
