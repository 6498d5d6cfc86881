use ratatui::style::{Color, Modifier, Style};

use crate::state::NotificationLevel;

pub struct Theme {
    pub primary: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub selected: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Blue,
            info: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            selected: Color::Cyan,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level_style(&self, level: NotificationLevel) -> Style {
        let color = match level {
            NotificationLevel::Info => self.info,
            NotificationLevel::Success => self.success,
            NotificationLevel::Warning => self.warning,
            NotificationLevel::Error => self.error,
        };
        Style::default().fg(color)
    }

    /// Flagged form fields.
    pub fn invalid_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn editing_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}
