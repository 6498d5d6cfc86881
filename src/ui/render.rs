use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{screens, Screen, Theme};
use crate::state::AppState;

pub fn render(frame: &mut Frame, state: &AppState) {
    let theme = Theme::new();

    // Main layout: header, menu, content, status bar
    let [header_area, menu_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let header = Paragraph::new("RDP WRAPPER - Settings Console              [?] Help  [q] Quit")
        .style(theme.title_style());
    frame.render_widget(header, header_area);

    frame.render_widget(Paragraph::new(menu_line(state, &theme)), menu_area);

    match &state.current_screen {
        Screen::Settings => screens::settings::render(frame, content_area, state),
        Screen::Backups => screens::backups::render(frame, content_area, state),
        Screen::Profiles => screens::profiles::render(frame, content_area, state),
        Screen::QuickSettings => screens::quick_settings::render(frame, content_area, state),
        Screen::Optimizer => screens::optimizer::render(frame, content_area, state),
        Screen::Help => screens::help::render(frame, content_area),
    }

    // Oldest live toast first, otherwise a summary line
    let status = match state.notifications.front() {
        Some(notification) => {
            Paragraph::new(notification.message.clone()).style(theme.level_style(notification.level))
        }
        None => Paragraph::new(format!(
            "Ready | Pending ops: {} | Backups: {} | Profiles: {}",
            state.pending_operations.len(),
            state.backups.len(),
            state.profiles.len()
        ))
        .style(theme.muted_style()),
    };
    frame.render_widget(status, status_area);

    if let Some(confirm) = &state.confirm {
        render_dialog(frame, "Confirm", &format!("{}\n\n[y] Yes   [n] No", confirm.message));
    } else if let Some(name) = &state.profile_prompt {
        render_dialog(
            frame,
            "New profile",
            &format!("Name: {}_\n\n[Enter] Save   [Esc] Cancel", name),
        );
    }
}

fn menu_line(state: &AppState, theme: &Theme) -> Line<'static> {
    let spans: Vec<Span> = Screen::MENU
        .iter()
        .enumerate()
        .map(|(idx, screen)| {
            let label = format!(" [{}] {} ", idx + 1, screen.title());
            if *screen == state.current_screen {
                Span::styled(label, theme.selected_style())
            } else {
                Span::raw(label)
            }
        })
        .collect();
    Line::from(spans)
}

fn render_dialog(frame: &mut Frame, title: &str, body: &str) {
    let area = centered(frame.area(), 60, 7);
    let dialog = Paragraph::new(body.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .style(Theme::new().editing_style()),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
