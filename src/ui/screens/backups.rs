use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::state::AppState;
use crate::ui::Theme;

const TITLE: &str = "Backups - [b]ackup now [r]estore [d]elete [l]oad";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::new();

    if state.backups.is_empty() {
        let placeholder = Paragraph::new("No backups available")
            .style(theme.muted_style())
            .block(Block::default().borders(Borders::ALL).title(TITLE));

        frame.render_widget(placeholder, area);
        return;
    }

    let selected_index = state.selection_state.backups_index;

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Date"),
        Cell::from("Version"),
        Cell::from("Size"),
    ])
    .style(theme.title_style())
    .height(1);

    let rows: Vec<Row> = state
        .backups
        .iter()
        .enumerate()
        .map(|(idx, backup)| {
            let row = Row::new(vec![
                Cell::from(backup.name.clone()),
                Cell::from(backup.display_date()),
                Cell::from(backup.version.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(backup.display_size()),
            ]);

            if idx == selected_index {
                row.style(theme.selected_style())
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Percentage(45),
        Constraint::Length(20),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(TITLE));

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::models::Backup;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn state() -> AppState {
        AppState::with_config(PathBuf::from("unused.toml"), ConsoleConfig::default())
    }

    #[test]
    fn test_empty_list_shows_placeholder() {
        let text = draw(&state());
        assert!(text.contains("No backups available"));
    }

    #[test]
    fn test_one_row_per_backup() {
        let mut state = state();
        state.set_backups(vec![
            Backup::new("settings_backup_20240101.json", "2024-01-01T10:00:00"),
            Backup::new("settings_backup_20240102.json", "2024-01-02T10:00:00"),
        ]);

        let text = draw(&state);
        assert!(!text.contains("No backups available"));
        assert!(text.contains("settings_backup_20240101.json"));
        assert!(text.contains("settings_backup_20240102.json"));
        assert!(text.contains("2024-01-02 10:00:00"));
    }
}
