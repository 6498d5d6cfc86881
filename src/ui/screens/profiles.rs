use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::state::AppState;
use crate::ui::Theme;

const TITLE: &str = "Profiles - [n]ew from current settings [a]pply [l]oad";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::new();

    if state.profiles.is_empty() {
        let placeholder = Paragraph::new("No profiles saved")
            .style(theme.muted_style())
            .block(Block::default().borders(Borders::ALL).title(TITLE));
        frame.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(vec![Cell::from("Name"), Cell::from("Created")])
        .style(theme.title_style());

    let rows: Vec<Row> = state
        .profiles
        .iter()
        .enumerate()
        .map(|(idx, profile)| {
            let row = Row::new(vec![
                Cell::from(profile.name.clone()),
                Cell::from(profile.display_created()),
            ]);
            if idx == state.selection_state.profiles_index {
                row.style(theme.selected_style())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(TITLE));

    frame.render_widget(table, area);
}
