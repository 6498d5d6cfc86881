use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::form::Form;
use crate::ui::Theme;

/// Tab strip, field table and, while a multi-line field is being edited,
/// an editor pane with its full text.
pub fn render(frame: &mut Frame, area: Rect, form: &Form, title: &str) {
    let theme = Theme::new();

    let editing_multiline = form.editing && form.selected().is_some_and(|f| f.is_multiline());
    let editor_height = if editing_multiline { 8 } else { 0 };

    let [tabs_area, table_area, editor_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(editor_height),
    ])
    .areas(area);

    let titles: Vec<Line> = form.tabs.iter().map(|tab| Line::from(tab.title)).collect();
    let tabs = Tabs::new(titles)
        .select(form.active_tab)
        .highlight_style(theme.selected_style())
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(tabs, tabs_area);

    let Some(tab) = form.active() else {
        return;
    };

    let rows: Vec<Row> = tab
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let selected = idx == form.selected_field;
            let value = if selected && form.editing && !field.is_multiline() {
                format!("{}_", field.text)
            } else {
                field.display_value()
            };

            let mut value_cell = Cell::from(value);
            if field.invalid {
                value_cell = value_cell.style(theme.invalid_style());
            }

            let row = Row::new(vec![Cell::from(field.label), value_cell]);
            match (selected, form.editing) {
                (true, true) => row.style(theme.editing_style()),
                (true, false) => row.style(theme.selected_style()),
                _ => row,
            }
        })
        .collect();

    let hint = if form.editing {
        "[Enter/Esc] done"
    } else {
        "[Tab] tab [↑↓] field [Space] toggle [←→] choose [Enter] edit"
    };

    let table = Table::new(rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
        .block(Block::default().borders(Borders::ALL).title(hint));
    frame.render_widget(table, table_area);

    if editing_multiline {
        if let Some(field) = form.selected() {
            let editor = Paragraph::new(format!("{}_", field.text))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("{} - [Enter] new line [Esc] done", field.label))
                        .style(theme.editing_style()),
                );
            frame.render_widget(editor, editor_area);
        }
    }
}
