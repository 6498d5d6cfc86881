use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::new();
    let binder = &state.binder;

    let [form_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let title = format!(
        "Quick Settings - [s]ave {} [l]oad",
        binder.active_category()
    );
    super::form::render(frame, form_area, &binder.form, &title);

    let footer = Paragraph::new(format!(
        " Whitelisted addresses: {}",
        binder.parse_ip_whitelist().len()
    ))
    .style(theme.muted_style());
    frame.render_widget(footer, footer_area);
}
