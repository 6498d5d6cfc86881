use ratatui::{layout::Rect, Frame};

use crate::state::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    super::form::render(
        frame,
        area,
        &state.form,
        "Settings - [s]ave [R]eset [b]ackup [l]oad",
    );
}
