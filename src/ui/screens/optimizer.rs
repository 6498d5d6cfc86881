use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::optimizer::display_value;
use crate::state::{AppState, OptimizerPanel};
use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let panel = &state.optimizer;

    let [metrics_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_metrics(frame, metrics_area, panel);

    match (panel.recommendations_visible, panel.history_visible) {
        (true, true) => {
            let [top, bottom] =
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(body_area);
            render_recommendations(frame, top, panel);
            render_history(frame, bottom, state);
        }
        (true, false) => render_recommendations(frame, body_area, panel),
        (false, true) => render_history(frame, body_area, state),
        (false, false) => {
            let idle = Paragraph::new(
                "[g] get AI recommendations   [h] view optimization history",
            )
            .block(Block::default().borders(Borders::ALL).title("AI Optimizer"));
            frame.render_widget(idle, body_area);
        }
    }

    if let Some(status) = &panel.status {
        let theme = Theme::new();
        let line = Paragraph::new(status.message.clone()).style(theme.level_style(status.level));
        frame.render_widget(line, status_area);
    }
}

fn render_metrics(frame: &mut Frame, area: Rect, panel: &OptimizerPanel) {
    let cells: [Rect; 3] = Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(area);
    let metrics = [
        ("CPU Usage", &panel.metrics.cpu_usage),
        ("Memory Usage", &panel.metrics.memory_usage),
        ("Network Latency", &panel.metrics.network_latency),
    ];

    for ((label, value), cell) in metrics.into_iter().zip(cells) {
        let widget = Paragraph::new(value.as_str())
            .block(Block::default().borders(Borders::ALL).title(label));
        frame.render_widget(widget, cell);
    }
}

fn render_recommendations(frame: &mut Frame, area: Rect, panel: &OptimizerPanel) {
    let theme = Theme::new();

    let items: Vec<ListItem> = match &panel.current_recommendations {
        Some(set) if !set.is_empty() => set
            .recommendations
            .iter()
            .map(|rec| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(rec.setting.clone(), theme.title_style()),
                        Span::raw(format!("  Confidence: {}%", display_value(&rec.confidence))),
                    ]),
                    Line::from(format!("  Current: {}", display_value(&rec.current_value))),
                    Line::from(format!(
                        "  Recommended: {}",
                        display_value(&rec.recommended_value)
                    )),
                    Line::from(format!("  Reason: {}", rec.reason)),
                    Line::from(format!("  Impact: {}", rec.impact)),
                ])
            })
            .collect(),
        _ => vec![ListItem::new("No recommendations available at this time.")],
    };

    let title = if panel.can_apply() {
        "Recommendations - [a]pply"
    } else {
        "Recommendations"
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = Theme::new();
    let history = &state.optimizer.history;

    let items: Vec<ListItem> = if history.is_empty() {
        vec![ListItem::new("No optimization history available.")]
    } else {
        history
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let item = ListItem::new(vec![
                    Line::from(entry.display_timestamp()),
                    Line::from(format!(
                        "  Settings Changed: {}",
                        display_value(&entry.settings_changed)
                    )),
                    Line::from(format!(
                        "  Performance Impact: {}",
                        display_value(&entry.performance_impact)
                    )),
                ]);
                if idx == state.selection_state.history_index {
                    item.style(theme.selected_style())
                } else {
                    item
                }
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Optimization History - [r]ollback selected"),
    );
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::models::RecommendationSet;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_placeholders() {
        let mut state =
            AppState::with_config(PathBuf::from("unused.toml"), ConsoleConfig::default());
        let text = draw(&state);
        assert!(text.contains("--"));

        state.optimizer.show_recommendations(RecommendationSet::default());
        state.optimizer.show_history(Vec::new());
        let text = draw(&state);
        assert!(text.contains("No recommendations available at this time."));
        assert!(text.contains("No optimization history available."));
        assert!(!text.contains("[a]pply"));
    }
}
