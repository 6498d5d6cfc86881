use ratatui::{
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::ui::Theme;

pub fn render(frame: &mut Frame, area: ratatui::layout::Rect) {
    let theme = Theme::new();

    let help_items = vec![
        "RDP Wrapper Console",
        "",
        "Global Keybindings:",
        "  q / Ctrl+C    - Quit application",
        "  ?             - Show this help screen",
        "  Esc           - Go back to previous screen",
        "  x             - Dismiss oldest notification",
        "",
        "Navigation:",
        "  1             - Settings",
        "  2             - Backups",
        "  3             - Profiles",
        "  4             - Quick settings",
        "  5             - Optimizer",
        "",
        "Forms:",
        "  Tab/Shift+Tab - Next / previous tab",
        "  ↑ / ↓         - Move between fields",
        "  Space         - Toggle checkbox",
        "  ← / →         - Choose option",
        "  Enter         - Edit text; Enter or Esc to finish",
        "  s             - Save (whole form, or current category)",
        "  R             - Reset settings to defaults",
        "  b             - Create backup",
        "  l             - Reload from server",
        "",
        "Lists:",
        "  ↑ / k, ↓ / j  - Move selection",
        "  r             - Restore backup / roll back optimization",
        "  d             - Delete backup",
        "  n             - New profile from current settings",
        "  a             - Apply profile / recommendations",
        "",
        "Optimizer:",
        "  g             - Get AI recommendations",
        "  h             - View optimization history",
        "",
        "Confirmation prompts take y / n.",
    ];

    let list_items: Vec<ListItem> = help_items
        .iter()
        .map(|item| ListItem::new(*item))
        .collect();

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help - Keybindings")
            .style(theme.title_style()),
    );

    frame.render_widget(list, area);
}
