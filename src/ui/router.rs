#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Settings,
    Backups,
    Profiles,
    QuickSettings,
    Optimizer,
    Help,
}

impl Screen {
    /// Screens reachable from the number-key menu, in menu order.
    pub const MENU: [Screen; 5] = [
        Screen::Settings,
        Screen::Backups,
        Screen::Profiles,
        Screen::QuickSettings,
        Screen::Optimizer,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Settings => "Settings",
            Screen::Backups => "Backups",
            Screen::Profiles => "Profiles",
            Screen::QuickSettings => "Quick Settings",
            Screen::Optimizer => "Optimizer",
            Screen::Help => "Help",
        }
    }
}
