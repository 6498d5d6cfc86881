use anyhow::Result;
use directories::ProjectDirs;

mod api;
mod app;
mod binder;
mod config;
mod events;
mod form;
mod logging;
mod models;
mod state;
mod ui;
mod validation;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error messages
    color_eyre::install().ok(); // Ignore error if already installed

    // Determine config path
    let config_path = if let Some(proj_dirs) = ProjectDirs::from("com", "rdpwrap", "rdpwrap-console")
    {
        proj_dirs.config_dir().join("config.toml")
    } else {
        std::env::current_dir()?.join("rdpwrap-console.toml")
    };

    let mut app = App::new(config_path)?;

    // Held until exit so buffered log records are flushed
    let _log_guard = logging::init_logging(&app.state.config.logging)?;
    if app.state.config_created {
        tracing::info!(path = %app.state.config_path.display(), "wrote default configuration");
    }
    tracing::info!(
        config = %app.state.config_path.display(),
        settings = %app.state.config.endpoints.settings_base,
        optimizer = %app.state.config.endpoints.optimizer_base,
        "starting console"
    );

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(error = %e, "console exited with an error");
    }

    result
}
