use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::schema::ConsoleConfig;

/// A loaded configuration. `created` is set when the file did not exist and
/// the defaults were just written out.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ConsoleConfig,
    pub created: bool,
}

/// Load the console configuration, creating a default file when missing
pub fn load_config(path: &Path) -> Result<LoadedConfig> {
    if !path.exists() {
        // First run: write the defaults so they can be edited
        let config = ConsoleConfig::default();
        save_config(path, &config)?;
        return Ok(LoadedConfig {
            config,
            created: true,
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: ConsoleConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(LoadedConfig {
        config,
        created: false,
    })
}

/// Write the configuration as pretty TOML, creating parent directories
pub fn save_config(path: &Path, config: &ConsoleConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config)
        .context("Failed to serialize config to TOML")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}
