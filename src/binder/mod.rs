//! Quick settings: the per-category settings model.
//!
//! Unlike the full settings form, each category is saved on its own and the
//! IP whitelist stays a block of text until it is parsed.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::form::field::{Field, FieldKind, ADAPTERS, LOG_LEVELS};
use crate::form::{Form, FormError, FormTab};
use crate::models::binder::{BinderAdvanced, BinderGeneral, BinderNetwork, BinderSecurity};
use crate::models::{BinderSettings, Category};
use crate::validation::{is_valid_ipv4, NumericRange};

#[derive(Error, Debug)]
pub enum BinderError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The whitelist accepts IPv4 addresses only.
pub fn validate_ip(ip: &str) -> bool {
    is_valid_ipv4(ip)
}

#[derive(Debug, Clone)]
pub struct Binder {
    pub settings: BinderSettings,
    pub form: Form,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Binder {
    pub fn new() -> Self {
        let mut binder = Self {
            settings: BinderSettings::default(),
            form: build_binder_form(),
        };
        binder.populate();
        binder
    }

    pub fn active_category(&self) -> Category {
        Category::ALL
            .get(self.form.active_tab)
            .copied()
            .unwrap_or(Category::General)
    }

    /// Merge a loaded `settings` object over the current values and refresh
    /// the form.
    pub fn apply_loaded(&mut self, incoming: &Map<String, Value>) -> serde_json::Result<()> {
        self.settings.merge(incoming)?;
        self.populate();
        Ok(())
    }

    /// Pull one category out of the form and return the request body for
    /// saving it.
    pub fn prepare_save(&mut self, category: Category) -> Result<Value, BinderError> {
        self.sync_from_form(category)?;
        Ok(self.settings.category_value(category)?)
    }

    /// Valid, trimmed whitelist entries.
    pub fn parse_ip_whitelist(&self) -> Vec<String> {
        self.settings
            .security
            .ip_whitelist
            .split('\n')
            .map(str::trim)
            .filter(|ip| !ip.is_empty() && validate_ip(ip))
            .map(str::to_string)
            .collect()
    }

    fn populate(&mut self) {
        let form = &mut self.form;
        let s = &self.settings;

        form.set_checkbox("auto-start", s.general.auto_start);
        form.set_text("log-level", s.general.log_level.as_str());
        form.set_number("max-sessions", s.general.max_sessions);
        form.set_number("session-timeout", s.general.session_timeout);

        form.set_checkbox("firewall", s.security.firewall);
        form.set_text("ip-whitelist", s.security.ip_whitelist.as_str());
        form.set_number("max-attempts", s.security.max_attempts);
        form.set_number("lockout-duration", s.security.lockout_duration);

        form.set_number("port", s.network.port);
        form.set_text("adapter", s.network.adapter.as_str());
        form.set_number("bandwidth-limit", s.network.bandwidth_limit);
        form.set_checkbox("compression", s.network.compression);

        form.set_checkbox("debug-mode", s.advanced.debug_mode);
        form.set_checkbox("performance-logging", s.advanced.performance_logging);
        form.set_text("custom-registry", s.advanced.custom_registry.as_str());
        form.set_checkbox("backup-enabled", s.advanced.backup_enabled);
    }

    fn sync_from_form(&mut self, category: Category) -> Result<(), FormError> {
        let form = &self.form;

        match category {
            Category::General => {
                self.settings.general = BinderGeneral {
                    auto_start: form.checkbox("auto-start"),
                    log_level: form.text("log-level").to_string(),
                    max_sessions: form.number("max-sessions")?,
                    session_timeout: form.number("session-timeout")?,
                };
            }
            Category::Security => {
                self.settings.security = BinderSecurity {
                    firewall: form.checkbox("firewall"),
                    ip_whitelist: form.text("ip-whitelist").to_string(),
                    max_attempts: form.number("max-attempts")?,
                    lockout_duration: form.number("lockout-duration")?,
                };
            }
            Category::Network => {
                self.settings.network = BinderNetwork {
                    port: form.number("port")?,
                    adapter: form.text("adapter").to_string(),
                    bandwidth_limit: form.number("bandwidth-limit")?,
                    compression: form.checkbox("compression"),
                };
            }
            Category::Advanced => {
                self.settings.advanced = BinderAdvanced {
                    debug_mode: form.checkbox("debug-mode"),
                    performance_logging: form.checkbox("performance-logging"),
                    custom_registry: form.text("custom-registry").to_string(),
                    backup_enabled: form.checkbox("backup-enabled"),
                };
            }
        }

        Ok(())
    }
}

fn build_binder_form() -> Form {
    Form::new(vec![
        FormTab::new(
            "General",
            vec![
                Field::checkbox("auto-start", "Start automatically"),
                Field::select("log-level", "Log level", LOG_LEVELS),
                Field::number("max-sessions", "Max sessions", NumericRange::new(1, 100)),
                Field::number(
                    "session-timeout",
                    "Session timeout (min)",
                    NumericRange::new(1, 1440),
                ),
            ],
        ),
        FormTab::new(
            "Security",
            vec![
                Field::checkbox("firewall", "Firewall"),
                Field::new("ip-whitelist", "IP whitelist", FieldKind::Multiline),
                Field::number("max-attempts", "Max login attempts", NumericRange::new(1, 10)),
                Field::number(
                    "lockout-duration",
                    "Lockout duration (min)",
                    NumericRange::new(1, 1440),
                ),
            ],
        ),
        FormTab::new(
            "Network",
            vec![
                Field::number("port", "Port", NumericRange::new(1, 65535)),
                Field::select("adapter", "Adapter", ADAPTERS),
                Field::number("bandwidth-limit", "Bandwidth limit (0 = none)", NumericRange::default()),
                Field::checkbox("compression", "Compression"),
            ],
        ),
        FormTab::new(
            "Advanced",
            vec![
                Field::checkbox("debug-mode", "Debug mode"),
                Field::checkbox("performance-logging", "Performance logging"),
                Field::new("custom-registry", "Custom registry", FieldKind::Text),
                Field::checkbox("backup-enabled", "Backup enabled"),
            ],
        ),
    ])
}
