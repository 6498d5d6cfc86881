use crate::models::settings::{
    GeneralSettings, MonitoringSettings, PerformanceSettings, RegistrySettings, SecuritySettings,
};
use crate::models::Settings;
use crate::validation::NumericRange;

use super::field::{Field, FieldKind, LOG_LEVELS, QUALITY_LEVELS};
use super::{Form, FormError, FormTab};

/// The settings form: one tab per section of [`Settings`].
pub fn build_settings_form() -> Form {
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
                Field::checkbox("enable-firewall", "Enable firewall"),
                Field::checkbox("enable-encryption", "Enable encryption"),
                Field::checkbox("require-auth", "Require authentication"),
                Field::new("allowed-ips", "Allowed IPs", FieldKind::IpList),
                Field::new("blocked-ips", "Blocked IPs", FieldKind::IpList),
            ],
        ),
        FormTab::new(
            "Performance",
            vec![
                Field::checkbox("enable-compression", "Enable compression"),
                Field::checkbox("enable-caching", "Enable caching"),
                Field::number("max-bandwidth", "Max bandwidth (Mbps)", NumericRange::default()),
                Field::select("quality", "Quality", QUALITY_LEVELS),
            ],
        ),
        FormTab::new(
            "Monitoring",
            vec![
                Field::checkbox("enable-logging", "Enable logging"),
                Field::select("monitoring-log-level", "Log level", LOG_LEVELS),
                Field::checkbox("enable-metrics", "Enable metrics"),
                Field::number("alert-threshold", "Alert threshold (%)", NumericRange::new(0, 100)),
            ],
        ),
        FormTab::new(
            "Registry",
            vec![
                Field::checkbox("debug-mode", "Debug mode"),
                Field::checkbox("performance-logging", "Performance logging"),
                Field::new("custom-registry", "Custom registry", FieldKind::Text),
                Field::checkbox("backup-enabled", "Backup enabled"),
            ],
        ),
    ])
}

/// Write every settings value into its form control.
pub fn populate_settings(form: &mut Form, settings: &Settings) {
    let general = &settings.general;
    form.set_checkbox("auto-start", general.auto_start);
    form.set_text("log-level", general.log_level.as_str());
    form.set_number("max-sessions", general.max_sessions);
    form.set_number("session-timeout", general.session_timeout);

    let security = &settings.security;
    form.set_checkbox("enable-firewall", security.enable_firewall);
    form.set_checkbox("enable-encryption", security.enable_encryption);
    form.set_checkbox("require-auth", security.require_authentication);
    form.set_text("allowed-ips", security.allowed_ips.join("\n"));
    form.set_text("blocked-ips", security.blocked_ips.join("\n"));

    let performance = &settings.performance;
    form.set_checkbox("enable-compression", performance.enable_compression);
    form.set_checkbox("enable-caching", performance.enable_caching);
    form.set_number("max-bandwidth", performance.max_bandwidth);
    form.set_text("quality", performance.quality.as_str());

    let monitoring = &settings.monitoring;
    form.set_checkbox("enable-logging", monitoring.enable_logging);
    form.set_text("monitoring-log-level", monitoring.log_level.as_str());
    form.set_checkbox("enable-metrics", monitoring.enable_metrics);
    form.set_number("alert-threshold", monitoring.alert_threshold);

    let registry = &settings.registry;
    form.set_checkbox("debug-mode", registry.debug_mode);
    form.set_checkbox("performance-logging", registry.performance_logging);
    form.set_text("custom-registry", registry.custom_registry.as_str());
    form.set_checkbox("backup-enabled", registry.backup_enabled);
}

/// Read the form back into a [`Settings`]. Range flags do not stop
/// collection, and a number field with no digits becomes `None`.
pub fn collect_settings(form: &Form) -> Result<Settings, FormError> {
    Ok(Settings {
        general: GeneralSettings {
            auto_start: form.checkbox("auto-start"),
            log_level: form.text("log-level").to_string(),
            max_sessions: form.number("max-sessions")?,
            session_timeout: form.number("session-timeout")?,
        },
        security: SecuritySettings {
            enable_firewall: form.checkbox("enable-firewall"),
            enable_encryption: form.checkbox("enable-encryption"),
            require_authentication: form.checkbox("require-auth"),
            allowed_ips: form.lines("allowed-ips"),
            blocked_ips: form.lines("blocked-ips"),
        },
        performance: PerformanceSettings {
            enable_compression: form.checkbox("enable-compression"),
            enable_caching: form.checkbox("enable-caching"),
            max_bandwidth: form.number("max-bandwidth")?,
            quality: form.text("quality").to_string(),
        },
        monitoring: MonitoringSettings {
            enable_logging: form.checkbox("enable-logging"),
            log_level: form.text("monitoring-log-level").to_string(),
            enable_metrics: form.checkbox("enable-metrics"),
            alert_threshold: form.number("alert-threshold")?,
        },
        registry: RegistrySettings {
            debug_mode: form.checkbox("debug-mode"),
            performance_logging: form.checkbox("performance-logging"),
            custom_registry: form.text("custom-registry").to_string(),
            backup_enabled: form.checkbox("backup-enabled"),
        },
    })
}
