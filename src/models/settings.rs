use serde::{Deserialize, Serialize};

/// The full configuration object persisted by the settings backend.
///
/// Sections missing from a server response fall back to their defaults, so a
/// partially populated payload still yields a complete object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub security: SecuritySettings,
    pub performance: PerformanceSettings,
    pub monitoring: MonitoringSettings,
    pub registry: RegistrySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralSettings {
    pub auto_start: bool,
    pub log_level: String,
    pub max_sessions: Option<i64>,
    pub session_timeout: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecuritySettings {
    pub enable_firewall: bool,
    pub enable_encryption: bool,
    pub require_authentication: bool,
    #[serde(rename = "allowedIPs")]
    pub allowed_ips: Vec<String>,
    #[serde(rename = "blockedIPs")]
    pub blocked_ips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerformanceSettings {
    pub enable_compression: bool,
    pub enable_caching: bool,
    pub max_bandwidth: Option<i64>,
    pub quality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitoringSettings {
    pub enable_logging: bool,
    pub log_level: String,
    pub enable_metrics: bool,
    pub alert_threshold: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrySettings {
    pub debug_mode: bool,
    pub performance_logging: bool,
    pub custom_registry: String,
    pub backup_enabled: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            auto_start: true,
            log_level: "info".to_string(),
            max_sessions: Some(10),
            session_timeout: Some(30),
        }
    }
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            enable_firewall: true,
            enable_encryption: true,
            require_authentication: true,
            allowed_ips: Vec::new(),
            blocked_ips: Vec::new(),
        }
    }
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            enable_compression: true,
            enable_caching: true,
            max_bandwidth: Some(100),
            quality: "balanced".to_string(),
        }
    }
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            enable_logging: true,
            log_level: "info".to_string(),
            enable_metrics: true,
            alert_threshold: Some(80),
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            performance_logging: false,
            custom_registry: String::new(),
            backup_enabled: true,
        }
    }
}

/// Runtime parameters the optimizer backend scores its recommendations against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSettings {
    pub max_connections: u32,
    pub timeout: u32,
    pub buffer_size: u32,
    pub compression: bool,
    pub encryption_level: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            timeout: 30,
            buffer_size: 8192,
            compression: true,
            encryption_level: "high".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();

        assert_eq!(json["general"]["autoStart"], true);
        assert_eq!(json["general"]["maxSessions"], 10);
        assert!(json["security"]["allowedIPs"].is_array());
        assert!(json["security"]["blockedIPs"].is_array());
        assert_eq!(json["security"]["requireAuthentication"], true);
        assert_eq!(json["registry"]["customRegistry"], "");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{"general": {"maxSessions": 4}, "security": {"allowedIPs": ["10.0.0.1"]}}"#,
        )
        .unwrap();

        assert_eq!(settings.general.max_sessions, Some(4));
        assert_eq!(settings.general.log_level, "info");
        assert_eq!(settings.security.allowed_ips, vec!["10.0.0.1".to_string()]);
        assert_eq!(settings.performance, PerformanceSettings::default());
    }

    #[test]
    fn test_unknown_sections_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"network": {"port": 3389}, "display": {}}"#).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
