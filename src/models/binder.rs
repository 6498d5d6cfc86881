use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Settings as exposed by the per-category endpoints.
///
/// This shape differs from [`crate::models::Settings`]: it has `network` and
/// `advanced` sections and keeps the IP whitelist as raw newline-delimited text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderSettings {
    pub general: BinderGeneral,
    pub security: BinderSecurity,
    pub network: BinderNetwork,
    pub advanced: BinderAdvanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderGeneral {
    pub auto_start: bool,
    pub log_level: String,
    pub max_sessions: Option<i64>,
    pub session_timeout: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderSecurity {
    pub firewall: bool,
    pub ip_whitelist: String,
    pub max_attempts: Option<i64>,
    pub lockout_duration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderNetwork {
    pub port: Option<i64>,
    pub adapter: String,
    pub bandwidth_limit: Option<i64>,
    pub compression: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderAdvanced {
    pub debug_mode: bool,
    pub performance_logging: bool,
    pub custom_registry: String,
    pub backup_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Security,
    Network,
    Advanced,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Security,
        Category::Network,
        Category::Advanced,
    ];

    /// Path segment used by `POST /api/settings/{category}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Security => "security",
            Category::Network => "network",
            Category::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::General => write!(f, "General"),
            Category::Security => write!(f, "Security"),
            Category::Network => write!(f, "Network"),
            Category::Advanced => write!(f, "Advanced"),
        }
    }
}

impl BinderSettings {
    /// Serialized record for one category, as sent in the save request body.
    pub fn category_value(&self, category: Category) -> serde_json::Result<Value> {
        match category {
            Category::General => serde_json::to_value(&self.general),
            Category::Security => serde_json::to_value(&self.security),
            Category::Network => serde_json::to_value(&self.network),
            Category::Advanced => serde_json::to_value(&self.advanced),
        }
    }

    /// Shallow merge: every category present in `incoming` replaces the local
    /// one wholesale, absent categories are kept. If any present category
    /// fails to decode, nothing changes.
    pub fn merge(&mut self, incoming: &Map<String, Value>) -> serde_json::Result<()> {
        let mut merged = self.clone();

        for (key, value) in incoming {
            match key.as_str() {
                "general" => merged.general = serde_json::from_value(value.clone())?,
                "security" => merged.security = serde_json::from_value(value.clone())?,
                "network" => merged.network = serde_json::from_value(value.clone())?,
                "advanced" => merged.advanced = serde_json::from_value(value.clone())?,
                other => tracing::debug!(category = other, "ignoring unknown settings category"),
            }
        }

        *self = merged;
        Ok(())
    }
}

impl Default for BinderGeneral {
    fn default() -> Self {
        Self {
            auto_start: true,
            log_level: "info".to_string(),
            max_sessions: Some(10),
            session_timeout: Some(30),
        }
    }
}

impl Default for BinderSecurity {
    fn default() -> Self {
        Self {
            firewall: true,
            ip_whitelist: String::new(),
            max_attempts: Some(3),
            lockout_duration: Some(15),
        }
    }
}

impl Default for BinderNetwork {
    fn default() -> Self {
        Self {
            port: Some(3389),
            adapter: "all".to_string(),
            bandwidth_limit: Some(0),
            compression: true,
        }
    }
}

impl Default for BinderAdvanced {
    fn default() -> Self {
        Self {
            debug_mode: false,
            performance_logging: false,
            custom_registry: String::new(),
            backup_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_replaces_only_present_categories() {
        let mut settings = BinderSettings::default();
        let incoming = json!({
            "network": {"port": 3390, "adapter": "eth0"},
        });

        settings.merge(incoming.as_object().unwrap()).unwrap();

        assert_eq!(settings.network.port, Some(3390));
        assert_eq!(settings.network.adapter, "eth0");
        // Replaced wholesale, so unspecified fields come from defaults
        assert_eq!(settings.network.bandwidth_limit, Some(0));
        assert_eq!(settings.general, BinderGeneral::default());
        assert_eq!(settings.security, BinderSecurity::default());
    }

    #[test]
    fn test_merge_ignores_unknown_categories() {
        let mut settings = BinderSettings::default();
        let incoming = json!({"display": {"enableAudio": true}});

        settings.merge(incoming.as_object().unwrap()).unwrap();
        assert_eq!(settings, BinderSettings::default());
    }

    #[test]
    fn test_merge_is_all_or_nothing() {
        let mut settings = BinderSettings::default();
        let incoming = json!({
            "general": {"maxSessions": 42},
            "security": {"maxAttempts": "3"},
        });

        assert!(settings.merge(incoming.as_object().unwrap()).is_err());
        assert_eq!(settings, BinderSettings::default());
    }

    #[test]
    fn test_null_number_decodes_as_none() {
        let mut settings = BinderSettings::default();
        let incoming = json!({"network": {"port": null}});

        settings.merge(incoming.as_object().unwrap()).unwrap();
        assert_eq!(settings.network.port, None);
        assert_eq!(settings.category_value(Category::Network).unwrap()["port"], Value::Null);
    }

    #[test]
    fn test_category_value_uses_wire_names() {
        let settings = BinderSettings::default();
        let security = settings.category_value(Category::Security).unwrap();

        assert_eq!(security["ipWhitelist"], "");
        assert_eq!(security["maxAttempts"], 3);
        assert_eq!(security["lockoutDuration"], 15);
    }
}
