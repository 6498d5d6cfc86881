use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub version: String,
    pub endpoints: Endpoints,
    pub timing: Timing,
    pub logging: LoggingConfig,
}

/// REST bases for the two backend families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Origin serving `/api/settings`.
    pub settings_base: String,
    /// Base the optimizer paths (`/ai-optimize`, ...) are appended to.
    pub optimizer_base: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub poll_interval_secs: u64,
    pub notification_ttl_ms: u64,
    pub status_ttl_ms: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Defaults to the platform data directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: Endpoints::default(),
            timing: Timing::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            settings_base: "http://localhost:5000".to_string(),
            optimizer_base: "http://localhost:5000/api".to_string(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            notification_ttl_ms: 3000,
            status_ttl_ms: 5000,
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "rdpwrap-console.log".to_string(),
        }
    }
}

impl Timing {
    pub fn poll_interval(&self) -> Duration {
        // A zero period would make the interval panic
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        // Zero would fail every request before it is sent
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn notification_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.notification_ttl_ms as i64)
    }

    pub fn status_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.status_ttl_ms as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_periods_are_clamped() {
        let timing = Timing {
            poll_interval_secs: 0,
            request_timeout_secs: 0,
            ..Timing::default()
        };

        assert_eq!(timing.poll_interval(), Duration::from_secs(1));
        assert_eq!(timing.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.request_timeout(), Duration::from_secs(30));
        assert_eq!(timing.notification_ttl(), chrono::Duration::milliseconds(3000));
        assert_eq!(timing.status_ttl(), chrono::Duration::milliseconds(5000));
    }
}
