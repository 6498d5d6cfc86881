use serde::{Deserialize, Serialize};

use super::time::display_timestamp;

/// A named snapshot of the settings object held by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Backup {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            path: None,
            version: None,
            size: None,
        }
    }

    pub fn display_date(&self) -> String {
        display_timestamp(&self.date)
    }

    pub fn display_size(&self) -> String {
        match self.size {
            Some(bytes) if bytes >= 1024 * 1024 => format!("{:.1} MiB", bytes as f64 / 1048576.0),
            Some(bytes) if bytes >= 1024 => format!("{:.1} KiB", bytes as f64 / 1024.0),
            Some(bytes) => format!("{} B", bytes),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_deserializes() {
        let backup: Backup =
            serde_json::from_str(r#"{"name": "enhanced_settings_backup_20240101_120000"}"#)
                .unwrap();

        assert_eq!(backup.name, "enhanced_settings_backup_20240101_120000");
        assert_eq!(backup.date, "");
        assert_eq!(backup.size, None);
    }

    #[test]
    fn test_display_size() {
        let mut backup = Backup::new("b", "");
        assert_eq!(backup.display_size(), "-");

        backup.size = Some(512);
        assert_eq!(backup.display_size(), "512 B");

        backup.size = Some(2048);
        assert_eq!(backup.display_size(), "2.0 KiB");
    }
}
