use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::time::display_timestamp;

/// Placeholder shown for a metric before the first poll succeeds.
pub const METRIC_PLACEHOLDER: &str = "--";

/// A suggested settings change, pending user approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub setting: String,
    /// A percentage, or a label such as `"high"` from the fallback optimizer.
    #[serde(default)]
    pub confidence: Value,
    #[serde(default)]
    pub current_value: Value,
    #[serde(default)]
    pub recommended_value: Value,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub impact: String,
    // Whatever else the optimizer attached travels back untouched on apply
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `recommendations` payload of `POST /ai-optimize`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    #[serde(default)]
    pub settings_changed: Value,
    #[serde(default)]
    pub performance_impact: Value,
}

impl HistoryEntry {
    pub fn display_timestamp(&self) -> String {
        display_timestamp(&self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    #[serde(default)]
    pub cpu_usage: f64,
    #[serde(default)]
    pub memory_usage: f64,
    #[serde(default)]
    pub network_latency: f64,
}

/// The three metric strings shown by the optimizer panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsDisplay {
    pub cpu_usage: String,
    pub memory_usage: String,
    pub network_latency: String,
}

impl Default for MetricsDisplay {
    fn default() -> Self {
        Self {
            cpu_usage: METRIC_PLACEHOLDER.to_string(),
            memory_usage: METRIC_PLACEHOLDER.to_string(),
            network_latency: METRIC_PLACEHOLDER.to_string(),
        }
    }
}

impl From<PerformanceSnapshot> for MetricsDisplay {
    fn from(snapshot: PerformanceSnapshot) -> Self {
        Self {
            cpu_usage: format!("{}%", snapshot.cpu_usage),
            memory_usage: format!("{}%", snapshot.memory_usage),
            network_latency: format!("{}ms", snapshot.network_latency),
        }
    }
}

/// Render an arbitrary JSON value the way it reads in a sentence.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metrics_display_format() {
        let display = MetricsDisplay::from(PerformanceSnapshot {
            cpu_usage: 45.2,
            memory_usage: 61.0,
            network_latency: 12.5,
        });

        assert_eq!(display.cpu_usage, "45.2%");
        assert_eq!(display.memory_usage, "61%");
        assert_eq!(display.network_latency, "12.5ms");
        assert_eq!(MetricsDisplay::default().cpu_usage, "--");
    }

    #[test]
    fn test_recommendation_set_keeps_unknown_fields() {
        let raw = json!({
            "recommendations": [{
                "setting": "compression",
                "confidence": 87,
                "current_value": false,
                "recommended_value": true,
                "reason": "High CPU headroom",
                "impact": "Lower bandwidth",
                "priority": "high"
            }],
            "timestamp": "2024-01-01T00:00:00",
            "model": "fallback"
        });

        let set: RecommendationSet = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(set.recommendations.len(), 1);
        assert_eq!(set.recommendations[0].confidence, json!(87));
        assert_eq!(set.recommendations[0].extra["priority"], "high");

        let back = serde_json::to_value(&set).unwrap();
        assert_eq!(back["model"], "fallback");
        assert_eq!(back["recommendations"][0]["priority"], "high");
    }

    #[test]
    fn test_label_confidence_decodes() {
        let set: RecommendationSet = serde_json::from_value(json!({
            "recommendations": [{"setting": "compression", "confidence": "high"}]
        }))
        .unwrap();

        assert_eq!(display_value(&set.recommendations[0].confidence), "high");
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("high")), "high");
        assert_eq!(display_value(&json!(8192)), "8192");
        assert_eq!(display_value(&json!(["timeout", "compression"])), "timeout, compression");
        assert_eq!(display_value(&Value::Null), "-");
    }
}
