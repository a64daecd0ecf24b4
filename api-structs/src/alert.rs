use crate::{DatasourceId, DatasourceType, Labels, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    AlertState {
        Active => "active",
        Pending => "pending",
        Acknowledged => "acknowledged",
        Resolved => "resolved",
        Error => "error",
    }
}

/// A firing (or formerly firing) alert as reported by one of the backends.
/// Never mutated after it is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub datasource_id: DatasourceId,
    pub datasource_type: DatasourceType,
    pub name: String,
    pub state: AlertState,
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
    pub start_time: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub annotations: Labels,
    /// Backend payload, passed through untouched
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl Alert {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape_with_missing_optional_maps() {
        let json = r#"{
            "id": "a-1",
            "datasourceId": "ds-prom",
            "datasourceType": "prometheus",
            "name": "HighCPU",
            "state": "active",
            "severity": "high",
            "startTime": "2024-03-01T10:00:00Z",
            "lastUpdated": "2024-03-01T10:05:00Z"
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.state, AlertState::Active);
        assert_eq!(alert.datasource_type, DatasourceType::Prometheus);
        assert!(alert.labels.is_empty());
        assert_eq!(alert.message, "");
        assert_eq!(alert.raw, serde_json::Value::Null);
    }

    #[test]
    fn raw_payload_is_preserved() {
        let json = r#"{
            "id": "a-2",
            "datasourceId": "ds-os",
            "datasourceType": "opensearch",
            "name": "Errors",
            "state": "error",
            "severity": "critical",
            "message": "too many 5xx",
            "startTime": "2024-03-01T10:00:00Z",
            "lastUpdated": "2024-03-01T10:05:00Z",
            "labels": {"service": "checkout"},
            "raw": {"monitor_id": "m-9", "trigger": {"severity": "1"}}
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.label("service"), Some("checkout"));
        assert_eq!(alert.raw["trigger"]["severity"], "1");
    }
}
