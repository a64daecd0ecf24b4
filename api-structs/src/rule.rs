use crate::{AlertState, DatasourceId, DatasourceType, Labels, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    MonitorType {
        Metric => "metric",
        Log => "log",
        Apm => "apm",
        Composite => "composite",
        Infrastructure => "infrastructure",
        Synthetics => "synthetics",
    }
}

wire_enum! {
    RuleStatus {
        Active => "active",
        Pending => "pending",
        Muted => "muted",
        Disabled => "disabled",
    }
}

wire_enum! {
    HealthStatus {
        Healthy => "healthy",
        Failing => "failing",
        NoData => "no_data",
    }
}

wire_enum! {
    ComparisonOperator {
        GreaterThan => ">",
        GreaterOrEqual => ">=",
        LessThan => "<",
        LessOrEqual => "<=",
        Equal => "==",
        NotEqual => "!=",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub operator: ComparisonOperator,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub state: AlertState,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRoute {
    pub channel: String,
    pub destination: String,
}

/// An alerting rule, shown as a "monitor" on the page.
///
/// `enabled` and `status` are independent fields: a rule can be enabled and
/// muted at the same time, and nothing here keeps them in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub datasource_id: DatasourceId,
    pub datasource_type: DatasourceType,
    pub name: String,
    pub enabled: bool,
    pub severity: Severity,
    /// Backend native query (PromQL, PPL, query DSL...)
    pub query: String,
    #[serde(default)]
    pub condition: String,
    pub threshold: Threshold,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub annotations: Labels,
    pub monitor_type: MonitorType,
    pub status: RuleStatus,
    pub health_status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    // page only data, not authoritative
    #[serde(default)]
    pub alert_history: Vec<AlertHistoryEntry>,
    #[serde(default)]
    pub notification_routing: Vec<NotificationRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_wire_shape() {
        let json = r#"{
            "id": "r-1",
            "datasourceId": "ds-prom",
            "datasourceType": "prometheus",
            "name": "CPU above 90%",
            "enabled": true,
            "severity": "critical",
            "query": "avg(rate(node_cpu_seconds_total[5m]))",
            "condition": "avg > 90",
            "threshold": {"operator": ">", "value": 90.0, "unit": "%"},
            "monitorType": "metric",
            "status": "muted",
            "healthStatus": "no_data",
            "createdBy": "alice",
            "createdAt": "2024-02-01T00:00:00Z",
            "lastModified": "2024-02-02T00:00:00Z"
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.threshold.operator, ComparisonOperator::GreaterThan);
        assert_eq!(rule.health_status, HealthStatus::NoData);
        assert_eq!(rule.status, RuleStatus::Muted);
        assert!(rule.enabled);
        assert_eq!(rule.group, None);
        assert!(rule.alert_history.is_empty());
    }
}
