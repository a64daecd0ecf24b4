//! Fixed monitor catalog offered by the "suggest monitors" wizard.
//! Queries are written in the native language of the datasource kind.

use crate::overlay::RuleDraft;
use api_structs::rule::{ComparisonOperator, Threshold};
use api_structs::{Datasource, DatasourceType, Labels, MonitorType, Severity};

struct Template {
    name: &'static str,
    severity: Severity,
    monitor_type: MonitorType,
    promql: &'static str,
    ppl: &'static str,
    condition: &'static str,
    operator: ComparisonOperator,
    value: f64,
    unit: &'static str,
    group: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        name: "High CPU usage",
        severity: Severity::High,
        monitor_type: MonitorType::Infrastructure,
        promql: "100 - avg by (instance) (rate(node_cpu_seconds_total{mode=\"idle\"}[5m])) * 100",
        ppl: "source=metrics-* | where metric='cpu' | stats avg(value) by host",
        condition: "CPU above 90% for 5 minutes",
        operator: ComparisonOperator::GreaterThan,
        value: 90.0,
        unit: "%",
        group: "Infrastructure",
    },
    Template {
        name: "Error rate spike",
        severity: Severity::Critical,
        monitor_type: MonitorType::Apm,
        promql: "sum(rate(http_requests_total{code=~\"5..\"}[5m])) / sum(rate(http_requests_total[5m])) * 100",
        ppl: "source=logs-* | where status >= 500 | stats count() by span(@timestamp, 5m)",
        condition: "5xx responses above 5% of traffic",
        operator: ComparisonOperator::GreaterThan,
        value: 5.0,
        unit: "%",
        group: "Availability",
    },
    Template {
        name: "Slow responses (p99)",
        severity: Severity::Medium,
        monitor_type: MonitorType::Apm,
        promql: "histogram_quantile(0.99, sum by (le) (rate(http_request_duration_seconds_bucket[5m])))",
        ppl: "source=traces-* | stats percentile(durationInNanos, 99) by serviceName",
        condition: "p99 latency above 1.5s",
        operator: ComparisonOperator::GreaterThan,
        value: 1.5,
        unit: "s",
        group: "Latency",
    },
    Template {
        name: "Disk almost full",
        severity: Severity::High,
        monitor_type: MonitorType::Infrastructure,
        promql: "(1 - node_filesystem_avail_bytes / node_filesystem_size_bytes) * 100",
        ppl: "source=metrics-* | where metric='disk_used_pct' | stats max(value) by host",
        condition: "Disk usage above 85%",
        operator: ComparisonOperator::GreaterThan,
        value: 85.0,
        unit: "%",
        group: "Infrastructure",
    },
];

/// Drafts of the catalog, bound to `datasource`
pub fn wizard_templates(datasource: &Datasource) -> Vec<RuleDraft> {
    TEMPLATES
        .iter()
        .map(|template| {
            let query = match datasource.kind {
                DatasourceType::Prometheus => template.promql,
                _ => template.ppl,
            };
            let monitor_type = match datasource.kind {
                DatasourceType::Prometheus => template.monitor_type,
                _ => MonitorType::Log,
            };
            let mut labels = Labels::new();
            labels.insert("source".to_string(), "wizard".to_string());
            RuleDraft {
                name: template.name.to_string(),
                datasource_id: datasource.id.clone(),
                datasource_type: datasource.kind.clone(),
                severity: template.severity,
                monitor_type,
                query: query.to_string(),
                condition: template.condition.to_string(),
                threshold: Threshold {
                    operator: template.operator,
                    value: template.value,
                    unit: template.unit.to_string(),
                },
                enabled: true,
                group: Some(template.group.to_string()),
                labels,
                annotations: Labels::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datasource(kind: DatasourceType) -> Datasource {
        Datasource {
            id: "ds-1".to_string(),
            name: "primary".to_string(),
            kind,
            url: "http://localhost".to_string(),
            enabled: true,
        }
    }

    #[test]
    fn templates_are_valid_drafts_for_each_backend() {
        for kind in [DatasourceType::Prometheus, DatasourceType::OpenSearch] {
            let drafts = wizard_templates(&datasource(kind.clone()));
            assert_eq!(drafts.len(), TEMPLATES.len());
            for draft in drafts {
                assert!(draft.validate().is_ok());
                assert_eq!(draft.datasource_type, kind);
            }
        }
    }

    #[test]
    fn opensearch_templates_use_ppl() {
        let drafts = wizard_templates(&datasource(DatasourceType::OpenSearch));
        assert!(drafts.iter().all(|d| d.query.starts_with("source=")));
        assert!(drafts.iter().all(|d| d.monitor_type == MonitorType::Log));
    }
}
