//! Incident summaries shown in the alert flyout.
//!
//! The page only depends on [`InsightProvider`]. The bundled
//! [`TemplateInsights`] fills fixed text templates from the alert itself and
//! derives everything else deterministically, so two renders of the same
//! alert always agree.

use crate::datasources::DatasourceDirectory;
use api_structs::{Alert, AlertState, Severity};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;

/// Labels worth listing as impacted entities, in display order
const IMPACT_LABELS: &[&str] = &["service", "namespace", "instance", "host", "pod"];
const SERIES_POINTS: i64 = 24;
const MAX_RELATED: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct InsightBundle {
    pub summary: String,
    pub root_cause: String,
    pub recommendation: String,
    pub impact: Vec<ImpactedEntity>,
    pub series: Vec<SeriesPoint>,
    pub related: Vec<RelatedAlert>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactedEntity {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelatedAlert {
    pub id: String,
    pub name: String,
    pub state: AlertState,
    pub severity: Severity,
    /// In `0.0..=1.0`
    pub correlation: f64,
}

pub trait InsightProvider {
    fn summarize(&self, alert: &Alert) -> InsightBundle;
}

pub struct TemplateInsights<'a> {
    alerts: &'a [Alert],
    directory: &'a DatasourceDirectory,
}

impl<'a> TemplateInsights<'a> {
    /// `alerts` is the pool related alerts are picked from
    pub fn new(alerts: &'a [Alert], directory: &'a DatasourceDirectory) -> Self {
        Self { alerts, directory }
    }

    fn summary(&self, alert: &Alert) -> String {
        let datasource = self.directory.display_name(&alert.datasource_id);
        let since = alert.start_time.format("%Y-%m-%d %H:%M UTC");
        let mut summary = format!(
            "{} is {} on {} ({}) since {}, with {} severity.",
            alert.name,
            alert.state,
            datasource,
            alert.datasource_type.display_name(),
            since,
            alert.severity
        );
        if !alert.message.is_empty() {
            summary.push_str(&format!(" Latest message: \"{}\".", alert.message));
        }
        summary
    }

    fn root_cause(&self, alert: &Alert) -> String {
        let scope = IMPACT_LABELS
            .iter()
            .find_map(|key| alert.label(key).map(|v| format!("{key} {v}")))
            .unwrap_or_else(|| "the monitored resource".to_string());
        match alert.severity {
            Severity::Critical | Severity::High => format!(
                "Sustained breach of the alert threshold on {scope}, most likely caused by a recent change or a saturated dependency."
            ),
            Severity::Medium => {
                format!("Intermittent threshold breaches on {scope}, consistent with load spikes.")
            }
            Severity::Low | Severity::Info => {
                format!("Minor deviation from the usual baseline on {scope}.")
            }
        }
    }

    fn recommendation(&self, alert: &Alert) -> String {
        match alert.state {
            AlertState::Active | AlertState::Error => {
                "Check recent deployments and dependency health, then acknowledge the alert once someone is on it.".to_string()
            }
            AlertState::Pending => {
                "Watch the next evaluation; the condition has not held long enough to fire yet.".to_string()
            }
            AlertState::Acknowledged => {
                "Follow up with the owner and resolve once the metric is back under threshold.".to_string()
            }
            AlertState::Resolved => {
                "No action needed. Consider tuning the threshold if this alert flaps.".to_string()
            }
        }
    }

    fn impact(&self, alert: &Alert) -> Vec<ImpactedEntity> {
        let mut impact = vec![ImpactedEntity {
            kind: "datasource".to_string(),
            name: self
                .directory
                .display_name(&alert.datasource_id)
                .to_string(),
        }];
        impact.extend(IMPACT_LABELS.iter().filter_map(|key| {
            alert.label(key).map(|name| ImpactedEntity {
                kind: key.to_string(),
                name: name.to_string(),
            })
        }));
        impact
    }

    /// Hourly points ending at the last update, shaped by severity and
    /// seeded from the alert id
    fn series(&self, alert: &Alert) -> Vec<SeriesPoint> {
        let baseline = match alert.severity {
            Severity::Critical => 90.0,
            Severity::High => 75.0,
            Severity::Medium => 60.0,
            Severity::Low => 45.0,
            Severity::Info => 30.0,
        };
        let mut seed = fnv1a(alert.id.as_bytes());
        (0..SERIES_POINTS)
            .rev()
            .map(|hours_back| {
                seed = next_seed(seed);
                let timestamp = alert.last_updated - Duration::hours(hours_back);
                // 0..1
                let jitter = (seed >> 11) as f64 / (1u64 << 53) as f64;
                let firing = timestamp >= alert.start_time;
                let level = if firing { baseline } else { baseline * 0.5 };
                SeriesPoint {
                    timestamp,
                    value: level + jitter * 10.0,
                }
            })
            .collect()
    }

    fn related(&self, alert: &Alert) -> Vec<RelatedAlert> {
        let mut related: Vec<RelatedAlert> = self
            .alerts
            .iter()
            .filter(|other| other.id != alert.id)
            .filter_map(|other| {
                let correlation = correlation(alert, other);
                (correlation > 0.0).then(|| RelatedAlert {
                    id: other.id.clone(),
                    name: other.name.clone(),
                    state: other.state,
                    severity: other.severity,
                    correlation,
                })
            })
            .collect();
        related.sort_by(|a, b| {
            b.correlation
                .total_cmp(&a.correlation)
                .then_with(|| a.id.cmp(&b.id))
        });
        related.truncate(MAX_RELATED);
        related
    }
}

impl InsightProvider for TemplateInsights<'_> {
    fn summarize(&self, alert: &Alert) -> InsightBundle {
        InsightBundle {
            summary: self.summary(alert),
            root_cause: self.root_cause(alert),
            recommendation: self.recommendation(alert),
            impact: self.impact(alert),
            series: self.series(alert),
            related: self.related(alert),
        }
    }
}

/// Same datasource weighs 0.4, shared label pairs (Jaccard) the other 0.6
fn correlation(a: &Alert, b: &Alert) -> f64 {
    let same_datasource = if a.datasource_id == b.datasource_id {
        0.4
    } else {
        0.0
    };
    let a_labels: BTreeSet<(&String, &String)> = a.labels.iter().collect();
    let b_labels: BTreeSet<(&String, &String)> = b.labels.iter().collect();
    let union = a_labels.union(&b_labels).count();
    let shared = if union == 0 {
        0.0
    } else {
        a_labels.intersection(&b_labels).count() as f64 / union as f64
    };
    same_datasource + 0.6 * shared
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf29ce484222325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x100000001b3)
    })
}

fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}
