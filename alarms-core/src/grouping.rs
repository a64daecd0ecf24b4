use api_structs::{Alert, Rule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket name for rules without a group
pub const UNGROUPED: &str = "Ungrouped";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertGroupBy {
    #[default]
    None,
    Datasource,
    State,
}

impl AlertGroupBy {
    pub const ALL: [AlertGroupBy; 3] = [
        AlertGroupBy::None,
        AlertGroupBy::Datasource,
        AlertGroupBy::State,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AlertGroupBy::None => "None",
            AlertGroupBy::Datasource => "Datasource",
            AlertGroupBy::State => "State",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleGroupBy {
    #[default]
    None,
    Datasource,
    Status,
    Group,
}

impl RuleGroupBy {
    pub const ALL: [RuleGroupBy; 4] = [
        RuleGroupBy::None,
        RuleGroupBy::Datasource,
        RuleGroupBy::Status,
        RuleGroupBy::Group,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RuleGroupBy::None => "None",
            RuleGroupBy::Datasource => "Datasource",
            RuleGroupBy::Status => "Status",
            RuleGroupBy::Group => "Group",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket<R, A> {
    pub key: String,
    pub members: Vec<R>,
    pub aggregates: A,
}

impl<R, A> Bucket<R, A> {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Member counts per state and per severity, ordered by the breakdown key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertBreakdown {
    pub by_state: Vec<(String, usize)>,
    pub by_severity: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleBreakdown {
    pub enabled: usize,
    pub disabled: usize,
}

pub type AlertBucket = Bucket<Alert, AlertBreakdown>;
pub type RuleBucket = Bucket<Rule, RuleBreakdown>;

/// Splits records by key, buckets ordered by first appearance
fn partition<R: Clone>(records: &[R], key_of: impl Fn(&R) -> String) -> IndexMap<String, Vec<R>> {
    let mut buckets: IndexMap<String, Vec<R>> = IndexMap::new();
    for record in records {
        buckets.entry(key_of(record)).or_default().push(record.clone());
    }
    buckets
}

fn sorted_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}

/// Groups alerts, `AlertGroupBy::None` yields no buckets.
pub fn group_alerts(alerts: &[Alert], by: AlertGroupBy) -> Vec<AlertBucket> {
    let key_of: fn(&Alert) -> String = match by {
        AlertGroupBy::None => return vec![],
        AlertGroupBy::Datasource => |a: &Alert| a.datasource_id.clone(),
        AlertGroupBy::State => |a: &Alert| a.state.as_str().to_string(),
    };
    partition(alerts, key_of)
        .into_iter()
        .map(|(key, members)| {
            let aggregates = AlertBreakdown {
                by_state: sorted_counts(members.iter().map(|a| a.state.as_str())),
                by_severity: sorted_counts(members.iter().map(|a| a.severity.as_str())),
            };
            Bucket {
                key,
                members,
                aggregates,
            }
        })
        .collect()
}

/// Groups rules, `RuleGroupBy::None` yields no buckets.
pub fn group_rules(rules: &[Rule], by: RuleGroupBy) -> Vec<RuleBucket> {
    let key_of: fn(&Rule) -> String = match by {
        RuleGroupBy::None => return vec![],
        RuleGroupBy::Datasource => |r: &Rule| r.datasource_id.clone(),
        RuleGroupBy::Status => |r: &Rule| r.status.as_str().to_string(),
        RuleGroupBy::Group => |r: &Rule| match r.group.as_deref() {
            Some(group) if !group.trim().is_empty() => group.to_string(),
            _ => UNGROUPED.to_string(),
        },
    };
    partition(rules, key_of)
        .into_iter()
        .map(|(key, members)| {
            let enabled = members.iter().filter(|r| r.enabled).count();
            let aggregates = RuleBreakdown {
                enabled,
                disabled: members.len() - enabled,
            };
            Bucket {
                key,
                members,
                aggregates,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_records::{alert, rule};
    use api_structs::{AlertState, RuleStatus, Severity};
    use std::collections::HashSet;

    #[test]
    fn group_by_state_counts_and_breakdowns() {
        let alerts = vec![
            alert("a1", AlertState::Active, Severity::High),
            alert("a2", AlertState::Active, Severity::Critical),
            alert("a3", AlertState::Resolved, Severity::High),
        ];
        let buckets = group_alerts(&alerts, AlertGroupBy::State);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "active");
        assert_eq!(buckets[0].count(), 2);
        assert_eq!(buckets[1].key, "resolved");
        assert_eq!(buckets[1].count(), 1);
        assert_eq!(
            buckets[0].aggregates.by_severity,
            vec![("critical".to_string(), 1), ("high".to_string(), 1)]
        );
        assert_eq!(buckets[0].aggregates.by_state, vec![("active".to_string(), 2)]);
    }

    #[test]
    fn buckets_follow_first_appearance_not_sort_order() {
        let mut a1 = alert("a1", AlertState::Active, Severity::High);
        a1.datasource_id = "zeta".to_string();
        let mut a2 = alert("a2", AlertState::Active, Severity::High);
        a2.datasource_id = "alpha".to_string();
        let mut a3 = alert("a3", AlertState::Active, Severity::High);
        a3.datasource_id = "zeta".to_string();
        let buckets = group_alerts(&[a1, a2, a3], AlertGroupBy::Datasource);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        let zeta: Vec<&str> = buckets[0].members.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(zeta, vec!["a1", "a3"]);
    }

    #[test]
    fn grouping_partitions_the_input() {
        let alerts: Vec<Alert> = [
            AlertState::Error,
            AlertState::Pending,
            AlertState::Error,
            AlertState::Acknowledged,
            AlertState::Pending,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, state)| alert(&format!("a{i}"), state, Severity::Info))
        .collect();
        for by in [AlertGroupBy::State, AlertGroupBy::Datasource] {
            let buckets = group_alerts(&alerts, by);
            let total: usize = buckets.iter().map(Bucket::count).sum();
            assert_eq!(total, alerts.len());
            let ids: HashSet<&str> = buckets
                .iter()
                .flat_map(|b| b.members.iter().map(|a| a.id.as_str()))
                .collect();
            assert_eq!(ids.len(), alerts.len());
        }
    }

    #[test]
    fn no_grouping_yields_no_buckets() {
        let alerts = vec![alert("a1", AlertState::Active, Severity::High)];
        assert!(group_alerts(&alerts, AlertGroupBy::None).is_empty());
        assert!(group_rules(&[rule("r1")], RuleGroupBy::None).is_empty());
    }

    #[test]
    fn rules_without_group_land_in_ungrouped() {
        let mut r1 = rule("r1");
        r1.group = Some("payments".to_string());
        let r2 = rule("r2");
        let mut r3 = rule("r3");
        r3.group = Some("  ".to_string());
        r3.enabled = false;
        let buckets = group_rules(&[r1, r2, r3], RuleGroupBy::Group);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "payments");
        assert_eq!(buckets[1].key, UNGROUPED);
        assert_eq!(
            buckets[1].aggregates,
            RuleBreakdown {
                enabled: 1,
                disabled: 1
            }
        );
    }

    #[test]
    fn rules_group_by_status() {
        let mut r2 = rule("r2");
        r2.status = RuleStatus::Muted;
        let buckets = group_rules(&[rule("r1"), r2, rule("r3")], RuleGroupBy::Status);
        let summary: Vec<(&str, usize)> =
            buckets.iter().map(|b| (b.key.as_str(), b.count())).collect();
        assert_eq!(summary, vec![("active", 2), ("muted", 1)]);
    }
}
