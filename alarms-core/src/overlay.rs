use api_structs::rule::Threshold;
use api_structs::{
    DatasourceId, DatasourceType, HealthStatus, Labels, MonitorType, Rule, RuleStatus, Severity,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// `createdBy` of rules made on this page
pub const LOCAL_ACTOR: &str = "current_user";

/// Form input for a new monitor. Fields the form doesn't collect get
/// defaults in [`RuleDraft::into_rule`].
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDraft {
    pub name: String,
    pub datasource_id: DatasourceId,
    pub datasource_type: DatasourceType,
    pub severity: Severity,
    pub monitor_type: MonitorType,
    pub query: String,
    pub condition: String,
    pub threshold: Threshold,
    pub enabled: bool,
    pub group: Option<String>,
    pub labels: Labels,
    pub annotations: Labels,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("monitor name is required")]
    MissingName,
    #[error("monitor query is required")]
    MissingQuery,
    #[error("a datasource must be selected")]
    MissingDatasource,
}

impl RuleDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.query.trim().is_empty() {
            return Err(DraftError::MissingQuery);
        }
        if self.datasource_id.trim().is_empty() {
            return Err(DraftError::MissingDatasource);
        }
        Ok(())
    }

    pub fn into_rule(self, id: String, now: DateTime<Utc>) -> Rule {
        let status = if self.enabled {
            RuleStatus::Active
        } else {
            RuleStatus::Disabled
        };
        Rule {
            id,
            datasource_id: self.datasource_id,
            datasource_type: self.datasource_type,
            name: self.name.trim().to_string(),
            enabled: self.enabled,
            severity: self.severity,
            query: self.query,
            condition: self.condition,
            threshold: self.threshold,
            labels: self.labels,
            annotations: self.annotations,
            monitor_type: self.monitor_type,
            status,
            health_status: HealthStatus::Healthy,
            group: self.group.filter(|g| !g.trim().is_empty()),
            created_by: LOCAL_ACTOR.to_string(),
            created_at: now,
            last_modified: now,
            alert_history: vec![],
            notification_routing: vec![],
            ai_summary: None,
        }
    }
}

/// Local edits layered over the rules fetched from the backend.
///
/// Nothing here is written back: deleted rules are only hidden (tombstoned),
/// silencing is a status override, and created or cloned rules live in a
/// local list shown ahead of the fetched ones, newest first.
#[derive(Debug, Clone, Default)]
pub struct RuleOverlay {
    fetched: Vec<Rule>,
    created: Vec<Rule>,
    tombstones: HashSet<String>,
    status_overrides: HashMap<String, RuleStatus>,
}

impl RuleOverlay {
    pub fn new(fetched: Vec<Rule>) -> Self {
        Self {
            fetched,
            ..Default::default()
        }
    }

    /// Every rule held, tombstoned ones included, as originally stored
    pub fn stored(&self) -> impl Iterator<Item = &Rule> {
        self.created.iter().chain(self.fetched.iter())
    }

    /// What the page lists: local rules first, tombstones removed,
    /// status overrides applied
    pub fn visible(&self) -> Vec<Rule> {
        self.stored()
            .filter(|rule| !self.tombstones.contains(&rule.id))
            .map(|rule| self.with_overrides(rule))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Rule> {
        self.find_visible(id).map(|rule| self.with_overrides(rule))
    }

    pub fn is_deleted(&self, id: &str) -> bool {
        self.tombstones.contains(id)
    }

    /// Hides the given rules. Returns how many were newly hidden.
    pub fn delete<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut newly_deleted = 0;
        for id in ids {
            let id = id.as_ref();
            let known = self.stored().any(|rule| rule.id == id);
            if known && self.tombstones.insert(id.to_string()) {
                newly_deleted += 1;
            }
        }
        info!("Deleted {} monitor(s) locally", newly_deleted);
        newly_deleted
    }

    /// Flips a rule between muted and active; any status other than muted
    /// becomes muted. Returns the new status, or `None` for an unknown id.
    pub fn toggle_silence(&mut self, id: &str) -> Option<RuleStatus> {
        let current = self.get(id)?.status;
        let next = match current {
            RuleStatus::Muted => RuleStatus::Active,
            _ => RuleStatus::Muted,
        };
        debug!("Monitor {} status {} -> {}", id, current, next);
        self.status_overrides.insert(id.to_string(), next);
        Some(next)
    }

    /// Copies `rule` under a fresh identity and puts it at the head of the list
    pub fn clone_rule(&mut self, rule: &Rule) -> Rule {
        let now = Utc::now();
        let copy = Rule {
            id: self.fresh_id(),
            name: format!("{} (Copy)", rule.name),
            created_by: LOCAL_ACTOR.to_string(),
            created_at: now,
            last_modified: now,
            ..rule.clone()
        };
        self.created.insert(0, copy.clone());
        copy
    }

    pub fn create(&mut self, draft: RuleDraft) -> Result<Rule, DraftError> {
        draft.validate()?;
        let rule = draft.into_rule(self.fresh_id(), Utc::now());
        self.created.insert(0, rule.clone());
        Ok(rule)
    }

    /// Creates several rules at once (wizard flow). They keep their relative
    /// order and land ahead of everything else. Invalid drafts are skipped.
    pub fn create_many(&mut self, drafts: Vec<RuleDraft>) -> Vec<Rule> {
        let now = Utc::now();
        let mut rules = vec![];
        for draft in drafts {
            match draft.validate() {
                Ok(()) => rules.push(draft.into_rule(self.fresh_id(), now)),
                Err(e) => debug!("Skipping template {:?}: {}", draft.name, e),
            }
        }
        for (position, rule) in rules.iter().cloned().enumerate() {
            self.created.insert(position, rule);
        }
        rules
    }

    fn find_visible(&self, id: &str) -> Option<&Rule> {
        if self.tombstones.contains(id) {
            return None;
        }
        self.stored().find(|rule| rule.id == id)
    }

    fn with_overrides(&self, rule: &Rule) -> Rule {
        let mut rule = rule.clone();
        if let Some(status) = self.status_overrides.get(&rule.id) {
            rule.status = *status;
        }
        rule
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if !self.stored().any(|rule| rule.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_records::{labels, rule};
    use api_structs::rule::ComparisonOperator;

    fn draft(name: &str) -> RuleDraft {
        RuleDraft {
            name: name.to_string(),
            datasource_id: "ds-prom".to_string(),
            datasource_type: DatasourceType::Prometheus,
            severity: Severity::Medium,
            monitor_type: MonitorType::Metric,
            query: "rate(http_requests_total{code=~\"5..\"}[5m])".to_string(),
            condition: "5xx rate above 5".to_string(),
            threshold: Threshold {
                operator: ComparisonOperator::GreaterThan,
                value: 5.0,
                unit: "req/s".to_string(),
            },
            enabled: true,
            group: Some(" ".to_string()),
            labels: labels(&[("team", "web")]),
            annotations: Labels::new(),
        }
    }

    fn ids(rules: &[Rule]) -> Vec<&str> {
        rules.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn delete_hides_but_keeps_stored() {
        let mut overlay = RuleOverlay::new(vec![rule("r1"), rule("r2")]);
        assert_eq!(overlay.delete(["r1"]), 1);
        assert_eq!(ids(&overlay.visible()), vec!["r2"]);
        assert!(overlay.stored().any(|r| r.id == "r1"));
        assert!(overlay.is_deleted("r1"));
    }

    #[test]
    fn delete_is_idempotent_and_ignores_unknown_ids() {
        let mut overlay = RuleOverlay::new(vec![rule("r1"), rule("r2")]);
        overlay.delete(["r1"]);
        assert_eq!(overlay.delete(vec!["r1".to_string(), "ghost".to_string()]), 0);
        assert_eq!(ids(&overlay.visible()), vec!["r2"]);
        assert!(!overlay.is_deleted("ghost"));
    }

    #[test]
    fn silence_toggles_between_muted_and_active() {
        let mut overlay = RuleOverlay::new(vec![rule("r1")]);
        assert_eq!(overlay.toggle_silence("r1"), Some(RuleStatus::Muted));
        assert_eq!(overlay.get("r1").unwrap().status, RuleStatus::Muted);
        assert_eq!(overlay.toggle_silence("r1"), Some(RuleStatus::Active));
        assert_eq!(overlay.visible()[0].status, RuleStatus::Active);
        // the fetched snapshot is untouched
        assert_eq!(overlay.stored().next().unwrap().status, RuleStatus::Active);
    }

    #[test]
    fn silence_does_not_touch_enabled() {
        let mut r1 = rule("r1");
        r1.enabled = false;
        r1.status = RuleStatus::Disabled;
        let mut overlay = RuleOverlay::new(vec![r1]);
        assert_eq!(overlay.toggle_silence("r1"), Some(RuleStatus::Muted));
        assert!(!overlay.get("r1").unwrap().enabled);
    }

    #[test]
    fn silence_of_unknown_or_deleted_rule_is_a_no_op() {
        let mut overlay = RuleOverlay::new(vec![rule("r1")]);
        assert_eq!(overlay.toggle_silence("ghost"), None);
        overlay.delete(["r1"]);
        assert_eq!(overlay.toggle_silence("r1"), None);
    }

    #[test]
    fn clone_regenerates_identity_only() {
        let mut original = rule("r1");
        original.name = "X".to_string();
        original.created_by = "u1".to_string();
        original.group = Some("payments".to_string());
        let mut overlay = RuleOverlay::new(vec![original.clone()]);
        let copy = overlay.clone_rule(&original);

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.name, "X (Copy)");
        assert_ne!(copy.created_by, "u1");
        assert_eq!(
            Rule {
                id: original.id.clone(),
                name: original.name.clone(),
                created_by: original.created_by.clone(),
                created_at: original.created_at,
                last_modified: original.last_modified,
                ..copy.clone()
            },
            original
        );
        assert_eq!(ids(&overlay.visible()), vec![copy.id.as_str(), "r1"]);
    }

    #[test]
    fn create_fills_defaults_and_prepends() {
        let mut overlay = RuleOverlay::new(vec![rule("r1")]);
        let created = overlay.create(draft("5xx rate")).unwrap();
        assert_eq!(created.health_status, HealthStatus::Healthy);
        assert_eq!(created.status, RuleStatus::Active);
        assert_eq!(created.created_by, LOCAL_ACTOR);
        assert_eq!(created.group, None);
        assert!(created.alert_history.is_empty());
        assert!(created.notification_routing.is_empty());
        assert_eq!(overlay.visible()[0].id, created.id);
    }

    #[test]
    fn disabled_drafts_start_disabled() {
        let mut overlay = RuleOverlay::default();
        let mut d = draft("quiet");
        d.enabled = false;
        assert_eq!(overlay.create(d).unwrap().status, RuleStatus::Disabled);
    }

    #[test]
    fn invalid_drafts_are_rejected() {
        let mut overlay = RuleOverlay::default();
        assert_eq!(overlay.create(draft("  ")), Err(DraftError::MissingName));
        let mut d = draft("no query");
        d.query.clear();
        assert_eq!(overlay.create(d), Err(DraftError::MissingQuery));
        assert!(overlay.visible().is_empty());
    }

    #[test]
    fn create_many_keeps_template_order_ahead_of_existing() {
        let mut overlay = RuleOverlay::new(vec![rule("r1")]);
        overlay.create(draft("older")).unwrap();
        let created = overlay.create_many(vec![draft("first"), draft(""), draft("second")]);
        assert_eq!(created.len(), 2);
        let names: Vec<String> = overlay.visible().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second", "older", "rule r1"]);
    }
}
