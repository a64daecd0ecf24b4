use api_structs::{Alert, AlertState, Rule, RuleStatus};
use std::collections::BTreeMap;

/// What a table should show, "nothing fetched" and "nothing matches" read
/// differently to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingState {
    Empty,
    NoMatches,
    Showing(usize),
}

impl ListingState {
    pub fn new(total: usize, visible: usize) -> Self {
        match (total, visible) {
            (0, _) => ListingState::Empty,
            (_, 0) => ListingState::NoMatches,
            (_, visible) => ListingState::Showing(visible),
        }
    }

    pub fn message(&self, noun: &str) -> Option<String> {
        match self {
            ListingState::Empty => Some(format!("No {noun} found")),
            ListingState::NoMatches => {
                Some(format!("No {noun} match the current search and filters"))
            }
            ListingState::Showing(_) => None,
        }
    }
}

/// Tab header counters for the alerts list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCounts {
    pub total: usize,
    pub by_state: BTreeMap<AlertState, usize>,
}

impl AlertCounts {
    pub fn new(alerts: &[Alert]) -> Self {
        let mut by_state = BTreeMap::new();
        for alert in alerts {
            *by_state.entry(alert.state).or_default() += 1;
        }
        Self {
            total: alerts.len(),
            by_state,
        }
    }

    pub fn in_state(&self, state: AlertState) -> usize {
        self.by_state.get(&state).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleCounts {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub muted: usize,
}

impl RuleCounts {
    pub fn new(rules: &[Rule]) -> Self {
        let enabled = rules.iter().filter(|r| r.enabled).count();
        Self {
            total: rules.len(),
            enabled,
            disabled: rules.len() - enabled,
            muted: rules
                .iter()
                .filter(|r| r.status == RuleStatus::Muted)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_records::{alert, rule};
    use api_structs::Severity;

    #[test]
    fn listing_state_distinguishes_empty_from_filtered_out() {
        assert_eq!(ListingState::new(0, 0), ListingState::Empty);
        assert_eq!(ListingState::new(4, 0), ListingState::NoMatches);
        assert_eq!(ListingState::new(4, 3), ListingState::Showing(3));
        assert_ne!(
            ListingState::Empty.message("alerts"),
            ListingState::NoMatches.message("alerts")
        );
        assert_eq!(ListingState::Showing(1).message("alerts"), None);
    }

    #[test]
    fn counters() {
        let alerts = vec![
            alert("a1", AlertState::Active, Severity::High),
            alert("a2", AlertState::Active, Severity::High),
            alert("a3", AlertState::Error, Severity::High),
        ];
        let counts = AlertCounts::new(&alerts);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.in_state(AlertState::Active), 2);
        assert_eq!(counts.in_state(AlertState::Resolved), 0);

        let mut r2 = rule("r2");
        r2.enabled = false;
        r2.status = RuleStatus::Muted;
        let counts = RuleCounts::new(&[rule("r1"), r2]);
        assert_eq!(
            counts,
            RuleCounts {
                total: 2,
                enabled: 1,
                disabled: 1,
                muted: 1
            }
        );
    }
}
