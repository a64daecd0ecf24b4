use crate::grouping::{AlertGroupBy, RuleGroupBy};
use crate::record::{AlertFacet, FacetedRecord, RuleFacet};
use api_structs::{Alert, Labels, Rule};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Selected values per facet and per label key.
///
/// A facet that has no entry (or an empty set) does not restrict anything.
/// Removing the last value of a facet removes its entry, so two selections
/// that filter the same way also compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Ord + Deserialize<'de>"))]
pub struct FacetSelection<K: Ord> {
    #[serde(default)]
    facets: BTreeMap<K, BTreeSet<String>>,
    #[serde(default)]
    labels: BTreeMap<String, BTreeSet<String>>,
}

impl<K: Ord> Default for FacetSelection<K> {
    fn default() -> Self {
        Self {
            facets: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> FacetSelection<K> {
    pub fn selected(&self, facet: K) -> Option<&BTreeSet<String>> {
        self.facets.get(&facet)
    }

    pub fn is_selected(&self, facet: K, value: &str) -> bool {
        self.facets
            .get(&facet)
            .map(|values| values.contains(value))
            .unwrap_or(false)
    }

    pub fn toggle(&mut self, facet: K, value: &str) {
        toggle_in(&mut self.facets, facet, value);
    }

    pub fn set(&mut self, facet: K, values: impl IntoIterator<Item = String>) {
        let values: BTreeSet<String> = values.into_iter().collect();
        if values.is_empty() {
            self.facets.remove(&facet);
        } else {
            self.facets.insert(facet, values);
        }
    }

    pub fn selected_label(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.labels.get(key)
    }

    pub fn is_label_selected(&self, key: &str, value: &str) -> bool {
        self.labels
            .get(key)
            .map(|values| values.contains(value))
            .unwrap_or(false)
    }

    pub fn toggle_label(&mut self, key: &str, value: &str) {
        toggle_in(&mut self.labels, key.to_string(), value);
    }

    pub fn clear(&mut self) {
        self.facets.clear();
        self.labels.clear();
    }

    /// Number of selected values across every facet and label key
    pub fn active_count(&self) -> usize {
        self.facets.values().map(BTreeSet::len).sum::<usize>()
            + self.labels.values().map(BTreeSet::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Conjunction across facets and label keys, disjunction within one.
    pub fn admits<R: FacetedRecord<Facet = K>>(&self, record: &R) -> bool {
        let facets_ok = self.facets.iter().all(|(facet, selected)| {
            selected.is_empty()
                || record
                    .facet_values(*facet)
                    .iter()
                    .any(|v| selected.contains(*v))
        });
        facets_ok && labels_admit(&self.labels, record.labels())
    }
}

fn toggle_in<K: Ord>(map: &mut BTreeMap<K, BTreeSet<String>>, key: K, value: &str) {
    let values = map.entry(key).or_default();
    if !values.remove(value) {
        values.insert(value.to_string());
    }
    map.retain(|_, values| !values.is_empty());
}

fn labels_admit(selected: &BTreeMap<String, BTreeSet<String>>, labels: &Labels) -> bool {
    selected.iter().all(|(key, values)| {
        values.is_empty()
            || labels
                .get(key)
                .map(|v| values.contains(v))
                .unwrap_or(false)
    })
}

/// Case insensitive substring query, ORed across a record's search fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches<R: FacetedRecord>(&self, record: &R) -> bool {
        self.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Records passing both the query and the selection, in their input order
pub fn apply<R>(records: &[R], selection: &FacetSelection<R::Facet>, query: &str) -> Vec<R>
where
    R: FacetedRecord + Clone,
{
    let query = TextQuery::new(query);
    records
        .iter()
        .filter(|record| query.matches(*record) && selection.admits(*record))
        .cloned()
        .collect()
}

/// Everything about the alerts tab that a saved search restores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFilters {
    pub selection: FacetSelection<AlertFacet>,
    #[serde(default)]
    pub group_by: AlertGroupBy,
}

impl AlertFilters {
    pub fn apply(&self, alerts: &[Alert], query: &str) -> Vec<Alert> {
        apply(alerts, &self.selection, query)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFilters {
    pub selection: FacetSelection<RuleFacet>,
    #[serde(default)]
    pub group_by: RuleGroupBy,
}

impl RuleFilters {
    pub fn apply(&self, rules: &[Rule], query: &str) -> Vec<Rule> {
        apply(rules, &self.selection, query)
    }
}
