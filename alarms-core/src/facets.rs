use crate::record::FacetedRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Distinct values observed for one facet, with the number of records
/// exhibiting each of them. Values iterate in ascending lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facet {
    counts: BTreeMap<String, usize>,
}

impl Facet {
    /// Builds a facet from an accessor returning the value(s) of each record.
    /// Empty values are dropped, and a record counts once per distinct value.
    pub fn build<'a, R, F, I>(records: &'a [R], accessor: F) -> Self
    where
        F: Fn(&'a R) -> I,
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            let values: BTreeSet<&str> = accessor(record)
                .into_iter()
                .filter(|v| !v.is_empty())
                .collect();
            for value in values {
                *counts.entry(value.to_string()).or_default() += 1;
            }
        }
        Self { counts }
    }

    pub fn distinct_values(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// `(value, count)` pairs in value order
    pub fn options(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, c)| (v.as_str(), *c))
    }

    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Sorted union of the label keys of every record
pub fn label_keys<R: FacetedRecord>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.labels().keys())
        .collect::<BTreeSet<&String>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Every facet of a record collection, fixed ones and one per label key.
/// Rebuilt from scratch whenever the collection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetIndex<K: Ord> {
    facets: BTreeMap<K, Facet>,
    labels: BTreeMap<String, Facet>,
}

impl<K: Ord + Copy> FacetIndex<K> {
    pub fn build<R: FacetedRecord<Facet = K>>(records: &[R]) -> Self {
        let facets = R::FACETS
            .iter()
            .map(|facet| (*facet, Facet::build(records, |r| r.facet_values(*facet))))
            .collect();
        let labels = label_keys(records)
            .into_iter()
            .map(|key| {
                let facet = Facet::build(records, |r| r.labels().get(&key).map(String::as_str));
                (key, facet)
            })
            .collect();
        Self { facets, labels }
    }

    pub fn facet(&self, facet: K) -> Option<&Facet> {
        self.facets.get(&facet)
    }

    pub fn facets(&self) -> impl Iterator<Item = (&K, &Facet)> {
        self.facets.iter()
    }

    pub fn label_keys(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    pub fn label_facet(&self, key: &str) -> Option<&Facet> {
        self.labels.get(key)
    }

    pub fn label_facets(&self) -> impl Iterator<Item = (&str, &Facet)> {
        self.labels.iter().map(|(k, f)| (k.as_str(), f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_records::{alert, labels, rule};
    use crate::record::{AlertFacet, RuleFacet};
    use api_structs::{AlertState, Severity};

    #[test]
    fn distinct_values_are_sorted_unique_and_never_empty() {
        let values = ["b", "", "a", "b", "c", ""];
        let facet = Facet::build(&values, |v| Some(*v));
        assert_eq!(facet.distinct_values().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(facet.count("b"), 2);
        assert_eq!(facet.count(""), 0);
    }

    #[test]
    fn multi_valued_records_count_once_per_value() {
        let records = vec![vec!["x", "x", "y"], vec!["y"]];
        let facet = Facet::build(&records, |r| r.iter().copied());
        assert_eq!(facet.options().collect::<Vec<_>>(), vec![("x", 1), ("y", 2)]);
    }

    #[test]
    fn alert_index_counts_states_and_discovers_label_keys() {
        let mut a1 = alert("a1", AlertState::Active, Severity::High);
        a1.labels = labels(&[("service", "checkout"), ("env", "prod")]);
        let mut a2 = alert("a2", AlertState::Active, Severity::Low);
        a2.labels = labels(&[("service", "search"), ("team", "")]);
        let a3 = alert("a3", AlertState::Resolved, Severity::Low);
        let index = FacetIndex::build(&[a1, a2, a3]);

        let states = index.facet(AlertFacet::State).unwrap();
        assert_eq!(
            states.options().collect::<Vec<_>>(),
            vec![("active", 2), ("resolved", 1)]
        );
        assert_eq!(
            index.label_keys().collect::<Vec<_>>(),
            vec!["env", "service", "team"]
        );
        assert!(index.label_facet("team").unwrap().is_empty());
        assert_eq!(index.label_facet("service").unwrap().len(), 2);
    }

    #[test]
    fn rule_index_has_derived_enabled_facet() {
        let mut r2 = rule("r2");
        r2.enabled = false;
        let index = FacetIndex::build(&[rule("r1"), r2, rule("r3")]);
        let enabled = index.facet(RuleFacet::Enabled).unwrap();
        assert_eq!(enabled.count("enabled"), 2);
        assert_eq!(enabled.count("disabled"), 1);
    }

    #[test]
    fn rebuilding_gives_identical_index() {
        let records = vec![
            alert("a1", AlertState::Pending, Severity::Info),
            alert("a2", AlertState::Error, Severity::Critical),
        ];
        assert_eq!(FacetIndex::build(&records), FacetIndex::build(&records));
    }

    #[test]
    fn empty_collection_gives_empty_facets() {
        let index: FacetIndex<AlertFacet> = FacetIndex::build::<api_structs::Alert>(&[]);
        assert!(index.facet(AlertFacet::Severity).unwrap().is_empty());
        assert_eq!(index.label_keys().count(), 0);
    }
}
