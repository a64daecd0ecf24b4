use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch<F> {
    pub id: String,
    pub name: String,
    pub query: String,
    pub filters: F,
}

/// Named snapshots of a query and its filters, kept in save order.
/// Ids are always assigned here, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearchStore<F> {
    entries: Vec<SavedSearch<F>>,
}

impl<F> Default for SavedSearchStore<F> {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}

impl<F: Clone> SavedSearchStore<F> {
    /// Appends a snapshot. A blank name is refused and nothing is stored.
    pub fn save(&mut self, name: &str, query: &str, filters: &F) -> Option<&SavedSearch<F>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Refusing to save a search without a name");
            return None;
        }
        let id = self.fresh_id();
        self.entries.push(SavedSearch {
            id,
            name: name.to_string(),
            query: query.to_string(),
            filters: filters.clone(),
        });
        self.entries.last()
    }

    /// The snapshot to replace the active query and filters with
    pub fn load(&self, id: &str) -> Option<(String, F)> {
        self.get(id)
            .map(|search| (search.query.clone(), search.filters.clone()))
    }

    pub fn get(&self, id: &str) -> Option<&SavedSearch<F>> {
        self.entries.iter().find(|search| search.id == id)
    }

    /// Returns whether something was removed; unknown ids are ignored
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|search| search.id != id);
        before != self.entries.len()
    }

    pub fn list(&self) -> &[SavedSearch<F>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::AlertFilters;
    use crate::grouping::AlertGroupBy;
    use crate::record::AlertFacet;

    fn filters() -> AlertFilters {
        let mut filters = AlertFilters::default();
        filters.selection.toggle(AlertFacet::Severity, "critical");
        filters.selection.toggle_label("team", "storage");
        filters.group_by = AlertGroupBy::Datasource;
        filters
    }

    #[test]
    fn save_then_load_restores_query_and_filters() {
        let mut store = SavedSearchStore::default();
        let id = store
            .save("Storage criticals", "disk", &filters())
            .unwrap()
            .id
            .clone();
        assert_eq!(store.load(&id), Some(("disk".to_string(), filters())));
    }

    #[test]
    fn blank_names_are_refused() {
        let mut store: SavedSearchStore<AlertFilters> = SavedSearchStore::default();
        assert!(store.save("", "q", &AlertFilters::default()).is_none());
        assert!(store.save("   ", "q", &AlertFilters::default()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_unique_and_order_is_kept() {
        let mut store = SavedSearchStore::default();
        for name in ["one", "two", "one"] {
            store.save(name, "", &AlertFilters::default());
        }
        let names: Vec<&str> = store.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "one"]);
        assert_ne!(store.list()[0].id, store.list()[2].id);
    }

    #[test]
    fn delete_and_load_ignore_unknown_ids() {
        let mut store = SavedSearchStore::default();
        let id = store
            .save("mine", "", &AlertFilters::default())
            .unwrap()
            .id
            .clone();
        assert!(!store.delete("nope"));
        assert_eq!(store.len(), 1);
        assert!(store.load("nope").is_none());
        assert!(store.delete(&id));
        assert!(store.is_empty());
        assert!(!store.delete(&id));
    }
}
