use api_structs::{Datasource, DatasourceType};
use std::collections::HashMap;

/// Resolves datasource ids found on alerts and rules to display names
#[derive(Debug, Clone, Default)]
pub struct DatasourceDirectory {
    by_id: HashMap<String, Datasource>,
}

impl DatasourceDirectory {
    pub fn new(datasources: &[Datasource]) -> Self {
        Self {
            by_id: datasources
                .iter()
                .map(|ds| (ds.id.clone(), ds.clone()))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Datasource> {
        self.by_id.get(id)
    }

    /// Falls back to the id itself for datasources we don't know about
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id
            .get(id)
            .map(|ds| ds.name.as_str())
            .unwrap_or(id)
    }

    pub fn kind(&self, id: &str) -> Option<&DatasourceType> {
        self.by_id.get(id).map(|ds| &ds.kind)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
