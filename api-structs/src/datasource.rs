use crate::DatasourceId;
use serde::{Deserialize, Serialize};

/// Backend kind tag. Unknown kinds are kept verbatim so they can still be
/// listed and filtered on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DatasourceType {
    OpenSearch,
    Prometheus,
    Other(String),
}

impl DatasourceType {
    pub fn as_str(&self) -> &str {
        match self {
            DatasourceType::OpenSearch => "opensearch",
            DatasourceType::Prometheus => "prometheus",
            DatasourceType::Other(other) => other,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            DatasourceType::OpenSearch => "OpenSearch",
            DatasourceType::Prometheus => "Prometheus",
            DatasourceType::Other(other) => other,
        }
    }
}

impl From<String> for DatasourceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "opensearch" => DatasourceType::OpenSearch,
            "prometheus" => DatasourceType::Prometheus,
            _ => DatasourceType::Other(value),
        }
    }
}

impl From<DatasourceType> for String {
    fn from(value: DatasourceType) -> Self {
        match value {
            DatasourceType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DatasourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasource {
    pub id: DatasourceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DatasourceType,
    pub url: String,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_backend_kinds_survive_a_round_trip() {
        let kind: DatasourceType = serde_json::from_str("\"elasticsearch\"").unwrap();
        assert_eq!(kind, DatasourceType::Other("elasticsearch".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"elasticsearch\"");
    }

    #[test]
    fn datasource_type_field_is_called_type_on_the_wire() {
        let ds: Datasource = serde_json::from_str(
            r#"{"id":"ds-1","name":"Prod metrics","type":"prometheus","url":"http://prom:9090","enabled":true}"#,
        )
        .unwrap();
        assert_eq!(ds.kind, DatasourceType::Prometheus);
    }
}
