use api_structs::{Alert, Datasource, Rule};
use backtraced_error::{IoError, SerdeJsonError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Everything the API serves, read once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFixtures {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub datasources: Vec<Datasource>,
}

#[derive(Debug, thiserror::Error)]
pub enum FixturesError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Json(#[from] SerdeJsonError),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub records: Arc<RecordFixtures>,
}

impl AppState {
    pub fn from_records(records: RecordFixtures) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    #[instrument(level = "error", skip_all, fields(path = %path.display()))]
    pub async fn from_fixtures_file(path: &Path) -> Result<Self, FixturesError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| IoError::from_io_error(e, "reading fixtures", path))?;
        let records: RecordFixtures = serde_json::from_str(&raw).map_err(|e| {
            SerdeJsonError::from_serde_json_error(
                e,
                format!("parsing fixtures from {}", path.display()),
                &raw,
            )
        })?;
        info!(
            "Loaded {} alerts, {} rules and {} datasources",
            records.alerts.len(),
            records.rules.len(),
            records.datasources.len()
        );
        Ok(Self::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("alarms-backend-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_sections_default_to_empty() {
        let path = temp_file("partial.json", r#"{"datasources": []}"#);
        let state = AppState::from_fixtures_file(&path).await.unwrap();
        assert_eq!(*state.records, RecordFixtures::default());
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn bad_json_keeps_context() {
        let path = temp_file("broken.json", r#"{"alerts": [{"id": 1}"#);
        let err = AppState::from_fixtures_file(&path).await.unwrap_err();
        assert!(matches!(err, FixturesError::Json(_)));
        assert!(err.to_string().contains("parsing fixtures from"));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = AppState::from_fixtures_file(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FixturesError::Io(_)));
    }
}
