use alarms_core::{RecordSource, SourceError};
use api_structs::ui::{
    AlertsResponse, DatasourcesResponse, RulesResponse, ALERTS_PATH, DATASOURCES_PATH, RULES_PATH,
};
use api_structs::{Alert, Datasource, Rule};
use async_trait::async_trait;
use leptos::logging::log;
use serde::de::DeserializeOwned;

/// Reads the alarms endpoints of the API server
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url_no_trailing_slash: &str) -> Self {
        Self {
            base_url: base_url_no_trailing_slash.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let endpoint = format!("{}{}", self.base_url, path);
        log!("Sending {} request", endpoint);
        let response = gloo_net::http::Request::get(&endpoint)
            .send()
            .await
            .map_err(|e| SourceError::Transport {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;
        if !response.ok() {
            return Err(SourceError::Status {
                endpoint,
                status: response.status(),
            });
        }
        response.json().await.map_err(|e| SourceError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl RecordSource for HttpSource {
    async fn alerts(&self) -> Result<Vec<Alert>, SourceError> {
        let response: AlertsResponse = self.get_json(ALERTS_PATH).await?;
        Ok(response.alerts)
    }

    async fn rules(&self) -> Result<Vec<Rule>, SourceError> {
        let response: RulesResponse = self.get_json(RULES_PATH).await?;
        Ok(response.rules)
    }

    async fn datasources(&self) -> Result<Vec<Datasource>, SourceError> {
        let response: DatasourcesResponse = self.get_json(DATASOURCES_PATH).await?;
        Ok(response.datasources)
    }
}
