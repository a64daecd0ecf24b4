//! Response envelopes of the endpoints the alarms page reads

use crate::{Alert, Datasource, Rule};
use serde::{Deserialize, Serialize};

pub const ALERTS_PATH: &str = "/api/alerts";
pub const RULES_PATH: &str = "/api/rules";
pub const DATASOURCES_PATH: &str = "/api/datasources";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesResponse {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasourcesResponse {
    pub datasources: Vec<Datasource>,
}
