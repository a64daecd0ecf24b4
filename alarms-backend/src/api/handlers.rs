//! Read only list endpoints. Every response is a snapshot of the fixtures
//! loaded at startup.

use crate::api::state::AppState;
use crate::api::ApiError;
use api_structs::ui::{AlertsResponse, DatasourcesResponse, RulesResponse};
use axum::extract::State;
use axum::Json;
use tracing::{debug, instrument};

#[instrument(level = "error", skip_all)]
pub(crate) async fn alerts_get(
    State(app_state): State<AppState>,
) -> Result<Json<AlertsResponse>, ApiError> {
    let alerts = app_state.records.alerts.clone();
    debug!("Returning {} alerts", alerts.len());
    Ok(Json(AlertsResponse { alerts }))
}

#[instrument(level = "error", skip_all)]
pub(crate) async fn rules_get(
    State(app_state): State<AppState>,
) -> Result<Json<RulesResponse>, ApiError> {
    let rules = app_state.records.rules.clone();
    debug!("Returning {} rules", rules.len());
    Ok(Json(RulesResponse { rules }))
}

#[instrument(level = "error", skip_all)]
pub(crate) async fn datasources_get(
    State(app_state): State<AppState>,
) -> Result<Json<DatasourcesResponse>, ApiError> {
    let datasources = app_state.records.datasources.clone();
    debug!("Returning {} datasources", datasources.len());
    Ok(Json(DatasourcesResponse { datasources }))
}
