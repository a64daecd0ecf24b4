use crate::api::state::AppState;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

pub mod handlers;
pub mod state;

pub type ApiHandle = JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>;

/// Error half of every handler's `Result`, sent as a plain text body
#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code, self.message).into_response()
    }
}

pub fn router(app_state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/api/ready", axum::routing::get(ready))
        .route("/api/*rest", axum::routing::any(api_not_found))
        .route(
            api_structs::ui::ALERTS_PATH,
            axum::routing::get(handlers::alerts_get),
        )
        .route(
            api_structs::ui::RULES_PATH,
            axum::routing::get(handlers::rules_get),
        )
        .route(
            api_structs::ui::DATASOURCES_PATH,
            axum::routing::get(handlers::datasources_get),
        )
        .with_state(app_state)
}

#[instrument(skip_all)]
pub fn start(
    app_state: AppState,
    api_port: u16,
    ui_dist_dir: Option<&Path>,
) -> Result<ApiHandle, Box<dyn std::error::Error>> {
    info!("Starting API");
    let mut app = router(app_state);
    if let Some(ui_dist_dir) = ui_dist_dir {
        let index = ui_dist_dir.join("index.html");
        if !index.is_file() {
            return Err(format!("Failed to read {}", index.display()).into());
        }
        info!("Serving UI from {}", ui_dist_dir.display());
        let serve_ui = tower_http::services::ServeDir::new(ui_dist_dir)
            .fallback(tower_http::services::ServeFile::new(index));
        app = app.fallback_service(serve_ui);
    }
    let app = app.layer(tower_http::cors::CorsLayer::very_permissive());
    let address = SocketAddr::from(([0, 0, 0, 0], api_port));
    let server = axum::Server::try_bind(&address)?;
    info!("Listening on {}", address);
    Ok(tokio::spawn(async move {
        server
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|e| {
                error!("Server error: {}", e);
                Box::new(e) as Box<dyn std::error::Error + Send + Sync>
            })
    }))
}

async fn ready() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=UTF-8",
        )],
        "ok".to_string(),
    )
}

/// Unknown API paths get a 404 here instead of reaching the UI fallback,
/// which would answer with index.html
#[instrument(level = "error", skip_all)]
async fn api_not_found(uri: Uri) -> ApiError {
    ApiError {
        code: StatusCode::NOT_FOUND,
        message: format!("No API endpoint at {}", uri.path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_says_ok() {
        let response = ready().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_api_paths_are_not_found() {
        let error = api_not_found(Uri::from_static("/api/alert")).await;
        assert_eq!(error.message, "No API endpoint at /api/alert");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn start_refuses_missing_ui_dir() {
        let state = AppState::from_records(Default::default());
        let missing = Path::new("/definitely/not/here");
        assert!(start(state, 0, Some(missing)).is_err());
    }
}
