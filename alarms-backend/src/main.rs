use crate::api::state::AppState;
use backtraced_error::error_chain_to_pretty_formatted;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, instrument};

mod api;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // load env vars so clap can use it when parsing a config
    println!("Loading env vars");
    dotenv::dotenv().ok();
    let config = LaunchConfig::parse();
    if let Err(e) =
        tracing_config_helper::setup_console_logging(env!("CARGO_BIN_NAME"), &config.environment)
    {
        eprintln!("Failed to set up logging: {}", e);
    }
    let join_handle = match start_api(config).await {
        Ok(join_handle) => join_handle,
        Err(e) => {
            error!("Failed to start: {}", error_chain_to_pretty_formatted(e.as_ref()));
            std::process::exit(1);
        }
    };
    match join_handle.await {
        Ok(Ok(())) => info!("API stopped"),
        Ok(Err(e)) => error!("API failed: {}", error_chain_to_pretty_formatted(e.as_ref())),
        Err(e) => error!("API task panicked: {}", e),
    }
}

#[instrument(level = "error", skip_all)]
async fn start_api(config: LaunchConfig) -> Result<api::ApiHandle, Box<dyn std::error::Error>> {
    info!("Using config: {:#?}", config);
    let app_state = AppState::from_fixtures_file(&config.fixtures_path).await?;
    let api_handle = api::start(app_state, config.api_listen_port, config.ui_dist_dir.as_deref())?;
    Ok(api_handle)
}

#[derive(Debug, clap::Parser)]
pub struct LaunchConfig {
    #[clap(long, env, default_value_t = 4200)]
    pub api_listen_port: u16,
    /// JSON file with the alerts, rules and datasources to serve
    #[clap(long, env, default_value = "./alarms-backend/fixtures/records.json")]
    pub fixtures_path: PathBuf,
    /// Built UI to serve next to the API, if any
    #[clap(long, env)]
    pub ui_dist_dir: Option<PathBuf>,
    #[clap(long, env, default_value = "local")]
    pub environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let config = LaunchConfig::try_parse_from(["alarms-backend"]).unwrap();
        assert_eq!(config.api_listen_port, 4200);
        assert_eq!(config.ui_dist_dir, None);
        assert!(config.fixtures_path.ends_with("records.json"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = LaunchConfig::try_parse_from([
            "alarms-backend",
            "--api-listen-port",
            "8080",
            "--ui-dist-dir",
            "./alarms-ui/dist",
            "--environment",
            "prod",
        ])
        .unwrap();
        assert_eq!(config.api_listen_port, 8080);
        assert_eq!(config.ui_dist_dir, Some(PathBuf::from("./alarms-ui/dist")));
        assert_eq!(config.environment, "prod");
    }
}
