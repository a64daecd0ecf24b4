//! One place to configure console logging for the alarms binaries.
//!
//! Local runs get compact colored output, every other environment gets one
//! JSON object per line so log shippers can pick them up as is.

use tracing::subscriber::{self, SetGlobalDefaultError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn for_environment(environment: &str) -> Self {
        if environment.trim().eq_ignore_ascii_case("local") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

/// Uses RUST_LOG, see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
/// on how to configure that. If not present or invalid, defaults to plain "info".
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|e| {
        println!(
            "Missing or invalid RUST_LOG, defaulting to {DEFAULT_FILTER}. {}",
            e
        );
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Installs the global subscriber. Fails if one was already installed.
pub fn setup_console_logging(
    service_name: &str,
    environment: &str,
) -> Result<(), SetGlobalDefaultError> {
    let filter = env_filter();
    let format = LogFormat::for_environment(environment);
    println!("Initializing logging for {service_name}-{environment} ({format:?}), filter: {filter}");
    let fmt = match format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .compact()
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(filter)
            .boxed(),
    };
    let subscriber = tracing_subscriber::Registry::default().with(fmt);
    subscriber::set_global_default(subscriber)
}

/// Safe to call from every test, only the first call installs anything
pub fn setup_tracing_console_logging_for_test() {
    let fmt = tracing_subscriber::fmt::layer()
        // for tests ansi if nice
        .with_ansi(true)
        .with_test_writer()
        .compact()
        .with_filter(env_filter());
    let subscriber = tracing_subscriber::Registry::default().with(fmt);
    let _ = subscriber::set_global_default(subscriber);
}
