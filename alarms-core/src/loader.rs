//! Initial load of the page: three independent list requests joined before
//! anything renders.

use api_structs::{Alert, Datasource, Rule};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("Could not decode response of {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// The three GET endpoints the page reads from.
///
/// Futures are not `Send`: the browser implementation runs on the single
/// wasm thread.
#[async_trait(?Send)]
pub trait RecordSource {
    async fn alerts(&self) -> Result<Vec<Alert>, SourceError>;
    async fn rules(&self) -> Result<Vec<Rule>, SourceError>;
    async fn datasources(&self) -> Result<Vec<Datasource>, SourceError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub alerts: Vec<Alert>,
    pub rules: Vec<Rule>,
    pub datasources: Vec<Datasource>,
}

/// Fires the three requests concurrently. Any failure fails the whole join.
pub async fn fetch_all<S: RecordSource + ?Sized>(source: &S) -> Result<RecordSet, SourceError> {
    let (alerts, rules, datasources) =
        futures::future::try_join3(source.alerts(), source.rules(), source.datasources()).await?;
    Ok(RecordSet {
        alerts,
        rules,
        datasources,
    })
}

/// Liveness of whoever asked for a load. Clones share the flag.
#[derive(Debug, Clone)]
pub struct Subscription {
    cancelled: Arc<AtomicBool>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// The join failed; the page shows empty lists
    Degraded(SourceError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub records: RecordSet,
    pub status: LoadStatus,
}

/// Loads everything, degrading to empty collections on failure.
///
/// Returns `None` when `subscription` was cancelled before the join finished,
/// in which case the caller must not touch its state.
#[instrument(level = "info", skip_all)]
pub async fn load<S: RecordSource + ?Sized>(
    source: &S,
    subscription: &Subscription,
) -> Option<LoadOutcome> {
    let result = fetch_all(source).await;
    if !subscription.is_active() {
        info!("Load finished after the consumer went away, discarding");
        return None;
    }
    let outcome = match result {
        Ok(records) => {
            info!(
                "Loaded {} alerts, {} monitors, {} datasources",
                records.alerts.len(),
                records.rules.len(),
                records.datasources.len()
            );
            LoadOutcome {
                records,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            error!("Failed to load alarms data: {}", e);
            LoadOutcome {
                records: RecordSet::default(),
                status: LoadStatus::Degraded(e),
            }
        }
    };
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_records::{alert, rule};
    use api_structs::{AlertState, DatasourceType, Severity};
    use futures::executor::block_on;
    use std::cell::Cell;

    struct Fixed {
        fail_rules: bool,
    }

    #[async_trait(?Send)]
    impl RecordSource for Fixed {
        async fn alerts(&self) -> Result<Vec<Alert>, SourceError> {
            Ok(vec![alert("a1", AlertState::Active, Severity::High)])
        }

        async fn rules(&self) -> Result<Vec<Rule>, SourceError> {
            if self.fail_rules {
                Err(SourceError::Status {
                    endpoint: "/api/rules".to_string(),
                    status: 502,
                })
            } else {
                Ok(vec![rule("r1"), rule("r2")])
            }
        }

        async fn datasources(&self) -> Result<Vec<Datasource>, SourceError> {
            Ok(vec![Datasource {
                id: "ds-prom".to_string(),
                name: "Prometheus".to_string(),
                kind: DatasourceType::Prometheus,
                url: "http://prom:9090".to_string(),
                enabled: true,
            }])
        }
    }

    /// Cancels the subscription while the alerts request is in flight
    struct CancelsMidway {
        subscription: Subscription,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl RecordSource for CancelsMidway {
        async fn alerts(&self) -> Result<Vec<Alert>, SourceError> {
            self.calls.set(self.calls.get() + 1);
            self.subscription.cancel();
            Ok(vec![])
        }

        async fn rules(&self) -> Result<Vec<Rule>, SourceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![])
        }

        async fn datasources(&self) -> Result<Vec<Datasource>, SourceError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![])
        }
    }

    #[test]
    fn load_joins_all_three_lists() {
        let outcome = block_on(load(&Fixed { fail_rules: false }, &Subscription::new())).unwrap();
        assert_eq!(outcome.status, LoadStatus::Loaded);
        assert_eq!(outcome.records.alerts.len(), 1);
        assert_eq!(outcome.records.rules.len(), 2);
        assert_eq!(outcome.records.datasources.len(), 1);
    }

    #[test]
    fn any_failure_degrades_to_empty_lists() {
        let outcome = block_on(load(&Fixed { fail_rules: true }, &Subscription::new())).unwrap();
        assert_eq!(outcome.records, RecordSet::default());
        match outcome.status {
            LoadStatus::Degraded(SourceError::Status { status, .. }) => assert_eq!(status, 502),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn fetch_all_surfaces_the_error() {
        let err = block_on(fetch_all(&Fixed { fail_rules: true })).unwrap_err();
        assert_eq!(err.to_string(), "Request to /api/rules returned status 502");
    }

    #[test]
    fn cancelled_consumer_gets_nothing() {
        let subscription = Subscription::new();
        let source = CancelsMidway {
            subscription: subscription.clone(),
            calls: Cell::new(0),
        };
        assert!(block_on(load(&source, &subscription)).is_none());
        assert_eq!(source.calls.get(), 3);
        assert!(!subscription.is_active());
    }
}
