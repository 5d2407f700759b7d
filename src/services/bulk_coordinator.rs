//! Bulk suggest and bulk place fan-out over a [`PlacementService`].
//!
//! Each item is independent: a failure is recorded against its own container
//! number and never cancels or affects its siblings.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};
use uuid::Uuid;

use super::worker_pool::WorkerPool;
use crate::domain::errors::DomainResult;
use crate::domain::models::{BulkConfig, PlacementRequest, Position, SuggestionRequest};
use crate::domain::ports::PlacementService;

/// Result of one bulk item.
pub trait Outcome {
    fn container_number(&self) -> &str;
    fn succeeded(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionResult {
    SuggestedPosition(Position),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionOutcome {
    pub container_number: String,
    #[serde(flatten)]
    pub result: SuggestionResult,
}

impl SuggestionOutcome {
    pub fn from_result(container_number: String, result: DomainResult<Position>) -> Self {
        let result = match result {
            Ok(position) => SuggestionResult::SuggestedPosition(position),
            Err(e) => SuggestionResult::Error(e.to_string()),
        };
        Self {
            container_number,
            result,
        }
    }

    pub fn position(&self) -> Option<&Position> {
        match &self.result {
            SuggestionResult::SuggestedPosition(position) => Some(position),
            SuggestionResult::Error(_) => None,
        }
    }
}

impl Outcome for SuggestionOutcome {
    fn container_number(&self) -> &str {
        &self.container_number
    }

    fn succeeded(&self) -> bool {
        matches!(self.result, SuggestionResult::SuggestedPosition(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub container_number: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlacementOutcome {
    pub fn from_result<T>(container_number: String, result: DomainResult<T>) -> Self {
        match result {
            Ok(_) => Self {
                container_number,
                success: true,
                error: None,
            },
            Err(e) => Self {
                container_number,
                success: false,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn failed(container_number: String, error: String) -> Self {
        Self {
            container_number,
            success: false,
            error: Some(error),
        }
    }
}

impl Outcome for PlacementOutcome {
    fn container_number(&self) -> &str {
        &self.container_number
    }

    fn succeeded(&self) -> bool {
        self.success
    }
}

/// Success and failure counts for one bulk call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BulkSummary {
    pub fn from_outcomes<O: Outcome>(outcomes: &[O]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

pub struct BulkCoordinator<P: PlacementService + ?Sized> {
    service: Arc<P>,
    config: BulkConfig,
}

impl<P: PlacementService + ?Sized + 'static> BulkCoordinator<P> {
    pub fn new(service: Arc<P>, config: BulkConfig) -> Self {
        Self { service, config }
    }

    pub const fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Run every suggestion on a pool of `suggest_workers` tasks.
    ///
    /// Outcomes come back in completion order.
    pub async fn bulk_suggest(&self, requests: Vec<SuggestionRequest>) -> Vec<SuggestionOutcome> {
        if requests.is_empty() {
            return Vec::new();
        }

        let total = requests.len();
        let run_id = Uuid::new_v4();
        info!(%run_id, total, workers = self.config.suggest_workers, "bulk suggest started");

        let service = Arc::clone(&self.service);
        let pool = WorkerPool::start(self.config.suggest_workers, move |request: SuggestionRequest| {
            let service = Arc::clone(&service);
            async move {
                let result = service.suggest(&request).await;
                SuggestionOutcome::from_result(request.container_number, result)
            }
        });

        let outcomes = pool.run(requests).await;
        let summary = BulkSummary::from_outcomes(&outcomes);
        info!(
            %run_id,
            total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "bulk suggest finished"
        );
        outcomes
    }

    /// Place every request concurrently, at most `place_concurrency` at a time.
    ///
    /// Every request yields exactly one outcome, even when its task panics.
    /// Outcomes come back in completion order.
    pub async fn bulk_place(&self, requests: Vec<PlacementRequest>) -> Vec<PlacementOutcome> {
        if requests.is_empty() {
            return Vec::new();
        }

        let total = requests.len();
        let run_id = Uuid::new_v4();
        info!(%run_id, total, concurrency = self.config.place_concurrency, "bulk place started");

        let gate = Arc::new(Semaphore::new(self.config.place_concurrency.max(1)));
        let outcomes = Arc::new(Mutex::new(Vec::with_capacity(total)));

        let (numbers, handles): (Vec<String>, Vec<_>) = requests
            .into_iter()
            .map(|request| {
                let container_number = request.container_number.clone();
                let gate = Arc::clone(&gate);
                let outcomes = Arc::clone(&outcomes);
                let service = Arc::clone(&self.service);

                let handle = tokio::spawn(async move {
                    let outcome = match gate.acquire_owned().await {
                        Ok(_permit) => {
                            let result = service.place(&request).await;
                            PlacementOutcome::from_result(request.container_number, result)
                        }
                        Err(e) => {
                            warn!(container = %request.container_number, error = %e, "admission gate closed");
                            PlacementOutcome::failed(request.container_number, format!("admission gate closed: {e}"))
                        }
                    };
                    outcomes.lock().await.push(outcome);
                });
                (container_number, handle)
            })
            .unzip();

        for (container_number, joined) in numbers.into_iter().zip(join_all(handles).await) {
            if let Err(e) = joined {
                warn!(%run_id, container = %container_number, error = %e, "placement task failed");
                let outcome = PlacementOutcome::failed(container_number, format!("placement task failed: {e}"));
                outcomes.lock().await.push(outcome);
            }
        }

        let outcomes = std::mem::take(&mut *outcomes.lock().await);
        let summary = BulkSummary::from_outcomes(&outcomes);
        info!(
            %run_id,
            total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "bulk place finished"
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    #[test]
    fn test_suggestion_outcome_wire_shape() {
        let ok = SuggestionOutcome::from_result(
            "ALFI000001".into(),
            Ok(Position::new("A1", crate::domain::models::Cell::new(1, 2, 1))),
        );
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["container_number"], "ALFI000001");
        assert_eq!(json["suggested_position"]["block"], "A1");
        assert_eq!(json["suggested_position"]["row"], 2);

        let err = SuggestionOutcome::from_result("X".into(), Err(DomainError::YardNotFound("Y".into())));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "Yard with code 'Y' not found");
        assert!(json.get("suggested_position").is_none());
    }

    #[test]
    fn test_placement_outcome_omits_empty_error() {
        let ok = PlacementOutcome::from_result("A".into(), DomainResult::Ok(()));
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            PlacementOutcome::from_result("A".into(), DomainResult::Ok(())),
            PlacementOutcome::from_result::<()>("B".into(), Err(DomainError::UnsupportedTier(2))),
            PlacementOutcome::from_result("C".into(), DomainResult::Ok(())),
        ];
        assert_eq!(
            BulkSummary::from_outcomes(&outcomes),
            BulkSummary {
                total: 3,
                succeeded: 2,
                failed: 1
            }
        );
    }
}
