// Async wrapper for callers that need bounded latency
// The optimizer itself blocks; this moves it off the async workers and
// enforces a caller-chosen deadline

use std::sync::Arc;
use std::time::Duration;

use tokio::task;
use tokio::time;
use tracing::warn;

use crate::application::QuantumOptimizer;
use crate::domain::{models::OptimizationResult, solver_service::OptimizerError};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Optimization did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Optimization task failed: {0}")]
    TaskFailed(#[from] task::JoinError),

    #[error(transparent)]
    Optimizer(#[from] OptimizerError),
}

/// Run `optimizer.optimize(problem_kind)` on the blocking pool under `deadline`.
///
/// On timeout the blocking call keeps running to completion in the
/// background; only its result is discarded.
pub async fn optimize_with_deadline(
    optimizer: Arc<QuantumOptimizer>,
    problem_kind: impl Into<String>,
    deadline: Duration,
) -> Result<OptimizationResult, RuntimeError> {
    let problem_kind = problem_kind.into();
    let handle = task::spawn_blocking(move || optimizer.optimize(&problem_kind));

    match time::timeout(deadline, handle).await {
        Ok(joined) => Ok(joined??),
        Err(_) => {
            warn!(event = "deadline_exceeded", deadline_ms = deadline.as_millis() as u64);
            Err(RuntimeError::DeadlineExceeded(deadline))
        }
    }
}
