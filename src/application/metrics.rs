// Caller-owned dashboard counters, updated after each optimize call

use serde::Serialize;

use crate::domain::{models::OptimizationResult, solver_service::OptimizerError};

/// Running counters a dashboard keeps about optimization requests.
///
/// The optimizer never touches these; callers own an instance and pass it by
/// `&mut` after each call returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationMetrics {
    pub active_optimizations: u64,
    pub response_time: u64,
    pub accuracy: f64,
    pub errors: u64,
}

impl OptimizationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &Result<OptimizationResult, OptimizerError>) {
        match outcome {
            Ok(result) => {
                self.active_optimizations += 1;
                self.response_time = result.response_time;
                self.accuracy = result.accuracy;
            }
            Err(_) => self.errors += 1,
        }
    }
}
