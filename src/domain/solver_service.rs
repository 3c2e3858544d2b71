// Domain service interface for solving optimization problems
// Defines the contract that any solver implementation must follow

use rand::RngCore;

use super::models::{ProblemSpec, SolveOutcome};

/// Errors that can reach the caller of the optimizer
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid problem size: {0}")]
    InvalidProblemSize(usize),

    #[error("Unknown problem kind: {0}")]
    UnknownProblemKind(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Recoverable failure of the specialized solver.
///
/// Never surfaces to callers: the solver strategy logs it and substitutes the
/// simulation outcome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SoftFailure {
    #[error("Solver not available: {0}")]
    Unavailable(String),

    #[error("Problem needs {required} qubits but the limit is {limit}")]
    QubitLimitExceeded { required: usize, limit: usize },

    #[error("Cost Hamiltonian produced a non-finite energy")]
    NonFiniteEnergy,

    #[error("Parameter optimizer failed: {0}")]
    Optimizer(String),

    #[error("No feasible bitstring in {0} shots")]
    NoFeasibleSolution(usize),

    #[error("Solver panicked: {0}")]
    Panicked(String),
}

/// Domain service interface for optimization solvers
///
/// Every solver variant consumes the same immutable model and reports which
/// path produced its outcome. Failures are soft: the caller decides what to
/// substitute.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(
        &self,
        problem: &ProblemSpec,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<SolveOutcome, SoftFailure>;

    /// Get the name of this solver backend
    fn name(&self) -> &str;
}
