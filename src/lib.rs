// Domain layer: problem models, configuration and solver contracts
pub mod domain;

// Application layer: strategy selection, normalization and the optimize entry point
pub mod application;

// Solver adapters: concrete implementations of SolverService
pub mod solver;

// Infrastructure layer: async deadline wrapper and logging setup
#[cfg(feature = "runtime")]
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    ConfigError, ConstraintType, KindMetrics, OptimizationResult, OptimizationType,
    OptimizerConfig, OptimizerError, ProblemBuilder, ProblemKind, ProblemSpec, QaoaConfig,
    SimulationConfig, SoftFailure, SolveMethod, SolveOutcome, SolverService,
};

pub use application::{OptimizationMetrics, QuantumOptimizer, ResultNormalizer, SolverStrategy};

pub use solver::{SimulationSolver, SolverCapability, SolverFactory};

#[cfg(feature = "quantum")]
pub use solver::QaoaSolver;

#[cfg(feature = "runtime")]
pub use infrastructure::{init_tracing, optimize_with_deadline, RuntimeError};
