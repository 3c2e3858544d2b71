// Optimizer service: the single entry point callers use
// Orchestrates build -> solve -> normalize for one request at a time

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::{
    config::{ConfigError, OptimizerConfig},
    models::OptimizationResult,
    problem_builder::ProblemBuilder,
    solver_service::Result,
    value_objects::ProblemKind,
};

use super::normalizer::ResultNormalizer;
use super::strategy::SolverStrategy;

/// Quantum-inspired optimizer with transparent simulation fallback.
///
/// Holds only immutable configuration and the capability probed at
/// construction, so a single instance can serve concurrent callers.
#[derive(Debug)]
pub struct QuantumOptimizer {
    config: OptimizerConfig,
    strategy: SolverStrategy,
}

impl QuantumOptimizer {
    /// Validates `config` and probes the specialized solver once.
    pub fn new(config: OptimizerConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let strategy = SolverStrategy::probe(&config);
        Ok(Self { config, strategy })
    }

    /// Validates `config` and uses an already-probed strategy instead of
    /// probing again.
    pub fn with_strategy(
        config: OptimizerConfig,
        strategy: SolverStrategy,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn strategy(&self) -> &SolverStrategy {
        &self.strategy
    }

    /// Optimize a named problem (`"hospital"` or `"warehouse"`).
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::UnknownProblemKind`] for any other name.
    ///
    /// [`OptimizerError::UnknownProblemKind`]: crate::domain::OptimizerError::UnknownProblemKind
    pub fn optimize(&self, problem_kind: &str) -> Result<OptimizationResult> {
        let (kind, size) = ProblemKind::from_request(problem_kind)?;
        self.optimize_kind(kind, size)
    }

    /// Optimize a problem of `kind` over `size` units.
    pub fn optimize_kind(&self, kind: ProblemKind, size: usize) -> Result<OptimizationResult> {
        let mut rng = self.rng();
        let problem = ProblemBuilder::build(kind, size, &mut rng)?;

        info!(
            event = "optimize_start",
            kind = %kind,
            size,
            variables = problem.num_variables(),
            constraints = problem.constraints().len(),
            specialized = self.strategy.is_specialized_available(),
        );

        let outcome = self.strategy.solve(&problem, &mut rng);
        let solve_time_ms = outcome.raw_metrics.statistics.solve_time_ms;
        let status = outcome.status;
        let result = ResultNormalizer::normalize(&problem, outcome, &mut rng);

        info!(
            event = "optimize_end",
            kind = %kind,
            method = %result.method,
            status = %status,
            solve_time_ms,
            response_time = result.response_time,
        );

        Ok(result)
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{KindMetrics, OptimizerError, SolveMethod};
    use crate::solver::SimulationSolver;

    fn simulated() -> QuantumOptimizer {
        QuantumOptimizer::new(
            OptimizerConfig::new()
                .with_quantum(false)
                .with_simulation_delay(Duration::from_millis(1)),
        )
        .unwrap()
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = simulated().optimize("unknown").unwrap_err();
        assert!(matches!(err, OptimizerError::UnknownProblemKind(name) if name == "unknown"));
    }

    #[test]
    fn invalid_size_is_an_error() {
        let err = simulated()
            .optimize_kind(ProblemKind::Assignment, 0)
            .unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidProblemSize(0)));
    }

    #[test]
    fn custom_sizes_are_supported() {
        let result = simulated().optimize_kind(ProblemKind::Routing, 5).unwrap();
        assert_eq!(result.method, SolveMethod::Simulated);
        assert!(matches!(
            result.metrics,
            KindMetrics::Routing { total_routes: 5, .. }
        ));
    }

    #[test]
    fn injected_strategy_is_used_without_probing() {
        let strategy = SolverStrategy::simulation_only(SimulationSolver::new(Duration::from_millis(1)));
        let optimizer = QuantumOptimizer::with_strategy(OptimizerConfig::new(), strategy).unwrap();

        assert!(optimizer.config().enable_quantum);
        assert!(!optimizer.strategy().is_specialized_available());

        let result = optimizer.optimize("hospital").unwrap();
        assert_eq!(result.kind(), ProblemKind::Assignment);
        assert_eq!(result.method, SolveMethod::Simulated);
    }

    #[test]
    fn injected_strategy_still_validates_config() {
        let config = OptimizerConfig::new().with_simulation_delay(Duration::ZERO);
        let strategy = SolverStrategy::simulation_only(SimulationSolver::new(Duration::from_millis(1)));

        assert!(matches!(
            QuantumOptimizer::with_strategy(config, strategy),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let mut config = OptimizerConfig::new();
        config.simulation.delay_ms = 0;
        assert!(QuantumOptimizer::new(config).is_err());
    }
}
