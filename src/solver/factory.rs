use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    config::OptimizerConfig,
    solver_service::{SoftFailure, SolverService},
};

/// Which solver variants this process can use, decided once at startup
#[derive(Clone)]
pub enum SolverCapability {
    /// The QAOA solver initialized and is preferred for every call
    Specialized(Arc<dyn SolverService>),
    /// Only the simulation solver is available
    SimulationOnly,
}

impl SolverCapability {
    pub fn is_specialized(&self) -> bool {
        matches!(self, SolverCapability::Specialized(_))
    }
}

impl fmt::Debug for SolverCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverCapability::Specialized(solver) => {
                f.debug_tuple("Specialized").field(&solver.name()).finish()
            }
            SolverCapability::SimulationOnly => f.write_str("SimulationOnly"),
        }
    }
}

/// Factory for probing solver capabilities based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Probe the specialized solver once and report the resulting capability.
    ///
    /// Never fails: an absent or broken specialized solver yields
    /// [`SolverCapability::SimulationOnly`].
    pub fn probe(config: &OptimizerConfig) -> SolverCapability {
        if !config.enable_quantum {
            info!(event = "capability_probe", capability = "simulation_only", reason = "disabled");
            return SolverCapability::SimulationOnly;
        }

        match Self::create_specialized(config) {
            Ok(solver) => {
                info!(event = "capability_probe", capability = "specialized", solver = solver.name());
                SolverCapability::Specialized(solver)
            }
            Err(failure) => {
                warn!(
                    event = "capability_probe",
                    capability = "simulation_only",
                    reason = %failure,
                );
                SolverCapability::SimulationOnly
            }
        }
    }

    #[cfg(feature = "quantum")]
    fn create_specialized(config: &OptimizerConfig) -> Result<Arc<dyn SolverService>, SoftFailure> {
        let solver = crate::solver::QaoaSolver::initialize(&config.qaoa)?;
        Ok(Arc::new(solver))
    }

    #[cfg(not(feature = "quantum"))]
    fn create_specialized(_config: &OptimizerConfig) -> Result<Arc<dyn SolverService>, SoftFailure> {
        Err(SoftFailure::Unavailable(
            "built without the `quantum` feature".to_string(),
        ))
    }
}
