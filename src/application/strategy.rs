// Solver strategy: prefer the specialized solver, degrade to simulation

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rand::RngCore;
use tracing::{debug, warn};

use crate::domain::{
    config::OptimizerConfig,
    models::{ProblemSpec, SolveOutcome},
    solver_service::{SoftFailure, SolverService},
    value_objects::SolveMethod,
};
use crate::solver::{SimulationSolver, SolverCapability, SolverFactory};

/// Chooses the solver path for each call from a capability fixed at construction.
///
/// The specialized path is attempted at most once per call. Any soft failure
/// is logged and replaced by the simulation outcome; nothing is retried and
/// nothing escalates to the caller.
#[derive(Debug)]
pub struct SolverStrategy {
    capability: SolverCapability,
    simulation: SimulationSolver,
}

impl SolverStrategy {
    pub fn new(capability: SolverCapability, simulation: SimulationSolver) -> Self {
        Self {
            capability,
            simulation,
        }
    }

    /// Probe the specialized solver once and pair it with a simulation fallback.
    pub fn probe(config: &OptimizerConfig) -> Self {
        Self::new(
            SolverFactory::probe(config),
            SimulationSolver::new(config.simulation.delay()),
        )
    }

    /// Strategy that never attempts the specialized solver.
    pub fn simulation_only(simulation: SimulationSolver) -> Self {
        Self::new(SolverCapability::SimulationOnly, simulation)
    }

    pub fn capability(&self) -> &SolverCapability {
        &self.capability
    }

    pub fn is_specialized_available(&self) -> bool {
        self.capability.is_specialized()
    }

    pub fn solve(&self, problem: &ProblemSpec, rng: &mut dyn RngCore) -> SolveOutcome {
        if let SolverCapability::Specialized(solver) = &self.capability {
            match attempt(&**solver, problem, &mut *rng) {
                Ok(outcome)
                    if outcome.method == SolveMethod::Quantum
                        && outcome.has_usable_solution(problem.num_variables()) =>
                {
                    debug!(event = "solve_path", solver = solver.name(), method = %outcome.method);
                    return outcome;
                }
                Ok(_) => {
                    warn!(
                        event = "soft_failure",
                        solver = solver.name(),
                        reason = "no usable solution vector",
                    );
                }
                Err(failure) => {
                    warn!(event = "soft_failure", solver = solver.name(), reason = %failure);
                }
            }
        }

        debug!(
            event = "solve_path",
            solver = "simulation",
            delay_ms = self.simulation.delay().as_millis() as u64,
        );
        self.simulation.simulate(problem, rng)
    }
}

/// Runs the specialized solver, turning a panic into a soft failure.
fn attempt(
    solver: &dyn SolverService,
    problem: &ProblemSpec,
    rng: &mut dyn RngCore,
) -> Result<SolveOutcome, SoftFailure> {
    panic::catch_unwind(AssertUnwindSafe(|| solver.solve(problem, rng)))
        .unwrap_or_else(|payload| Err(SoftFailure::Panicked(panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
