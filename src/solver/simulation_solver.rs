// Simulation solver
// Always available: produces plausible metrics after a fixed blocking pause

use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, RngCore};

use crate::domain::{
    models::{ProblemSpec, RawMetrics, SolveOutcome, SolverStatistics},
    solver_service::{SoftFailure, SolverService},
    value_objects::ProblemKind,
};

/// Share of capacity a simulated assignment fills.
pub const ASSIGNMENT_FILL_RANGE: (f64, f64) = (0.65, 0.85);

#[derive(Debug)]
pub struct SimulationSolver {
    delay: Duration,
}

impl SimulationSolver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Infallible variant of [`SolverService::solve`].
    pub fn simulate(&self, problem: &ProblemSpec, rng: &mut dyn RngCore) -> SolveOutcome {
        let start_time = Instant::now();
        thread::sleep(self.delay);

        let selected = sample_selected(problem.kind(), problem.size(), rng);

        SolveOutcome::simulated(RawMetrics {
            solution: None,
            selected: Some(selected),
            objective_value: None,
            statistics: SolverStatistics {
                solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
                iterations: 0,
                num_variables: problem.num_variables() as u32,
                num_constraints: problem.constraints().len() as u32,
            },
        })
    }
}

impl SolverService for SimulationSolver {
    fn solve(
        &self,
        problem: &ProblemSpec,
        rng: &mut dyn RngCore,
    ) -> Result<SolveOutcome, SoftFailure> {
        Ok(self.simulate(problem, rng))
    }

    fn name(&self) -> &str {
        "Simulation"
    }
}

/// Number of selected units a simulated run reports: 65–85% of capacity for
/// assignment, one route per node for routing.
pub fn sample_selected<R: Rng + ?Sized>(kind: ProblemKind, size: usize, rng: &mut R) -> usize {
    match kind {
        ProblemKind::Assignment => {
            let (low, high) = ASSIGNMENT_FILL_RANGE;
            (size as f64 * rng.random_range(low..=high)).floor() as usize
        }
        ProblemKind::Routing => size,
    }
}
