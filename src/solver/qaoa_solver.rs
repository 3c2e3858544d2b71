// QAOA solver adapter
// Implements the SolverService interface with a simulated QAOA circuit
// Constraints are folded into the diagonal cost as squared-violation penalties

use std::time::Instant;

use rand::{Rng, RngCore};
use tracing::debug;

use crate::domain::{
    config::{QaoaConfig, MAX_SUPPORTED_QUBITS},
    models::{ProblemSpec, RawMetrics, SolveOutcome, SolverStatistics},
    solver_service::{SoftFailure, SolverService},
};

use super::nelder_mead;
use super::statevector::{bit_values, StateVector};

const INITIAL_STEP: f64 = 0.25;

/// Statevector QAOA over the model's binary variables.
///
/// Unlike [`SimulationSolver`](super::SimulationSolver), this path adds no
/// artificial pause: its latency is the circuit simulation and parameter
/// search themselves.
pub struct QaoaSolver {
    config: QaoaConfig,
    search: nelder_mead::Config,
}

impl QaoaSolver {
    /// Initializes the solver and checks the circuit simulator once.
    ///
    /// # Errors
    ///
    /// Returns a soft failure if the budget is unusable or the self-check
    /// does not reproduce a known single-qubit result.
    pub fn initialize(config: &QaoaConfig) -> Result<Self, SoftFailure> {
        if config.reps == 0 || config.max_iterations == 0 {
            return Err(SoftFailure::Unavailable(
                "QAOA needs at least one layer and one iteration".to_string(),
            ));
        }
        if config.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(SoftFailure::Unavailable(format!(
                "qubit limit {} exceeds the supported {}",
                config.max_qubits, MAX_SUPPORTED_QUBITS
            )));
        }

        let search = nelder_mead::Config::new(config.max_iterations, INITIAL_STEP, config.tolerance)
            .map_err(|e| SoftFailure::Optimizer(e.to_string()))?;

        let mut probe = StateVector::uniform(1);
        probe.apply_cost(std::f64::consts::FRAC_PI_2, &[0.0, 1.0]);
        probe.apply_mixer(std::f64::consts::FRAC_PI_4);
        if (probe.probabilities()[1] - 1.0).abs() > 1e-9 {
            return Err(SoftFailure::Unavailable(
                "statevector self-check failed".to_string(),
            ));
        }

        Ok(Self {
            config: config.clone(),
            search,
        })
    }

    fn energies(&self, problem: &ProblemSpec) -> Result<Vec<f64>, SoftFailure> {
        let n = problem.num_variables();
        (0..1usize << n)
            .map(|index| {
                let bits = bit_values(index, n);
                let energy = problem.objective_value(&bits)
                    + self.config.penalty * problem.squared_violation(&bits);
                if energy.is_finite() {
                    Ok(energy)
                } else {
                    Err(SoftFailure::NonFiniteEnergy)
                }
            })
            .collect()
    }

    /// Linear ramp: γ grows and β shrinks across layers.
    fn initial_angles(&self) -> Vec<f64> {
        let p = self.config.reps as f64;
        let gammas = (0..self.config.reps).map(|k| 0.1 * (k as f64 + 0.5) / p);
        let betas = (0..self.config.reps).map(|k| 0.8 * (1.0 - (k as f64 + 0.5) / p));
        gammas.chain(betas).collect()
    }

    fn prepare(&self, num_qubits: usize, angles: &[f64], energies: &[f64]) -> StateVector {
        let (gammas, betas) = angles.split_at(self.config.reps);
        let mut state = StateVector::uniform(num_qubits);
        for (&gamma, &beta) in gammas.iter().zip(betas) {
            state.apply_cost(gamma, energies);
            state.apply_mixer(beta);
        }
        state
    }
}

impl SolverService for QaoaSolver {
    fn solve(
        &self,
        problem: &ProblemSpec,
        rng: &mut dyn RngCore,
    ) -> Result<SolveOutcome, SoftFailure> {
        let start_time = Instant::now();
        let n = problem.num_variables();

        if n > self.config.max_qubits {
            return Err(SoftFailure::QubitLimitExceeded {
                required: n,
                limit: self.config.max_qubits,
            });
        }

        debug!(
            event = "qaoa_start",
            qubits = n,
            reps = self.config.reps,
            max_iterations = self.search.max_iters(),
        );

        let energies = self.energies(problem)?;

        let search = nelder_mead::minimize(
            |angles| self.prepare(n, angles, &energies).expectation(&energies),
            &self.initial_angles(),
            &self.search,
        )
        .map_err(|e| SoftFailure::Optimizer(e.to_string()))?;

        let state = self.prepare(n, &search.x, &energies);

        // Sample the final state like a shot-based backend and keep the best
        // feasible bitstring seen.
        let mut cumulative = Vec::with_capacity(state.dim());
        let mut total = 0.0;
        for p in state.probabilities() {
            total += p;
            cumulative.push(total);
        }

        let mut best: Option<(f64, Vec<f64>)> = None;
        for _ in 0..self.config.shots {
            let r = rng.random::<f64>() * total;
            let index = cumulative.partition_point(|&c| c < r).min(state.dim() - 1);
            let bits = bit_values(index, state.num_qubits());
            if !problem.is_feasible(&bits) {
                continue;
            }
            let value = problem.objective_value(&bits);
            if best.as_ref().map_or(true, |(v, _)| value < *v) {
                best = Some((value, bits));
            }
        }

        let (fval, solution) = best.ok_or(SoftFailure::NoFeasibleSolution(self.config.shots))?;

        debug!(
            event = "qaoa_end",
            iterations = search.iters,
            evaluations = search.evaluations,
            expectation = search.fx,
            objective = fval,
        );

        Ok(SolveOutcome::quantum(RawMetrics {
            solution: Some(solution),
            selected: None,
            objective_value: Some(fval),
            statistics: SolverStatistics {
                solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
                iterations: search.iters as u64,
                num_variables: n as u32,
                num_constraints: problem.constraints().len() as u32,
            },
        }))
    }

    fn name(&self) -> &str {
        "QAOA"
    }
}
