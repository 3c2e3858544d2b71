// Solver adapters module

pub mod factory;
pub mod simulation_solver;

#[cfg(feature = "quantum")]
pub mod nelder_mead;
#[cfg(feature = "quantum")]
pub mod qaoa_solver;
#[cfg(feature = "quantum")]
pub mod statevector;

pub use factory::{SolverCapability, SolverFactory};
pub use simulation_solver::SimulationSolver;

#[cfg(feature = "quantum")]
pub use qaoa_solver::QaoaSolver;
