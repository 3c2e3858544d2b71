// Domain value objects representing core business concepts

use std::fmt;

use serde::{Deserialize, Serialize};

use super::solver_service::OptimizerError;

/// Class of combinatorial problem the optimizer knows how to model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Pick a subset of resource units at minimum aggregate cost
    Assignment,
    /// Pick one outgoing edge per node at minimum aggregate distance
    Routing,
}

impl ProblemKind {
    /// Resolves an external request name to its problem kind and fixed size.
    ///
    /// `"hospital"` is bed allocation over 10 beds, `"warehouse"` is inventory
    /// routing over 8 locations.
    pub fn from_request(name: &str) -> Result<(Self, usize), OptimizerError> {
        match name {
            "hospital" => Ok((ProblemKind::Assignment, 10)),
            "warehouse" => Ok((ProblemKind::Routing, 8)),
            other => Err(OptimizerError::UnknownProblemKind(other.to_string())),
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Assignment => write!(f, "Assignment"),
            ProblemKind::Routing => write!(f, "Routing"),
        }
    }
}

/// Type of constraint comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl ConstraintType {
    /// How far `lhs` sits outside the feasible side of `bound` (0 when satisfied).
    pub fn violation(self, lhs: f64, bound: f64) -> f64 {
        match self {
            ConstraintType::LessThanOrEqual => (lhs - bound).max(0.0),
            ConstraintType::Equal => (lhs - bound).abs(),
            ConstraintType::GreaterThanOrEqual => (bound - lhs).max(0.0),
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::LessThanOrEqual => write!(f, "<="),
            ConstraintType::Equal => write!(f, "=="),
            ConstraintType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

/// Which solver path actually produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveMethod {
    /// The QAOA solver finished and returned a usable solution vector
    #[serde(rename = "quantum_qaoa")]
    Quantum,
    /// The simulation solver produced the metrics
    #[serde(rename = "quantum_simulation")]
    Simulated,
}

impl SolveMethod {
    /// External provenance string reported to callers.
    pub fn as_str(self) -> &'static str {
        match self {
            SolveMethod::Quantum => "quantum_qaoa",
            SolveMethod::Simulated => "quantum_simulation",
        }
    }
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The preferred solver produced the outcome
    Success,
    /// The preferred solver was absent or failed and the simulation stood in
    Degraded,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "Success"),
            OutcomeStatus::Degraded => write!(f, "Degraded"),
        }
    }
}

/// Status reported on every result handed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Success,
}
