use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::solver_service::{OptimizerError, Result};
use super::value_objects::{
    ConstraintType, OptimizationType, OutcomeStatus, ProblemKind, ResultStatus, SolveMethod,
};

/// Binary decision variable (x ∈ {0, 1})
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionVariable {
    pub name: String,
}

impl DecisionVariable {
    pub fn binary(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Linear objective over a subset of the model's variables
#[derive(Debug, Clone)]
pub struct ObjectiveFunction {
    pub optimization_type: OptimizationType,
    pub coefficients: BTreeMap<String, f64>,
}

impl ObjectiveFunction {
    pub fn minimize(coefficients: BTreeMap<String, f64>) -> Self {
        Self {
            optimization_type: OptimizationType::Minimize,
            coefficients,
        }
    }

    pub fn num_terms(&self) -> usize {
        self.coefficients.len()
    }
}

/// Linear constraint on variables
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub coefficients: BTreeMap<String, f64>,
    pub relation: ConstraintType,
    pub bound: f64,
    pub label: String,
}

impl LinearConstraint {
    pub fn new(
        coefficients: BTreeMap<String, f64>,
        relation: ConstraintType,
        bound: f64,
    ) -> Self {
        Self {
            coefficients,
            relation,
            bound,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Complete, validated optimization model.
///
/// Immutable once built. Term names are resolved to variable indices at
/// construction so solvers can evaluate bit vectors directly.
#[derive(Debug, Clone)]
pub struct ProblemSpec {
    kind: ProblemKind,
    size: usize,
    variables: Vec<DecisionVariable>,
    objective: ObjectiveFunction,
    constraints: Vec<LinearConstraint>,
    objective_terms: Vec<(usize, f64)>,
    constraint_terms: Vec<Vec<(usize, f64)>>,
}

impl ProblemSpec {
    /// Builds a model, checking that every term references a declared variable.
    pub fn new(
        kind: ProblemKind,
        size: usize,
        variables: Vec<DecisionVariable>,
        objective: ObjectiveFunction,
        constraints: Vec<LinearConstraint>,
    ) -> Result<Self> {
        if size == 0 {
            return Err(OptimizerError::InvalidProblemSize(size));
        }

        let index: HashMap<&str, usize> = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name.as_str(), i))
            .collect();
        if index.len() != variables.len() {
            return Err(OptimizerError::InvalidModel(
                "variable names must be unique".to_string(),
            ));
        }

        let resolve = |owner: &str, terms: &BTreeMap<String, f64>| {
            terms
                .iter()
                .map(|(name, &weight)| match index.get(name.as_str()) {
                    Some(&i) => Ok((i, weight)),
                    None => Err(OptimizerError::InvalidModel(format!(
                        "{} references unknown variable '{}'",
                        owner, name
                    ))),
                })
                .collect::<Result<Vec<_>>>()
        };

        let objective_terms = resolve("objective", &objective.coefficients)?;
        let constraint_terms = constraints
            .iter()
            .map(|c| resolve(&format!("constraint '{}'", c.label), &c.coefficients))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            size,
            variables,
            objective,
            constraints,
            objective_terms,
            constraint_terms,
        })
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn variables(&self) -> &[DecisionVariable] {
        &self.variables
    }

    pub fn objective(&self) -> &ObjectiveFunction {
        &self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name == name)
    }

    /// Objective value of `values`, expressed as a quantity to minimize.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        let raw: f64 = self
            .objective_terms
            .iter()
            .map(|&(i, w)| w * values.get(i).copied().unwrap_or(0.0))
            .sum();
        match self.objective.optimization_type {
            OptimizationType::Minimize => raw,
            OptimizationType::Maximize => -raw,
        }
    }

    /// Sum of squared constraint violations of `values`.
    pub fn squared_violation(&self, values: &[f64]) -> f64 {
        self.constraints
            .iter()
            .zip(&self.constraint_terms)
            .map(|(constraint, terms)| {
                let lhs: f64 = terms
                    .iter()
                    .map(|&(i, w)| w * values.get(i).copied().unwrap_or(0.0))
                    .sum();
                constraint.relation.violation(lhs, constraint.bound).powi(2)
            })
            .sum()
    }

    pub fn is_feasible(&self, values: &[f64]) -> bool {
        values.len() == self.num_variables() && self.squared_violation(values) < 1e-9
    }
}

/// Timing and size statistics of one solve attempt
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub iterations: u64,
    pub num_variables: u32,
    pub num_constraints: u32,
}

/// Solver-specific output, consumed once by the result normalizer.
///
/// Every field is optional: absent or malformed values are resampled during
/// normalization.
#[derive(Debug, Clone, Default)]
pub struct RawMetrics {
    /// Bit vector over the model's variables (QAOA path)
    pub solution: Option<Vec<f64>>,
    /// Number of selected units (simulation path)
    pub selected: Option<usize>,
    /// Objective value of the returned solution
    pub objective_value: Option<f64>,
    pub statistics: SolverStatistics,
}

/// Outcome of a single solve; created per call and discarded after normalization
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub method: SolveMethod,
    pub raw_metrics: RawMetrics,
    pub status: OutcomeStatus,
}

impl SolveOutcome {
    pub fn quantum(raw_metrics: RawMetrics) -> Self {
        Self {
            method: SolveMethod::Quantum,
            raw_metrics,
            status: OutcomeStatus::Success,
        }
    }

    pub fn simulated(raw_metrics: RawMetrics) -> Self {
        Self {
            method: SolveMethod::Simulated,
            raw_metrics,
            status: OutcomeStatus::Degraded,
        }
    }

    /// True when the outcome carries a 0/1 vector of the model's length.
    pub fn has_usable_solution(&self, num_variables: usize) -> bool {
        self.raw_metrics
            .solution
            .as_ref()
            .is_some_and(|x| x.len() == num_variables && x.iter().all(|&v| is_binary(v)))
    }
}

/// Whether `value` is a 0/1 decision within rounding noise.
pub fn is_binary(value: f64) -> bool {
    value.abs() < 1e-6 || (value - 1.0).abs() < 1e-6
}

/// Kind-specific metric fields of a result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KindMetrics {
    Assignment { assignments: u32, utilization: f64 },
    Routing { total_routes: u32, total_distance: f64 },
}

/// Stable result contract handed to callers.
///
/// The serialized field set depends only on the problem kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub status: ResultStatus,
    #[serde(flatten)]
    pub metrics: KindMetrics,
    pub response_time: u64,
    pub accuracy: f64,
    pub optimization_score: f64,
    pub method: SolveMethod,
}

impl OptimizationResult {
    pub fn kind(&self) -> ProblemKind {
        match self.metrics {
            KindMetrics::Assignment { .. } => ProblemKind::Assignment,
            KindMetrics::Routing { .. } => ProblemKind::Routing,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
