// Problem builder: translates a problem kind into a concrete optimization model

use std::collections::BTreeMap;

use rand::Rng;

use super::models::{DecisionVariable, LinearConstraint, ObjectiveFunction, ProblemSpec};
use super::solver_service::{OptimizerError, Result};
use super::value_objects::{ConstraintType, ProblemKind};

/// Share of capacity that must be assigned in an assignment model.
const MIN_UTILIZATION: f64 = 0.6;

const ASSIGNMENT_WEIGHT_RANGE: (f64, f64) = (0.5, 1.0);
const ROUTING_WEIGHT_RANGE: (f64, f64) = (1.0, 10.0);

/// Builds fresh models with objective weights drawn from the given RNG
pub struct ProblemBuilder;

impl ProblemBuilder {
    /// Resolve a request name (`"hospital"`, `"warehouse"`) and build its model.
    pub fn for_request<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Result<ProblemSpec> {
        let (kind, size) = ProblemKind::from_request(name)?;
        Self::build(kind, size, rng)
    }

    pub fn build<R: Rng + ?Sized>(kind: ProblemKind, n: usize, rng: &mut R) -> Result<ProblemSpec> {
        match kind {
            ProblemKind::Assignment => Self::build_assignment(n, rng),
            ProblemKind::Routing => Self::build_routing(n, rng),
        }
    }

    /// One binary variable per resource unit; assign at least 60% of capacity
    /// at the lowest aggregate cost.
    pub fn build_assignment<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<ProblemSpec> {
        if n == 0 {
            return Err(OptimizerError::InvalidProblemSize(n));
        }

        let variables: Vec<DecisionVariable> = (0..n)
            .map(|i| DecisionVariable::binary(assignment_var(i)))
            .collect();

        let (low, high) = ASSIGNMENT_WEIGHT_RANGE;
        let linear = variables
            .iter()
            .map(|v| (v.name.clone(), rng.random_range(low..=high)))
            .collect();

        let floor = (MIN_UTILIZATION * n as f64).ceil();
        let min_assignment = LinearConstraint::new(
            variables.iter().map(|v| (v.name.clone(), 1.0)).collect(),
            ConstraintType::GreaterThanOrEqual,
            floor,
        )
        .with_label("min_assignment");

        ProblemSpec::new(
            ProblemKind::Assignment,
            n,
            variables,
            ObjectiveFunction::minimize(linear),
            vec![min_assignment],
        )
    }

    /// One binary variable per directed edge `i -> j` (no self loops); every
    /// node leaves along exactly one edge.
    ///
    /// This is the assignment relaxation of a tour: nothing rules out sub-tours.
    pub fn build_routing<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<ProblemSpec> {
        if n < 2 {
            return Err(OptimizerError::InvalidProblemSize(n));
        }

        let variables: Vec<DecisionVariable> = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| DecisionVariable::binary(route_var(i, j)))
            .collect();

        let (low, high) = ROUTING_WEIGHT_RANGE;
        let linear = variables
            .iter()
            .map(|v| (v.name.clone(), rng.random_range(low..=high)))
            .collect();

        let constraints = (0..n)
            .map(|i| {
                let outgoing: BTreeMap<String, f64> = (0..n)
                    .filter(|&j| j != i)
                    .map(|j| (route_var(i, j), 1.0))
                    .collect();
                LinearConstraint::new(outgoing, ConstraintType::Equal, 1.0)
                    .with_label(format!("visit_{}", i))
            })
            .collect();

        ProblemSpec::new(
            ProblemKind::Routing,
            n,
            variables,
            ObjectiveFunction::minimize(linear),
            constraints,
        )
    }
}

fn assignment_var(i: usize) -> String {
    format!("assign_{}", i)
}

fn route_var(i: usize, j: usize) -> String {
    format!("route_{}_{}", i, j)
}
