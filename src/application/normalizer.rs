// Result normalizer: maps any solver outcome onto the stable result contract
// Malformed raw metrics are treated as absent and resampled, never reported

use rand::Rng;

use crate::domain::{
    models::{is_binary, KindMetrics, OptimizationResult, ProblemSpec, RawMetrics, SolveOutcome},
    value_objects::{ProblemKind, ResultStatus},
};
use crate::solver::simulation_solver::sample_selected;

const AVERAGE_DISTANCE_RANGE: (f64, f64) = (5.0, 15.0);

/// Per-kind sampling ranges for the metrics no solver measures.
struct KindRanges {
    response_time_ms: (u64, u64),
    accuracy: (f64, f64),
    score: (f64, f64),
}

fn ranges(kind: ProblemKind) -> KindRanges {
    match kind {
        ProblemKind::Assignment => KindRanges {
            response_time_ms: (100, 200),
            accuracy: (92.0, 98.0),
            score: (0.5, 1.0),
        },
        ProblemKind::Routing => KindRanges {
            response_time_ms: (120, 250),
            accuracy: (90.0, 96.0),
            score: (0.4, 0.9),
        },
    }
}

pub struct ResultNormalizer;

impl ResultNormalizer {
    /// Builds the caller-facing result. Never fails.
    pub fn normalize<R: Rng + ?Sized>(
        problem: &ProblemSpec,
        outcome: SolveOutcome,
        rng: &mut R,
    ) -> OptimizationResult {
        let kind = problem.kind();
        let size = problem.size();
        let ranges = ranges(kind);
        let selected = selected_count(problem, &outcome.raw_metrics, rng);

        let metrics = match kind {
            ProblemKind::Assignment => KindMetrics::Assignment {
                assignments: selected as u32,
                utilization: round_to(selected as f64 / size as f64 * 100.0, 2),
            },
            ProblemKind::Routing => {
                let (low, high) = AVERAGE_DISTANCE_RANGE;
                let average_distance = rng.random_range(low..=high);
                KindMetrics::Routing {
                    total_routes: selected as u32,
                    total_distance: round_to(average_distance * selected as f64, 2),
                }
            }
        };

        let (rt_low, rt_high) = ranges.response_time_ms;
        let (acc_low, acc_high) = ranges.accuracy;
        let optimization_score = match outcome.raw_metrics.objective_value {
            Some(value) if value.is_finite() => round_to(value, 4),
            _ => {
                let (low, high) = ranges.score;
                round_to(rng.random_range(low..=high), 4)
            }
        };

        OptimizationResult {
            status: ResultStatus::Success,
            metrics,
            response_time: rng.random_range(rt_low..=rt_high),
            accuracy: rng.random_range(acc_low..=acc_high),
            optimization_score,
            method: outcome.method,
        }
    }
}

/// Selected units from the solution vector, else the reported count, else a
/// fresh sample from the kind's simulated range.
fn selected_count<R: Rng + ?Sized>(problem: &ProblemSpec, raw: &RawMetrics, rng: &mut R) -> usize {
    let capacity = match problem.kind() {
        ProblemKind::Assignment => problem.size(),
        ProblemKind::Routing => problem.num_variables(),
    };

    let from_vector = raw
        .solution
        .as_ref()
        .filter(|x| x.len() == problem.num_variables() && x.iter().all(|&v| is_binary(v)))
        .map(|x| x.iter().filter(|&&v| v > 0.5).count());

    match from_vector.or(raw.selected) {
        Some(count) if count <= capacity => count,
        _ => sample_selected(problem.kind(), problem.size(), rng),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProblemBuilder, SolveMethod};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    #[test]
    fn quantum_assignment_counts_ones() {
        let mut rng = rng();
        let problem = ProblemBuilder::build_assignment(10, &mut rng).unwrap();
        let mut x = vec![0.0; 10];
        x[..7].iter_mut().for_each(|v| *v = 1.0);
        let outcome = SolveOutcome::quantum(RawMetrics {
            solution: Some(x),
            objective_value: Some(4.123456),
            ..RawMetrics::default()
        });

        let result = ResultNormalizer::normalize(&problem, outcome, &mut rng);

        assert_eq!(
            result.metrics,
            KindMetrics::Assignment {
                assignments: 7,
                utilization: 70.0
            }
        );
        assert_eq!(result.optimization_score, 4.1235);
        assert_eq!(result.method, SolveMethod::Quantum);
        assert!((100..=200).contains(&result.response_time));
        assert!((92.0..=98.0).contains(&result.accuracy));
    }

    #[test]
    fn quantum_routing_counts_selected_edges() {
        let mut rng = rng();
        let problem = ProblemBuilder::build_routing(4, &mut rng).unwrap();
        let mut x = vec![0.0; problem.num_variables()];
        for i in 0..4 {
            x[problem.index_of(&format!("route_{}_{}", i, (i + 1) % 4)).unwrap()] = 1.0;
        }
        let outcome = SolveOutcome::quantum(RawMetrics {
            solution: Some(x),
            objective_value: Some(12.0),
            ..RawMetrics::default()
        });

        let result = ResultNormalizer::normalize(&problem, outcome, &mut rng);

        match result.metrics {
            KindMetrics::Routing {
                total_routes,
                total_distance,
            } => {
                assert_eq!(total_routes, 4);
                let average = total_distance / total_routes as f64;
                assert!((5.0 - 0.005..=15.0 + 0.005).contains(&average));
            }
            other => panic!("unexpected metrics {:?}", other),
        }
        assert!((120..=250).contains(&result.response_time));
        assert!((90.0..=96.0).contains(&result.accuracy));
    }

    #[test]
    fn simulated_count_is_used_when_in_range() {
        let mut rng = rng();
        let problem = ProblemBuilder::build_assignment(10, &mut rng).unwrap();
        let outcome = SolveOutcome::simulated(RawMetrics {
            selected: Some(8),
            ..RawMetrics::default()
        });

        let result = ResultNormalizer::normalize(&problem, outcome, &mut rng);

        assert_eq!(
            result.metrics,
            KindMetrics::Assignment {
                assignments: 8,
                utilization: 80.0
            }
        );
        assert!((0.5..=1.0).contains(&result.optimization_score));
        assert_eq!(result.method, SolveMethod::Simulated);
    }

    #[test]
    fn malformed_metrics_are_resampled() {
        let mut rng = rng();
        let problem = ProblemBuilder::build_assignment(10, &mut rng).unwrap();
        let outcome = SolveOutcome::quantum(RawMetrics {
            solution: Some(vec![0.3; 10]),
            selected: Some(42),
            objective_value: Some(f64::NAN),
            ..RawMetrics::default()
        });

        let result = ResultNormalizer::normalize(&problem, outcome, &mut rng);

        match result.metrics {
            KindMetrics::Assignment {
                assignments,
                utilization,
            } => {
                assert!((6..=8).contains(&assignments));
                assert_eq!(utilization, round_to(assignments as f64 / 10.0 * 100.0, 2));
            }
            other => panic!("unexpected metrics {:?}", other),
        }
        assert!(result.optimization_score.is_finite());
        assert!((0.5..=1.0).contains(&result.optimization_score));
    }

    #[test]
    fn absent_routing_metrics_use_one_route_per_node() {
        let mut rng = rng();
        let problem = ProblemBuilder::build_routing(8, &mut rng).unwrap();
        let outcome = SolveOutcome::simulated(RawMetrics::default());

        let result = ResultNormalizer::normalize(&problem, outcome, &mut rng);

        match result.metrics {
            KindMetrics::Routing {
                total_routes,
                total_distance,
            } => {
                assert_eq!(total_routes, 8);
                assert!((40.0..=120.0).contains(&total_distance));
            }
            other => panic!("unexpected metrics {:?}", other),
        }
        assert!((0.4..=0.9).contains(&result.optimization_score));
    }

    #[test]
    fn rounding_helper() {
        assert_relative_eq!(round_to(66.666_666, 2), 66.67);
        assert_relative_eq!(round_to(0.123_46, 4), 0.1235, epsilon = 1e-12);
    }
}
