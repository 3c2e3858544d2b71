use std::collections::BTreeSet;
use std::time::Duration;

use twinopt::{
    KindMetrics, OptimizationMetrics, OptimizerConfig, OptimizerError, QuantumOptimizer,
};

fn simulated(seed: Option<u64>) -> QuantumOptimizer {
    let mut config = OptimizerConfig::new()
        .with_quantum(false)
        .with_simulation_delay(Duration::from_millis(1));
    if let Some(seed) = seed {
        config = config.with_random_seed(seed);
    }
    QuantumOptimizer::new(config).unwrap()
}

fn keys(value: &serde_json::Value) -> BTreeSet<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

fn expected(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn hospital_result_has_assignment_fields() {
    let result = simulated(None).optimize("hospital").unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(
        keys(&value),
        expected(&[
            "status",
            "assignments",
            "utilization",
            "response_time",
            "accuracy",
            "optimization_score",
            "method",
        ])
    );
    assert_eq!(value["status"], "success");
    assert_eq!(value["method"], "quantum_simulation");
}

#[test]
fn warehouse_result_has_routing_fields() {
    let result = simulated(None).optimize("warehouse").unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(
        keys(&value),
        expected(&[
            "status",
            "total_routes",
            "total_distance",
            "response_time",
            "accuracy",
            "optimization_score",
            "method",
        ])
    );
    assert_eq!(value["status"], "success");
    assert_eq!(value["method"], "quantum_simulation");
}

#[test]
fn simulated_hospital_stays_in_range() {
    let optimizer = simulated(None);
    for _ in 0..20 {
        let result = optimizer.optimize("hospital").unwrap();
        let KindMetrics::Assignment { assignments, utilization } = result.metrics else {
            panic!("expected assignment metrics");
        };
        assert!((6..=9).contains(&assignments), "assignments = {assignments}");
        assert!((60.0..=90.0).contains(&utilization));
        assert!((assignments as f64 / 10.0 * 100.0 - utilization).abs() < 0.01);
        assert!((92.0..=98.0).contains(&result.accuracy));
        assert!((100..=200).contains(&result.response_time));
        assert!((0.5..=1.0).contains(&result.optimization_score));
    }
}

#[test]
fn simulated_warehouse_stays_in_range() {
    let optimizer = simulated(None);
    for _ in 0..20 {
        let result = optimizer.optimize("warehouse").unwrap();
        let KindMetrics::Routing { total_routes, total_distance } = result.metrics else {
            panic!("expected routing metrics");
        };
        assert_eq!(total_routes, 8);
        assert!((40.0..=120.0).contains(&total_distance));
        let average = total_distance / total_routes as f64;
        assert!((5.0 - 0.01..=15.0 + 0.01).contains(&average));
        assert!((90.0..=96.0).contains(&result.accuracy));
        assert!((120..=250).contains(&result.response_time));
    }
}

#[test]
fn unknown_problem_kind_is_rejected() {
    let err = simulated(None).optimize("unknown").unwrap_err();
    assert!(matches!(err, OptimizerError::UnknownProblemKind(name) if name == "unknown"));
}

#[test]
fn same_seed_gives_same_result() {
    let first = simulated(Some(42)).optimize("hospital").unwrap();
    let second = simulated(Some(42)).optimize("hospital").unwrap();
    assert_eq!(first, second);
}

#[test]
fn metrics_follow_caller_requests() {
    let optimizer = simulated(Some(3));
    let mut metrics = OptimizationMetrics::new();

    let ok = optimizer.optimize("warehouse");
    metrics.record(&ok);
    metrics.record(&optimizer.optimize("bogus"));

    let ok = ok.unwrap();
    assert_eq!(metrics.active_optimizations, 1);
    assert_eq!(metrics.errors, 1);
    assert_eq!(metrics.response_time, ok.response_time);
}

#[cfg(feature = "quantum")]
mod quantum {
    use super::*;
    use twinopt::SolveMethod;

    fn enabled() -> QuantumOptimizer {
        QuantumOptimizer::new(
            OptimizerConfig::new()
                .with_random_seed(11)
                .with_simulation_delay(Duration::from_millis(1)),
        )
        .unwrap()
    }

    #[test]
    fn hospital_fits_and_uses_qaoa() {
        let optimizer = enabled();
        assert!(optimizer.strategy().is_specialized_available());

        let result = optimizer.optimize("hospital").unwrap();
        assert_eq!(result.method, SolveMethod::Quantum);
        let KindMetrics::Assignment { assignments, utilization } = result.metrics else {
            panic!("expected assignment metrics");
        };
        assert!(assignments >= 6 && assignments <= 10);
        assert!((assignments as f64 * 10.0 - utilization).abs() < 0.01);
    }

    #[test]
    fn warehouse_exceeds_qubit_limit_and_falls_back() {
        let result = enabled().optimize("warehouse").unwrap();
        assert_eq!(result.method, SolveMethod::Simulated);
        assert!(matches!(
            result.metrics,
            KindMetrics::Routing { total_routes: 8, .. }
        ));
    }
}
