// Application layer: orchestration of the optimization pipeline

pub mod metrics;
pub mod normalizer;
pub mod optimizer_service;
pub mod strategy;

pub use metrics::OptimizationMetrics;
pub use normalizer::ResultNormalizer;
pub use optimizer_service::QuantumOptimizer;
pub use strategy::SolverStrategy;
