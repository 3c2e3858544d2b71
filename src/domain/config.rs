//! Optimizer configuration.
//!
//! Loaded from TOML so the QAOA budget and the simulation delay can be tuned
//! without code changes:
//!
//! ```
//! use twinopt::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [qaoa]
//!     reps = 2
//!     max_iterations = 50
//!
//!     [simulation]
//!     delay_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.qaoa.reps, 2);
//! assert_eq!(config.simulation.delay_ms, 250);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest statevector the QAOA solver will allocate (2^26 amplitudes).
pub const MAX_SUPPORTED_QUBITS: usize = 26;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level optimizer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Whether the QAOA solver should be probed at all.
    pub enable_quantum: bool,

    /// Seed for reproducible models and metrics. Fresh entropy per call when absent.
    pub random_seed: Option<u64>,

    pub qaoa: QaoaConfig,

    pub simulation: SimulationConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enable_quantum: true,
            random_seed: None,
            qaoa: QaoaConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing, is not valid TOML, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "simulation.delay_ms must be greater than zero".to_string(),
            ));
        }
        if self.qaoa.reps == 0 {
            return Err(ConfigError::Invalid("qaoa.reps must be at least 1".to_string()));
        }
        if self.qaoa.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "qaoa.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.qaoa.max_qubits == 0 || self.qaoa.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(ConfigError::Invalid(format!(
                "qaoa.max_qubits must be between 1 and {}",
                MAX_SUPPORTED_QUBITS
            )));
        }
        if !self.qaoa.penalty.is_finite() || self.qaoa.penalty <= 0.0 {
            return Err(ConfigError::Invalid(
                "qaoa.penalty must be finite and positive".to_string(),
            ));
        }
        if self.qaoa.shots == 0 {
            return Err(ConfigError::Invalid(
                "qaoa.shots must be at least 1".to_string(),
            ));
        }
        if !self.qaoa.tolerance.is_finite() || self.qaoa.tolerance < 0.0 {
            return Err(ConfigError::Invalid(
                "qaoa.tolerance must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_quantum(mut self, enabled: bool) -> Self {
        self.enable_quantum = enabled;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_simulation_delay(mut self, delay: Duration) -> Self {
        self.simulation.delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_qaoa(mut self, qaoa: QaoaConfig) -> Self {
        self.qaoa = qaoa;
        self
    }
}

/// Budget and shape of the QAOA solver.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct QaoaConfig {
    /// Number of cost/mixer layers in the ansatz.
    pub reps: usize,

    /// Iteration budget of the Nelder–Mead parameter search.
    pub max_iterations: usize,

    /// Problems with more variables than this are rejected softly.
    pub max_qubits: usize,

    /// Weight of squared constraint violations in the cost Hamiltonian.
    pub penalty: f64,

    /// Measurement shots drawn from the final state when picking an answer.
    pub shots: usize,

    /// Simplex spread below which the parameter search stops early.
    pub tolerance: f64,
}

impl Default for QaoaConfig {
    fn default() -> Self {
        Self {
            reps: 3,
            max_iterations: 100,
            max_qubits: 20,
            penalty: 10.0,
            shots: 1024,
            tolerance: 1e-6,
        }
    }
}

/// Simulation fallback settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimulationConfig {
    /// Blocking pause standing in for real computation time.
    pub delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

impl SimulationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
