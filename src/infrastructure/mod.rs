// Infrastructure: async caller integration and process-level logging setup

pub mod runtime;
pub mod telemetry;

pub use runtime::{optimize_with_deadline, RuntimeError};
pub use telemetry::init_tracing;
