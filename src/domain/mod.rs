// Domain module: Business logic and models

pub mod config;
pub mod models;
pub mod problem_builder;
pub mod solver_service;
pub mod value_objects;

pub use config::*;
pub use models::*;
pub use problem_builder::*;
pub use solver_service::*;
pub use value_objects::*;
