//! Domain services

pub mod weight_calculator;
pub mod weight_checker;

pub use weight_calculator::compute;
pub use weight_checker::{check_weights, generate_weight_report, WeightCheckResult};
