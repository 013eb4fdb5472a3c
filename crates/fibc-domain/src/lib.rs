//! Domain layer for FIBC unit-weight calculation
//!
//! Holds the bag specification model, the pure weight calculator, the QC
//! weight checker, and repository traits implemented by the infra crate.

pub mod model;
pub mod repository;
pub mod service;
