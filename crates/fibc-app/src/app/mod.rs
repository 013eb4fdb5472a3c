//! Application use cases

pub mod calculation_service;

pub use calculation_service::{
    calculate, calculate_batch, check_samples, remove_preset, save_preset, CalcRequest,
    Calculation, PresetCatalog, PresetSource, SpecOverrides,
};
