//! Built-in constants for bag weight calculation

pub mod standard_presets;

pub use standard_presets::{get_standard_preset, is_standard_preset, standard_presets};
