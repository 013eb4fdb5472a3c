//! Domain model types

pub mod bag_spec;
pub mod breakdown;
pub mod form;
pub mod preset;
pub mod weight_sample;

pub use bag_spec::{BagSpecification, SewnRatio, SpoutSpec, StrapSpec, TieSpec};
pub use breakdown::WeightBreakdown;
pub use form::{parse_field, FORM_FIELDS};
pub use preset::BagPreset;
pub use weight_sample::WeightSample;
