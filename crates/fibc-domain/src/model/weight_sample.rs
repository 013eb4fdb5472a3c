//! Measured bag weight recorded by QC

use serde::{Deserialize, Serialize};

/// One weighed bag, referencing the preset it was produced to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    pub sample_id: String,
    pub preset: String,
    pub measured_grams: f64,
    #[serde(default)]
    pub lot: Option<String>,
}
