//! Named bag specification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bag_spec::BagSpecification;

/// A bag specification stored under a name (e.g. `std-1t-2spout`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BagPreset {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub spec: BagSpecification,
    /// Set when the preset was saved by the user
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Canonical form of a preset name used for lookups
fn normalize_preset_name(name: &str) -> String {
    name.trim().replace(['_', ' '], "-").to_lowercase()
}

impl BagPreset {
    pub fn new(name: impl Into<String>, spec: BagSpecification) -> Self {
        Self {
            name: name.into(),
            description: None,
            spec,
            saved_at: None,
        }
    }

    /// Whether `name` refers to this preset.
    ///
    /// Case, surrounding whitespace and `_`/space vs `-` are ignored, so
    /// `Std_1t 2spout` refers to `std-1t-2spout`.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_preset_name(&self.name) == normalize_preset_name(name)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name() {
        let preset = BagPreset::new("kilo-bag", BagSpecification::default());
        assert!(preset.matches_name("kilo-bag"));
        assert!(preset.matches_name(" Kilo_Bag "));
        assert!(preset.matches_name("KILO BAG"));
        assert!(!preset.matches_name("kilobag"));
    }
}
