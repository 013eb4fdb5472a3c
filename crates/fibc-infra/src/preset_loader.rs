//! Bag preset loader from TOML

use fibc_domain::model::BagPreset;
use fibc_types::{ConfigError, Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Container for parsing presets.toml
#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<BagPreset>,
}

/// Presets loaded from a TOML file, keyed by name
#[derive(Debug, Default)]
pub struct PresetLoader {
    presets: BTreeMap<String, BagPreset>,
}

impl PresetLoader {
    /// Load presets from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(format!(
                "Presets file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load presets from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: PresetFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse presets TOML: {}",
                e
            )))
        })?;

        let presets = file
            .presets
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Ok(Self { presets })
    }

    pub fn get(&self, name: &str) -> Option<&BagPreset> {
        self.presets.get(name)
    }

    /// All presets sorted by name
    pub fn all_presets(&self) -> Vec<&BagPreset> {
        self.presets.values().collect()
    }

    pub fn count(&self) -> usize {
        self.presets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fibc_domain::model::SewnRatio;

    const TEST_TOML: &str = r#"
[[presets]]
name = "std-1t"
description = "1 t, filling and discharge spout"

[presets.spec]
height_cm = 140.0
width_cm = 90.0
bottom_size_cm = 95.0
main_density_gm2 = 180.0
aux_density_gm2 = 95.0
thread_weight_per_cm_g = 0.077

[presets.spec.top_spout]
diameter_cm = 40.0
height_cm = 48.0

[presets.spec.tie]
weight_per_meter_g = 10.0
length_cm = 150.0

[presets.spec.strap]
loop_height_cm = 25.0
sewn_ratio = "two_thirds"
weight_per_meter_g = 35.0

[[presets]]
name = "open-top"

[presets.spec]
height_cm = 100.0
width_cm = 90.0
bottom_size_cm = 90.0
main_density_gm2 = 160.0
aux_density_gm2 = 0.0
thread_weight_per_cm_g = 0.07
"#;

    #[test]
    fn test_load_from_str() {
        let loader = PresetLoader::load_from_str(TEST_TOML).unwrap();
        assert_eq!(loader.count(), 2);
    }

    #[test]
    fn test_nested_tables() {
        let loader = PresetLoader::load_from_str(TEST_TOML).unwrap();
        let preset = loader.get("std-1t").unwrap();
        assert_eq!(preset.spec.strap.sewn_ratio, SewnRatio::TwoThirds);
        assert_eq!(preset.spec.top_spout.unwrap().diameter_cm, 40.0);
        assert!(preset.spec.bottom_spout.is_none());
        assert_eq!(preset.description.as_deref(), Some("1 t, filling and discharge spout"));
    }

    #[test]
    fn test_missing_sections_default() {
        let loader = PresetLoader::load_from_str(TEST_TOML).unwrap();
        let preset = loader.get("open-top").unwrap();
        assert_eq!(preset.spec.strap.sewn_ratio, SewnRatio::OneThird);
        assert_eq!(preset.spec.tie.length_cm, 0.0);
        assert!(preset.saved_at.is_none());
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let toml = r#"
[[presets]]
name = "bad"
[presets.spec]
height_cm = 1.0
width_cm = 1.0
bottom_size_cm = 1.0
main_density_gm2 = 1.0
aux_density_gm2 = 1.0
thread_weight_per_cm_g = 1.0
[presets.spec.strap]
loop_height_cm = 1.0
sewn_ratio = "half"
weight_per_meter_g = 1.0
"#;
        assert!(PresetLoader::load_from_str(toml).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = PresetLoader::load_from_file(Path::new("/nonexistent/presets.toml"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
