//! Bag specification (calculator input)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portion of the bag height covered by the sewn part of each strap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SewnRatio {
    #[default]
    OneThird,
    TwoThirds,
}

impl SewnRatio {
    pub fn factor(&self) -> f64 {
        match self {
            SewnRatio::OneThird => 1.0 / 3.0,
            SewnRatio::TwoThirds => 2.0 / 3.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SewnRatio::OneThird => "one_third",
            SewnRatio::TwoThirds => "two_thirds",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SewnRatio::OneThird => "1/3",
            SewnRatio::TwoThirds => "2/3",
        }
    }
}

impl fmt::Display for SewnRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SewnRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "one_third" | "1/3" => Ok(SewnRatio::OneThird),
            "two_thirds" | "2/3" => Ok(SewnRatio::TwoThirds),
            other => Err(format!(
                "invalid sewn ratio '{}' (expected one_third or two_thirds)",
                other
            )),
        }
    }
}

/// Cylindrical filling or discharge spout
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpoutSpec {
    pub diameter_cm: f64,
    pub height_cm: f64,
}

impl FromStr for SpoutSpec {
    type Err = String;

    /// Parses `DIAMETER:HEIGHT`, e.g. `40:48`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dia, height) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid spout '{}' (expected DIAMETER:HEIGHT)", s))?;
        let diameter_cm = dia
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid spout diameter '{}': {}", dia, e))?;
        let height_cm = height
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid spout height '{}': {}", height, e))?;
        Ok(SpoutSpec {
            diameter_cm,
            height_cm,
        })
    }
}

/// Spout tie tape, one per present spout
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TieSpec {
    pub weight_per_meter_g: f64,
    pub length_cm: f64,
}

/// Lifting loop webbing, four per bag
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrapSpec {
    pub loop_height_cm: f64,
    #[serde(default)]
    pub sewn_ratio: SewnRatio,
    pub weight_per_meter_g: f64,
}

/// Full input of a unit-weight calculation.
///
/// Numeric fields are not validated: zero, negative and NaN values flow
/// straight into the breakdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BagSpecification {
    pub height_cm: f64,
    pub width_cm: f64,
    pub bottom_size_cm: f64,
    /// Body and bottom fabric, g/m²
    pub main_density_gm2: f64,
    /// Spout fabric, g/m²
    pub aux_density_gm2: f64,
    #[serde(default)]
    pub top_spout: Option<SpoutSpec>,
    #[serde(default)]
    pub bottom_spout: Option<SpoutSpec>,
    #[serde(default)]
    pub tie: TieSpec,
    #[serde(default)]
    pub strap: StrapSpec,
    pub thread_weight_per_cm_g: f64,
}

impl BagSpecification {
    /// Spouts actually sewn into the bag, top first
    pub fn spouts(&self) -> impl Iterator<Item = &SpoutSpec> {
        self.top_spout.iter().chain(self.bottom_spout.iter())
    }

    pub fn spout_count(&self) -> usize {
        self.spouts().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sewn_ratio_factor() {
        assert!((SewnRatio::OneThird.factor() - 1.0 / 3.0).abs() < f64::EPSILON);
        assert!((SewnRatio::TwoThirds.factor() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sewn_ratio_from_str_is_strict() {
        assert_eq!("two_thirds".parse::<SewnRatio>(), Ok(SewnRatio::TwoThirds));
        assert_eq!("1/3".parse::<SewnRatio>(), Ok(SewnRatio::OneThird));
        assert!("half".parse::<SewnRatio>().is_err());
    }

    #[test]
    fn test_sewn_ratio_serde_names() {
        let json = serde_json::to_string(&SewnRatio::TwoThirds).unwrap();
        assert_eq!(json, "\"two_thirds\"");
        let parsed: SewnRatio = serde_json::from_str("\"one_third\"").unwrap();
        assert_eq!(parsed, SewnRatio::OneThird);
        assert!(serde_json::from_str::<SewnRatio>("\"three_quarters\"").is_err());
    }

    #[test]
    fn test_spout_from_str() {
        let spout: SpoutSpec = "40:48".parse().unwrap();
        assert_eq!(spout.diameter_cm, 40.0);
        assert_eq!(spout.height_cm, 48.0);
        assert!("40".parse::<SpoutSpec>().is_err());
        assert!("40:x".parse::<SpoutSpec>().is_err());
    }

    #[test]
    fn test_spout_count() {
        let mut spec = BagSpecification::default();
        assert_eq!(spec.spout_count(), 0);
        spec.bottom_spout = Some(SpoutSpec {
            diameter_cm: 35.0,
            height_cm: 45.0,
        });
        assert_eq!(spec.spout_count(), 1);
        spec.top_spout = Some(SpoutSpec::default());
        assert_eq!(spec.spout_count(), 2);
    }
}
