//! Weight breakdown (calculator output)

use serde::{Deserialize, Serialize};

/// Per-component weight of one bag, in grams.
///
/// Derived on every calculation and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightBreakdown {
    pub body_g: f64,
    pub bottom_g: f64,
    pub top_spout_g: f64,
    pub bottom_spout_g: f64,
    pub ties_g: f64,
    pub straps_g: f64,
    pub thread_g: f64,

    /// Sewn part of one strap
    pub sewn_length_cm: f64,
    /// Full length of one strap (sewn part twice plus loop twice)
    pub strap_length_cm: f64,
    /// All seams sewn with thread
    pub seam_length_cm: f64,

    pub total_grams: f64,
    pub total_kg: f64,
}

impl WeightBreakdown {
    /// Component labels and grams in display order
    pub fn components(&self) -> [(&'static str, f64); 7] {
        [
            ("Body", self.body_g),
            ("Bottom", self.bottom_g),
            ("Top spout", self.top_spout_g),
            ("Bottom spout", self.bottom_spout_g),
            ("Ties", self.ties_g),
            ("Straps", self.straps_g),
            ("Thread", self.thread_g),
        ]
    }

    pub fn component_sum(&self) -> f64 {
        self.components().iter().map(|(_, grams)| grams).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_sum() {
        let breakdown = WeightBreakdown {
            body_g: 1.0,
            bottom_g: 2.0,
            top_spout_g: 3.0,
            bottom_spout_g: 4.0,
            ties_g: 5.0,
            straps_g: 6.0,
            thread_g: 7.0,
            ..Default::default()
        };
        assert!((breakdown.component_sum() - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_components_order() {
        let labels: Vec<_> = WeightBreakdown::default()
            .components()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(labels.first(), Some(&"Body"));
        assert_eq!(labels.last(), Some(&"Thread"));
    }
}
