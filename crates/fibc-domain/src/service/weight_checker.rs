//! QC unit-weight check
//!
//! Compares weighed bags against the calculated weight of the preset they
//! were produced to.

use serde::{Deserialize, Serialize};

use crate::model::{BagPreset, WeightSample};
use crate::service::weight_calculator::compute;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightCheckResult {
    pub sample: WeightSample,
    /// None when the sample's preset is unknown
    pub expected_grams: Option<f64>,
    pub deviation_grams: Option<f64>,
    pub deviation_percent: Option<f64>,
    pub out_of_tolerance: bool,
}

pub fn check_weights(
    samples: &[WeightSample],
    presets: &[BagPreset],
    tolerance_percent: f64,
) -> Vec<WeightCheckResult> {
    samples
        .iter()
        .map(|sample| {
            let preset = find_preset(&sample.preset, presets);
            match preset {
                Some(preset) => {
                    let expected = compute(&preset.spec).total_grams;
                    let deviation = sample.measured_grams - expected;
                    let deviation_pct = if expected != 0.0 {
                        Some(deviation / expected * 100.0)
                    } else {
                        None
                    };
                    // NaN deviations compare false and are never flagged
                    let out_of_tolerance = deviation_pct
                        .map(|pct| pct.abs() > tolerance_percent)
                        .unwrap_or(false);
                    WeightCheckResult {
                        sample: sample.clone(),
                        expected_grams: Some(expected),
                        deviation_grams: Some(deviation),
                        deviation_percent: deviation_pct,
                        out_of_tolerance,
                    }
                }
                None => WeightCheckResult {
                    sample: sample.clone(),
                    expected_grams: None,
                    deviation_grams: None,
                    deviation_percent: None,
                    out_of_tolerance: false,
                },
            }
        })
        .collect()
}

fn find_preset<'a>(name: &str, presets: &'a [BagPreset]) -> Option<&'a BagPreset> {
    presets.iter().find(|p| p.matches_name(name))
}

pub fn generate_weight_report(results: &[WeightCheckResult], tolerance_percent: f64) -> String {
    let total = results.len();
    let unmatched_count = results.iter().filter(|r| r.expected_grams.is_none()).count();
    let flagged_count = results.iter().filter(|r| r.out_of_tolerance).count();
    let matched_count = total - unmatched_count;

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("           Unit Weight Check Report               \n");
    report.push_str("==================================================\n\n");
    report.push_str("[Summary]\n");
    report.push_str(&format!("  Total samples:        {}\n", total));
    report.push_str(&format!("  Matched to preset:    {}\n", matched_count));
    report.push_str(&format!("  Unknown preset:       {}\n", unmatched_count));
    report.push_str(&format!("  Tolerance:            ±{:.1}%\n", tolerance_percent));
    report.push_str(&format!("  Out of tolerance:     {}\n", flagged_count));
    if matched_count > 0 {
        let rate = (flagged_count as f64 / matched_count as f64) * 100.0;
        report.push_str(&format!("  Reject rate:          {:.1}%\n", rate));
    }
    report.push('\n');

    if flagged_count > 0 {
        report.push_str("[Out of Tolerance]\n");
        report.push_str("-".repeat(81).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<12} {:<16} {:<10} {:>9} {:>9} {:>9} {:>8}\n",
            "Sample", "Preset", "Lot", "Measured", "Expected", "Diff", "Diff %"
        ));
        report.push_str("-".repeat(81).as_str());
        report.push('\n');
        for result in results.iter().filter(|r| r.out_of_tolerance) {
            report.push_str(&format!(
                "{:<12} {:<16} {:<10} {:>8.1}g {:>8.1}g {:>+8.1}g {:>+7.2}%\n",
                truncate_str(&result.sample.sample_id, 11),
                truncate_str(&result.sample.preset, 15),
                truncate_str(result.sample.lot.as_deref().unwrap_or("-"), 10),
                result.sample.measured_grams,
                result.expected_grams.unwrap_or(0.0),
                result.deviation_grams.unwrap_or(0.0),
                result.deviation_percent.unwrap_or(0.0)
            ));
        }
        report.push('\n');
    } else {
        report.push_str("[All Within Tolerance]\n");
        report.push_str("  All matched samples are within tolerance.\n\n");
    }

    if unmatched_count > 0 {
        report.push_str("[Unknown Preset]\n");
        report.push_str("-".repeat(50).as_str());
        report.push('\n');
        report.push_str(&format!("{:<12} {:<20} {:>10}\n", "Sample", "Preset", "Measured"));
        report.push_str("-".repeat(50).as_str());
        report.push('\n');
        for result in results.iter().filter(|r| r.expected_grams.is_none()) {
            report.push_str(&format!(
                "{:<12} {:<20} {:>9.1}g\n",
                truncate_str(&result.sample.sample_id, 11),
                truncate_str(&result.sample.preset, 19),
                result.sample.measured_grams
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
