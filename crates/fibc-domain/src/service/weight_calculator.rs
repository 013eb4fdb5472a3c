//! FIBC unit-weight calculation
//!
//! Pure arithmetic over a [`BagSpecification`]. Nothing here can fail:
//! NaN and negative inputs propagate into the breakdown unchanged.

use std::f64::consts::PI;

use crate::model::{BagSpecification, SpoutSpec, WeightBreakdown};

/// Extra fabric added to the flattened spout width for the side seam
pub const SPOUT_SEAM_ALLOWANCE_CM: f64 = 3.0;
pub const BODY_PANELS: f64 = 4.0;
pub const STRAP_COUNT: f64 = 4.0;

/// Convert an area density in g/m² to g/cm²
pub fn area_coefficient(density_gm2: f64) -> f64 {
    density_gm2 / 10_000.0
}

/// Weight of one spout cut from fabric of coefficient `k_aux` (g/cm²)
pub fn spout_weight(spout: &SpoutSpec, k_aux: f64) -> f64 {
    let flattened_width = spout.diameter_cm * PI + SPOUT_SEAM_ALLOWANCE_CM;
    flattened_width * spout.height_cm * k_aux
}

/// Compute the weight breakdown of one bag
pub fn compute(spec: &BagSpecification) -> WeightBreakdown {
    let k_main = area_coefficient(spec.main_density_gm2);
    let k_aux = area_coefficient(spec.aux_density_gm2);

    let body_g = spec.width_cm * spec.height_cm * BODY_PANELS * k_main;
    let bottom_g = spec.bottom_size_cm * spec.bottom_size_cm * k_main;

    let top_spout_g = spec
        .top_spout
        .as_ref()
        .map_or(0.0, |spout| spout_weight(spout, k_aux));
    let bottom_spout_g = spec
        .bottom_spout
        .as_ref()
        .map_or(0.0, |spout| spout_weight(spout, k_aux));

    let ties_g = spec.spout_count() as f64
        * (spec.tie.length_cm / 100.0)
        * spec.tie.weight_per_meter_g;

    let sewn_length_cm = spec.height_cm * spec.strap.sewn_ratio.factor();
    let strap_length_cm = sewn_length_cm * 2.0 + spec.strap.loop_height_cm * 2.0;
    let straps_g = strap_length_cm * STRAP_COUNT * (spec.strap.weight_per_meter_g / 100.0);

    // bottom and top perimeters, both sides of every strap, spout rims
    let spout_seams_cm: f64 = spec.spouts().map(|spout| spout.diameter_cm * PI).sum();
    let seam_length_cm = spec.width_cm * 4.0
        + spec.width_cm * 4.0
        + sewn_length_cm * 2.0 * STRAP_COUNT
        + spout_seams_cm;
    let thread_g = seam_length_cm * spec.thread_weight_per_cm_g;

    let total_grams =
        body_g + bottom_g + top_spout_g + bottom_spout_g + ties_g + straps_g + thread_g;

    WeightBreakdown {
        body_g,
        bottom_g,
        top_spout_g,
        bottom_spout_g,
        ties_g,
        straps_g,
        thread_g,
        sewn_length_cm,
        strap_length_cm,
        seam_length_cm,
        total_grams,
        total_kg: total_grams / 1000.0,
    }
}
