//! Raw form-field coercion
//!
//! Values typed into the calculator form (or read from CSV cells) arrive as
//! text. Numbers are coerced leniently: anything that does not parse becomes
//! NaN, which the calculator then propagates instead of failing.

use fibc_types::{Error, Result};
use tracing::warn;

use super::bag_spec::{BagSpecification, SewnRatio, SpoutSpec};

/// Field keys accepted by [`BagSpecification::apply_field`]
pub const FORM_FIELDS: [&str; 17] = [
    "height",
    "width",
    "bottom_size",
    "main_density",
    "aux_density",
    "top_spout",
    "top_spout_diameter",
    "top_spout_height",
    "bottom_spout",
    "bottom_spout_diameter",
    "bottom_spout_height",
    "tie_weight",
    "tie_length",
    "strap_loop",
    "strap_ratio",
    "strap_weight",
    "thread_weight",
];

/// Coerce a text field to a number, NaN when unparsable (including empty)
pub fn parse_field(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_toggle(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "on" | "true" | "yes" | "1"
    )
}

impl SewnRatio {
    /// Form coercion: only the exact value `two_thirds` selects two thirds,
    /// everything else falls back to one third.
    pub fn from_field(value: &str) -> Self {
        match value {
            "two_thirds" => SewnRatio::TwoThirds,
            "one_third" => SewnRatio::OneThird,
            other => {
                warn!(value = other, "unrecognised strap ratio, using one_third");
                SewnRatio::OneThird
            }
        }
    }
}

impl BagSpecification {
    /// Set one field from its raw text value.
    ///
    /// Setting a spout dimension enables that spout; `top_spout` /
    /// `bottom_spout` toggle it explicitly (`on`/`off`).
    pub fn apply_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key.trim() {
            "height" => self.height_cm = parse_field(value),
            "width" => self.width_cm = parse_field(value),
            "bottom_size" => self.bottom_size_cm = parse_field(value),
            "main_density" => self.main_density_gm2 = parse_field(value),
            "aux_density" => self.aux_density_gm2 = parse_field(value),
            "top_spout" => self.top_spout = toggle_spout(self.top_spout, value),
            "top_spout_diameter" => {
                self.top_spout.get_or_insert_with(SpoutSpec::default).diameter_cm =
                    parse_field(value)
            }
            "top_spout_height" => {
                self.top_spout.get_or_insert_with(SpoutSpec::default).height_cm =
                    parse_field(value)
            }
            "bottom_spout" => self.bottom_spout = toggle_spout(self.bottom_spout, value),
            "bottom_spout_diameter" => {
                self.bottom_spout
                    .get_or_insert_with(SpoutSpec::default)
                    .diameter_cm = parse_field(value)
            }
            "bottom_spout_height" => {
                self.bottom_spout
                    .get_or_insert_with(SpoutSpec::default)
                    .height_cm = parse_field(value)
            }
            "tie_weight" => self.tie.weight_per_meter_g = parse_field(value),
            "tie_length" => self.tie.length_cm = parse_field(value),
            "strap_loop" => self.strap.loop_height_cm = parse_field(value),
            "strap_ratio" => self.strap.sewn_ratio = SewnRatio::from_field(value),
            "strap_weight" => self.strap.weight_per_meter_g = parse_field(value),
            "thread_weight" => self.thread_weight_per_cm_g = parse_field(value),
            other => {
                return Err(Error::InvalidInput(format!(
                    "unknown field '{}' (expected one of: {})",
                    other,
                    FORM_FIELDS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Apply a `key=value` assignment
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            Error::InvalidInput(format!("expected KEY=VALUE, got '{}'", assignment))
        })?;
        self.apply_field(key, value)
    }
}

fn toggle_spout(current: Option<SpoutSpec>, value: &str) -> Option<SpoutSpec> {
    if parse_toggle(value) {
        Some(current.unwrap_or_default())
    } else {
        None
    }
}
