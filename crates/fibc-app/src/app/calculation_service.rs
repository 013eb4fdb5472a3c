//! Calculation use cases: resolve inputs, compute, manage presets

use chrono::Utc;
use fibc_domain::model::{
    BagPreset, BagSpecification, SewnRatio, SpoutSpec, WeightBreakdown, WeightSample,
};
use fibc_domain::repository::PresetRepository;
use fibc_domain::service::{check_weights, compute, WeightCheckResult};
use fibc_infra::preset_loader::PresetLoader;
use fibc_types::{Error, PresetError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{is_standard_preset, standard_presets};

/// Where a preset came from, in lookup priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetSource {
    Saved,
    File,
    Standard,
}

impl PresetSource {
    pub fn label(&self) -> &'static str {
        match self {
            PresetSource::Saved => "saved",
            PresetSource::File => "file",
            PresetSource::Standard => "standard",
        }
    }
}

/// All presets visible to the calculator.
///
/// A saved preset shadows a file preset of the same name, which shadows a
/// standard one. Names match as in [`BagPreset::matches_name`].
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    entries: Vec<(PresetSource, BagPreset)>,
}

impl PresetCatalog {
    pub fn new(saved: Option<&dyn PresetRepository>, file: Option<&PresetLoader>) -> Result<Self> {
        let mut catalog = Self::default();
        if let Some(repo) = saved {
            for preset in repo.find_all()? {
                catalog.push(PresetSource::Saved, preset);
            }
        }
        if let Some(loader) = file {
            for preset in loader.all_presets() {
                catalog.push(PresetSource::File, preset.clone());
            }
        }
        for preset in standard_presets() {
            catalog.push(PresetSource::Standard, preset);
        }
        Ok(catalog)
    }

    /// Catalog holding the standard presets only
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        for preset in standard_presets() {
            catalog.push(PresetSource::Standard, preset);
        }
        catalog
    }

    fn push(&mut self, source: PresetSource, preset: BagPreset) {
        if self.entries.iter().any(|(_, p)| p.matches_name(&preset.name)) {
            debug!(name = %preset.name, source = source.label(), "preset shadowed");
            return;
        }
        self.entries.push((source, preset));
    }

    pub fn resolve(&self, name: &str) -> Result<&BagPreset> {
        self.entries
            .iter()
            .find(|(_, p)| p.matches_name(name))
            .map(|(_, p)| p)
            .ok_or_else(|| PresetError::NotFound(name.to_string()).into())
    }

    pub fn entries(&self) -> &[(PresetSource, BagPreset)] {
        &self.entries
    }

    pub fn presets(&self) -> Vec<BagPreset> {
        self.entries.iter().map(|(_, p)| p.clone()).collect()
    }
}

/// Typed field overrides, applied on top of a preset
#[derive(Debug, Clone, Default)]
pub struct SpecOverrides {
    pub height_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub bottom_size_cm: Option<f64>,
    pub main_density_gm2: Option<f64>,
    pub aux_density_gm2: Option<f64>,
    pub top_spout: Option<SpoutSpec>,
    pub bottom_spout: Option<SpoutSpec>,
    pub no_top_spout: bool,
    pub no_bottom_spout: bool,
    pub tie_weight_per_meter_g: Option<f64>,
    pub tie_length_cm: Option<f64>,
    pub strap_loop_height_cm: Option<f64>,
    pub strap_sewn_ratio: Option<SewnRatio>,
    pub strap_weight_per_meter_g: Option<f64>,
    pub thread_weight_per_cm_g: Option<f64>,
}

impl SpecOverrides {
    pub fn apply(&self, spec: &mut BagSpecification) {
        fn set(target: &mut f64, value: Option<f64>) {
            if let Some(v) = value {
                *target = v;
            }
        }

        set(&mut spec.height_cm, self.height_cm);
        set(&mut spec.width_cm, self.width_cm);
        set(&mut spec.bottom_size_cm, self.bottom_size_cm);
        set(&mut spec.main_density_gm2, self.main_density_gm2);
        set(&mut spec.aux_density_gm2, self.aux_density_gm2);

        if self.top_spout.is_some() {
            spec.top_spout = self.top_spout;
        }
        if self.no_top_spout {
            spec.top_spout = None;
        }
        if self.bottom_spout.is_some() {
            spec.bottom_spout = self.bottom_spout;
        }
        if self.no_bottom_spout {
            spec.bottom_spout = None;
        }

        set(&mut spec.tie.weight_per_meter_g, self.tie_weight_per_meter_g);
        set(&mut spec.tie.length_cm, self.tie_length_cm);
        set(&mut spec.strap.loop_height_cm, self.strap_loop_height_cm);
        if let Some(ratio) = self.strap_sewn_ratio {
            spec.strap.sewn_ratio = ratio;
        }
        set(&mut spec.strap.weight_per_meter_g, self.strap_weight_per_meter_g);
        set(&mut spec.thread_weight_per_cm_g, self.thread_weight_per_cm_g);
    }
}

/// One calculator invocation: preset base, typed overrides, raw form fields
#[derive(Debug, Clone, Default)]
pub struct CalcRequest {
    pub preset: Option<String>,
    pub overrides: SpecOverrides,
    /// `key=value` form assignments, applied last
    pub fields: Vec<String>,
}

impl CalcRequest {
    /// Build the bag specification this request describes
    pub fn resolve_spec(&self, catalog: &PresetCatalog) -> Result<BagSpecification> {
        let mut spec = match self.preset {
            Some(ref name) => catalog.resolve(name)?.spec,
            None => BagSpecification::default(),
        };
        self.overrides.apply(&mut spec);
        for assignment in &self.fields {
            spec.apply_assignment(assignment)?;
        }
        Ok(spec)
    }
}

/// A computed bag, ready for display or export
#[derive(Debug, Clone, Serialize)]
pub struct Calculation {
    pub name: String,
    pub spec: BagSpecification,
    pub breakdown: WeightBreakdown,
}

impl Calculation {
    pub fn new(name: impl Into<String>, spec: BagSpecification) -> Self {
        let name = name.into();
        let breakdown = compute(&spec);
        debug!(
            name = %name,
            total_grams = breakdown.total_grams,
            body_g = breakdown.body_g,
            straps_g = breakdown.straps_g,
            thread_g = breakdown.thread_g,
            "computed unit weight"
        );
        Self {
            name,
            spec,
            breakdown,
        }
    }
}

pub fn calculate(catalog: &PresetCatalog, request: &CalcRequest) -> Result<Calculation> {
    let spec = request.resolve_spec(catalog)?;
    debug!(?spec, "resolved bag specification");
    let name = request.preset.clone().unwrap_or_else(|| "custom".to_string());
    Ok(Calculation::new(name, spec))
}

pub fn calculate_batch(bags: &[BagPreset]) -> Vec<Calculation> {
    bags.iter()
        .map(|bag| Calculation::new(bag.name.clone(), bag.spec))
        .collect()
}

/// Name of the first non-finite numeric field, if any
fn non_finite_field(spec: &BagSpecification) -> Option<&'static str> {
    let mut fields = vec![
        ("height", spec.height_cm),
        ("width", spec.width_cm),
        ("bottom_size", spec.bottom_size_cm),
        ("main_density", spec.main_density_gm2),
        ("aux_density", spec.aux_density_gm2),
        ("tie_weight", spec.tie.weight_per_meter_g),
        ("tie_length", spec.tie.length_cm),
        ("strap_loop", spec.strap.loop_height_cm),
        ("strap_weight", spec.strap.weight_per_meter_g),
        ("thread_weight", spec.thread_weight_per_cm_g),
    ];
    if let Some(spout) = spec.top_spout {
        fields.push(("top_spout_diameter", spout.diameter_cm));
        fields.push(("top_spout_height", spout.height_cm));
    }
    if let Some(spout) = spec.bottom_spout {
        fields.push(("bottom_spout_diameter", spout.diameter_cm));
        fields.push(("bottom_spout_height", spout.height_cm));
    }
    fields
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
}

/// Save a user preset. Standard preset names are reserved.
pub fn save_preset(
    repo: &dyn PresetRepository,
    name: &str,
    spec: BagSpecification,
    description: Option<String>,
) -> Result<BagPreset> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PresetError::EmptyName.into());
    }
    if is_standard_preset(name) {
        return Err(PresetError::BuiltIn(name.to_string()).into());
    }
    if let Some(field) = non_finite_field(&spec) {
        return Err(Error::InvalidInput(format!(
            "field '{}' is not a finite number, preset not saved",
            field
        )));
    }

    let preset = BagPreset {
        name: name.to_string(),
        description,
        spec,
        saved_at: Some(Utc::now()),
    };
    for stored in repo.find_all()? {
        if stored.name != preset.name && stored.matches_name(&preset.name) {
            repo.remove(&stored.name)?;
        }
    }
    repo.save(&preset)?;
    info!(name = %preset.name, "preset saved");
    Ok(preset)
}

pub fn remove_preset(repo: &dyn PresetRepository, name: &str) -> Result<()> {
    if is_standard_preset(name) {
        return Err(PresetError::BuiltIn(name.to_string()).into());
    }
    let stored = repo
        .find_all()?
        .into_iter()
        .find(|p| p.matches_name(name))
        .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
    repo.remove(&stored.name)?;
    info!(name = %stored.name, "preset removed");
    Ok(())
}

pub fn check_samples(
    catalog: &PresetCatalog,
    samples: &[WeightSample],
    tolerance_percent: f64,
) -> Vec<WeightCheckResult> {
    let presets = catalog.presets();
    let results = check_weights(samples, &presets, tolerance_percent);
    debug!(
        samples = samples.len(),
        flagged = results.iter().filter(|r| r.out_of_tolerance).count(),
        "weight check finished"
    );
    results
}
