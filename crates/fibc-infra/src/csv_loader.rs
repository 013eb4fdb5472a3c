//! CSV loaders for batch calculation and QC weight checks

use fibc_domain::model::{BagPreset, BagSpecification, WeightSample, FORM_FIELDS};
use fibc_types::{Error, Result};
use std::io::Read;
use std::path::Path;
use tracing::warn;

const NAME_COLUMN: &str = "name";

/// Columns whose blank cells mean "not set" rather than an unparsable value
fn skips_blank(column: &str) -> bool {
    column == NAME_COLUMN || column.starts_with("top_spout") || column.starts_with("bottom_spout")
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(Error::FileNotFound(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?)
}

/// Load bag specifications from a CSV file
///
/// Header row required. Columns are form field names (`height`, `width`,
/// `strap_ratio`, ...) plus an optional `name` column. Cells are coerced like
/// form input, so a blank numeric cell becomes NaN. Blank name and spout
/// cells are skipped: a bag whose spout columns are all blank has no spout.
pub fn load_bag_specs_from_csv(path: &Path) -> Result<Vec<BagPreset>> {
    let reader = open_reader(path)?;
    read_bag_specs(reader)
}

/// Same as [`load_bag_specs_from_csv`] for any reader
pub fn load_bag_specs_from_reader<R: Read>(source: R) -> Result<Vec<BagPreset>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);
    read_bag_specs(reader)
}

fn read_bag_specs<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<BagPreset>> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    if let Some(unknown) = headers
        .iter()
        .find(|h| h.as_str() != NAME_COLUMN && !FORM_FIELDS.contains(&h.as_str()))
    {
        return Err(Error::InvalidInput(format!(
            "unknown CSV column '{}' (expected name or one of: {})",
            unknown,
            FORM_FIELDS.join(", ")
        )));
    }

    let mut bags = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut name = format!("row {}", index + 1);
        let mut spec = BagSpecification::default();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if cell.is_empty() && skips_blank(header) {
                continue;
            }
            if header == NAME_COLUMN {
                name = cell.to_string();
            } else {
                spec.apply_field(header, cell)?;
            }
        }
        bags.push(BagPreset::new(name, spec));
    }
    Ok(bags)
}

/// Load QC weight samples from a CSV file
///
/// Expected header: `sample_id,preset,measured_grams[,lot]`. Rows that do not
/// parse are skipped with a warning.
pub fn load_samples_from_csv(path: &Path) -> Result<Vec<WeightSample>> {
    let reader = open_reader(path)?;
    read_samples(reader)
}

pub fn load_samples_from_reader<R: Read>(source: R) -> Result<Vec<WeightSample>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);
    read_samples(reader)
}

fn read_samples<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<WeightSample>> {
    let mut samples = Vec::new();
    for (index, row) in reader.deserialize::<WeightSample>().enumerate() {
        match row {
            Ok(sample) => samples.push(sample),
            Err(e) => warn!(row = index + 1, error = %e, "skipping unparsable sample row"),
        }
    }
    Ok(samples)
}
