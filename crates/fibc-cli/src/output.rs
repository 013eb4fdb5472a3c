//! Output formatting module

use fibc_app::app::{Calculation, PresetCatalog};
use fibc_domain::model::{BagSpecification, SpoutSpec};
use fibc_domain::service::compute;
use fibc_types::{OutputFormat, Result};
use serde::Serialize;

fn spout_label(spout: &Option<SpoutSpec>) -> String {
    match spout {
        Some(s) => format!("Ø{} x {} cm", s.diameter_cm, s.height_cm),
        None => "none".to_string(),
    }
}

fn print_inputs(spec: &BagSpecification) {
    println!("--- Inputs ---");
    println!("Height x width:  {} x {} cm", spec.height_cm, spec.width_cm);
    println!("Bottom:          {} x {} cm", spec.bottom_size_cm, spec.bottom_size_cm);
    println!(
        "Fabric:          {} g/m² (body), {} g/m² (spout)",
        spec.main_density_gm2, spec.aux_density_gm2
    );
    println!("Top spout:       {}", spout_label(&spec.top_spout));
    println!("Bottom spout:    {}", spout_label(&spec.bottom_spout));
    println!(
        "Ties:            {} g/m x {} cm",
        spec.tie.weight_per_meter_g, spec.tie.length_cm
    );
    println!(
        "Straps:          loop {} cm, sewn {}, {} g/m",
        spec.strap.loop_height_cm,
        spec.strap.sewn_ratio.label(),
        spec.strap.weight_per_meter_g
    );
    println!("Thread:          {} g/cm", spec.thread_weight_per_cm_g);
}

pub fn output_calculation(output_format: OutputFormat, calc: &Calculation) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(calc)?;
        println!("{}", content);
        return Ok(());
    }

    let title = format!("Unit Weight: {}", calc.name);
    println!("\n{}", title);
    println!("{}", "=".repeat(title.chars().count()));
    print_inputs(&calc.spec);

    let b = &calc.breakdown;
    println!("\n--- Breakdown ---");
    for (label, grams) in b.components() {
        println!("{:<16} {:>10.2} g", format!("{}:", label), grams);
    }
    println!("{}", "-".repeat(29));
    println!("{:<16} {:>10.2} g", "Total:", b.total_grams);
    println!("{:<16} {:>10.3} kg", "", b.total_kg);

    println!("\n--- Geometry ---");
    println!("Sewn length:     {:.2} cm", b.sewn_length_cm);
    println!("Strap length:    {:.2} cm", b.strap_length_cm);
    println!("Seam length:     {:.2} cm", b.seam_length_cm);

    Ok(())
}

pub fn output_batch(output_format: OutputFormat, calcs: &[Calculation]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(calcs)?;
        println!("{}", content);
        return Ok(());
    }

    println!(
        "{:<20} {:>9} {:>9} {:>9} {:>7} {:>9} {:>8} {:>10} {:>8}",
        "Bag", "Body", "Bottom", "Spouts", "Ties", "Straps", "Thread", "Total g", "Total kg"
    );
    println!("{}", "-".repeat(97));
    for calc in calcs {
        let b = &calc.breakdown;
        println!(
            "{:<20} {:>9.1} {:>9.1} {:>9.1} {:>7.1} {:>9.1} {:>8.1} {:>10.1} {:>8.3}",
            truncate(&calc.name, 20),
            b.body_g,
            b.bottom_g,
            b.top_spout_g + b.bottom_spout_g,
            b.ties_g,
            b.straps_g,
            b.thread_g,
            b.total_grams,
            b.total_kg
        );
    }
    println!("{}", "-".repeat(97));
    println!("{} bag(s)", calcs.len());

    Ok(())
}

#[derive(Serialize)]
struct PresetListing<'a> {
    source: &'a str,
    name: &'a str,
    description: Option<&'a str>,
    total_grams: f64,
}

pub fn output_presets(output_format: OutputFormat, catalog: &PresetCatalog) -> Result<()> {
    let listings: Vec<PresetListing> = catalog
        .entries()
        .iter()
        .map(|(source, preset)| PresetListing {
            source: source.label(),
            name: &preset.name,
            description: preset.description.as_deref(),
            total_grams: compute(&preset.spec).total_grams,
        })
        .collect();

    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&listings)?;
        println!("{}", content);
        return Ok(());
    }

    println!("{:<9} {:<24} {:>10}  {}", "Source", "Name", "Weight", "Description");
    println!("{}", "-".repeat(72));
    for listing in &listings {
        println!(
            "{:<9} {:<24} {:>8.1} g  {}",
            listing.source,
            truncate(listing.name, 24),
            listing.total_grams,
            listing.description.unwrap_or("")
        );
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-preset-name", 10), "a-very-l..");
    }

    #[test]
    fn test_spout_label() {
        assert_eq!(spout_label(&None), "none");
        let spout = Some(SpoutSpec {
            diameter_cm: 40.0,
            height_cm: 48.0,
        });
        assert_eq!(spout_label(&spout), "Ø40 x 48 cm");
    }
}
