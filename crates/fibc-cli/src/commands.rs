//! Command handlers

use crate::cli::{BagArgs, Cli, Commands, PresetAction};
use crate::output::{output_batch, output_calculation, output_presets};
use fibc_app::app::{
    self, calculate, calculate_batch, check_samples, Calculation, PresetCatalog,
};
use fibc_app::config::Config;
use fibc_app::export::export_to_excel;
use fibc_app::repository::{open_preset_file, open_preset_repo};
use fibc_domain::service::generate_weight_report;
use fibc_infra::csv_loader::{load_bag_specs_from_csv, load_samples_from_csv};
use fibc_types::{Error, OutputFormat, Result};
use std::path::PathBuf;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!(%output_format, "loaded configuration");

    match cli.command {
        Commands::Calc { bag, export } => cmd_calc(&config, &bag, export, output_format),

        Commands::Batch { csv, output } => cmd_batch(csv, output, output_format),

        Commands::Check { samples, tolerance } => {
            let tolerance = tolerance.unwrap_or(config.tolerance_percent);
            cmd_check(&config, samples, tolerance, output_format)
        }

        Commands::Preset { action } => cmd_preset(&config, action, output_format),

        Commands::Config {
            show,
            set_output,
            set_tolerance,
            set_presets_file,
            set_store_dir,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_tolerance,
            set_presets_file,
            set_store_dir,
            reset,
        ),
    }
}

/// Standard presets plus the configured presets file and saved store
fn load_catalog(config: &Config) -> Result<PresetCatalog> {
    let repo = open_preset_repo(config)?;
    let file = open_preset_file(config)?;
    PresetCatalog::new(Some(&repo), file.as_ref())
}

fn cmd_calc(
    config: &Config,
    bag: &BagArgs,
    export: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let calc = calculate(&catalog, &bag.to_request())?;

    output_calculation(output_format, &calc)?;

    if let Some(path) = export {
        export_to_excel(std::slice::from_ref(&calc), &path)?;
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}

fn cmd_batch(csv_path: PathBuf, output: Option<PathBuf>, output_format: OutputFormat) -> Result<()> {
    let bags = load_bag_specs_from_csv(&csv_path)?;
    if bags.is_empty() {
        return Err(Error::InvalidInput(format!(
            "no bags found in {}",
            csv_path.display()
        )));
    }
    debug!(count = bags.len(), path = %csv_path.display(), "loaded bag specifications");

    let calcs: Vec<Calculation> = calculate_batch(&bags);
    output_batch(output_format, &calcs)?;

    if let Some(path) = output {
        export_to_excel(&calcs, &path)?;
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}

fn cmd_check(
    config: &Config,
    samples_path: PathBuf,
    tolerance_percent: f64,
    output_format: OutputFormat,
) -> Result<()> {
    if !(tolerance_percent.is_finite() && tolerance_percent >= 0.0) {
        return Err(Error::InvalidInput(format!(
            "tolerance must be a non-negative number, got {}",
            tolerance_percent
        )));
    }

    let samples = load_samples_from_csv(&samples_path)?;
    let catalog = load_catalog(config)?;
    let results = check_samples(&catalog, &samples, tolerance_percent);

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&results)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            let report = generate_weight_report(&results, tolerance_percent);
            println!("{}", report);
        }
    }

    let flagged = results.iter().filter(|r| r.out_of_tolerance).count();
    if flagged > 0 {
        eprintln!("\nWarning: {} sample(s) outside ±{}%", flagged, tolerance_percent);
    }

    Ok(())
}

fn cmd_preset(config: &Config, action: PresetAction, output_format: OutputFormat) -> Result<()> {
    match action {
        PresetAction::List => {
            let catalog = load_catalog(config)?;
            output_presets(output_format, &catalog)
        }

        PresetAction::Show { name } => {
            let catalog = load_catalog(config)?;
            let preset = catalog.resolve(&name)?;
            if let Some(ref description) = preset.description {
                if output_format == OutputFormat::Table {
                    println!("{}", description);
                }
            }
            output_calculation(output_format, &Calculation::new(name.clone(), preset.spec))
        }

        PresetAction::Save {
            name,
            description,
            bag,
        } => {
            let catalog = load_catalog(config)?;
            let spec = bag.to_request().resolve_spec(&catalog)?;
            let repo = open_preset_repo(config)?;
            let preset = app::save_preset(&repo, &name, spec, description)?;
            println!("Saved preset '{}'", preset.name);
            Ok(())
        }

        PresetAction::Remove { name } => {
            let repo = open_preset_repo(config)?;
            app::remove_preset(&repo, &name)?;
            println!("Removed preset '{}'", name);
            Ok(())
        }
    }
}

fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_tolerance: Option<f64>,
    set_presets_file: Option<PathBuf>,
    set_store_dir: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(tolerance) = set_tolerance {
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(Error::InvalidInput(format!(
                "tolerance must be a non-negative number, got {}",
                tolerance
            )));
        }
        config.tolerance_percent = tolerance;
        modified = true;
    }

    if let Some(path) = set_presets_file {
        config.presets_file = Some(path);
        modified = true;
    }

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
