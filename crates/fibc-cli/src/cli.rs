//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use fibc_app::app::{CalcRequest, SpecOverrides};
use fibc_domain::model::{SewnRatio, SpoutSpec};
use fibc_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fibc-calc")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Unit weight calculator for FIBC bulk bags")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Bag specification inputs shared by `calc` and `preset save`
#[derive(Args, Debug, Clone, Default)]
pub struct BagArgs {
    /// Start from a named preset (see `preset list`)
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Bag height (cm)
    #[arg(long)]
    pub height: Option<f64>,

    /// Bag width (cm)
    #[arg(long)]
    pub width: Option<f64>,

    /// Bottom panel size (cm)
    #[arg(long)]
    pub bottom: Option<f64>,

    /// Body and bottom fabric density (g/m²)
    #[arg(long)]
    pub main_density: Option<f64>,

    /// Spout fabric density (g/m²)
    #[arg(long)]
    pub aux_density: Option<f64>,

    /// Top (filling) spout as DIAMETER:HEIGHT in cm, e.g. 40:48
    #[arg(long, conflicts_with = "no_top_spout")]
    pub top_spout: Option<SpoutSpec>,

    /// Remove the top spout
    #[arg(long)]
    pub no_top_spout: bool,

    /// Bottom (discharge) spout as DIAMETER:HEIGHT in cm
    #[arg(long, conflicts_with = "no_bottom_spout")]
    pub bottom_spout: Option<SpoutSpec>,

    /// Remove the bottom spout
    #[arg(long)]
    pub no_bottom_spout: bool,

    /// Tie tape weight (g/m)
    #[arg(long)]
    pub tie_weight: Option<f64>,

    /// Tie length (cm)
    #[arg(long)]
    pub tie_length: Option<f64>,

    /// Strap loop height (cm)
    #[arg(long)]
    pub strap_loop: Option<f64>,

    /// Sewn part of each strap (one_third, two_thirds)
    #[arg(long)]
    pub strap_ratio: Option<SewnRatio>,

    /// Strap webbing weight (g/m)
    #[arg(long)]
    pub strap_weight: Option<f64>,

    /// Thread consumption (g/cm of seam)
    #[arg(long)]
    pub thread_weight: Option<f64>,

    /// Raw form field KEY=VALUE, coerced like the web form (repeatable)
    #[arg(long = "field", short = 'F', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

impl BagArgs {
    pub fn to_request(&self) -> CalcRequest {
        CalcRequest {
            preset: self.preset.clone(),
            overrides: SpecOverrides {
                height_cm: self.height,
                width_cm: self.width,
                bottom_size_cm: self.bottom,
                main_density_gm2: self.main_density,
                aux_density_gm2: self.aux_density,
                top_spout: self.top_spout,
                bottom_spout: self.bottom_spout,
                no_top_spout: self.no_top_spout,
                no_bottom_spout: self.no_bottom_spout,
                tie_weight_per_meter_g: self.tie_weight,
                tie_length_cm: self.tie_length,
                strap_loop_height_cm: self.strap_loop,
                strap_sewn_ratio: self.strap_ratio,
                strap_weight_per_meter_g: self.strap_weight,
                thread_weight_per_cm_g: self.thread_weight,
            },
            fields: self.fields.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the unit weight of one bag
    Calc {
        #[command(flatten)]
        bag: BagArgs,

        /// Write the calculation sheet to an Excel file
        #[arg(long, short = 'e')]
        export: Option<PathBuf>,
    },

    /// Calculate every bag in a CSV file
    Batch {
        /// CSV with a header of field names (name, height, width, ...)
        csv: PathBuf,

        /// Output Excel file for all breakdowns
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Compare measured bag weights with their preset's calculated weight
    Check {
        /// CSV of samples: sample_id, preset, measured_grams[, lot]
        #[arg(long)]
        samples: PathBuf,

        /// Allowed deviation in percent. Uses config value if not specified.
        #[arg(long, short = 't')]
        tolerance: Option<f64>,
    },

    /// Manage bag presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default QC tolerance (percent)
        #[arg(long)]
        set_tolerance: Option<f64>,

        /// Set presets TOML file
        #[arg(long)]
        set_presets_file: Option<PathBuf>,

        /// Set store directory for saved presets
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum PresetAction {
    /// List standard, file and saved presets
    List,

    /// Show a preset with its calculated weight
    Show {
        name: String,
    },

    /// Save a bag specification under a name
    Save {
        name: String,

        /// Free-text description
        #[arg(long, short = 'd')]
        description: Option<String>,

        #[command(flatten)]
        bag: BagArgs,
    },

    /// Remove a saved preset
    Remove {
        name: String,
    },
}
