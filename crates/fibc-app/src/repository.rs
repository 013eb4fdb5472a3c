//! Repository adapters for persistence layer

use fibc_infra::persistence::FilePresetRepository;
use fibc_infra::preset_loader::PresetLoader;
use fibc_types::Result;

use crate::config::Config;

/// Open file-based repository of saved presets
pub fn open_preset_repo(config: &Config) -> Result<FilePresetRepository> {
    let store_dir = config.store_dir()?;
    FilePresetRepository::open(store_dir)
}

/// Load the configured presets TOML file, if any
pub fn open_preset_file(config: &Config) -> Result<Option<PresetLoader>> {
    match config.presets_file {
        Some(ref path) => PresetLoader::load_from_file(path).map(Some),
        None => Ok(None),
    }
}
