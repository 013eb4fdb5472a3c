//! Repository trait definitions for data persistence

use fibc_types::Error;

use crate::model::BagPreset;

/// Repository for user-saved bag presets
pub trait PresetRepository {
    /// Insert or replace a preset by name
    fn save(&self, preset: &BagPreset) -> Result<(), Error>;

    /// Find a preset by exact name
    fn find_by_name(&self, name: &str) -> Result<Option<BagPreset>, Error>;

    /// All presets sorted by name
    fn find_all(&self) -> Result<Vec<BagPreset>, Error>;

    /// Remove a preset, returning whether it existed
    fn remove(&self, name: &str) -> Result<bool, Error>;
}
