//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_preset_repo;

pub use file_preset_repo::FilePresetRepository;
