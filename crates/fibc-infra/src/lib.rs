//! Infrastructure layer - loaders and file-based persistence

pub mod csv_loader;
pub mod persistence;
pub mod preset_loader;
