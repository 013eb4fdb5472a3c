//! Application service layer - use cases, config, presets, export

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod repository;
