pub mod analyze;
pub mod batch;
pub mod config;
pub mod sun;

use std::path::Path;

use anyhow::{Context, Result};
use skycover_core::config::InstrumentConfig;

/// Read an instrument config from TOML, or fall back to the built-in default.
///
/// The result is not validated; callers apply their overrides first.
pub fn load_config(path: Option<&Path>) -> Result<InstrumentConfig> {
    let Some(path) = path else {
        return Ok(InstrumentConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("Invalid instrument config {}", path.display()))?;
    Ok(config)
}
