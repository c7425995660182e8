//! Render command: write the engine config without starting the engine.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

use super::Settings;
use crate::resolver::{self, ConfigSource};

/// Resolve and write the config. Returns the written path.
pub fn render(settings: &Settings, source: &impl ConfigSource) -> Result<PathBuf> {
    let config = resolver::resolve(source, &settings.options).context("Failed to resolve parameters")?;
    let configured = settings
        .supervisor()
        .configure(&config)
        .context("Failed to render engine config")?;
    Ok(configured.config_path().to_path_buf())
}

pub fn run(settings: &Settings, source: &impl ConfigSource) -> Result<()> {
    let path = render(settings, source)?;
    if settings.output.json {
        println!("{}", settings.output.emit_json(&json!({
            "success": true,
            "config_path": path,
        })));
    } else {
        println!("Config written to {}", path.display());
    }
    Ok(())
}
