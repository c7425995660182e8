//! Link command: print connection details without touching files.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use anyhow::{Context, Result};

use super::Settings;
use crate::link::ConnectionInfo;
use crate::resolver::{self, ConfigSource};

pub fn run(settings: &Settings, source: &impl ConfigSource) -> Result<()> {
    let config = resolver::resolve(source, &settings.options).context("Failed to resolve parameters")?;
    settings.output.print_connection(&ConnectionInfo::from_config(&config));
    Ok(())
}
