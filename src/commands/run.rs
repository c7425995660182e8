//! Run command: the full bootstrap.
//!
//! resolve -> write config -> start engine -> print link -> wait.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use anyhow::{Context, Result};
use tracing::info;

use super::Settings;
use crate::link::ConnectionInfo;
use crate::resolver::{self, ConfigSource};
use crate::supervisor::EngineExit;

/// Run the engine to completion.
///
/// Fatal errors (parameters, template, spawn) return before any child is
/// left running. A failing engine is returned as an [`EngineExit`], not an
/// error.
pub async fn run(settings: &Settings, source: &impl ConfigSource) -> Result<EngineExit> {
    let config = resolver::resolve(source, &settings.options).context("Failed to resolve parameters")?;

    let configured = settings
        .supervisor()
        .configure(&config)
        .context("Failed to render engine config")?;

    let running = configured.spawn().context("Failed to start engine")?;

    settings.output.print_connection(&ConnectionInfo::from_config(&config));

    info!("waiting for engine to exit");
    let exit = running.wait().await.context("Failed to wait for engine")?;
    Ok(exit)
}
