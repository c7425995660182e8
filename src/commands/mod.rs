//! Command implementations.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial module structure

pub mod link;
pub mod render;
pub mod run;

use std::path::PathBuf;

use crate::config::ResolveOptions;
use crate::output::OutputControls;
use crate::supervisor::{EngineCommand, Supervisor};

/// Everything a command needs besides the parameter source.
#[derive(Debug, Clone)]
pub struct Settings {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub engine: EngineCommand,
    pub options: ResolveOptions,
    pub output: OutputControls,
}

impl Settings {
    pub fn supervisor(&self) -> Supervisor {
        Supervisor::new(&self.template_path, &self.output_path, self.engine.clone())
    }
}
