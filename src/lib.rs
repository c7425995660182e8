//! xray-bootstrap library
//!
//! Resolves deployment parameters, renders the Xray config and supervises
//! the engine process. The binary in `main.rs` wires these together.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial library structure

pub mod commands;
pub mod config;
pub mod error;
pub mod link;
pub mod output;
pub mod resolver;
pub mod supervisor;
pub mod template;

pub use config::{ResolveOptions, ResolvedConfig, TransportMode};
pub use error::{BootstrapError, Result};
