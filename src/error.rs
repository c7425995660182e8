//! Error types for xray-bootstrap.
//!
//! Variants follow the failure classes of a bootstrap run: environment
//! faults, template faults, spawn faults. A child that exits badly is not an
//! error here; see [`crate::supervisor::EngineExit`].

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop the bootstrap before (or while) starting the engine.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Secure random source failed: {0}")]
    Random(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Template read failed at {path:?}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template syntax error on line {line}: {message}")]
    TemplateSyntax { line: usize, message: String },

    #[error("Template placeholder '{name}' on line {line} has no matching field")]
    UnknownPlaceholder { name: String, line: usize },

    #[error("Config write failed at {path:?}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine start failed for {binary:?}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Waiting on engine failed: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
