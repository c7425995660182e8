//! Resolved deployment parameters.
//!
//! CHANGELOG:
//! - 10/18/2026 - Added ResolveOptions for per-deployment defaults
//! - 10/18/2026 - Initial implementation

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::resolver::keys::KeyPair;

/// Transport the engine listens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransportMode {
    #[serde(rename = "ws")]
    Websocket,
    #[serde(rename = "reality")]
    Reality,
}

impl TransportMode {
    /// Interpret a `FALLBACK_PROTO` value.
    ///
    /// Only `ws`/`websocket` mean websocket; every other value selects
    /// reality, which is how existing deployments already behave.
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "ws" | "websocket" => TransportMode::Websocket,
            _ => TransportMode::Reality,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Websocket => "ws",
            TransportMode::Reality => "reality",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for command-line flags.
impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ws" | "websocket" => Ok(TransportMode::Websocket),
            "reality" | "tls" => Ok(TransportMode::Reality),
            other => Err(format!(
                "unknown transport '{}' (expected ws or reality)",
                other
            )),
        }
    }
}

/// Defaults that differ between deployment variants.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Transport used when `FALLBACK_PROTO` is unset.
    pub default_transport: TransportMode,
    /// Length of a generated `SHORT_ID`.
    pub short_id_len: usize,
    /// Length of a generated `UUID`.
    pub uuid_len: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default_transport: TransportMode::Websocket,
            short_id_len: 8,
            uuid_len: 36,
        }
    }
}

/// Every parameter the engine config and the share link need.
///
/// Built once by [`crate::resolver::resolve`]; all string fields are
/// non-empty.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub uuid: String,
    pub port: String,
    pub fake_domain: String,
    pub server_names: Vec<String>,
    pub fingerprint: String,
    pub keys: KeyPair,
    pub short_id: String,
    pub transport: TransportMode,
    /// Public hostname clients connect to.
    pub domain: String,
    /// Port advertised in the share link (the platform edge port).
    pub public_port: String,
}

impl ResolvedConfig {
    /// Websocket path served by the engine.
    pub fn ws_path(&self) -> String {
        format!("/ws{}", self.short_id)
    }
}
