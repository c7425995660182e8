//! Share link construction.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use serde::Serialize;

use crate::config::{ResolvedConfig, TransportMode};

pub const SCHEME: &str = "vless";
pub const WS_LABEL: &str = "Fly-WS-Node";
pub const REALITY_LABEL: &str = "Fly-Reality-Node";

/// What gets shown to the operator after the engine starts.
///
/// Holds only public values; the private key never lands here.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionInfo {
    pub domain: String,
    pub path: String,
    pub transport: TransportMode,
    pub link: String,
}

impl ConnectionInfo {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            domain: config.domain.clone(),
            path: config.ws_path(),
            transport: config.transport,
            link: share_link(config),
        }
    }
}

/// Build the `vless://` URI for the configured transport.
pub fn share_link(config: &ResolvedConfig) -> String {
    match config.transport {
        TransportMode::Websocket => format!(
            "{}://{}@{}:{}?type=ws&security=none&path={}&host={}#{}",
            SCHEME,
            config.uuid,
            config.domain,
            config.public_port,
            config.ws_path(),
            config.fake_domain,
            WS_LABEL
        ),
        TransportMode::Reality => format!(
            "{}://{}@{}:{}?security=reality&fp={}&pbk={}&sni={}&sid={}#{}",
            SCHEME,
            config.uuid,
            config.domain,
            config.public_port,
            config.fingerprint,
            config.keys.public,
            config.fake_domain,
            config.short_id,
            REALITY_LABEL
        ),
    }
}
