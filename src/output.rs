//! Console output for connection details.
//!
//! stdout carries only what the operator copies (banner or JSON); logs go
//! to stderr through tracing.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use serde::Serialize;
use serde_json::json;

use crate::link::ConnectionInfo;

const BANNER: &str = "======================================";

/// Output control settings from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct OutputControls {
    pub json: bool,
}

impl OutputControls {
    /// Render serializable data as pretty JSON.
    pub fn emit_json<T: Serialize>(&self, data: &T) -> String {
        serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render connection details as JSON or the human banner.
    pub fn emit_connection(&self, info: &ConnectionInfo) -> String {
        if self.json {
            return self.emit_json(info);
        }
        format!(
            "{BANNER}\nDomain: {}\nWS Path: {}\nNode Link: {}\n{BANNER}",
            info.domain, info.path, info.link
        )
    }

    pub fn print_connection(&self, info: &ConnectionInfo) {
        println!("{}", self.emit_connection(info));
    }
}

/// Format error as JSON.
pub fn format_error(step: &str, error: &str) -> String {
    serde_json::to_string(&json!({
        "success": false,
        "step": step,
        "error": error,
    }))
    .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportMode;

    fn info() -> ConnectionInfo {
        ConnectionInfo {
            domain: "example.fly.dev".to_string(),
            path: "/wsabcd1234".to_string(),
            transport: TransportMode::Websocket,
            link: "vless://id@example.fly.dev:443".to_string(),
        }
    }

    #[test]
    fn test_banner_output() {
        let text = OutputControls::default().emit_connection(&info());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], "Domain: example.fly.dev");
        assert_eq!(lines[2], "WS Path: /wsabcd1234");
        assert_eq!(lines[3], "Node Link: vless://id@example.fly.dev:443");
        assert_eq!(lines[4], BANNER);
    }

    #[test]
    fn test_json_output() {
        let controls = OutputControls { json: true };
        let value: serde_json::Value =
            serde_json::from_str(&controls.emit_connection(&info())).unwrap();
        assert_eq!(value["domain"], "example.fly.dev");
        assert_eq!(value["transport"], "ws");
        assert_eq!(value["link"], "vless://id@example.fly.dev:443");
    }

    #[test]
    fn test_format_error() {
        let value: serde_json::Value =
            serde_json::from_str(&format_error("spawn", "not found")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["step"], "spawn");
    }
}
