//! Parameter resolution: environment values with generated fallbacks.
//!
//! A non-empty value from the [`ConfigSource`] always wins, whatever its
//! length or format. Unset values fall back to the parameter's
//! [`DefaultPolicy`], or to a fresh keypair for the reality keys.
//!
//! CHANGELOG:
//! - 10/18/2026 - Keypair only generated when a half is missing
//! - 10/18/2026 - Initial implementation

pub mod keys;
pub mod random;
pub mod source;

pub use source::{ConfigSource, MapSource, ProcessEnv};

use tracing::{debug, info, warn};

use crate::config::{ResolveOptions, ResolvedConfig, TransportMode};
use crate::error::{BootstrapError, Result};
use keys::KeyPair;

pub const UUID: &str = "UUID";
pub const PORT: &str = "PORT";
pub const FAKE_DOMAIN: &str = "FAKE_DOMAIN";
pub const SERVER_NAMES: &str = "SERVER_NAMES";
pub const FINGERPRINT: &str = "FINGERPRINT";
pub const PUBLIC_KEY: &str = "PUBLIC_KEY";
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const SHORT_ID: &str = "SHORT_ID";
pub const FALLBACK_PROTO: &str = "FALLBACK_PROTO";
pub const DOMAIN: &str = "DOMAIN";
pub const PUBLIC_PORT: &str = "PUBLIC_PORT";

pub const DEFAULT_PORT: &str = "443";
pub const DEFAULT_FAKE_DOMAIN: &str = "www.microsoft.com";
pub const DEFAULT_SERVER_NAMES: &str = "www.microsoft.com,www.google.com";
pub const DEFAULT_FINGERPRINT: &str = "chrome";
pub const PLACEHOLDER_DOMAIN: &str = "your-app.fly.dev";

/// What to do when a parameter is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Fixed literal.
    Static(&'static str),
    /// Lowercase hex string of this many characters from the secure RNG.
    RandomHex(usize),
}

/// Non-empty value for `key`, if the source has one.
pub fn lookup(source: &impl ConfigSource, key: &str) -> Option<String> {
    source.get(key).filter(|v| !v.is_empty())
}

/// Resolve one parameter against its default policy.
pub fn resolve_param(
    source: &impl ConfigSource,
    key: &str,
    policy: DefaultPolicy,
) -> Result<String> {
    if let Some(value) = lookup(source, key) {
        debug!(param = key, "using supplied value");
        return Ok(value);
    }

    match policy {
        DefaultPolicy::Static(value) => Ok(value.to_string()),
        DefaultPolicy::RandomHex(0) => Err(BootstrapError::InvalidParameter {
            name: key.to_string(),
            reason: "generated length must be at least 1".to_string(),
        }),
        DefaultPolicy::RandomHex(len) => {
            let value = random::random_hex(len)?;
            info!(param = key, len, "generated random value");
            Ok(value)
        }
    }
}

/// Resolve the reality keypair.
///
/// A supplied half is kept verbatim. A missing public half is derived from
/// a supplied private key when it decodes; otherwise the missing half comes
/// from a freshly generated pair and the mismatch is reported.
pub fn resolve_keys(source: &impl ConfigSource) -> Result<KeyPair> {
    let public = lookup(source, PUBLIC_KEY);
    let private = lookup(source, PRIVATE_KEY);

    match (public, private) {
        (Some(public), Some(private)) => {
            debug!("using supplied keypair");
            Ok(KeyPair::from_parts(public, private))
        }
        (None, Some(private)) => {
            if let Some(public) = keys::public_from_private_hex(&private) {
                info!("derived {} from {}", PUBLIC_KEY, PRIVATE_KEY);
                return Ok(KeyPair::from_parts(public, private));
            }
            let fresh = KeyPair::generate()?;
            warn!(
                "{} could not be decoded; generated {} will not match it",
                PRIVATE_KEY, PUBLIC_KEY
            );
            Ok(KeyPair::from_parts(fresh.public, private))
        }
        (Some(public), None) => {
            let fresh = KeyPair::generate()?;
            warn!(
                "{} set without {}; generated private key will not match it",
                PUBLIC_KEY, PRIVATE_KEY
            );
            Ok(KeyPair::from_parts(public, fresh.private()))
        }
        (None, None) => {
            let pair = KeyPair::generate()?;
            info!(public_key = %pair.public, "generated reality keypair");
            Ok(pair)
        }
    }
}

/// Split a comma-separated server name list.
pub fn split_server_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Build the full [`ResolvedConfig`] from a source.
pub fn resolve(source: &impl ConfigSource, options: &ResolveOptions) -> Result<ResolvedConfig> {
    let uuid = resolve_param(source, UUID, DefaultPolicy::RandomHex(options.uuid_len))?;
    let port = resolve_param(source, PORT, DefaultPolicy::Static(DEFAULT_PORT))?;
    let fake_domain = resolve_param(source, FAKE_DOMAIN, DefaultPolicy::Static(DEFAULT_FAKE_DOMAIN))?;
    let fingerprint = resolve_param(source, FINGERPRINT, DefaultPolicy::Static(DEFAULT_FINGERPRINT))?;
    let public_port = resolve_param(source, PUBLIC_PORT, DefaultPolicy::Static(DEFAULT_PORT))?;

    let mut server_names = split_server_names(&resolve_param(
        source,
        SERVER_NAMES,
        DefaultPolicy::Static(DEFAULT_SERVER_NAMES),
    )?);
    if server_names.is_empty() {
        warn!("{} has no usable entries, using defaults", SERVER_NAMES);
        server_names = split_server_names(DEFAULT_SERVER_NAMES);
    }

    let keys = resolve_keys(source)?;
    let short_id = resolve_param(source, SHORT_ID, DefaultPolicy::RandomHex(options.short_id_len))?;

    let transport = lookup(source, FALLBACK_PROTO)
        .map(|v| TransportMode::from_env_value(&v))
        .unwrap_or(options.default_transport);

    let domain = match lookup(source, DOMAIN) {
        Some(domain) => domain,
        None => {
            warn!(
                "{} is not set; set it in the platform secrets (e.g. {}=your-app.fly.dev)",
                DOMAIN, DOMAIN
            );
            PLACEHOLDER_DOMAIN.to_string()
        }
    };

    info!(%transport, port = %port, "parameters resolved");

    Ok(ResolvedConfig {
        uuid,
        port,
        fake_domain,
        server_names,
        fingerprint,
        keys,
        short_id,
        transport,
        domain,
        public_port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    fn full_source() -> MapSource {
        MapSource::new()
            .with(UUID, "11111111-1111-1111-1111-111111111111")
            .with(PORT, "8080")
            .with(FAKE_DOMAIN, "www.apple.com")
            .with(SERVER_NAMES, "a.example, b.example")
            .with(FINGERPRINT, "firefox")
            .with(PUBLIC_KEY, "PUB")
            .with(PRIVATE_KEY, "PRIV")
            .with(SHORT_ID, "xyz")
            .with(FALLBACK_PROTO, "reality")
            .with(DOMAIN, "example.fly.dev")
            .with(PUBLIC_PORT, "8443")
    }

    #[test]
    fn test_overrides_win_verbatim() {
        let config = resolve(&full_source(), &ResolveOptions::default()).unwrap();
        assert_eq!(config.uuid, "11111111-1111-1111-1111-111111111111");
        assert_eq!(config.port, "8080");
        assert_eq!(config.fake_domain, "www.apple.com");
        assert_eq!(config.server_names, vec!["a.example", "b.example"]);
        assert_eq!(config.fingerprint, "firefox");
        assert_eq!(config.keys.public, "PUB");
        assert_eq!(config.keys.private(), "PRIV");
        assert_eq!(config.short_id, "xyz");
        assert_eq!(config.transport, TransportMode::Reality);
        assert_eq!(config.domain, "example.fly.dev");
        assert_eq!(config.public_port, "8443");
    }

    #[test]
    fn test_empty_value_treated_as_unset() {
        let source = MapSource::new().with(PORT, "").with(FAKE_DOMAIN, "");
        assert_eq!(
            resolve_param(&source, PORT, DefaultPolicy::Static(DEFAULT_PORT)).unwrap(),
            "443"
        );
        assert_eq!(
            resolve_param(&source, FAKE_DOMAIN, DefaultPolicy::Static(DEFAULT_FAKE_DOMAIN)).unwrap(),
            "www.microsoft.com"
        );
    }

    #[test]
    fn test_override_not_normalized() {
        let source = MapSource::new().with(SHORT_ID, "  NOT-HEX  ");
        let value = resolve_param(&source, SHORT_ID, DefaultPolicy::RandomHex(8)).unwrap();
        assert_eq!(value, "  NOT-HEX  ");
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&MapSource::new(), &ResolveOptions::default()).unwrap();
        assert_eq!(config.port, "443");
        assert_eq!(config.public_port, "443");
        assert_eq!(config.fake_domain, "www.microsoft.com");
        assert_eq!(config.server_names, vec!["www.microsoft.com", "www.google.com"]);
        assert_eq!(config.fingerprint, "chrome");
        assert_eq!(config.transport, TransportMode::Websocket);
        assert_eq!(config.domain, PLACEHOLDER_DOMAIN);
    }

    #[test]
    fn test_generated_hex_values() {
        let options = ResolveOptions::default();
        let a = resolve(&MapSource::new(), &options).unwrap();
        let b = resolve(&MapSource::new(), &options).unwrap();

        assert_eq!(a.uuid.len(), 36);
        assert!(is_lower_hex(&a.uuid));
        assert_eq!(a.short_id.len(), 8);
        assert!(is_lower_hex(&a.short_id));

        assert_ne!(a.uuid, b.uuid);
        assert_ne!(a.short_id, b.short_id);
    }

    #[test]
    fn test_options_change_defaults() {
        let options = ResolveOptions {
            default_transport: TransportMode::Reality,
            short_id_len: 16,
            ..ResolveOptions::default()
        };
        let config = resolve(&MapSource::new(), &options).unwrap();
        assert_eq!(config.transport, TransportMode::Reality);
        assert_eq!(config.short_id.len(), 16);
    }

    #[test]
    fn test_zero_length_short_id_rejected() {
        let source = MapSource::new().with(FALLBACK_PROTO, "reality");
        let options = ResolveOptions {
            short_id_len: 0,
            ..ResolveOptions::default()
        };
        match resolve(&source, &options) {
            Err(BootstrapError::InvalidParameter { name, .. }) => assert_eq!(name, SHORT_ID),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_length_uuid_rejected() {
        let options = ResolveOptions {
            uuid_len: 0,
            ..ResolveOptions::default()
        };
        assert!(matches!(
            resolve(&MapSource::new(), &options),
            Err(BootstrapError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_zero_length_ignored_when_supplied() {
        let source = MapSource::new().with(SHORT_ID, "abcd");
        assert_eq!(
            resolve_param(&source, SHORT_ID, DefaultPolicy::RandomHex(0)).unwrap(),
            "abcd"
        );
    }

    #[test]
    fn test_env_transport_beats_option() {
        let source = MapSource::new().with(FALLBACK_PROTO, "ws");
        let options = ResolveOptions {
            default_transport: TransportMode::Reality,
            ..ResolveOptions::default()
        };
        assert_eq!(resolve(&source, &options).unwrap().transport, TransportMode::Websocket);
    }

    #[test]
    fn test_generated_keypair_matches() {
        let pair = resolve_keys(&MapSource::new()).unwrap();
        assert_eq!(
            keys::public_from_private_hex(pair.private()).as_deref(),
            Some(pair.public.as_str())
        );
    }

    #[test]
    fn test_private_only_derives_public() {
        let reference = KeyPair::generate().unwrap();
        let source = MapSource::new().with(PRIVATE_KEY, reference.private());
        let pair = resolve_keys(&source).unwrap();
        assert_eq!(pair.public, reference.public);
        assert_eq!(pair.private(), reference.private());
    }

    #[test]
    fn test_public_only_kept_verbatim() {
        let source = MapSource::new().with(PUBLIC_KEY, "operator-public");
        let pair = resolve_keys(&source).unwrap();
        assert_eq!(pair.public, "operator-public");
        assert_eq!(pair.private().len(), 128);
    }

    #[test]
    fn test_undecodable_private_kept() {
        let source = MapSource::new().with(PRIVATE_KEY, "zzzz");
        let pair = resolve_keys(&source).unwrap();
        assert_eq!(pair.private(), "zzzz");
        assert_eq!(pair.public.len(), 64);
    }

    #[test]
    fn test_server_names_fallback_when_blank() {
        let source = MapSource::new().with(SERVER_NAMES, " , ,");
        let config = resolve(&source, &ResolveOptions::default()).unwrap();
        assert_eq!(config.server_names, vec!["www.microsoft.com", "www.google.com"]);
    }

    #[test]
    fn test_split_server_names() {
        assert_eq!(split_server_names("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_server_names("").is_empty());
    }
}
