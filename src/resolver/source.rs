//! Configuration sources - where deployment parameters are read from.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use std::collections::HashMap;
use std::env::VarError;
use tracing::warn;

/// A lookup from parameter name to value.
///
/// Empty strings are treated the same as unset values by the resolver, so
/// implementations don't need to filter them.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads parameters from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env_value(key, std::env::var(key))
    }
}

/// A value that is set but not UTF-8 can't be rendered; it is reported so
/// the generated fallback never replaces it silently.
fn env_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(raw)) => {
            warn!(
                param = key,
                value = %raw.to_string_lossy(),
                "value is not valid UTF-8; ignoring it and using the default"
            );
            None
        }
    }
}

/// In-memory source, used by tests and by callers that assemble parameters
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
