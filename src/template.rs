//! Config template rendering.
//!
//! Templates use Go `text/template` field syntax, `{{ .Name }}`, so the
//! `config.json.template` files already shipped with deployments keep
//! working. Only plain field references are supported; anything else is a
//! syntax error rather than being copied through.
//!
//! CHANGELOG:
//! - 10/18/2026 - Added ServerNamesJSON and Path fields
//! - 10/18/2026 - Initial implementation

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::config::ResolvedConfig;
use crate::error::{BootstrapError, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

fn field_action() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").expect("static regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field { name: String, line: usize },
}

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template text. Fails on unterminated or unsupported actions.
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = text;
        let mut line = 1;

        while let Some(start) = rest.find(OPEN) {
            let (literal, after_open) = rest.split_at(start);
            line += literal.matches('\n').count();
            if !literal.is_empty() {
                segments.push(Segment::Text(literal.to_string()));
            }

            let after_open = &after_open[OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| BootstrapError::TemplateSyntax {
                line,
                message: "unclosed action".to_string(),
            })?;
            let action = after_open[..end].trim();

            if action.is_empty() {
                return Err(BootstrapError::TemplateSyntax {
                    line,
                    message: "empty action".to_string(),
                });
            }
            let name = field_action()
                .captures(action)
                .and_then(|c| c.get(1))
                .ok_or_else(|| BootstrapError::TemplateSyntax {
                    line,
                    message: format!("unsupported action '{}'", action),
                })?
                .as_str()
                .to_string();

            segments.push(Segment::Field { name, line });
            line += after_open[..end].matches('\n').count();
            rest = &after_open[end + CLOSE.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field { name, .. } => Some(name.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// Substitute every placeholder. An unknown name is an error.
    pub fn render(&self, fields: &TemplateFields) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { name, line } => {
                    let value = fields.get(name).ok_or_else(|| BootstrapError::UnknownPlaceholder {
                        name: name.clone(),
                        line: *line,
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Named values available to templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateFields {
    values: BTreeMap<&'static str, String>,
}

impl TemplateFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

impl From<&ResolvedConfig> for TemplateFields {
    fn from(config: &ResolvedConfig) -> Self {
        let server_names_json =
            serde_json::to_string(&config.server_names).unwrap_or_else(|_| "[]".to_string());

        let mut fields = TemplateFields::default();
        fields.insert("UUID", config.uuid.as_str());
        fields.insert("Port", config.port.as_str());
        fields.insert("FakeDomain", config.fake_domain.as_str());
        fields.insert("ServerNames", config.server_names.join(","));
        fields.insert("ServerNamesJSON", server_names_json);
        fields.insert("Fingerprint", config.fingerprint.as_str());
        fields.insert("PublicKey", config.keys.public.as_str());
        fields.insert("PrivateKey", config.keys.private());
        fields.insert("ShortID", config.short_id.as_str());
        fields.insert("Protocol", config.transport.as_str());
        fields.insert("Path", config.ws_path());
        fields
    }
}
