use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rdf::{FieldMapper, LiteralKind, MappingRule, Quoting};
use serde::Deserialize;

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) fedora: FedoraConfig,
    pub(crate) sparql: SparqlConfig,
    pub(crate) mapping: MappingConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct FedoraConfig {
    /// Container root, e.g. `http://localhost:8080/rest`
    pub(crate) base_url: String,
    /// Per request timeout, 0 disables it
    pub(crate) timeout_ms: u64,
    /// Extra attempts after a 5xx response or a connect/timeout failure
    pub(crate) retries: u32,
    pub(crate) retry_backoff_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct SparqlConfig {
    pub(crate) escape_literals: bool,
}

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct MappingConfig {
    pub(crate) extra: Vec<ExtraRuleConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct ExtraRuleConfig {
    pub(crate) key: String,
    pub(crate) predicate: String,
    pub(crate) kind: String,
    pub(crate) pointer: String,
}

impl Default for FedoraConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/rest".to_string(),
            timeout_ms: 0,
            retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl Default for SparqlConfig {
    fn default() -> Self {
        Self {
            escape_literals: true,
        }
    }
}

impl Default for ExtraRuleConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            predicate: String::new(),
            kind: "string_literal".to_string(),
            pointer: String::new(),
        }
    }
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("unable to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Built-in DesignSafe rules followed by the configured extra rules.
    pub(crate) fn field_mapper(&self) -> Result<FieldMapper> {
        let extra = self
            .mapping
            .extra
            .iter()
            .map(ExtraRuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldMapper::with_extra(extra))
    }

    pub(crate) fn quoting(&self) -> Quoting {
        if self.sparql.escape_literals {
            Quoting::Escaped
        } else {
            Quoting::Verbatim
        }
    }
}

impl FedoraConfig {
    pub(crate) fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub(crate) fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl ExtraRuleConfig {
    fn to_rule(&self) -> Result<MappingRule, rdf::Error> {
        let key = if self.key.is_empty() {
            &self.pointer
        } else {
            &self.key
        };
        MappingRule::pointer(
            key,
            &self.predicate,
            LiteralKind::from_tag(&self.kind),
            &self.pointer,
        )
    }
}
