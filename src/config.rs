use serde::{Deserialize, Serialize};

use crate::EnhancerError;

pub const DEFAULT_ALIAS: &str = "x";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancerKind {
    #[default]
    Regex,
    Parser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Backend used for object-query statements. Native statements always use the parser.
    pub backend: EnhancerKind,
    pub default_alias: String,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self { backend: Default::default(), default_alias: DEFAULT_ALIAS.to_string() }
    }
}

impl EnhancerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regex() -> Self {
        Self { backend: EnhancerKind::Regex, ..Default::default() }
    }

    pub fn parser() -> Self {
        Self { backend: EnhancerKind::Parser, ..Default::default() }
    }

    pub fn with_default_alias(mut self, alias: &str) -> Self { self.default_alias = alias.to_string(); self }

    pub fn from_json(text: &str) -> Result<Self, EnhancerError> {
        let config: Self = serde_json::from_str(text)?;
        if config.default_alias.trim().is_empty() {
            return Err(EnhancerError::InvalidArgument("default_alias must not be blank".into()));
        }
        Ok(config)
    }
}
