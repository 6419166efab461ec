use crate::EnhancerError;

/// Outcome of looking up the primary alias. Several top-level ranges still yield the first
/// alias; callers that need a single range can turn that into an error with `into_unique`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasResolution {
    Unique(String),
    Ambiguous { primary: String, others: Vec<String> },
    Missing,
}

impl AliasResolution {
    pub fn primary(&self) -> Option<&str> {
        match self {
            AliasResolution::Unique(alias) | AliasResolution::Ambiguous { primary: alias, .. } => Some(alias),
            AliasResolution::Missing => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, AliasResolution::Ambiguous { .. })
    }

    pub fn into_unique(self, query: &str) -> Result<Option<String>, EnhancerError> {
        match self {
            AliasResolution::Unique(alias) => Ok(Some(alias)),
            AliasResolution::Missing => Ok(None),
            AliasResolution::Ambiguous { primary, mut others } => {
                others.insert(0, primary);
                Err(EnhancerError::AmbiguousAlias { query: query.to_string(), aliases: others })
            },
        }
    }

    pub(crate) fn into_primary(self, query: &str) -> Option<String> {
        if let AliasResolution::Ambiguous { primary, others } = &self {
            tracing::warn!(query, primary = %primary, others = ?others, "multiple FROM ranges, using the first alias");
        }

        match self {
            AliasResolution::Unique(alias) | AliasResolution::Ambiguous { primary: alias, .. } => Some(alias),
            AliasResolution::Missing => None,
        }
    }
}
