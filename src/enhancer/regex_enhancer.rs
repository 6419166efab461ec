use indexmap::IndexSet;

use crate::{
    enhancer::QueryEnhancer,
    pattern::{self, ProjectionAnalyzer},
    sorting::SortInjector,
    AliasResolution, DeclaredQuery, EnhancerConfig, EnhancerError, ProjectionDescriptor, Sort,
};

/// Pattern-based backend. Works on the raw text and never on native statements.
#[derive(Debug, Clone)]
pub struct RegexQueryEnhancer {
    query: DeclaredQuery,
    default_alias: String,
}

impl RegexQueryEnhancer {
    pub fn new(query: DeclaredQuery, config: &EnhancerConfig) -> Self {
        Self { query, default_alias: config.default_alias.clone() }
    }

    fn object_query(&self) -> Result<&str, EnhancerError> {
        if self.query.is_native() {
            return Err(EnhancerError::unsupported(self.query.query_string(), "native queries are not supported by the regex enhancer"));
        }
        Ok(self.query.query_string())
    }
}

impl QueryEnhancer for RegexQueryEnhancer {
    fn query(&self) -> &DeclaredQuery {
        &self.query
    }

    fn resolve_alias(&self) -> Result<AliasResolution, EnhancerError> {
        Ok(pattern::resolve_alias(self.object_query()?))
    }

    fn outer_join_aliases(&self) -> Result<IndexSet<String>, EnhancerError> {
        Ok(pattern::outer_join_aliases(self.object_query()?))
    }

    fn projection(&self) -> Result<String, EnhancerError> {
        Ok(ProjectionAnalyzer::projection(self.object_query()?))
    }

    fn projection_descriptor(&self) -> Result<Option<ProjectionDescriptor>, EnhancerError> {
        Ok(ProjectionAnalyzer::descriptor(self.object_query()?))
    }

    fn create_count_query(&self) -> Result<String, EnhancerError> {
        pattern::create_count_query_for(self.object_query()?)
    }

    fn apply_sorting(&self, sort: &Sort, alias: Option<&str>) -> Result<String, EnhancerError> {
        let query = self.object_query()?;
        if sort.is_empty() {
            return Ok(query.to_string());
        }
        EnhancerError::ensure_text(query)?;

        let alias = match alias {
            Some(alias) => alias.to_string(),
            None => self.detect_alias()?.unwrap_or_else(|| self.default_alias.clone()),
        };

        SortInjector::apply_sorting(query, sort, Some(&alias))
    }

    fn supports_native_queries(&self) -> bool {
        false
    }
}
