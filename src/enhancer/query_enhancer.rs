use indexmap::IndexSet;

use crate::{AliasResolution, DeclaredQuery, EnhancerError, ProjectionDescriptor, Sort};

/// Structural analysis and rewriting of one declared query.
/// Implementations are immutable once built and can be shared between threads.
pub trait QueryEnhancer: Send + Sync {
    fn query(&self) -> &DeclaredQuery;

    fn resolve_alias(&self) -> Result<AliasResolution, EnhancerError>;

    /// Alias of the primary range. With several ranges the first one wins.
    fn detect_alias(&self) -> Result<Option<String>, EnhancerError> {
        let query = self.query().query_string();
        let alias = self.resolve_alias()?.into_primary(query);
        tracing::trace!(query, alias = ?alias, "detected alias");
        Ok(alias)
    }

    fn outer_join_aliases(&self) -> Result<IndexSet<String>, EnhancerError>;

    fn projection(&self) -> Result<String, EnhancerError>;

    fn projection_descriptor(&self) -> Result<Option<ProjectionDescriptor>, EnhancerError>;

    fn create_count_query(&self) -> Result<String, EnhancerError>;

    /// Applies the sort; without an explicit alias the detected one is used, falling back to
    /// the configured default alias.
    fn apply_sorting(&self, sort: &Sort, alias: Option<&str>) -> Result<String, EnhancerError>;

    fn supports_native_queries(&self) -> bool;
}
