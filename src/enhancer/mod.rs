pub mod query_enhancer;
pub use query_enhancer::*;

pub mod regex_enhancer;
pub use regex_enhancer::*;

pub mod parsing_enhancer;
pub use parsing_enhancer::*;

use crate::{DeclaredQuery, EnhancerConfig, EnhancerKind};

pub struct QueryEnhancerFactory;

impl QueryEnhancerFactory {
    /// Picks the backend once for the query: native statements always go to the parser,
    /// object queries to the configured backend.
    pub fn for_query(query: DeclaredQuery, config: &EnhancerConfig) -> Box<dyn QueryEnhancer> {
        let backend = match query.is_native() {
            true => EnhancerKind::Parser,
            false => config.backend,
        };

        tracing::trace!(query = ?query, backend = ?backend, "selected query enhancer");

        match backend {
            EnhancerKind::Regex => Box::new(RegexQueryEnhancer::new(query, config)),
            EnhancerKind::Parser => Box::new(ParsingQueryEnhancer::new(query, config)),
        }
    }
}
