use oql_enhancer::{
    DeclaredQuery, EnhancerConfig, EnhancerError, EnhancerKind, ParsingQueryEnhancer, QueryEnhancer, RegexQueryEnhancer,
};

/// Builds the backend directly so that native queries reach it unchanged.
pub fn enhancer_for(kind: EnhancerKind, query: DeclaredQuery) -> Box<dyn QueryEnhancer> {
    match kind {
        EnhancerKind::Regex => Box::new(RegexQueryEnhancer::new(query, &EnhancerConfig::regex())),
        EnhancerKind::Parser => Box::new(ParsingQueryEnhancer::new(query, &EnhancerConfig::parser())),
    }
}

pub fn enhancer(kind: EnhancerKind, query: &str) -> Box<dyn QueryEnhancer> {
    enhancer_for(kind, DeclaredQuery::of(query))
}

/// Runs `check` on backends that support native queries; the others must refuse the query.
pub fn with_native<T>(kind: EnhancerKind, query: &str, run: impl Fn(&dyn QueryEnhancer) -> Result<T, EnhancerError>, check: impl Fn(T)) {
    let enhancer = enhancer_for(kind, DeclaredQuery::native(query));

    match (enhancer.supports_native_queries(), run(enhancer.as_ref())) {
        (true, Ok(value)) => check(value),
        (false, Err(EnhancerError::UnsupportedOperation { query: failed, .. })) => assert_eq!(failed, query),
        (supported, Ok(_)) => panic!("unexpected result for {:?} (native supported: {})", kind, supported),
        (supported, Err(err)) => panic!("unexpected error for {:?} (native supported: {}): {}", kind, supported, err),
    }
}
