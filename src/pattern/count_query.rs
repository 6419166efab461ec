use crate::{
    parser::QueryComparers,
    pattern::{order_by_position, top_level_captures, ProjectionAnalyzer, ALIAS_MATCH, SELECT_HEAD},
    EnhancerError, ProjectionDescriptor,
};

/// Derives `select count(..) from ..` from a select query, dropping the trailing ORDER BY.
pub fn create_count_query_for(query: &str) -> Result<String, EnhancerError> {
    EnhancerError::ensure_text(query)?;

    let range = top_level_captures(&ALIAS_MATCH, query).next();
    let Some((from_start, alias)) = range.as_ref().and_then(|range| Some((range.get(0)?.start(), range.get(2)?))) else {
        return Err(EnhancerError::malformed(query, "no FROM clause with an alias could be located"));
    };

    if QueryComparers::is_reserved(alias.as_str()) {
        return Err(EnhancerError::malformed(query, format!("'{}' is not a valid alias", alias.as_str())));
    }

    let Some(head) = SELECT_HEAD.captures(&query[..from_start]) else {
        return Err(EnhancerError::malformed(query, "only select queries can be counted"));
    };

    let from = &query[from_start..alias.start()];
    let rest = &query[alias.end()..];
    let alias = alias.as_str();
    let distinct = head.get(1).map(|m| m.as_str().trim());
    let projection = head.get(2).map(|m| m.as_str().trim());

    let select = match projection {
        Some(projection) if ProjectionAnalyzer::is_single_count(projection) => match distinct {
            Some(distinct) => format!("select {} {}", distinct, projection),
            None => format!("select {}", projection),
        },
        Some(projection) => match ProjectionAnalyzer::classify(distinct.is_some(), projection) {
            ProjectionDescriptor::SimplePath => format!("select count({})", projection),
            ProjectionDescriptor::DistinctSimplePath => format!("select count({} {})", distinct.unwrap_or_default(), projection),
            _ => count_alias(distinct, alias),
        },
        None => count_alias(distinct, alias),
    };

    let count_query = format!("{} {}{}{}", select, from, alias, rest);
    let count_query = match order_by_position(&count_query) {
        Some(position) => count_query[..position].trim_end().to_string(),
        None => count_query,
    };

    tracing::debug!(query, count_query = %count_query, "derived count query");
    Ok(count_query)
}

fn count_alias(distinct: Option<&str>, alias: &str) -> String {
    match distinct {
        Some(distinct) => format!("select count({} {})", distinct, alias),
        None => format!("select count({})", alias),
    }
}
