use indexmap::IndexSet;

use crate::{
    parser::QueryComparers,
    pattern::{top_level_captures, ALIAS_MATCH, LEFT_JOIN, RANGE_CONTINUATION},
    AliasResolution,
};

fn as_alias(word: &str) -> Option<String> {
    match word.is_empty() || QueryComparers::is_reserved(word) {
        true => None,
        false => Some(word.to_string()),
    }
}

/// Alias of the first top-level `from <entity> [as] <alias>` range together with the ranges that
/// directly follow it.
pub fn resolve_alias(query: &str) -> AliasResolution {
    let Some(captures) = top_level_captures(&ALIAS_MATCH, query).next() else {
        return AliasResolution::Missing;
    };

    let Some(primary) = as_alias(&captures[2]) else {
        return AliasResolution::Missing;
    };

    let mut others: Vec<String> = vec![];
    let mut rest = &query[captures.get(0).map_or(query.len(), |m| m.end())..];
    while let Some(next) = RANGE_CONTINUATION.captures(rest) {
        let Some(alias) = as_alias(&next[2]) else {
            break;
        };
        others.push(alias);
        rest = &rest[next.get(0).map_or(rest.len(), |m| m.end())..];
    }

    match others.is_empty() {
        true => AliasResolution::Unique(primary),
        false => AliasResolution::Ambiguous { primary, others },
    }
}

pub fn detect_alias(query: &str) -> Option<String> {
    let alias = resolve_alias(query).into_primary(query);
    tracing::trace!(query, alias = ?alias, "detected alias");
    alias
}

pub fn outer_join_aliases(query: &str) -> IndexSet<String> {
    LEFT_JOIN.captures_iter(query)
        .filter_map(|captures| as_alias(&captures[1]))
        .collect()
}
