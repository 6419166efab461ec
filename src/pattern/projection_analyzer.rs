use crate::{
    pattern::{select_head, CONSTRUCTOR, SIMPLE_PATH, SINGLE_CALL},
    ProjectionDescriptor,
};

pub struct ProjectionAnalyzer;

impl ProjectionAnalyzer {
    /// Select list of the query without the DISTINCT keyword, empty when there is no select clause.
    pub fn projection(query: &str) -> String {
        select_head(query)
            .and_then(|captures| captures.get(2))
            .map(|projection| projection.as_str().trim().to_string())
            .unwrap_or_default()
    }

    pub fn descriptor(query: &str) -> Option<ProjectionDescriptor> {
        let captures = select_head(query)?;
        let projection = captures.get(2)?;
        Some(Self::classify(captures.get(1).is_some(), projection.as_str()))
    }

    pub fn classify(distinct: bool, projection: &str) -> ProjectionDescriptor {
        let projection = projection.trim();

        if CONSTRUCTOR.is_match(projection) {
            return ProjectionDescriptor::ConstructorExpression;
        }

        if SIMPLE_PATH.is_match(projection) {
            return match distinct {
                true => ProjectionDescriptor::DistinctSimplePath,
                false => ProjectionDescriptor::SimplePath,
            };
        }

        match Self::single_call_name(projection) {
            Some(name) if matches!(name.as_str(), "count" | "sum" | "avg" | "min" | "max") => ProjectionDescriptor::AggregateOrCount,
            _ => ProjectionDescriptor::Complex,
        }
    }

    /// Whether the projection is exactly one top-level `count(...)` call.
    pub fn is_single_count(projection: &str) -> bool {
        Self::single_call_name(projection.trim()).is_some_and(|name| name == "count")
    }

    /// Lowercase name of the call when the projection is one balanced call and nothing else.
    fn single_call_name(projection: &str) -> Option<String> {
        let captures = SINGLE_CALL.captures(projection)?;

        let mut depth = 0i32;
        for ch in captures[2].chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {},
            }
            if depth < 0 {
                return None;
            }
        }

        match depth {
            0 => Some(captures[1].to_ascii_lowercase()),
            _ => None,
        }
    }
}
