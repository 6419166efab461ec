use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape of a select list, which decides how a count query is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionDescriptor {
    SimplePath,
    DistinctSimplePath,
    ConstructorExpression,
    AggregateOrCount,
    Complex,
}

impl fmt::Display for ProjectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectionDescriptor::SimplePath => "SIMPLE_PATH",
            ProjectionDescriptor::DistinctSimplePath => "DISTINCT_SIMPLE_PATH",
            ProjectionDescriptor::ConstructorExpression => "CONSTRUCTOR_EXPRESSION",
            ProjectionDescriptor::AggregateOrCount => "AGGREGATE_OR_COUNT",
            ProjectionDescriptor::Complex => "COMPLEX",
        };
        write!(f, "{}", name)
    }
}
