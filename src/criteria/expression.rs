use std::fmt;

use crate::{
    criteria::{Metamodel, PathSegment, PropertyPath},
    parser::ast::JoinType,
    Direction, EnhancerError, Sort,
};

/// Expression tree over a typed root, as a criteria query builder would consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Root { entity: String },
    Join { parent: Box<Expression>, attribute: String, join_type: JoinType },
    Path { parent: Box<Expression>, attribute: String },
    Lower(Box<Expression>),
}

impl Expression {
    pub fn root(entity: &str) -> Self {
        Expression::Root { entity: entity.to_string() }
    }

    pub fn join(self, attribute: &str, join_type: JoinType) -> Self {
        Expression::Join { parent: Box::new(self), attribute: attribute.to_string(), join_type }
    }

    pub fn get(self, attribute: &str) -> Self {
        Expression::Path { parent: Box::new(self), attribute: attribute.to_string() }
    }

    pub fn lower(self) -> Self {
        Expression::Lower(Box::new(self))
    }

    /// Joins from the root outwards.
    pub fn joins(&self) -> Vec<(&str, JoinType)> {
        let mut joins = match self {
            Expression::Root { .. } => vec![],
            Expression::Join { parent, .. } | Expression::Path { parent, .. } | Expression::Lower(parent) => parent.joins(),
        };

        if let Expression::Join { attribute, join_type, .. } = self {
            joins.push((attribute.as_str(), *join_type));
        }
        joins
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Root { entity } => write!(f, "{}", entity),
            Expression::Join { parent, attribute, .. } | Expression::Path { parent, attribute } => write!(f, "{}.{}", parent, attribute),
            Expression::Lower(inner) => write!(f, "lower({})", inner),
        }
    }
}

/// Walks the path from `from`: associations become LEFT joins, and once a plain attribute is
/// reached every following segment is a path.
pub fn to_expression_recursively(from: Expression, path: &PropertyPath) -> Expression {
    walk(from, path.segments(), false)
}

fn walk(from: Expression, segments: &[PathSegment], in_path: bool) -> Expression {
    let Some((segment, rest)) = segments.split_first() else {
        return from;
    };

    let attribute = &segment.attribute;
    match !in_path && attribute.kind.is_association() {
        true => walk(from.join(&attribute.name, JoinType::Left), rest, false),
        false => walk(from.get(&attribute.name), rest, true),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaOrder {
    pub expression: Expression,
    pub direction: Direction,
}

/// Turns the sort into criteria orders on `root_type`. Case is ignored only for textual terminals.
pub fn to_orders(sort: &Sort, root_type: &str, metamodel: &Metamodel) -> Result<Vec<CriteriaOrder>, EnhancerError> {
    sort.iter()
        .map(|order| {
            let path = PropertyPath::from(&order.property, root_type, metamodel)?;
            let expression = to_expression_recursively(Expression::root(root_type), &path);

            let expression = match order.ignore_case && path.leaf().attribute.is_textual() {
                true => expression.lower(),
                false => expression,
            };

            Ok(CriteriaOrder { expression, direction: order.direction })
        })
        .collect()
}
