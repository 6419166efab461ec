use std::fmt;

use crate::{criteria::{Attribute, Metamodel}, EnhancerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub owner_type: String,
    pub attribute: Attribute,
}

/// A dotted property path checked segment by segment against the metamodel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    pub root_type: String,
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    pub fn from(path: &str, root_type: &str, metamodel: &Metamodel) -> Result<Self, EnhancerError> {
        if path.trim().is_empty() {
            return Err(EnhancerError::InvalidArgument("property path must not be blank".into()));
        }

        let mut segments: Vec<PathSegment> = vec![];
        let mut current = root_type.to_string();

        for name in path.trim().split('.') {
            if name.is_empty() {
                return Err(EnhancerError::InvalidArgument(format!("Invalid property path '{}'", path)));
            }

            let unknown = || EnhancerError::UnknownProperty { property: name.to_string(), type_name: current.clone() };
            let attribute = metamodel.managed_type(&current)
                .and_then(|managed_type| managed_type.attribute(name))
                .ok_or_else(unknown)?;

            segments.push(PathSegment { owner_type: current.clone(), attribute: attribute.clone() });
            current = attribute.type_name.clone();
        }

        Ok(Self { root_type: root_type.to_string(), segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn leaf(&self) -> &PathSegment {
        // a path always has at least one segment once built
        &self.segments[self.segments.len() - 1]
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.segments.iter().map(|segment| segment.attribute.name.as_str()).collect::<Vec<_>>();
        write!(f, "{}", names.join("."))
    }
}
