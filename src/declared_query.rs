use std::fmt;

use crate::query_utils;

/// A query as declared by its source, plus whether it bypasses the object-query grammar.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DeclaredQuery {
    text: String,
    native: bool,
}

impl DeclaredQuery {
    pub fn of(text: &str) -> Self {
        Self { text: text.to_string(), native: false }
    }

    pub fn native(text: &str) -> Self {
        Self { text: text.to_string(), native: true }
    }

    pub fn query_string(&self) -> &str {
        &self.text
    }

    pub fn is_native(&self) -> bool {
        self.native
    }

    pub fn has_named_parameter(&self) -> bool {
        query_utils::has_named_parameter(&self.text)
    }
}

impl fmt::Display for DeclaredQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Debug for DeclaredQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.native {
            true => write!(f, "DeclaredQuery::Native({})", self.text),
            false => write!(f, "DeclaredQuery({})", self.text),
        }
    }
}
