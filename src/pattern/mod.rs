pub mod patterns;
pub use patterns::*;

pub mod alias_resolver;
pub use alias_resolver::*;

pub mod projection_analyzer;
pub use projection_analyzer::*;

pub mod count_query;
pub use count_query::*;
