pub mod metamodel;
pub use metamodel::*;

pub mod property_path;
pub use property_path::*;

pub mod expression;
pub use expression::*;
