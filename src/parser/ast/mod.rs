pub mod span;
pub use span::*;

pub mod select_clause;
pub use select_clause::*;

pub mod range;
pub use range::*;

pub mod join;
pub use join::*;

pub mod order_by;
pub use order_by::*;

pub mod statement;
pub use statement::*;
