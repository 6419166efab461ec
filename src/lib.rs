pub mod parser;

pub mod error;
pub use error::EnhancerError;

pub mod config;
pub use config::{EnhancerConfig, EnhancerKind, DEFAULT_ALIAS};

pub mod declared_query;
pub use declared_query::DeclaredQuery;

pub mod sort;
pub use sort::{Direction, Order, Sort};

pub mod alias;
pub use alias::AliasResolution;

pub mod projection;
pub use projection::ProjectionDescriptor;

pub mod pattern;
pub mod sorting;

pub mod enhancer;
pub use enhancer::{ParsingQueryEnhancer, QueryEnhancer, QueryEnhancerFactory, RegexQueryEnhancer};

pub mod criteria;
pub mod query_utils;
