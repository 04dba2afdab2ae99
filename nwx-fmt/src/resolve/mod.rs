//! Vocabulary resolvers

pub mod hierarchy;
pub mod locale_name;

pub use hierarchy::HierarchyResolver;
pub use locale_name::name;
