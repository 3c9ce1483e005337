//! Content tree layer: resource handles, the resolver capability and the
//! JSON-backed in-memory tree.

pub mod content;
pub mod resource;

pub use content::{ContentTree, DEFAULT_SEARCH_PATHS, SUPER_TYPE_PROPERTY};
pub use resource::{FallbackResolver, Resource, ResourceResolver};
