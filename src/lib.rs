//! Discover the files of content-repository components.
//!
//! A component is a node in a content tree whose children are its files
//! (scripts, client libraries, dialogs). [`ComponentFiles`] lists the child
//! paths of one or more component resource types that match a regex,
//! optionally following the `sling:resourceSuperType` inheritance chain.

pub mod config;
pub mod diagnostics;
pub mod files;
pub mod render;
pub mod tree;

pub use config::ComponentFilesConfig;
pub use files::ComponentFiles;
pub use tree::{ContentTree, FallbackResolver, Resource, ResourceResolver};

pub type Result<T> = anyhow::Result<T>;
