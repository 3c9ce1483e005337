//! In-memory content tree loaded from a JSON repository export.
//!
//! JSON shape (Sling JSON export):
//! {
//!   "apps": {
//!     "core": {
//!       "text": {
//!         "jcr:primaryType": "cq:Component",      // property, ignored
//!         "sling:resourceSuperType": "core/base",  // super type
//!         "text.html": {},                         // child node
//!         "clientlibs": { ... }
//!       }
//!     }
//!   }
//! }
//!
//! Objects are nodes, keys are child names in document order, everything else
//! is a property. The document itself is the root node `/`.

use crate::Result;
use crate::diagnostics;
use crate::tree::resource::{Resource, ResourceResolver};

use anyhow::{Context, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;

pub const SUPER_TYPE_PROPERTY: &str = "sling:resourceSuperType";

/// Search paths tried, in order, for resource types without a leading `/`.
pub const DEFAULT_SEARCH_PATHS: [&str; 2] = ["/apps", "/libs"];

#[derive(Debug, Clone)]
struct Node {
    super_type: Option<String>,
    /// Child paths in document order.
    children: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ContentTree {
    nodes: BTreeMap<String, Node>,
    search_paths: Vec<String>,
}

impl ContentTree {
    /// Load a tree from a JSON export on disk.
    pub fn from_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| diagnostics::error_message(format!("read content tree {}", path)))?;
        let value: Value = serde_json::from_str(&text).with_context(|| {
            diagnostics::error_message(format!("content tree {} is not valid JSON", path))
        })?;
        Self::from_value(&value)
            .with_context(|| diagnostics::error_message(format!("load content tree {}", path)))
    }

    /// Build a tree from an already parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(_) = value else {
            bail!(
                "{}",
                diagnostics::error_message("content tree root must be a JSON object")
            );
        };

        let mut nodes = BTreeMap::new();
        insert_node("/", value, &mut nodes)?;

        Ok(Self {
            nodes,
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Replace the search paths used for relative resource types.
    ///
    /// Every search path must be absolute.
    pub fn with_search_paths<I, S>(mut self, search_paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalized = Vec::new();
        for search_path in search_paths {
            let search_path = search_path.into();
            if !search_path.starts_with('/') {
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "search path {:?} must start with '/'",
                        search_path
                    ))
                );
            }
            normalized.push(normalize_path(&search_path));
        }
        self.search_paths = normalized;
        Ok(self)
    }

    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn resource_at(&self, path: &str) -> Option<Resource> {
        self.nodes
            .get(path)
            .map(|node| Resource::new(path, node.super_type.clone()))
    }
}

impl ResourceResolver for ContentTree {
    fn get_resource(&self, path: &str) -> Option<Resource> {
        if path.starts_with('/') {
            return self.resource_at(&normalize_path(path));
        }

        let relative = path.trim_end_matches('/');
        if relative.is_empty() {
            return None;
        }
        self.search_paths
            .iter()
            .find_map(|base| self.resource_at(&join(base, relative)))
    }

    fn list_children(&self, resource: &Resource) -> Vec<Resource> {
        let Some(node) = self.nodes.get(&resource.path) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|child| self.resource_at(child))
            .collect()
    }
}

fn insert_node(path: &str, value: &Value, nodes: &mut BTreeMap<String, Node>) -> Result<()> {
    let Value::Object(map) = value else {
        return Ok(());
    };

    let mut super_type = None;
    let mut children = Vec::new();
    for (key, child) in map {
        match child {
            Value::Object(_) => {
                if key.is_empty() || key.contains('/') {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!(
                            "invalid node name {:?} under {}",
                            key, path
                        ))
                    );
                }
                let child_path = join(path, key);
                insert_node(&child_path, child, nodes)?;
                children.push(child_path);
            }
            Value::String(s) if key == SUPER_TYPE_PROPERTY => {
                let s = s.trim();
                if !s.is_empty() {
                    super_type = Some(s.to_string());
                }
            }
            _ if key == SUPER_TYPE_PROPERTY => {
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "{} on {} must be a string",
                        SUPER_TYPE_PROPERTY, path
                    ))
                );
            }
            // Plain properties carry nothing we resolve against.
            _ => {}
        }
    }

    nodes.insert(
        path.to_string(),
        Node {
            super_type,
            children,
        },
    );
    Ok(())
}

fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Strip trailing slashes, keeping `/` for the root.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ContentTree {
        ContentTree::from_value(&json!({
            "apps": {
                "site": {
                    "title": {
                        "sling:resourceSuperType": "core/title",
                        "title.html": {}
                    }
                }
            },
            "libs": {
                "core": {
                    "title": {
                        "jcr:primaryType": "cq:Component",
                        "title.html": {},
                        "README.md": {},
                        "clientlibs": { "js": {} }
                    }
                },
                "site": { "title": {} }
            }
        }))
        .unwrap()
    }

    fn names(tree: &ContentTree, path: &str) -> Vec<String> {
        let r = tree.get_resource(path).unwrap();
        tree.list_children(&r).into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn children_keep_document_order() {
        let tree = sample();
        assert_eq!(
            names(&tree, "/libs/core/title"),
            vec!["title.html", "README.md", "clientlibs"]
        );
    }

    #[test]
    fn super_type_is_read_from_property() {
        let tree = sample();
        let r = tree.get_resource("/apps/site/title").unwrap();
        assert_eq!(r.resource_super_type.as_deref(), Some("core/title"));
        assert_eq!(tree.get_resource("/libs/core/title").unwrap().resource_super_type, None);
    }

    #[test]
    fn relative_types_use_search_paths_in_order() {
        let tree = sample();
        assert_eq!(tree.get_resource("site/title").unwrap().path, "/apps/site/title");
        assert_eq!(tree.get_resource("core/title").unwrap().path, "/libs/core/title");

        let libs_first = sample().with_search_paths(["/libs/", "/apps"]).unwrap();
        assert_eq!(libs_first.search_paths(), ["/libs", "/apps"]);
        assert_eq!(
            libs_first.get_resource("site/title").unwrap().path,
            "/libs/site/title"
        );
    }

    #[test]
    fn default_search_paths_and_node_count() {
        let tree = sample();
        assert_eq!(tree.search_paths(), DEFAULT_SEARCH_PATHS);
        // root, apps, site, title, title.html, libs, core, title, title.html,
        // README.md, clientlibs, js, site, title
        assert_eq!(tree.node_count(), 14);
    }

    #[test]
    fn relative_search_paths_are_rejected() {
        let err = sample().with_search_paths(["/apps", "libs"]).unwrap_err();
        assert!(err.to_string().contains("\"libs\""), "{}", err);
        assert!(sample().with_search_paths([""]).is_err());
    }

    #[test]
    fn missing_paths_are_absent() {
        let tree = sample();
        assert!(tree.get_resource("/apps/nope").is_none());
        assert!(tree.get_resource("nope/nothing").is_none());
        assert!(tree.get_resource("").is_none());
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let tree = sample();
        assert_eq!(tree.get_resource("/libs/core/").unwrap().path, "/libs/core");
        assert_eq!(tree.get_resource("/").unwrap().path, "/");
    }

    #[test]
    fn rejects_non_object_root_and_bad_super_type() {
        assert!(ContentTree::from_value(&json!(["a"])).is_err());
        assert!(
            ContentTree::from_value(&json!({ "a": { "sling:resourceSuperType": 3 } })).is_err()
        );
    }
}
