//! Component file discovery.
//!
//! For each configured resource type, list the children of its component node
//! whose names fully match the filter regex, then (optionally) do the same for
//! every type up the `sling:resourceSuperType` chain.
//!
//! Output order: declared resource types in order, each followed by its super
//! type chain; within one type, repository child order. A resource type that
//! was already visited in the same pass is skipped, which both terminates
//! cyclic super type chains and keeps shared ancestors from being listed twice.

use crate::Result;
use crate::config::{ComponentFilesConfig, OPTION_FILTER_REGEX};
use crate::diagnostics;
use crate::tree::{Resource, ResourceResolver};

use anyhow::Context;
use regex::Regex;
use std::cell::OnceCell;
use std::collections::HashSet;

pub struct ComponentFiles<R> {
    resolver: R,
    resource_types: Vec<String>,
    pattern: Regex,
    inherited: bool,
    paths: OnceCell<Vec<String>>,
}

impl<R: ResourceResolver> ComponentFiles<R> {
    /// Validate the configuration and compile the filter pattern.
    ///
    /// Fails on an empty resource type list or an invalid regex; nothing is
    /// resolved until [`ComponentFiles::paths`] is first called.
    pub fn new(config: ComponentFilesConfig, resolver: R) -> Result<Self> {
        config.validate()?;
        let pattern = compile_full_match(&config.filter_regex)?;

        Ok(Self {
            resolver,
            resource_types: config.resource_types,
            pattern,
            inherited: config.inherited,
            paths: OnceCell::new(),
        })
    }

    /// Matching file paths, computed on first call and cached afterwards.
    pub fn paths(&self) -> &[String] {
        self.paths.get_or_init(|| {
            let mut paths = Vec::new();
            let mut seen = HashSet::new();
            for resource_type in &self.resource_types {
                if !self.collect(Some(resource_type), &mut paths, &mut seen) {
                    diagnostics::warn(format!(
                        "resource type {} not found in content tree",
                        resource_type
                    ));
                }
            }
            tracing::debug!(count = paths.len(), "component files resolved");
            paths
        })
    }

    pub fn resource_types(&self) -> &[String] {
        &self.resource_types
    }

    pub fn inherited(&self) -> bool {
        self.inherited
    }

    /// Append the matching children of `resource_type` (and its super types
    /// when inheritance is on) to `paths`.
    ///
    /// Returns false if `resource_type` itself did not resolve.
    fn collect(
        &self,
        resource_type: Option<&str>,
        paths: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) -> bool {
        let mut current = resource_type.map(str::to_string);
        let mut depth = 0usize;

        while let Some(resource_type) = current.take() {
            let Some(resource) = self.resolve(Some(resource_type.as_str())) else {
                return depth > 0;
            };

            // Keyed on the resolved node so `a`, `/apps/a` and `/apps/a/` are one type.
            if !seen.insert(resource.path.clone()) {
                tracing::debug!(
                    resource_type = %resource_type,
                    path = %resource.path,
                    "resource type already visited, skipping"
                );
                return true;
            }

            for child in self.resolver.list_children(&resource) {
                if self.pattern.is_match(&child.name) {
                    tracing::trace!(path = %child.path, "matched");
                    paths.push(child.path);
                }
            }

            if self.inherited {
                current = resource.resource_super_type;
            }
            depth += 1;
        }
        true
    }

    fn resolve(&self, resource_type: Option<&str>) -> Option<Resource> {
        self.resolver.get_resource(resource_type?)
    }
}

/// Compile `pattern` so that it only matches whole strings.
fn compile_full_match(pattern: &str) -> Result<Regex> {
    // Validate the user pattern on its own so the anchoring group cannot
    // turn an unbalanced pattern into a valid one.
    Regex::new(pattern).with_context(|| {
        diagnostics::error_message(format!("invalid {} {:?}", OPTION_FILTER_REGEX, pattern))
    })?;
    let anchored = Regex::new(&format!("^(?:{})$", pattern)).with_context(|| {
        diagnostics::error_message(format!("invalid {} {:?}", OPTION_FILTER_REGEX, pattern))
    })?;
    Ok(anchored)
}
