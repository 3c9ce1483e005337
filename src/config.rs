//! Component configuration (files.json).
//!
//! JSON shape:
//! {
//!   "resourceTypes": ["site/components/title", "core/wcm/components/text"],
//!   "filterRegex": ".*\\.(html|js)",
//!   "inherited": true            // optional, defaults to false
//! }

use crate::Result;
use crate::diagnostics;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;

pub const OPTION_RESOURCE_TYPES: &str = "resourceTypes";
pub const OPTION_FILTER_REGEX: &str = "filterRegex";
pub const OPTION_INHERITED: &str = "inherited";
pub const OPTION_INHERITED_DEFAULT: bool = false;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFilesConfig {
    /// Root resource types, searched in this order.
    pub resource_types: Vec<String>,

    /// Regex matched against whole child names.
    pub filter_regex: String,

    /// Follow `sling:resourceSuperType` chains.
    #[serde(default = "default_inherited")]
    pub inherited: bool,
}

fn default_inherited() -> bool {
    OPTION_INHERITED_DEFAULT
}

impl ComponentFilesConfig {
    pub fn new<I, S>(resource_types: I, filter_regex: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource_types: resource_types.into_iter().map(Into::into).collect(),
            filter_regex: filter_regex.into(),
            inherited: OPTION_INHERITED_DEFAULT,
        }
    }

    pub fn with_inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| diagnostics::error_message(format!("read config file {}", path)))?;
        let config: Self = serde_json::from_str(&text).with_context(|| {
            diagnostics::error_message(format!("parse config file {}", path))
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resource_types.is_empty() {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "{} must list at least one resource type",
                    OPTION_RESOURCE_TYPES
                ))
            );
        }
        Ok(())
    }
}
