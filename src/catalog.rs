//! Sample query catalog
//!
//! The catalog bundles everything the explorer browses without a network
//! round trip: sample queries, resource paths, permission scopes, adaptive
//! card templates and toolkit component links. A JSON file with the same
//! shape can replace the bundled copy (`explorer.catalog_path` in config).

use crate::types::{ResourceLink, SampleQuery, ScopeInfo};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const BUNDLED_CATALOG: &str = include_str!("../assets/catalog.json");

/// Card template registered for a verb + path pattern
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardTemplate {
    pub method: String,
    /// Path after the version segment; `{name}` segments match anything
    pub path: String,
    pub template: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolkitEntry {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub toolkit_url: Option<String>,
    #[serde(default)]
    pub example_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub samples: Vec<SampleQuery>,
    #[serde(default)]
    pub resources: Vec<ResourceLink>,
    #[serde(default)]
    pub scopes: Vec<ScopeInfo>,
    #[serde(default)]
    pub card_templates: Vec<CardTemplate>,
    #[serde(default)]
    pub toolkit: Vec<ToolkitEntry>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self> {
        serde_json::from_str(BUNDLED_CATALOG).context("bundled catalog is not valid JSON")
    }

    /// Load from `path` when given, otherwise use the bundled catalog
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::bundled();
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse catalog {}", path.display()))
    }
}

/// Match a relative path against a catalog pattern, case-insensitively.
/// `{id}` style segments match any single segment.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.trim_matches('/').split('/').collect();
    let path_segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    pattern_segments.len() == path_segments.len()
        && pattern_segments
            .iter()
            .zip(&path_segments)
            .all(|(pat, seg)| {
                (pat.starts_with('{') && pat.ends_with('}')) || pat.eq_ignore_ascii_case(seg)
            })
}
