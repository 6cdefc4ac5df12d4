//! Lookups keyed by the active query, plus external link validation

use crate::catalog::{path_matches, CardTemplate, Catalog};
use crate::types::Query;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tag attached to toolkit playground link validations
pub const TOOLKIT_PLAYGROUND_LINK: &str = "graph toolkit playground link";

pub trait TemplateLookup {
    fn lookup_template(&self, query: &Query) -> Option<CardTemplate>;
}

/// Result of a toolkit lookup. Either URL may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolkitUrls {
    pub toolkit_url: Option<String>,
    pub example_url: Option<String>,
}

impl ToolkitUrls {
    /// Both URLs, or nothing
    pub fn both(&self) -> Option<(&str, &str)> {
        match (&self.toolkit_url, &self.example_url) {
            (Some(toolkit), Some(example)) => Some((toolkit.as_str(), example.as_str())),
            _ => None,
        }
    }
}

pub trait ToolkitLookup {
    fn lookup_toolkit_url(&self, query: &Query) -> ToolkitUrls;
}

/// Fire-and-forget check that an outbound link still resolves
pub trait LinkValidator {
    fn validate_external_link(
        &self,
        url: &str,
        component_name: &str,
        context: Option<&str>,
        query: &Query,
    );
}

impl TemplateLookup for Catalog {
    fn lookup_template(&self, query: &Query) -> Option<CardTemplate> {
        let path = query.relative_path();
        self.card_templates
            .iter()
            .find(|t| {
                t.method.eq_ignore_ascii_case(&query.selected_verb) && path_matches(&t.path, &path)
            })
            .cloned()
    }
}

impl ToolkitLookup for Catalog {
    fn lookup_toolkit_url(&self, query: &Query) -> ToolkitUrls {
        let path = query.relative_path();
        self.toolkit
            .iter()
            .find(|t| {
                t.method.eq_ignore_ascii_case(&query.selected_verb) && path_matches(&t.path, &path)
            })
            .map(|t| ToolkitUrls {
                toolkit_url: t.toolkit_url.clone(),
                example_url: t.example_url.clone(),
            })
            .unwrap_or_default()
    }
}

/// Validates each distinct link once per session with a HEAD request,
/// reporting broken links through tracing
#[derive(Debug, Default)]
pub struct TelemetryLinkValidator {
    checked: Mutex<HashSet<String>>,
}

impl TelemetryLinkValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkValidator for TelemetryLinkValidator {
    fn validate_external_link(
        &self,
        url: &str,
        component_name: &str,
        context: Option<&str>,
        query: &Query,
    ) {
        let first_time = self
            .checked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string());
        if !first_time {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(%url, "no runtime, skipping link validation");
            return;
        };

        let url = url.to_string();
        let component_name = component_name.to_string();
        let context = context.map(str::to_string);
        let query_url = query.sample_url.clone();

        handle.spawn(async move {
            let client = reqwest::Client::new();
            match client
                .head(&url)
                .timeout(Duration::from_secs(10))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    debug!(%url, component = %component_name, "external link ok");
                }
                Ok(response) => {
                    info!(
                        %url,
                        component = %component_name,
                        context = context.as_deref().unwrap_or(""),
                        query = %query_url,
                        status = response.status().as_u16(),
                        "broken external link"
                    );
                }
                Err(e) => {
                    warn!(%url, component = %component_name, error = %e, "external link check failed");
                }
            }
        });
    }
}
