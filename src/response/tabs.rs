//! Which result viewers to show for the current response

use crate::lookup::{LinkValidator, TemplateLookup, ToolkitLookup, TOOLKIT_PLAYGROUND_LINK};
use crate::types::{Mode, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseTabKind {
    Preview,
    Headers,
    Snippets,
    Toolkit,
    AdaptiveCards,
}

impl ResponseTabKind {
    pub fn label(self) -> &'static str {
        match self {
            ResponseTabKind::Preview => "Response Preview",
            ResponseTabKind::Headers => "Response Headers",
            ResponseTabKind::Snippets => "Snippets",
            ResponseTabKind::Toolkit => "Graph toolkit",
            ResponseTabKind::AdaptiveCards => "Adaptive Cards",
        }
    }

    /// Stable key, also used as the component name in logs
    pub fn item_key(self) -> &'static str {
        match self {
            ResponseTabKind::Preview => "response-preview",
            ResponseTabKind::Headers => "response-headers",
            ResponseTabKind::Snippets => "code-snippets",
            ResponseTabKind::Toolkit => "toolkit-component",
            ResponseTabKind::AdaptiveCards => "adaptive-cards",
        }
    }

    /// Viewers whose content is loaded on first activation
    pub fn is_deferred(self) -> bool {
        matches!(
            self,
            ResponseTabKind::Snippets | ResponseTabKind::Toolkit | ResponseTabKind::AdaptiveCards
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTab {
    pub kind: ResponseTabKind,
    /// Supplementary content exists for this response
    pub marker: bool,
}

/// Tabs available in `mode`, in display order
pub fn tabs_for_mode(mode: Mode) -> &'static [ResponseTabKind] {
    use ResponseTabKind::*;
    match mode {
        Mode::Complete => &[Preview, Headers, Snippets, Toolkit, AdaptiveCards],
        Mode::TryIt => &[Preview, Headers],
    }
}

/// Build the ordered tab list for the current response and query
pub fn compose_tabs<L>(
    mode: Mode,
    body: &str,
    query: &Query,
    lookups: &L,
    validator: &dyn LinkValidator,
) -> Vec<ResponseTab>
where
    L: TemplateLookup + ToolkitLookup + ?Sized,
{
    tabs_for_mode(mode)
        .iter()
        .map(|&kind| {
            let marker = match kind {
                ResponseTabKind::AdaptiveCards => adaptive_card_present(body, query, lookups),
                ResponseTabKind::Toolkit => toolkit_present(body, query, lookups, validator),
                _ => false,
            };
            ResponseTab { kind, marker }
        })
        .collect()
}

fn adaptive_card_present<L: TemplateLookup + ?Sized>(body: &str, query: &Query, lookups: &L) -> bool {
    !body.is_empty() && lookups.lookup_template(query).is_some()
}

fn toolkit_present<L: ToolkitLookup + ?Sized>(
    body: &str,
    query: &Query,
    lookups: &L,
    validator: &dyn LinkValidator,
) -> bool {
    if body.is_empty() {
        return false;
    }

    match lookups.lookup_toolkit_url(query).both() {
        Some((toolkit_url, _)) => {
            validator.validate_external_link(toolkit_url, TOOLKIT_PLAYGROUND_LINK, None, query);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardTemplate;
    use crate::lookup::ToolkitUrls;
    use std::cell::RefCell;

    /// Lookups returning fixed answers regardless of query
    struct FixedLookups {
        template: bool,
        toolkit: ToolkitUrls,
    }

    impl TemplateLookup for FixedLookups {
        fn lookup_template(&self, _query: &Query) -> Option<CardTemplate> {
            self.template.then(|| CardTemplate {
                method: "GET".to_string(),
                path: "/me".to_string(),
                template: serde_json::json!({}),
            })
        }
    }

    impl ToolkitLookup for FixedLookups {
        fn lookup_toolkit_url(&self, _query: &Query) -> ToolkitUrls {
            self.toolkit.clone()
        }
    }

    #[derive(Default)]
    struct RecordingValidator {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl LinkValidator for RecordingValidator {
        fn validate_external_link(
            &self,
            url: &str,
            component_name: &str,
            _context: Option<&str>,
            _query: &Query,
        ) {
            self.calls
                .borrow_mut()
                .push((url.to_string(), component_name.to_string()));
        }
    }

    fn everything() -> FixedLookups {
        FixedLookups {
            template: true,
            toolkit: ToolkitUrls {
                toolkit_url: Some("https://mgt.dev/iframe".to_string()),
                example_url: Some("https://mgt.dev/story".to_string()),
            },
        }
    }

    fn marker(tabs: &[ResponseTab], kind: ResponseTabKind) -> bool {
        tabs.iter().find(|t| t.kind == kind).unwrap().marker
    }

    #[test]
    fn test_tab_count_per_mode() {
        let validator = RecordingValidator::default();
        let query = Query::default();

        let complete = compose_tabs(Mode::Complete, "", &query, &everything(), &validator);
        assert_eq!(complete.len(), 5);
        let kinds: Vec<_> = complete.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, tabs_for_mode(Mode::Complete));

        let try_it = compose_tabs(Mode::TryIt, "{}", &query, &everything(), &validator);
        assert_eq!(try_it.len(), 2);
        assert_eq!(try_it[0].kind, ResponseTabKind::Preview);
        assert_eq!(try_it[1].kind, ResponseTabKind::Headers);
    }

    #[test]
    fn test_empty_body_never_shows_markers() {
        let validator = RecordingValidator::default();
        let tabs = compose_tabs(Mode::Complete, "", &Query::default(), &everything(), &validator);
        assert!(tabs.iter().all(|t| !t.marker));
        assert!(validator.calls.borrow().is_empty());
    }

    #[test]
    fn test_markers_with_full_lookups() {
        let validator = RecordingValidator::default();
        let tabs = compose_tabs(
            Mode::Complete,
            r#"{"id":1}"#,
            &Query::default(),
            &everything(),
            &validator,
        );
        assert!(marker(&tabs, ResponseTabKind::AdaptiveCards));
        assert!(marker(&tabs, ResponseTabKind::Toolkit));
        assert!(!marker(&tabs, ResponseTabKind::Preview));
        assert!(!marker(&tabs, ResponseTabKind::Snippets));

        let calls = validator.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://mgt.dev/iframe");
        assert_eq!(calls[0].1, TOOLKIT_PLAYGROUND_LINK);
    }

    #[test]
    fn test_toolkit_marker_needs_both_urls() {
        let validator = RecordingValidator::default();
        let lookups = FixedLookups {
            template: true,
            toolkit: ToolkitUrls {
                toolkit_url: None,
                example_url: Some("x".to_string()),
            },
        };
        let tabs = compose_tabs(
            Mode::Complete,
            r#"{"id":1}"#,
            &Query::default(),
            &lookups,
            &validator,
        );
        assert!(marker(&tabs, ResponseTabKind::AdaptiveCards));
        assert!(!marker(&tabs, ResponseTabKind::Toolkit));
        assert!(validator.calls.borrow().is_empty());
    }

    #[test]
    fn test_no_template_no_card_marker() {
        let validator = RecordingValidator::default();
        let lookups = FixedLookups {
            template: false,
            toolkit: ToolkitUrls::default(),
        };
        let tabs = compose_tabs(Mode::Complete, "{}", &Query::default(), &lookups, &validator);
        assert!(tabs.iter().all(|t| !t.marker));
    }

    #[test]
    fn test_deferred_tabs() {
        assert!(!ResponseTabKind::Preview.is_deferred());
        assert!(!ResponseTabKind::Headers.is_deferred());
        assert!(ResponseTabKind::Snippets.is_deferred());
        assert!(ResponseTabKind::Toolkit.is_deferred());
        assert!(ResponseTabKind::AdaptiveCards.is_deferred());
    }
}
