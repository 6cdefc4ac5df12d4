use crate::clouds::CloudDescriptor;
use crate::response::{ResponseTabKind, TabLoad};
use crate::types::{
    Dimensions, GraphResponse, HistoryItem, InputMode, Mode, PanelFocus, Query, ResourceLink,
    SampleQuery, Scopes, SidebarProperties, SnippetCache, Status, Theme, ThemeReader, User,
};
use std::collections::HashMap;

/// Cloud selector dialog flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudDialogState {
    pub open: bool,
    /// Show the "access another cloud?" sub-text
    pub prompt: bool,
    pub highlighted: usize,
}

/// Everything the views render from. One instance per session, mutated only
/// through `apply_action`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth_token: Option<String>,
    pub cloud: Option<CloudDescriptor>,
    pub consented_scopes: Vec<String>,
    pub dimensions: Dimensions,
    pub mode: Mode,
    pub graph_response: GraphResponse,
    pub history: Vec<HistoryItem>,
    pub is_loading_data: bool,
    pub permissions_panel_open: bool,
    pub response_area_expanded: bool,
    /// Absent until a token is supplied and the profile is fetched
    pub profile: Option<User>,
    pub query_runner_status: Option<Status>,
    pub sample_query: Query,
    pub samples: Vec<SampleQuery>,
    pub scopes: Scopes,
    pub sidebar: SidebarProperties,
    pub snippets: SnippetCache,
    /// Terms-of-use banner still showing (not yet accepted)
    pub terms_of_use: bool,
    pub theme: Theme,

    pub input_mode: InputMode,
    pub token_input: String,
    pub search_query: String,
    pub panel_focus: PanelFocus,
    pub active_response_tab: ResponseTabKind,
    pub tab_loads: HashMap<ResponseTabKind, TabLoad>,
    pub cloud_dialog: CloudDialogState,
    pub resources: Vec<ResourceLink>,
    /// Last selection reported by the resource list
    pub selected_resources: Vec<ResourceLink>,
    pub highlighted_scope: usize,

    /// Scroll offset for the active response tab (lines)
    pub response_scroll: usize,
    pub yank_flash: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            auth_token: None,
            cloud: None,
            consented_scopes: Vec::new(),
            dimensions: Dimensions::default(),
            mode: Mode::Complete,
            graph_response: GraphResponse::default(),
            history: Vec::new(),
            is_loading_data: false,
            permissions_panel_open: false,
            response_area_expanded: false,
            profile: None,
            query_runner_status: None,
            sample_query: Query::default(),
            samples: Vec::new(),
            scopes: Scopes::default(),
            sidebar: SidebarProperties::default(),
            snippets: SnippetCache::default(),
            terms_of_use: true,
            theme: Theme::Dark,
            input_mode: InputMode::Normal,
            token_input: String::new(),
            search_query: String::new(),
            panel_focus: PanelFocus::Sidebar,
            active_response_tab: ResponseTabKind::Preview,
            tab_loads: HashMap::new(),
            cloud_dialog: CloudDialogState::default(),
            resources: Vec::new(),
            selected_resources: Vec::new(),
            highlighted_scope: 0,
            response_scroll: 0,
            yank_flash: false,
        }
    }
}

impl AppState {
    pub fn tab_load(&self, kind: ResponseTabKind) -> &TabLoad {
        const NOT_STARTED: &TabLoad = &TabLoad::NotStarted;
        self.tab_loads.get(&kind).unwrap_or(NOT_STARTED)
    }

    /// Samples matching the search filter, in catalog order
    pub fn visible_samples(&self) -> Vec<&SampleQuery> {
        self.samples
            .iter()
            .filter(|s| self.search_query.is_empty() || s.matches(&self.search_query))
            .collect()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Base URL of the active cloud, or the global default
    pub fn base_url(&self) -> String {
        self.cloud
            .as_ref()
            .map(|c| c.base_url.clone())
            .unwrap_or_else(|| crate::clouds::global_cloud().base_url)
    }
}

impl ThemeReader for AppState {
    fn current_theme(&self) -> Theme {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, name: &str) -> SampleQuery {
        SampleQuery {
            id: id.to_string(),
            category: "Users".to_string(),
            method: "GET".to_string(),
            human_name: name.to_string(),
            request_url: format!("/v1.0/{id}"),
            doc_link: None,
            post_body: None,
            headers: vec![],
            tip: None,
        }
    }

    #[test]
    fn test_visible_samples_filter() {
        let mut state = AppState {
            samples: vec![sample("me", "my profile"), sample("groups", "all groups")],
            ..Default::default()
        };
        assert_eq!(state.visible_samples().len(), 2);

        state.search_query = "group".to_string();
        let visible = state.visible_samples();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "groups");
    }

    #[test]
    fn test_tab_load_defaults_to_not_started() {
        let state = AppState::default();
        assert_eq!(*state.tab_load(ResponseTabKind::Snippets), TabLoad::NotStarted);
    }

    #[test]
    fn test_base_url_falls_back_to_global() {
        let state = AppState::default();
        assert_eq!(state.base_url(), "https://graph.microsoft.com");
    }
}
