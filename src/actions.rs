use crate::clouds::CloudDescriptor;
use crate::response::tabs::tabs_for_mode;
use crate::response::{ResponseTabKind, TabLoad, TabViewer};
use crate::state::AppState;
use crate::types::{
    Dimensions, GraphResponse, HistoryItem, InputMode, Mode, PanelFocus, Query, ResourceLink,
    SampleQuery, ScopeInfo, SidebarTab, Status, Theme, User,
};

/// Most recent runs kept in history
pub const MAX_HISTORY: usize = 50;

/// Scroll lines per action (Ctrl+U / Ctrl+D)
const SCROLL_LINES_PER_ACTION: usize = 5;

/// Represents all possible state-changing actions in the application.
/// Each shared-state transition is a plain data record; applying one
/// replaces the corresponding slice of `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Shared state transitions
    SetActiveCloud(CloudDescriptor),
    SetSampleQuery(Query),
    SetQueryResponseStatus(Status),
    ClearQueryResponseStatus,
    SetGraphResponse(GraphResponse),
    SetLoadingData(bool),
    AddHistoryItem(HistoryItem),
    SetMode(Mode),
    ToggleMode,
    SetTheme(Theme),
    SetProfile(Option<User>),
    SetDimensions(Dimensions),
    SetSamples(Vec<SampleQuery>),
    SetScopes(Vec<ScopeInfo>),
    SetResources(Vec<ResourceLink>),
    SetSelectedResources(Vec<ResourceLink>),
    ToggleScopeConsent(String),
    AcceptTermsOfUse,
    TogglePermissionsPanel,
    ToggleResponseAreaExpanded,
    ToggleSidebar,

    // Navigation
    NavigateToPanel(PanelFocus),
    TogglePanelFocus,
    NextSidebarTab,
    SelectSidebarTab(SidebarTab),
    SelectResponseTab(ResponseTabKind),
    ScrollUp,
    ScrollDown,
    ScopeUp,
    ScopeDown,
    NextSnippetLanguage,

    // Deferred viewers
    StartTabLoad(ResponseTabKind),
    FinishTabLoad(ResponseTabKind, Result<TabViewer, String>),

    // Cloud selector dialog
    OpenCloudSelector { prompt: bool },
    CloseCloudSelector,
    HighlightCloud(usize),
    CloudHighlightUp,
    CloudHighlightDown { option_count: usize },

    // Token input
    EnterTokenInputMode,
    ExitTokenInputMode,
    AppendToTokenInput(String),
    BackspaceTokenInput,
    ClearTokenInput,
    DeleteWordTokenInput,
    SetAuthToken(String),
    ClearAuthToken,
    EnterConfirmClearTokenMode,
    ExitConfirmClearTokenMode,

    // Sample search
    EnterSearchMode,
    ExitSearchMode,
    AppendToSearchQuery(String),
    BackspaceSearchQuery,
    ClearSearchQuery,

    SetYankFlash(bool),
}

/// Apply an action to the application state.
/// All state mutations go through this function, in dispatch order.
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::SetActiveCloud(cloud) => {
            state.cloud = Some(cloud);
        }
        AppAction::SetSampleQuery(query) => {
            state.sample_query = query;
            refresh_snippets(state);
        }
        AppAction::SetQueryResponseStatus(status) => {
            state.query_runner_status = Some(status);
        }
        AppAction::ClearQueryResponseStatus => {
            state.query_runner_status = None;
        }
        AppAction::SetGraphResponse(response) => {
            state.graph_response = response;
            state.response_scroll = 0;
        }
        AppAction::SetLoadingData(loading) => {
            state.is_loading_data = loading;
        }
        AppAction::AddHistoryItem(item) => {
            state.history.insert(0, item);
            state.history.truncate(MAX_HISTORY);
        }
        AppAction::SetMode(mode) => {
            set_mode(state, mode);
        }
        AppAction::ToggleMode => {
            let mode = match state.mode {
                Mode::Complete => Mode::TryIt,
                Mode::TryIt => Mode::Complete,
            };
            set_mode(state, mode);
        }
        AppAction::SetTheme(theme) => {
            state.theme = theme;
        }
        AppAction::SetProfile(profile) => {
            state.profile = profile;
        }
        AppAction::SetDimensions(dimensions) => {
            state.dimensions = dimensions;
        }
        AppAction::SetSamples(samples) => {
            state.samples = samples;
        }
        AppAction::SetScopes(list) => {
            state.scopes.list = list;
            state.scopes.pending = false;
            state.highlighted_scope = 0;
        }
        AppAction::SetResources(resources) => {
            if state.resources != resources {
                state.selected_resources.clear();
            }
            state.resources = resources;
        }
        AppAction::SetSelectedResources(selected) => {
            state.selected_resources = selected;
        }
        AppAction::ToggleScopeConsent(scope) => {
            if let Some(pos) = state.consented_scopes.iter().position(|s| *s == scope) {
                state.consented_scopes.remove(pos);
            } else {
                state.consented_scopes.push(scope);
            }
        }
        AppAction::AcceptTermsOfUse => {
            state.terms_of_use = false;
        }
        AppAction::TogglePermissionsPanel => {
            state.permissions_panel_open = !state.permissions_panel_open;
        }
        AppAction::ToggleResponseAreaExpanded => {
            state.response_area_expanded = !state.response_area_expanded;
        }
        AppAction::ToggleSidebar => {
            state.sidebar.show_sidebar = !state.sidebar.show_sidebar;
            if !state.sidebar.show_sidebar {
                state.panel_focus = PanelFocus::Response;
            }
        }

        // Navigation
        AppAction::NavigateToPanel(panel) => {
            state.panel_focus = panel;
        }
        AppAction::TogglePanelFocus => {
            state.panel_focus = match state.panel_focus {
                PanelFocus::Sidebar => PanelFocus::Response,
                PanelFocus::Response if state.sidebar.show_sidebar => PanelFocus::Sidebar,
                PanelFocus::Response => PanelFocus::Response,
            };
        }
        AppAction::NextSidebarTab => {
            state.sidebar.active_tab = state.sidebar.active_tab.next();
        }
        AppAction::SelectSidebarTab(tab) => {
            state.sidebar.active_tab = tab;
        }
        AppAction::SelectResponseTab(kind) => {
            if tabs_for_mode(state.mode).contains(&kind) && state.active_response_tab != kind {
                state.active_response_tab = kind;
                state.response_scroll = 0;
            }
        }
        AppAction::ScrollUp => {
            state.response_scroll = state.response_scroll.saturating_sub(SCROLL_LINES_PER_ACTION);
        }
        AppAction::ScrollDown => {
            state.response_scroll = state.response_scroll.saturating_add(SCROLL_LINES_PER_ACTION);
        }
        AppAction::ScopeUp => {
            state.highlighted_scope = state.highlighted_scope.saturating_sub(1);
        }
        AppAction::ScopeDown => {
            if state.highlighted_scope + 1 < state.scopes.list.len() {
                state.highlighted_scope += 1;
            }
        }
        AppAction::NextSnippetLanguage => {
            let count = state.snippets.snippets.len();
            if count > 0 {
                state.snippets.selected_language = (state.snippets.selected_language + 1) % count;
            }
        }

        // Deferred viewers
        AppAction::StartTabLoad(kind) => {
            state.tab_loads.insert(kind, TabLoad::Loading);
        }
        AppAction::FinishTabLoad(kind, result) => {
            let load = match result {
                Ok(viewer) => TabLoad::Ready(viewer),
                Err(e) => TabLoad::Failed(e),
            };
            state.tab_loads.insert(kind, load);
            refresh_snippets(state);
        }

        // Cloud selector
        AppAction::OpenCloudSelector { prompt } => {
            state.cloud_dialog.open = true;
            state.cloud_dialog.prompt = prompt;
            state.input_mode = InputMode::SelectingCloud;
        }
        AppAction::CloseCloudSelector => {
            state.cloud_dialog.open = false;
            state.cloud_dialog.prompt = false;
            if state.input_mode == InputMode::SelectingCloud {
                state.input_mode = InputMode::Normal;
            }
        }
        AppAction::HighlightCloud(index) => {
            state.cloud_dialog.highlighted = index;
        }
        AppAction::CloudHighlightUp => {
            state.cloud_dialog.highlighted = state.cloud_dialog.highlighted.saturating_sub(1);
        }
        AppAction::CloudHighlightDown { option_count } => {
            if state.cloud_dialog.highlighted + 1 < option_count {
                state.cloud_dialog.highlighted += 1;
            }
        }

        // Token input
        AppAction::EnterTokenInputMode => {
            state.input_mode = InputMode::EnteringToken;
            state.token_input.clear();
        }
        AppAction::ExitTokenInputMode => {
            state.input_mode = InputMode::Normal;
            state.token_input.clear();
        }
        AppAction::AppendToTokenInput(text) => {
            state.token_input.push_str(&text);
        }
        AppAction::BackspaceTokenInput => {
            state.token_input.pop();
        }
        AppAction::ClearTokenInput => {
            state.token_input.clear();
        }
        AppAction::DeleteWordTokenInput => {
            delete_word(&mut state.token_input);
        }
        AppAction::SetAuthToken(token) => {
            state.auth_token = Some(token);
        }
        AppAction::ClearAuthToken => {
            state.auth_token = None;
            state.profile = None;
        }
        AppAction::EnterConfirmClearTokenMode => {
            state.input_mode = InputMode::ConfirmClearToken;
        }
        AppAction::ExitConfirmClearTokenMode => {
            state.input_mode = InputMode::Normal;
        }

        // Search
        AppAction::EnterSearchMode => {
            state.input_mode = InputMode::Searching;
            state.search_query.clear();
        }
        AppAction::ExitSearchMode => {
            state.input_mode = InputMode::Normal;
        }
        AppAction::AppendToSearchQuery(text) => {
            state.search_query.push_str(&text);
        }
        AppAction::BackspaceSearchQuery => {
            state.search_query.pop();
        }
        AppAction::ClearSearchQuery => {
            state.search_query.clear();
        }

        AppAction::SetYankFlash(flash) => {
            state.yank_flash = flash;
        }
    }
}

/// Leaving complete mode drops back to the preview if a complete-only tab was open
fn set_mode(state: &mut AppState, mode: Mode) {
    state.mode = mode;
    if !tabs_for_mode(mode).contains(&state.active_response_tab) {
        state.active_response_tab = ResponseTabKind::Preview;
        state.response_scroll = 0;
    }
}

/// Regenerate snippets for the active query once the snippet viewer is loaded
fn refresh_snippets(state: &mut AppState) {
    let generator = match state.tab_load(ResponseTabKind::Snippets) {
        TabLoad::Ready(TabViewer::Snippets(generator)) => generator.clone(),
        _ => return,
    };
    if state.snippets.query.as_ref() == Some(&state.sample_query)
        && !state.snippets.snippets.is_empty()
    {
        return;
    }

    let snippets = generator.generate(&state.sample_query);
    state.snippets.query = Some(state.sample_query.clone());
    state.snippets.snippets = snippets;
    state.snippets.selected_language = 0;
}

/// Helper function to delete the last word from a string (Ctrl+W behavior)
fn delete_word(s: &mut String) {
    // Trim trailing whitespace first
    *s = s.trim_end().to_string();

    // Find last whitespace and truncate there
    if let Some(pos) = s.rfind(char::is_whitespace) {
        s.truncate(pos);
    } else {
        s.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clouds::global_cloud;
    use crate::response::snippets::SnippetGenerator;
    use crate::types::MessageType;
    use chrono::Utc;
    use std::time::Duration;

    fn link(url: &str) -> ResourceLink {
        ResourceLink {
            url: url.to_string(),
            version: "v1.0".to_string(),
            methods: vec![],
        }
    }

    fn history_item(n: usize) -> HistoryItem {
        HistoryItem {
            query: Query {
                sample_url: format!("https://graph.microsoft.com/v1.0/users/{n}"),
                ..Default::default()
            },
            status: 200,
            duration: Duration::from_millis(10),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_shared_transitions_replace_their_slice() {
        let mut state = AppState::default();

        apply_action(AppAction::SetActiveCloud(global_cloud()), &mut state);
        assert_eq!(state.cloud, Some(global_cloud()));

        let query = Query {
            sample_url: "https://graph.microsoft.com/beta/me".to_string(),
            selected_version: "beta".to_string(),
            ..Default::default()
        };
        apply_action(AppAction::SetSampleQuery(query.clone()), &mut state);
        assert_eq!(state.sample_query, query);

        let status = Status {
            status_text: "Cloud selected".to_string(),
            status: "Global".to_string(),
            ok: true,
            message_type: MessageType::Success,
        };
        apply_action(AppAction::SetQueryResponseStatus(status.clone()), &mut state);
        assert_eq!(state.query_runner_status, Some(status));

        apply_action(AppAction::ClearQueryResponseStatus, &mut state);
        assert!(state.query_runner_status.is_none());
    }

    #[test]
    fn test_history_newest_first_and_capped() {
        let mut state = AppState::default();
        for n in 0..(MAX_HISTORY + 5) {
            apply_action(AppAction::AddHistoryItem(history_item(n)), &mut state);
        }
        assert_eq!(state.history.len(), MAX_HISTORY);
        assert!(state.history[0].query.sample_url.ends_with(&format!("/{}", MAX_HISTORY + 4)));
    }

    #[test]
    fn test_leaving_complete_mode_resets_tab() {
        let mut state = AppState::default();
        apply_action(AppAction::SelectResponseTab(ResponseTabKind::Snippets), &mut state);
        assert_eq!(state.active_response_tab, ResponseTabKind::Snippets);

        apply_action(AppAction::ToggleMode, &mut state);
        assert_eq!(state.mode, Mode::TryIt);
        assert_eq!(state.active_response_tab, ResponseTabKind::Preview);

        // Complete-only tabs cannot be selected in try-it mode
        apply_action(AppAction::SelectResponseTab(ResponseTabKind::AdaptiveCards), &mut state);
        assert_eq!(state.active_response_tab, ResponseTabKind::Preview);

        apply_action(AppAction::SelectResponseTab(ResponseTabKind::Headers), &mut state);
        assert_eq!(state.active_response_tab, ResponseTabKind::Headers);
    }

    #[test]
    fn test_new_resources_clear_selection() {
        let mut state = AppState::default();
        apply_action(AppAction::SetResources(vec![link("/me")]), &mut state);
        apply_action(AppAction::SetSelectedResources(vec![link("/me")]), &mut state);

        apply_action(AppAction::SetResources(vec![link("/me")]), &mut state);
        assert_eq!(state.selected_resources.len(), 1);

        apply_action(AppAction::SetResources(vec![link("/users")]), &mut state);
        assert!(state.selected_resources.is_empty());
    }

    #[test]
    fn test_cloud_dialog_open_close() {
        let mut state = AppState::default();
        apply_action(AppAction::OpenCloudSelector { prompt: true }, &mut state);
        assert!(state.cloud_dialog.open);
        assert!(state.cloud_dialog.prompt);
        assert_eq!(state.input_mode, InputMode::SelectingCloud);

        apply_action(AppAction::CloudHighlightDown { option_count: 2 }, &mut state);
        apply_action(AppAction::CloudHighlightDown { option_count: 2 }, &mut state);
        assert_eq!(state.cloud_dialog.highlighted, 1);
        apply_action(AppAction::CloudHighlightUp, &mut state);
        apply_action(AppAction::CloudHighlightUp, &mut state);
        assert_eq!(state.cloud_dialog.highlighted, 0);

        apply_action(AppAction::CloseCloudSelector, &mut state);
        assert!(!state.cloud_dialog.open);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_snippets_follow_query_once_loaded() {
        let mut state = AppState::default();
        apply_action(AppAction::SetSampleQuery(Query::default()), &mut state);
        assert!(state.snippets.snippets.is_empty());

        apply_action(AppAction::StartTabLoad(ResponseTabKind::Snippets), &mut state);
        assert_eq!(*state.tab_load(ResponseTabKind::Snippets), TabLoad::Loading);

        apply_action(
            AppAction::FinishTabLoad(
                ResponseTabKind::Snippets,
                Ok(TabViewer::Snippets(SnippetGenerator::default())),
            ),
            &mut state,
        );
        assert!(!state.snippets.snippets.is_empty());

        let query = Query {
            sample_url: "https://graph.microsoft.com/v1.0/users".to_string(),
            ..Default::default()
        };
        apply_action(AppAction::SetSampleQuery(query), &mut state);
        assert_eq!(
            state.snippets.query.as_ref().map(|q| q.sample_url.as_str()),
            Some("https://graph.microsoft.com/v1.0/users")
        );
        assert!(state.snippets.snippets[0].1.contains("/v1.0/users"));
    }

    #[test]
    fn test_snippets_regenerate_when_only_verb_or_body_changes() {
        let mut state = AppState::default();
        apply_action(
            AppAction::FinishTabLoad(
                ResponseTabKind::Snippets,
                Ok(TabViewer::Snippets(SnippetGenerator::default())),
            ),
            &mut state,
        );

        let url = "https://graph.microsoft.com/v1.0/me/sendMail".to_string();
        let post = Query {
            sample_url: url.clone(),
            selected_verb: "POST".to_string(),
            sample_body: Some(r#"{"a":1}"#.to_string()),
            ..Default::default()
        };
        apply_action(AppAction::SetSampleQuery(post), &mut state);
        assert!(state.snippets.snippets[0].1.starts_with("POST "));

        let get = Query {
            sample_url: url,
            ..Default::default()
        };
        apply_action(AppAction::SetSampleQuery(get.clone()), &mut state);
        assert_eq!(state.snippets.query, Some(get));
        assert!(state.snippets.snippets[0].1.starts_with("GET "));
        assert!(!state.snippets.snippets[0].1.contains(r#""a""#));
    }

    #[test]
    fn test_failed_load_is_recorded() {
        let mut state = AppState::default();
        apply_action(
            AppAction::FinishTabLoad(ResponseTabKind::AdaptiveCards, Err("bad config".into())),
            &mut state,
        );
        assert_eq!(
            *state.tab_load(ResponseTabKind::AdaptiveCards),
            TabLoad::Failed("bad config".to_string())
        );
    }

    #[test]
    fn test_scope_consent_toggle() {
        let mut state = AppState::default();
        apply_action(AppAction::ToggleScopeConsent("Mail.Read".into()), &mut state);
        assert_eq!(state.consented_scopes, vec!["Mail.Read".to_string()]);
        apply_action(AppAction::ToggleScopeConsent("Mail.Read".into()), &mut state);
        assert!(state.consented_scopes.is_empty());
    }

    #[test]
    fn test_clear_auth_token_drops_profile() {
        let mut state = AppState::default();
        apply_action(AppAction::SetAuthToken("abc".into()), &mut state);
        apply_action(
            AppAction::SetProfile(Some(User {
                display_name: "Megan".into(),
                email_address: "megan@contoso.com".into(),
            })),
            &mut state,
        );
        assert!(state.is_authenticated());

        apply_action(AppAction::ClearAuthToken, &mut state);
        assert!(!state.is_authenticated());
        assert!(state.profile.is_none());
    }

    #[test]
    fn test_delete_word() {
        let mut s = "hello world foo".to_string();
        delete_word(&mut s);
        assert_eq!(s, "hello world");

        delete_word(&mut s);
        assert_eq!(s, "hello");

        delete_word(&mut s);
        assert_eq!(s, "");

        delete_word(&mut s);
        assert_eq!(s, "");
    }

    #[test]
    fn test_search_actions() {
        let mut state = AppState::default();

        apply_action(AppAction::EnterSearchMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Searching);

        apply_action(AppAction::AppendToSearchQuery("mail".to_string()), &mut state);
        assert_eq!(state.search_query, "mail");

        apply_action(AppAction::BackspaceSearchQuery, &mut state);
        assert_eq!(state.search_query, "mai");

        apply_action(AppAction::ClearSearchQuery, &mut state);
        assert_eq!(state.search_query, "");

        apply_action(AppAction::ExitSearchMode, &mut state);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_hidden_sidebar_keeps_focus_on_response() {
        let mut state = AppState::default();
        apply_action(AppAction::ToggleSidebar, &mut state);
        assert!(!state.sidebar.show_sidebar);
        assert_eq!(state.panel_focus, PanelFocus::Response);

        apply_action(AppAction::TogglePanelFocus, &mut state);
        assert_eq!(state.panel_focus, PanelFocus::Response);

        apply_action(AppAction::ToggleSidebar, &mut state);
        apply_action(AppAction::TogglePanelFocus, &mut state);
        assert_eq!(state.panel_focus, PanelFocus::Sidebar);
    }
}
