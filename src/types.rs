use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Exploration mode. `Complete` unlocks the snippet, toolkit and card viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Complete,
    TryIt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    HighContrast,
}

impl Theme {
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::HighContrast,
            Theme::HighContrast => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::HighContrast => "high-contrast",
        }
    }
}

/// Read access to the ambient theme, handed to viewers at render time
pub trait ThemeReader {
    fn current_theme(&self) -> Theme;
}

impl ThemeReader for Theme {
    fn current_theme(&self) -> Theme {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// The active query definition, the thing the runner executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub sample_url: String,
    pub selected_verb: String,
    pub selected_version: String,
    pub sample_body: Option<String>,
    pub sample_headers: Vec<Header>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            sample_url: "https://graph.microsoft.com/v1.0/me".to_string(),
            selected_verb: "GET".to_string(),
            selected_version: "v1.0".to_string(),
            sample_body: None,
            sample_headers: Vec::new(),
        }
    }
}

impl Query {
    /// Path after the version segment, e.g. `/me/events` for `.../v1.0/me/events?$top=5`
    pub fn relative_path(&self) -> String {
        let Ok(parsed) = url::Url::parse(&self.sample_url) else {
            return String::new();
        };
        let mut segments = parsed.path_segments().map(|s| s.collect::<Vec<_>>()).unwrap_or_default();
        if segments.first().is_some_and(|s| *s == self.selected_version) {
            segments.remove(0);
        }
        format!("/{}", segments.join("/"))
    }
}

/// A catalog entry the user can pick from the Samples sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleQuery {
    pub id: String,
    pub category: String,
    pub method: String,
    pub human_name: String,
    /// Relative to the cloud base URL, version included: `/v1.0/me/messages`
    pub request_url: String,
    #[serde(default)]
    pub doc_link: Option<String>,
    #[serde(default)]
    pub post_body: Option<String>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub tip: Option<String>,
}

impl SampleQuery {
    /// Build the runnable query for this sample against `base_url`
    pub fn to_query(&self, base_url: &str) -> Query {
        let version = self
            .request_url
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or("v1.0")
            .to_string();

        Query {
            sample_url: format!("{}{}", base_url.trim_end_matches('/'), self.request_url),
            selected_verb: self.method.to_uppercase(),
            selected_version: version,
            sample_body: self.post_body.clone(),
            sample_headers: self.headers.clone(),
        }
    }

    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.category.to_lowercase().contains(&filter)
            || self.human_name.to_lowercase().contains(&filter)
            || self.request_url.to_lowercase().contains(&filter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMethod {
    pub verb: String,
    pub name: String,
}

/// A resource path offered in the Resources sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub url: String,
    pub version: String,
    #[serde(default)]
    pub methods: Vec<ResourceMethod>,
}

impl ResourceLink {
    /// Version-prefixed URL as shown in the table, e.g. `v1.0/me/events`
    pub fn display_path(&self) -> String {
        format!("{}{}", self.version, self.url)
    }
}

/// The last HTTP response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphResponse {
    /// HTTP status code (200, 404, etc.), 0 when no HTTP response was received
    pub status: u16,

    pub status_text: String,

    /// Response headers (keys normalized to lowercase)
    pub headers: HashMap<String, String>,

    /// Raw response body, empty until a query has run
    pub body: String,

    pub duration: Duration,

    /// True for network-level failures (timeout, connection refused, etc.)
    pub is_error: bool,

    pub error_message: Option<String>,
}

impl GraphResponse {
    /// Creates an error response with the given error message
    pub fn error(error_message: String) -> Self {
        Self {
            is_error: true,
            error_message: Some(error_message),
            ..Default::default()
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// Status notification shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub status_text: String,
    pub status: String,
    pub ok: bool,
    pub message_type: MessageType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The query as it was run, body and headers included
    pub query: Query,
    pub status: u16,
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

/// Signed-in user. Absent until a token is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub display_name: String,
    pub email_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeInfo {
    pub value: String,
    pub description: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scopes {
    pub list: Vec<ScopeInfo>,
    /// True until the scope list has been loaded
    pub pending: bool,
}

impl Default for Scopes {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            pending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Samples,
    Resources,
    History,
}

impl SidebarTab {
    pub fn next(self) -> Self {
        match self {
            SidebarTab::Samples => SidebarTab::Resources,
            SidebarTab::Resources => SidebarTab::History,
            SidebarTab::History => SidebarTab::Samples,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarProperties {
    pub show_sidebar: bool,
    pub active_tab: SidebarTab,
}

impl Default for SidebarProperties {
    fn default() -> Self {
        Self {
            show_sidebar: true,
            active_tab: SidebarTab::Samples,
        }
    }
}

/// Generated code snippets for the current query, keyed by language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetCache {
    /// Query the snippets were generated from
    pub query: Option<Query>,
    pub snippets: Vec<(String, String)>,
    pub selected_language: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EnteringToken,
    ConfirmClearToken,
    Searching,
    SelectingCloud,
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Sidebar,
    Response,
}
