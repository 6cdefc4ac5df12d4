//! Query execution handlers
//!
//! This module turns sidebar picks into the active query:
//! - Running a sample
//! - Loading a resource path into the query
//! - Re-running a history entry

use super::helpers::{apply, read};
use crate::actions::AppAction;
use crate::request::execute_query_background;
use crate::state::AppState;
use crate::types::{Query, ResourceLink, SidebarTab};
use crate::ui::resources::ResourceList;
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Enter in the sidebar: act on the highlighted row of the active tab
pub fn handle_enter(
    state: &Arc<RwLock<AppState>>,
    samples: &ListState,
    history: &ListState,
    resources: &ResourceList,
) {
    let tab = read(state).sidebar.active_tab;
    let (query, run) = match tab {
        SidebarTab::Samples => (samples.selected().and_then(|i| sample_query(state, i)), true),
        SidebarTab::History => (history.selected().and_then(|i| history_query(state, i)), true),
        SidebarTab::Resources => (
            resources
                .cursor_link()
                .map(|link| resource_query(&read(state).base_url(), link)),
            false,
        ),
    };

    let Some(query) = query else {
        return;
    };

    debug!(url = %query.sample_url, run, "query picked from sidebar");
    apply(state, AppAction::SetSampleQuery(query));
    if run {
        execute_query_background(Arc::clone(state));
    }
}

/// Run whatever query is currently active
pub fn handle_run(state: &Arc<RwLock<AppState>>) {
    execute_query_background(Arc::clone(state));
}

/// Query for the `index`-th visible sample, against the active cloud
fn sample_query(state: &Arc<RwLock<AppState>>, index: usize) -> Option<Query> {
    let s = read(state);
    let base_url = s.base_url();
    let visible = s.visible_samples();
    visible.get(index).map(|sample| sample.to_query(&base_url))
}

fn history_query(state: &Arc<RwLock<AppState>>, index: usize) -> Option<Query> {
    let s = read(state);
    s.history.get(index).map(|item| item.query.clone())
}

/// GET query for a resource path
pub(crate) fn resource_query(base_url: &str, link: &ResourceLink) -> Query {
    Query {
        sample_url: format!(
            "{}/{}{}",
            base_url.trim_end_matches('/'),
            link.version,
            link.url
        ),
        selected_verb: "GET".to_string(),
        selected_version: link.version.clone(),
        ..Default::default()
    }
}
