//! Yank (copy) handlers
//!
//! This module handles copying content to the system clipboard.
//! What gets copied depends on the active response tab.

use super::helpers::{apply, read};
use crate::actions::AppAction;
use crate::response::{try_format_json, ResponseTabKind};
use crate::state::AppState;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Copy the content of the active response tab to the clipboard
pub fn handle_yank(state: &Arc<RwLock<AppState>>) {
    let Some(text) = yank_text(&read(state)) else {
        debug!("nothing to yank");
        return;
    };

    match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.clone())) {
        Ok(()) => {
            debug!(bytes = text.len(), "yanked to clipboard");
            apply(state, AppAction::SetYankFlash(true));

            let state = Arc::clone(state);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                apply(&state, AppAction::SetYankFlash(false));
            });
        }
        Err(e) => {
            warn!(error = %e, "failed to copy to clipboard");
        }
    }
}

/// Text the active tab offers for copying
fn yank_text(state: &AppState) -> Option<String> {
    let response = &state.graph_response;

    match state.active_response_tab {
        ResponseTabKind::Preview if response.has_body() => Some(try_format_json(&response.body)),
        ResponseTabKind::Headers if !response.headers.is_empty() => {
            let mut headers: Vec<_> = response.headers.iter().collect();
            headers.sort_by_key(|(k, _)| k.as_str());
            Some(
                headers
                    .into_iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        }
        ResponseTabKind::Snippets => state
            .snippets
            .snippets
            .get(state.snippets.selected_language)
            .map(|(_, code)| code.clone()),
        ResponseTabKind::Toolkit | ResponseTabKind::AdaptiveCards => {
            Some(state.sample_query.sample_url.clone())
        }
        _ => None,
    }
}
