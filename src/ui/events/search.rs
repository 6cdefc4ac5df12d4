//! Search handlers
//!
//! This module handles filtering the sample list:
//! - Activating search mode
//! - Handling search input
//! - Clearing search filters

use super::helpers::{apply, apply_many, read};
use crate::actions::AppAction;
use crate::state::AppState;
use crate::types::SidebarTab;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Activate search mode on the Samples tab
pub fn handle_search_activate(state: &Arc<RwLock<AppState>>) {
    apply_many(
        state,
        vec![
            AppAction::SelectSidebarTab(SidebarTab::Samples),
            AppAction::EnterSearchMode,
        ],
    );
}

/// Handle search input
pub fn handle_search_input(
    key: KeyEvent,
    state: &Arc<RwLock<AppState>>,
    list_state: &mut ListState,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            // Keep the filter active
            apply(state, AppAction::ExitSearchMode);
            return Ok(());
        }
        KeyCode::Esc => {
            apply_many(
                state,
                vec![AppAction::ClearSearchQuery, AppAction::ExitSearchMode],
            );
            debug!("search cancelled, filter cleared");
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceSearchQuery);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearSearchQuery);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::AppendToSearchQuery(c.to_string()));
        }
        _ => return Ok(()),
    }

    reset_selection(state, list_state);
    Ok(())
}

/// Clear search filter
pub fn handle_search_clear(state: &Arc<RwLock<AppState>>, list_state: &mut ListState) {
    if read(state).search_query.is_empty() {
        return;
    }
    apply(state, AppAction::ClearSearchQuery);
    debug!("cleared search filter");
    reset_selection(state, list_state);
}

/// Put the cursor back on the first visible sample
fn reset_selection(state: &Arc<RwLock<AppState>>, list_state: &mut ListState) {
    let has_items = !read(state).visible_samples().is_empty();
    list_state.select(has_items.then_some(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InputMode, SampleQuery};

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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_filters_and_resets_cursor() {
        let state = Arc::new(RwLock::new(AppState::default()));
        apply(
            &state,
            AppAction::SetSamples(vec![sample("me", "my profile"), sample("groups", "all groups")]),
        );
        apply(&state, AppAction::SelectSidebarTab(SidebarTab::History));
        let mut list_state = ListState::default();
        list_state.select(Some(1));

        handle_search_activate(&state);
        assert_eq!(read(&state).sidebar.active_tab, SidebarTab::Samples);

        for c in "zzz".chars() {
            handle_search_input(key(KeyCode::Char(c)), &state, &mut list_state).unwrap();
        }
        assert_eq!(list_state.selected(), None);

        handle_search_input(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &state,
            &mut list_state,
        )
        .unwrap();
        handle_search_input(key(KeyCode::Char('g')), &state, &mut list_state).unwrap();
        assert_eq!(list_state.selected(), Some(0));

        handle_search_input(key(KeyCode::Enter), &state, &mut list_state).unwrap();
        let s = read(&state);
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.search_query, "g");
    }

    #[test]
    fn test_escape_clears_filter() {
        let state = Arc::new(RwLock::new(AppState::default()));
        let mut list_state = ListState::default();
        handle_search_activate(&state);
        handle_search_input(key(KeyCode::Char('m')), &state, &mut list_state).unwrap();
        handle_search_input(key(KeyCode::Esc), &state, &mut list_state).unwrap();

        let s = read(&state);
        assert_eq!(s.input_mode, InputMode::Normal);
        assert!(s.search_query.is_empty());
    }
}
