//! Navigation handlers
//!
//! This module handles navigation through the UI:
//! - List navigation (up/down in the active sidebar list)
//! - Response tab switching (by number or step)

use super::helpers::read;
use crate::response::activate_tab;
use crate::response::tabs::tabs_for_mode;
use crate::state::AppState;
use crate::types::SidebarTab;
use crate::ui::resources::ResourceList;
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Move the cursor of whichever sidebar list is showing
pub fn handle_sidebar_move(
    state: &Arc<RwLock<AppState>>,
    samples: &mut ListState,
    history: &mut ListState,
    resources: &mut ResourceList,
    down: bool,
) {
    let (tab, sample_count, history_count) = {
        let s = read(state);
        let sample_count = s.visible_samples().len();
        (s.sidebar.active_tab, sample_count, s.history.len())
    };

    match tab {
        SidebarTab::Samples => step(samples, sample_count, down),
        SidebarTab::History => step(history, history_count, down),
        SidebarTab::Resources if down => resources.move_down(),
        SidebarTab::Resources => resources.move_up(),
    }
}

/// Jump to the response tab at `index` (0-based) for the current mode
pub fn handle_tab_index(state: &Arc<RwLock<AppState>>, index: usize) {
    let kind = tabs_for_mode(read(state).mode).get(index).copied();
    if let Some(kind) = kind {
        debug!(tab = kind.item_key(), "switching response tab");
        activate_tab(Arc::clone(state), kind);
    }
}

/// Move one response tab left or right, wrapping around
pub fn handle_tab_step(state: &Arc<RwLock<AppState>>, forward: bool) {
    let (tabs, active) = {
        let s = read(state);
        (tabs_for_mode(s.mode), s.active_response_tab)
    };
    let current = tabs.iter().position(|&k| k == active).unwrap_or(0);
    let next = if forward {
        (current + 1) % tabs.len()
    } else {
        (current + tabs.len() - 1) % tabs.len()
    };
    handle_tab_index(state, next);
}

fn step(list_state: &mut ListState, len: usize, down: bool) {
    if len == 0 {
        list_state.select(None);
        return;
    }
    let next = match list_state.selected() {
        Some(i) if down => (i + 1).min(len - 1),
        Some(i) => i.saturating_sub(1).min(len - 1),
        None => 0,
    };
    list_state.select(Some(next));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AppAction;
    use crate::response::ResponseTabKind;
    use crate::types::Mode;
    use super::super::helpers::apply;

    #[test]
    fn test_step_is_clamped() {
        let mut list_state = ListState::default();
        step(&mut list_state, 2, true);
        assert_eq!(list_state.selected(), Some(0));
        step(&mut list_state, 2, true);
        step(&mut list_state, 2, true);
        assert_eq!(list_state.selected(), Some(1));
        step(&mut list_state, 2, false);
        step(&mut list_state, 2, false);
        assert_eq!(list_state.selected(), Some(0));
        step(&mut list_state, 0, true);
        assert_eq!(list_state.selected(), None);
    }

    #[tokio::test]
    async fn test_tab_step_wraps_within_mode() {
        let state = Arc::new(RwLock::new(AppState::default()));
        apply(&state, AppAction::SetMode(Mode::TryIt));

        handle_tab_step(&state, false);
        assert_eq!(read(&state).active_response_tab, ResponseTabKind::Headers);
        handle_tab_step(&state, true);
        assert_eq!(read(&state).active_response_tab, ResponseTabKind::Preview);
    }

    #[tokio::test]
    async fn test_tab_index_out_of_range_is_ignored() {
        let state = Arc::new(RwLock::new(AppState::default()));
        apply(&state, AppAction::SetMode(Mode::TryIt));
        handle_tab_index(&state, 4);
        assert_eq!(read(&state).active_response_tab, ResponseTabKind::Preview);
    }
}
