//! Helper functions for event handling
//!
//! This module contains utility functions used across event handlers:
//! - State locking helpers (apply actions)
//! - Paste batching

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

/// Read the state, recovering from a poisoned lock
pub fn read(state: &Arc<RwLock<AppState>>) -> RwLockReadGuard<'_, AppState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
    apply_action(action, &mut s);
}

/// Apply multiple actions to state, in order, under one lock
pub fn apply_many(state: &Arc<RwLock<AppState>>, actions: Vec<AppAction>) {
    let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
    for action in actions {
        apply_action(action, &mut s);
    }
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately available
/// character events and batches them together. This enables fast paste operations
/// in terminals.
///
/// Returns a tuple of (batched_string, character_count)
pub fn collect_paste_batch(initial_char: char) -> (String, usize) {
    let mut chars = vec![initial_char];

    // Drain any immediately available character events
    while let Ok(true) = event::poll(std::time::Duration::from_millis(0)) {
        if let Ok(Event::Key(next_key)) = event::read() {
            match next_key.code {
                KeyCode::Char(next_c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    chars.push(next_c);
                }
                _ => {
                    // Non-character or control key, stop batching
                    break;
                }
            }
        } else {
            break;
        }
    }

    let count = chars.len();
    let batch_str: String = chars.into_iter().collect();
    (batch_str, count)
}
