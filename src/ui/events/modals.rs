//! Modal dialog handlers
//!
//! This module handles user input for modal dialogs:
//! - Cloud selector
//! - Access token input and clear confirmation
//! - Permissions panel

use super::helpers::{apply, apply_many, collect_paste_batch, read};
use crate::actions::AppAction;
use crate::clouds::selector::{dismiss, handle_cloud_selection, initial_option_index};
use crate::clouds::{options_for, CloudStore};
use crate::request::fetch_profile_background;
use crate::state::AppState;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Open the cloud selector with the active cloud highlighted
pub fn handle_cloud_dialog(state: &Arc<RwLock<AppState>>, store: &dyn CloudStore, prompt: bool) {
    let options = options_for(read(state).profile.as_ref());
    let highlighted = initial_option_index(store, &options);

    apply_many(
        state,
        vec![
            AppAction::OpenCloudSelector { prompt },
            AppAction::HighlightCloud(highlighted),
        ],
    );
    debug!(prompt, "cloud selector opened");
}

/// Handle keys while the cloud selector is open
pub fn handle_cloud_selector_input(
    key: KeyEvent,
    state: &Arc<RwLock<AppState>>,
    store: &mut dyn CloudStore,
) -> Result<()> {
    let (options, highlighted, query) = {
        let s = read(state);
        (
            options_for(s.profile.as_ref()),
            s.cloud_dialog.highlighted,
            s.sample_query.clone(),
        )
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            apply(
                state,
                AppAction::CloudHighlightDown {
                    option_count: options.len(),
                },
            );
        }
        KeyCode::Char('k') | KeyCode::Up => {
            apply(state, AppAction::CloudHighlightUp);
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(option) = options.get(highlighted) {
                let actions = handle_cloud_selection(option, &query, store);
                apply_many(state, actions);
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            let actions = dismiss(&query, store);
            apply_many(state, actions);
        }
        _ => {}
    }
    Ok(())
}

/// Handle auth dialog activation, pre-filled with the current token
pub fn handle_auth_dialog(state: &Arc<RwLock<AppState>>) {
    let current_token = read(state).auth_token.clone().unwrap_or_default();

    apply_many(
        state,
        vec![
            AppAction::EnterTokenInputMode,
            AppAction::AppendToTokenInput(current_token),
        ],
    );
    debug!("entering token input mode");
}

/// Handle token input modal (with paste batching support)
pub fn handle_token_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let token = read(state).token_input.trim().to_string();

            if token.is_empty() {
                apply(state, AppAction::ExitTokenInputMode);
                debug!("empty token, not saving");
                return Ok(());
            }

            apply_many(
                state,
                vec![
                    AppAction::SetAuthToken(token),
                    AppAction::SetProfile(None),
                    AppAction::ExitTokenInputMode,
                ],
            );
            info!("access token set, fetching profile");
            fetch_profile_background(Arc::clone(state));
        }
        KeyCode::Esc => {
            apply(state, AppAction::ExitTokenInputMode);
            debug!("token input cancelled");
        }
        KeyCode::Backspace => {
            apply(state, AppAction::BackspaceTokenInput);
        }
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::ClearTokenInput);
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            apply(state, AppAction::DeleteWordTokenInput);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let (batch, count) = collect_paste_batch(c);
            apply(state, AppAction::AppendToTokenInput(batch));
            if count > 1 {
                debug!(count, "batched characters (paste detected)");
            }
        }
        _ => {}
    }
    Ok(())
}

/// Handle clear token confirmation dialog
pub fn handle_clear_confirmation(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            apply_many(
                state,
                vec![AppAction::ClearAuthToken, AppAction::ExitConfirmClearTokenMode],
            );
            info!("access token cleared");
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            apply(state, AppAction::ExitConfirmClearTokenMode);
        }
        _ => {}
    }
    Ok(())
}

/// Handle keys while the permissions panel is open
pub fn handle_permissions_input(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => apply(state, AppAction::ScopeDown),
        KeyCode::Char('k') | KeyCode::Up => apply(state, AppAction::ScopeUp),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let scope = {
                let s = read(state);
                s.scopes.list.get(s.highlighted_scope).map(|scope| scope.value.clone())
            };
            if let Some(scope) = scope {
                debug!(%scope, "toggling consent");
                apply(state, AppAction::ToggleScopeConsent(scope));
            }
        }
        KeyCode::Char('p') | KeyCode::Esc => apply(state, AppAction::TogglePermissionsPanel),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clouds::MemoryCloudStore;
    use crate::types::{InputMode, User};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn signed_in_state() -> Arc<RwLock<AppState>> {
        let state = AppState {
            profile: Some(User {
                display_name: "Megan Bowen".to_string(),
                email_address: "megan@contoso.com".to_string(),
            }),
            ..Default::default()
        };
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_select_second_cloud_then_dismiss() {
        let state = signed_in_state();
        let mut store = MemoryCloudStore::default();

        handle_cloud_dialog(&state, &store, true);
        assert_eq!(read(&state).input_mode, InputMode::SelectingCloud);

        handle_cloud_selector_input(key(KeyCode::Char('j')), &state, &mut store).unwrap();
        handle_cloud_selector_input(key(KeyCode::Enter), &state, &mut store).unwrap();

        {
            let s = read(&state);
            let cloud = s.cloud.as_ref().unwrap();
            assert_eq!(cloud.name, "US Government L4");
            assert_eq!(s.sample_query.sample_url, "https://graph.microsoft.us/v1.0/me");
            assert!(s.query_runner_status.as_ref().unwrap().ok);
            assert!(s.cloud_dialog.open);
        }
        assert_eq!(store.load_cloud_value().as_deref(), Some("US Government L4"));

        handle_cloud_selector_input(key(KeyCode::Esc), &state, &mut store).unwrap();
        let s = read(&state);
        assert!(!s.cloud_dialog.open);
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.cloud.as_ref().unwrap().name, "US Government L4");
    }

    #[test]
    fn test_dismiss_without_cloud_picks_global() {
        let state = Arc::new(RwLock::new(AppState::default()));
        let mut store = MemoryCloudStore::default();

        handle_cloud_dialog(&state, &store, false);
        handle_cloud_selector_input(key(KeyCode::Esc), &state, &mut store).unwrap();

        assert_eq!(read(&state).cloud.as_ref().unwrap().name, "Global");
        assert_eq!(store.load_cloud_value().as_deref(), Some("Global"));
    }

    #[test]
    fn test_clear_confirmation() {
        let state = Arc::new(RwLock::new(AppState::default()));
        apply_many(
            &state,
            vec![
                AppAction::SetAuthToken("token".to_string()),
                AppAction::EnterConfirmClearTokenMode,
            ],
        );

        handle_clear_confirmation(key(KeyCode::Char('n')), &state).unwrap();
        assert!(read(&state).is_authenticated());

        apply(&state, AppAction::EnterConfirmClearTokenMode);
        handle_clear_confirmation(key(KeyCode::Char('y')), &state).unwrap();
        let s = read(&state);
        assert!(!s.is_authenticated());
        assert_eq!(s.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_permissions_consent_toggle() {
        let state = Arc::new(RwLock::new(AppState::default()));
        apply_many(
            &state,
            vec![
                AppAction::SetScopes(vec![
                    crate::types::ScopeInfo {
                        value: "User.Read".to_string(),
                        description: "Sign in and read user profile".to_string(),
                        is_admin: false,
                    },
                    crate::types::ScopeInfo {
                        value: "Mail.Read".to_string(),
                        description: "Read user mail".to_string(),
                        is_admin: false,
                    },
                ]),
                AppAction::TogglePermissionsPanel,
            ],
        );

        handle_permissions_input(key(KeyCode::Char('j')), &state).unwrap();
        handle_permissions_input(key(KeyCode::Char(' ')), &state).unwrap();
        assert_eq!(read(&state).consented_scopes, vec!["Mail.Read".to_string()]);

        handle_permissions_input(key(KeyCode::Esc), &state).unwrap();
        assert!(!read(&state).permissions_panel_open);
    }
}
