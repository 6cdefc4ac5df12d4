//! Event handling system for graph-explorer-tui
//!
//! This module processes user input and translates it into state-changing actions.
//! It handles multiple input modes:
//! - Normal: Standard navigation and commands
//! - SelectingCloud: The cloud selector dialog
//! - EnteringToken / ConfirmClearToken: Access token modals
//! - Searching: Filtering samples by query
//!
//! # Architecture
//!
//! The EventHandler uses an action pattern where input events generate AppActions
//! that are applied to AppState via the apply_action function in actions.rs.
//!
//! # Lock Management
//!
//! Handlers read what they need under a short read lock, drop it, then apply
//! actions under a write lock. No handler holds a lock across a call that
//! takes another.

mod execution;
mod helpers;
mod modals;
mod navigation;
mod search;
mod yank;

pub use helpers::{apply, apply_many, read};
pub use modals::handle_cloud_dialog;

use crate::actions::AppAction;
use crate::config::Config;
use crate::response::ResponseTabKind;
use crate::state::AppState;
use crate::types::{InputMode, Mode, PanelFocus, SidebarTab};
use crate::ui::resources::ResourceList;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Everything a key press may touch besides the shared state
pub struct EventContext<'a> {
    pub state: &'a Arc<RwLock<AppState>>,
    pub config: &'a mut Config,
    pub samples: &'a mut ListState,
    pub history: &'a mut ListState,
    pub resources: &'a mut ResourceList,
}

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one terminal event and dispatch it
    pub fn handle_events(&mut self, ctx: EventContext) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key, ctx)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Dispatch a key press to the handler for the current input mode
    pub fn handle_key(&mut self, key: KeyEvent, ctx: EventContext) -> Result<()> {
        let (input_mode, permissions_open) = {
            let s = read(ctx.state);
            (s.input_mode.clone(), s.permissions_panel_open)
        };

        match input_mode {
            InputMode::SelectingCloud => {
                modals::handle_cloud_selector_input(key, ctx.state, ctx.config)?;
            }
            InputMode::EnteringToken => {
                modals::handle_token_input(key, ctx.state)?;
            }
            InputMode::ConfirmClearToken => {
                modals::handle_clear_confirmation(key, ctx.state)?;
            }
            InputMode::Searching => {
                search::handle_search_input(key, ctx.state, ctx.samples)?;
            }
            InputMode::Normal if permissions_open => {
                modals::handle_permissions_input(key, ctx.state)?;
            }
            InputMode::Normal => self.handle_normal_key(key, ctx),
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, key: KeyEvent, ctx: EventContext) {
        let state = ctx.state;
        let (panel, sidebar_tab) = {
            let s = read(state);
            (s.panel_focus, s.sidebar.active_tab)
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // QUIT
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
            }

            // -- with modifiers
            // Ctrl+u / Ctrl+d: scroll the response
            KeyCode::Char('u') if ctrl => apply(state, AppAction::ScrollUp),
            KeyCode::Char('d') if ctrl => apply(state, AppAction::ScrollDown),
            // Ctrl+l: clear sample filter
            KeyCode::Char('l') if ctrl => search::handle_search_clear(state, ctx.samples),

            // focus
            KeyCode::Tab | KeyCode::BackTab => apply(state, AppAction::TogglePanelFocus),
            KeyCode::Char('s') => apply(state, AppAction::NextSidebarTab),

            // nav
            KeyCode::Char('j') | KeyCode::Down => match panel {
                PanelFocus::Sidebar => navigation::handle_sidebar_move(
                    state,
                    ctx.samples,
                    ctx.history,
                    ctx.resources,
                    true,
                ),
                PanelFocus::Response => apply(state, AppAction::ScrollDown),
            },
            KeyCode::Char('k') | KeyCode::Up => match panel {
                PanelFocus::Sidebar => navigation::handle_sidebar_move(
                    state,
                    ctx.samples,
                    ctx.history,
                    ctx.resources,
                    false,
                ),
                PanelFocus::Response => apply(state, AppAction::ScrollUp),
            },

            // response tabs
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                navigation::handle_tab_index(state, index);
            }
            KeyCode::Char('h') | KeyCode::Left => navigation::handle_tab_step(state, false),
            KeyCode::Char('l') | KeyCode::Right => navigation::handle_tab_step(state, true),
            KeyCode::Char('n') => {
                if read(state).active_response_tab == ResponseTabKind::Snippets {
                    apply(state, AppAction::NextSnippetLanguage);
                }
            }

            // run
            KeyCode::Enter if panel == PanelFocus::Sidebar => {
                execution::handle_enter(state, ctx.samples, ctx.history, ctx.resources);
            }
            KeyCode::Enter | KeyCode::Char('r') => execution::handle_run(state),

            // resource selection
            KeyCode::Char(' ') if sidebar_tab == SidebarTab::Resources => {
                if let Some(index) = ctx.resources.cursor() {
                    ctx.resources.toggle(index, |selection| {
                        apply(state, AppAction::SetSelectedResources(selection.to_vec()));
                    });
                }
            }
            KeyCode::Char('*') if sidebar_tab == SidebarTab::Resources => {
                ctx.resources.toggle_all(|selection| {
                    apply(state, AppAction::SetSelectedResources(selection.to_vec()));
                });
            }
            KeyCode::Char('v') if sidebar_tab == SidebarTab::Resources => {
                if let Some(index) = ctx.resources.cursor() {
                    ctx.resources.extend_to(index, |selection| {
                        apply(state, AppAction::SetSelectedResources(selection.to_vec()));
                    });
                }
            }

            // dialogs
            KeyCode::Char('c') => modals::handle_cloud_dialog(state, &*ctx.config, false),
            KeyCode::Char('a') => modals::handle_auth_dialog(state),
            KeyCode::Char('A') => {
                if read(state).is_authenticated() {
                    apply(state, AppAction::EnterConfirmClearTokenMode);
                }
            }
            KeyCode::Char('/') => search::handle_search_activate(state),
            KeyCode::Char('p') => apply(state, AppAction::TogglePermissionsPanel),

            // settings
            KeyCode::Char('m') => {
                apply(state, AppAction::ToggleMode);
                let mode: Mode = read(state).mode;
                debug!(?mode, "mode changed");
                if let Err(e) = ctx.config.set_mode(mode) {
                    warn!(error = %e, "failed to persist mode");
                }
            }
            KeyCode::Char('t') => {
                let theme = read(state).theme.next();
                apply(state, AppAction::SetTheme(theme));
                if let Err(e) = ctx.config.set_theme(theme) {
                    warn!(error = %e, "failed to persist theme");
                }
            }
            KeyCode::Char('e') => apply(state, AppAction::ToggleResponseAreaExpanded),
            KeyCode::Char('b') => apply(state, AppAction::ToggleSidebar),
            KeyCode::Char('x') => apply(state, AppAction::AcceptTermsOfUse),
            KeyCode::Char('y') => yank::handle_yank(state),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clouds::CloudStore;
    use crate::types::{ResourceLink, Theme};

    struct Fixture {
        state: Arc<RwLock<AppState>>,
        config: Config,
        samples: ListState,
        history: ListState,
        resources: ResourceList,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                state: Arc::new(RwLock::new(AppState::default())),
                config: Config::default(),
                samples: ListState::default(),
                history: ListState::default(),
                resources: ResourceList::new(),
            }
        }

        fn press(&mut self, handler: &mut EventHandler, code: KeyCode) {
            let ctx = EventContext {
                state: &self.state,
                config: &mut self.config,
                samples: &mut self.samples,
                history: &mut self.history,
                resources: &mut self.resources,
            };
            handler
                .handle_key(KeyEvent::new(code, KeyModifiers::NONE), ctx)
                .unwrap();
        }
    }

    fn link(url: &str) -> ResourceLink {
        ResourceLink {
            url: url.to_string(),
            version: "v1.0".to_string(),
            methods: vec![],
        }
    }

    #[test]
    fn test_quit() {
        let mut fixture = Fixture::new();
        let mut handler = EventHandler::new();
        fixture.press(&mut handler, KeyCode::Char('q'));
        assert!(handler.should_quit);
    }

    #[test]
    fn test_resource_selection_reports_full_set() {
        let mut fixture = Fixture::new();
        let mut handler = EventHandler::new();
        let links = vec![link("/me"), link("/users"), link("/groups")];
        apply(&fixture.state, AppAction::SetResources(links.clone()));
        apply(&fixture.state, AppAction::SelectSidebarTab(SidebarTab::Resources));
        fixture.resources.sync(&links);

        // select A and C
        fixture.press(&mut handler, KeyCode::Char(' '));
        fixture.press(&mut handler, KeyCode::Char('j'));
        fixture.press(&mut handler, KeyCode::Char('j'));
        fixture.press(&mut handler, KeyCode::Char(' '));
        assert_eq!(read(&fixture.state).selected_resources.len(), 2);

        // deselect A
        fixture.press(&mut handler, KeyCode::Char('k'));
        fixture.press(&mut handler, KeyCode::Char('k'));
        fixture.press(&mut handler, KeyCode::Char(' '));
        assert_eq!(read(&fixture.state).selected_resources, vec![link("/groups")]);
    }

    #[test]
    fn test_cloud_dialog_flow_persists_choice() {
        let mut fixture = Fixture::new();
        let mut handler = EventHandler::new();

        fixture.press(&mut handler, KeyCode::Char('c'));
        assert_eq!(read(&fixture.state).input_mode, InputMode::SelectingCloud);

        // anonymous users only see the global cloud
        fixture.press(&mut handler, KeyCode::Char('j'));
        fixture.press(&mut handler, KeyCode::Esc);

        assert_eq!(read(&fixture.state).input_mode, InputMode::Normal);
        assert_eq!(fixture.config.load_cloud_value().as_deref(), Some("Global"));
        assert!(!handler.should_quit);
    }

    #[test]
    fn test_theme_and_mode_are_remembered() {
        let mut fixture = Fixture::new();
        let mut handler = EventHandler::new();

        fixture.press(&mut handler, KeyCode::Char('t'));
        fixture.press(&mut handler, KeyCode::Char('m'));

        let s = read(&fixture.state);
        assert_eq!(s.theme, Theme::HighContrast);
        assert_eq!(s.mode, Mode::TryIt);
        assert_eq!(fixture.config.explorer.theme, Theme::HighContrast);
        assert_eq!(fixture.config.explorer.mode, Mode::TryIt);
    }

    #[test]
    fn test_permissions_panel_captures_keys() {
        let mut fixture = Fixture::new();
        let mut handler = EventHandler::new();

        fixture.press(&mut handler, KeyCode::Char('p'));
        assert!(read(&fixture.state).permissions_panel_open);

        // 'q' does not quit while the panel is open
        fixture.press(&mut handler, KeyCode::Char('q'));
        assert!(!handler.should_quit);

        fixture.press(&mut handler, KeyCode::Esc);
        assert!(!read(&fixture.state).permissions_panel_open);
    }

    #[test]
    fn test_accept_terms() {
        let mut fixture = Fixture::new();
        let mut handler = EventHandler::new();
        assert!(read(&fixture.state).terms_of_use);
        fixture.press(&mut handler, KeyCode::Char('x'));
        assert!(!read(&fixture.state).terms_of_use);
    }
}
