use crate::actions::AppAction;
use crate::catalog::Catalog;
use crate::clouds::registry::replace_base_url;
use crate::clouds::{options_for, resolve_startup_cloud, CloudStore};
use crate::config::Config;
use crate::lookup::TelemetryLinkValidator;
use crate::response::tabs::compose_tabs;
use crate::state::AppState;
use crate::types::{Dimensions, InputMode, Query};
use crate::ui::draw::{self, SidebarWidgets};
use crate::ui::events::{self, apply, read};
use crate::ui::resources::ResourceList;
use crate::ui::{EventContext, EventHandler};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::ListState,
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, info};

pub struct App {
    state: Arc<RwLock<AppState>>,
    config: Config,
    catalog: Arc<Catalog>,
    validator: TelemetryLinkValidator,
    samples: ListState,
    history: ListState,
    resources: ResourceList,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: EventHandler,
    /// The signed-in cloud prompt is shown at most once per session
    prompted: bool,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let state = Arc::new(RwLock::new(AppState::default()));

        let cloud = resolve_startup_cloud(&config);
        info!(cloud = %cloud.name, "starting");
        let query = Query {
            sample_url: replace_base_url(&Query::default().sample_url, &cloud),
            ..Default::default()
        };

        let mut samples = ListState::default();
        if !catalog.samples.is_empty() {
            samples.select(Some(0));
        }

        events::apply_many(
            &state,
            vec![
                AppAction::SetActiveCloud(cloud),
                AppAction::SetSampleQuery(query),
                AppAction::SetSamples(catalog.samples.clone()),
                AppAction::SetResources(catalog.resources.clone()),
                AppAction::SetScopes(catalog.scopes.clone()),
                AppAction::SetMode(config.explorer.mode),
                AppAction::SetTheme(config.explorer.theme),
            ],
        );

        Self {
            state,
            config,
            catalog: Arc::new(catalog),
            validator: TelemetryLinkValidator::new(),
            samples,
            history: ListState::default(),
            resources: ResourceList::new(),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: EventHandler::new(),
            prompted: false,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % draw::styling::SPINNER.len();
                self.last_tick = Instant::now();
            }

            self.maybe_prompt_for_cloud();
            terminal.draw(|frame| self.draw(frame))?;

            let ctx = EventContext {
                state: &self.state,
                config: &mut self.config,
                samples: &mut self.samples,
                history: &mut self.history,
                resources: &mut self.resources,
            };
            self.event_handler.handle_events(ctx)?;
        }

        info!("quitting");
        Ok(())
    }

    /// Offer the cloud selector once a signed-in profile is known and no
    /// cloud has been chosen yet
    fn maybe_prompt_for_cloud(&mut self) {
        if self.prompted || self.config.load_cloud_value().is_some() {
            return;
        }
        let ready = {
            let s = read(&self.state);
            s.profile.is_some() && s.input_mode == InputMode::Normal
        };
        if ready {
            self.prompted = true;
            events::handle_cloud_dialog(&self.state, &self.config, true);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Keep the resource list in step with the shared resource set
        let cleared = {
            let s = read(&self.state);
            self.resources.sync(&s.resources)
        };
        if cleared {
            debug!("resource set replaced, selection cleared");
            apply(&self.state, AppAction::SetSelectedResources(Vec::new()));
        }

        let dimensions = Dimensions {
            width: area.width,
            height: area.height,
        };
        if read(&self.state).dimensions != dimensions {
            apply(&self.state, AppAction::SetDimensions(dimensions));
        }

        let state = read(&self.state);

        let tabs = compose_tabs(
            state.mode,
            &state.graph_response.body,
            &state.sample_query,
            self.catalog.as_ref(),
            &self.validator,
        );

        let banner_height = if state.terms_of_use { 2 } else { 0 };
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Header
                Constraint::Length(banner_height), // Terms of use
                Constraint::Length(3),             // Query bar
                Constraint::Min(0),                // Body
                Constraint::Length(1),             // Status
                Constraint::Length(3),             // Footer
            ])
            .split(area);

        draw::render_header(frame, main_chunks[0], &state);
        if state.terms_of_use {
            draw::render_terms_banner(frame, main_chunks[1]);
        }
        draw::render_query_bar(frame, main_chunks[2], &state, self.spinner_index);

        let full_width = state.response_area_expanded || !state.sidebar.show_sidebar;
        let (sidebar_area, response_area) = body_areas(main_chunks[3], full_width);
        if let Some(sidebar_area) = sidebar_area {
            draw::render_sidebar(
                frame,
                sidebar_area,
                &state,
                SidebarWidgets {
                    samples: &mut self.samples,
                    history: &mut self.history,
                    resources: &mut self.resources,
                },
            );
        }
        draw::render_response_panel(
            frame,
            response_area,
            &state,
            &tabs,
            &self.catalog,
            self.spinner_index,
        );

        draw::render_status_bar(frame, main_chunks[4], &state);
        draw::render_footer(frame, main_chunks[5], &state);

        // Render modals LAST
        match state.input_mode {
            InputMode::SelectingCloud => {
                let options = options_for(state.profile.as_ref());
                let current = state.cloud.as_ref().map(|c| c.name.as_str());
                draw::render_cloud_selector_modal(frame, &state, &options, current);
            }
            InputMode::EnteringToken => {
                draw::render_token_input_modal(frame, &state);
            }
            InputMode::ConfirmClearToken => {
                draw::render_clear_confirmation_modal(frame);
            }
            InputMode::Normal | InputMode::Searching => {}
        }
        if state.permissions_panel_open {
            draw::render_permissions_panel(frame, &state);
        }
    }
}

/// Split the body into sidebar and response areas
fn body_areas(body: Rect, full_width: bool) -> (Option<Rect>, Rect) {
    if full_width {
        return (None, body);
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(body);
    (Some(chunks[0]), chunks[1])
}
