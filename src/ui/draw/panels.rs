//! Main panel rendering
//!
//! This module contains rendering functions for the two main panels:
//! - Sidebar (left side) - samples, resources and history
//! - Response panel (right side) - tab bar and the active viewer

use super::components::render_loading_placeholder;
use super::{styling, tabs::*};
use crate::catalog::Catalog;
use crate::lookup::{TemplateLookup, ToolkitLookup};
use crate::response::{ResponseTab, ResponseTabKind, TabLoad, TabViewer};
use crate::state::AppState;
use crate::types::{InputMode, PanelFocus, SidebarTab};
use crate::ui::resources::ResourceList;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use styling::get_method_color;

/// Widget state owned by the app and handed to the sidebar each frame
pub struct SidebarWidgets<'a> {
    pub samples: &'a mut ListState,
    pub history: &'a mut ListState,
    pub resources: &'a mut ResourceList,
}

/// Render the left panel: tab line plus the active sidebar list
pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState, widgets: SidebarWidgets) {
    let focused = state.panel_focus == PanelFocus::Sidebar;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_sidebar_tabs(frame, chunks[0], state);

    match state.sidebar.active_tab {
        SidebarTab::Samples => render_samples(frame, chunks[1], state, widgets.samples, focused),
        SidebarTab::Resources => widgets.resources.render(frame, chunks[1], focused),
        SidebarTab::History => render_history(frame, chunks[1], state, widgets.history, focused),
    }
}

/// Render the right panel with the response tab bar and active viewer
pub fn render_response_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    tabs: &[ResponseTab],
    catalog: &Catalog,
    spinner_index: usize,
) {
    let border_color = if state.panel_focus == PanelFocus::Response {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let block = Block::default()
        .title("[2] Response")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content area
        ])
        .split(inner_area);

    render_tab_bar(frame, chunks[0], state, tabs);

    let kind = state.active_response_tab;
    match kind {
        ResponseTabKind::Preview => render_preview_tab(frame, chunks[1], state),
        ResponseTabKind::Headers => render_headers_tab(frame, chunks[1], state),
        _ => match state.tab_load(kind) {
            TabLoad::NotStarted | TabLoad::Loading => {
                render_loading_placeholder(frame, chunks[1], kind.label(), spinner_index);
            }
            TabLoad::Failed(error) => {
                let failed = Paragraph::new(format!("Failed to load {}:\n\n{error}", kind.label()))
                    .style(Style::default().fg(Color::Red));
                frame.render_widget(failed, chunks[1]);
            }
            TabLoad::Ready(TabViewer::Snippets(_)) => render_snippets_tab(frame, chunks[1], state),
            TabLoad::Ready(TabViewer::Toolkit) => {
                let urls = catalog.lookup_toolkit_url(&state.sample_query);
                render_toolkit_tab(frame, chunks[1], state, &urls);
            }
            TabLoad::Ready(TabViewer::AdaptiveCard(viewer)) => {
                let template = catalog.lookup_template(&state.sample_query);
                render_card_tab(frame, chunks[1], state, viewer, template.as_ref());
            }
        },
    }
}

// ============================================================================
// Private Helper Functions
// ============================================================================

fn render_sidebar_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let accent = styling::accent(state.theme);
    let mut spans = Vec::new();
    for (tab, label) in [
        (SidebarTab::Samples, "Samples"),
        (SidebarTab::Resources, "Resources"),
        (SidebarTab::History, "History"),
    ] {
        let style = if state.sidebar.active_tab == tab {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styling::default_fg(state.theme))
        };
        spans.push(Span::styled("[ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ] ", Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_samples(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list_state: &mut ListState,
    focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_bar(frame, chunks[0], state);

    let visible = state.visible_samples();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|sample| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:7}", sample.method.to_uppercase()),
                    Style::default()
                        .fg(get_method_color(&sample.method))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{}: ", sample.category),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(sample.human_name.clone()),
            ]);
            ListItem::new(line)
        })
        .collect();

    if items.is_empty() {
        let message = if state.search_query.is_empty() {
            "No samples loaded"
        } else {
            "No matching samples\n\nPress [Esc] to clear search"
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .block(sidebar_block(" Samples ".to_string(), focused));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let list = List::new(items)
        .block(sidebar_block(format!(" Samples ({}) ", visible.len()), focused))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, chunks[1], list_state);
}

/// Render the sample search bar with active filter indication
fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let is_active = state.input_mode == InputMode::Searching;

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else if !state.search_query.is_empty() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if !state.search_query.is_empty() {
        format!(
            " Search [{}/{}] ",
            state.visible_samples().len(),
            state.samples.len()
        )
    } else {
        " Search (/) ".to_string()
    };

    let search_text = if is_active {
        format!("{}_", state.search_query)
    } else {
        state.search_query.clone()
    };

    let paragraph = Paragraph::new(search_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn render_history(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list_state: &mut ListState,
    focused: bool,
) {
    if state.history.is_empty() {
        let empty = Paragraph::new("No queries run yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(sidebar_block(" History ".to_string(), focused));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .history
        .iter()
        .map(|item| {
            let status = if item.status == 0 {
                "ERR".to_string()
            } else {
                item.status.to_string()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    item.created_at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{status:3} "),
                    Style::default().fg(styling::http_status_color(item.status)),
                ),
                Span::styled(
                    format!("{:7}", item.query.selected_verb),
                    Style::default().fg(get_method_color(&item.query.selected_verb)),
                ),
                Span::raw(item.query.sample_url.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(sidebar_block(format!(" History ({}) ", state.history.len()), focused))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, list_state);
}

fn sidebar_block(title: String, focused: bool) -> Block<'static> {
    let border_color = if focused {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Render the tab bar, e.g. [ Response Preview ] [ Response Headers ] [ Adaptive Cards ● ]
fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState, tabs: &[ResponseTab]) {
    let accent = styling::accent(state.theme);
    let mut spans = Vec::new();

    for (index, tab) in tabs.iter().enumerate() {
        let style = if tab.kind == state.active_response_tab {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styling::default_fg(state.theme))
        };

        spans.push(Span::styled(
            if index == 0 { "[ " } else { " [ " },
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(format!("{} {}", index + 1, tab.kind.label()), style));
        if tab.marker {
            spans.push(Span::styled(" ●", Style::default().fg(Color::Green)));
        }
        spans.push(Span::styled(" ]", Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
