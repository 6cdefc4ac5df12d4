//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (cloud, signed-in user, mode)
//! - Query bar (verb and URL of the active query)
//! - Status bar and terms-of-use banner
//! - Footer (command help)
//! - Loading placeholder

use super::styling;
use crate::state::AppState;
use crate::types::{InputMode, Mode, PanelFocus, SidebarTab};
use crate::utils::{mask_token, truncate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the application header with cloud, auth and mode
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let accent = styling::accent(state.theme);

    let cloud = state
        .cloud
        .as_ref()
        .map(|c| c.display_name.as_str())
        .unwrap_or("no cloud");

    let mode = match state.mode {
        Mode::Complete => "complete",
        Mode::TryIt => "try-it",
    };

    let header = Line::from(vec![
        Span::styled(
            "graph explorer",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(format!("☁ {cloud}"), Style::default().fg(Color::LightBlue)),
        Span::raw(" | "),
        Span::raw(get_auth_status_text(state)),
        Span::raw(" | "),
        Span::styled(
            format!("mode: {mode}  theme: {}", state.theme.label()),
            Style::default().fg(styling::default_fg(state.theme)),
        ),
    ]);

    let paragraph = Paragraph::new(header).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Render the active query: verb badge and URL
pub fn render_query_bar(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let query = &state.sample_query;
    let verb_color = styling::get_method_color(&query.selected_verb);

    let mut spans = vec![
        Span::styled(
            format!("{:7}", query.selected_verb),
            Style::default().fg(verb_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(query.sample_url.clone()),
    ];

    if state.is_loading_data {
        spans.push(Span::styled(
            format!("  {} running", styling::SPINNER[spinner_index % styling::SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        ));
    }

    let title = format!(" Query ({}) ", query.selected_version);
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_bottom(Line::from(" r:Run ").right_aligned()),
    );
    frame.render_widget(paragraph, area);
}

/// Render the latest status notification, if any
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.query_runner_status {
        Some(status) => {
            let color = styling::status_color(status.message_type);
            let icon = if status.ok { "✓" } else { "✗" };
            Line::from(vec![
                Span::styled(
                    format!("{icon} {}", status.status_text),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(": "),
                Span::raw(truncate(&status.status, area.width.saturating_sub(20) as usize)),
            ])
        }
        None => Line::from(Span::styled(
            "Ready",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the terms-of-use banner until it is accepted
pub fn render_terms_banner(frame: &mut Frame, area: Rect) {
    let text = "By using Graph Explorer you agree to the API terms of use and the privacy statement. Press [x] to dismiss.";
    let banner = Paragraph::new(text)
        .style(Style::default().fg(Color::Black).bg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

/// Render the footer with command help for the focused panel
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let footer_text = match state.input_mode {
        InputMode::Searching => "Type to filter samples | Enter:Keep filter Esc:Clear",
        InputMode::EnteringToken => "Enter:Save Ctrl+L:Clear Esc:Cancel",
        InputMode::ConfirmClearToken => "y:Clear token n/Esc:Cancel",
        InputMode::SelectingCloud => "j/k:Choose Enter:Select Esc:Close",
        InputMode::Normal => match state.panel_focus {
            PanelFocus::Sidebar => match state.sidebar.active_tab {
                SidebarTab::Samples => {
                    "Tab:Panel s:Sidebar j/k:Nav Enter:Run sample /:Search | c:Cloud m:Mode t:Theme a:Auth p:Perms q:Quit"
                }
                SidebarTab::Resources => {
                    "Tab:Panel s:Sidebar j/k:Nav Space:Select *:All v:Range Enter:Use path | c:Cloud a:Auth q:Quit"
                }
                SidebarTab::History => {
                    "Tab:Panel s:Sidebar j/k:Nav Enter:Rerun | c:Cloud m:Mode a:Auth q:Quit"
                }
            },
            PanelFocus::Response => {
                "Tab:Panel 1-5/h/l:Tabs Ctrl+d/u:Scroll n:Language y:Yank e:Expand b:Sidebar | r:Run q:Quit"
            }
        },
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Placeholder shown while a deferred viewer loads
pub fn render_loading_placeholder(frame: &mut Frame, area: Rect, what: &str, spinner_index: usize) {
    let text = format!(
        "{} Loading {what}...",
        styling::SPINNER[spinner_index % styling::SPINNER.len()]
    );
    let loading = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
    frame.render_widget(loading, area);
}

/// Get authentication status display text
fn get_auth_status_text(state: &AppState) -> String {
    match (&state.auth_token, &state.profile) {
        (Some(token), Some(user)) if !token.is_empty() => {
            format!("🔒 {} <{}>", user.display_name, user.email_address)
        }
        (Some(token), None) if !token.is_empty() => format!("🔒 {}", mask_token(token)),
        _ => "🔓 Not signed in | 'a':set token".to_string(),
    }
}
