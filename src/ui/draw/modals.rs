//! Modal dialog rendering
//!
//! This module contains rendering functions for modal dialogs:
//! - Cloud selector
//! - Token input and clear confirmation
//! - Permissions panel

use crate::clouds::CloudOption;
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const MODAL_BG: Color = Color::Rgb(30, 30, 30);

/// Center a modal of `width_ratio` of the screen (capped at `max_width`) and `height` rows
fn modal_area(area: Rect, width_ratio: f32, max_width: f32, height: u16) -> Rect {
    let width = (area.width as f32 * width_ratio).min(max_width) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn modal_block(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(MODAL_BG).fg(Color::White))
}

/// Render the cloud selector. `current` is the name of the active cloud.
pub fn render_cloud_selector_modal(
    frame: &mut Frame,
    state: &AppState,
    options: &[CloudOption],
    current: Option<&str>,
) {
    let sub_text = if state.cloud_dialog.prompt {
        "Hey there! Would you like to access your information available in another cloud? You will need to log in once you choose a cloud"
    } else {
        ""
    };
    let sub_text_height = if sub_text.is_empty() { 0 } else { 3 };
    let height = sub_text_height + options.len() as u16 + 6;

    let modal_area = modal_area(frame.area(), 0.6, 60.0, height);
    frame.render_widget(Clear, modal_area);

    let block = modal_block(" You have access to sovereign clouds ", Color::Cyan);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(sub_text_height),
            Constraint::Length(1), // Label
            Constraint::Min(1),    // Options
            Constraint::Length(1), // Help
        ])
        .split(inner);

    if !sub_text.is_empty() {
        let desc = Paragraph::new(sub_text)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(desc, chunks[0]);
    }

    let label = Paragraph::new("Pick the cloud").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[1]);

    let items: Vec<ListItem> = options
        .iter()
        .map(|option| {
            let radio = if Some(option.key.as_str()) == current {
                "(•)"
            } else {
                "( )"
            };
            ListItem::new(format!("{radio} {}", option.text))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.cloud_dialog.highlighted));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");
    frame.render_stateful_widget(list, chunks[2], &mut list_state);

    let help = Paragraph::new("Enter: Select  |  Esc: Close")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Render the token input modal for bearer authentication
pub fn render_token_input_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = modal_area(frame.area(), 0.6, 80.0, 7);
    frame.render_widget(Clear, modal_area);

    let block = modal_block(" Enter Access Token ", Color::Cyan);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let label = Paragraph::new("Token:").style(Style::default().fg(Color::LightCyan));
    frame.render_widget(label, chunks[0]);

    // Show the full token while editing
    let input = Paragraph::new(state.token_input.clone()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(input, chunks[1]);

    let help = Paragraph::new("Enter: Save  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Render the clear token confirmation modal
pub fn render_clear_confirmation_modal(frame: &mut Frame) {
    let modal_area = modal_area(frame.area(), 0.5, 60.0, 7);
    frame.render_widget(Clear, modal_area);

    let block = modal_block(" Sign Out? ", Color::Red);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let message = Paragraph::new(
        "This removes your access token and profile.\nQueries will run unauthenticated.",
    )
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[0]);

    let actions = Paragraph::new("[Y] Yes, clear it  |  [N] Cancel")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(actions, chunks[2]);
}

/// Render the permissions panel listing catalog scopes and their consent state
pub fn render_permissions_panel(frame: &mut Frame, state: &AppState) {
    let height = (state.scopes.list.len() as u16 + 5).max(7);
    let modal_area = modal_area(frame.area(), 0.8, 100.0, height);
    frame.render_widget(Clear, modal_area);

    let block = modal_block(" Permissions ", Color::Magenta);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if state.scopes.pending {
        let loading = Paragraph::new("Loading permissions...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, chunks[0]);
    } else if state.scopes.list.is_empty() {
        let empty = Paragraph::new("No permissions available")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = state
            .scopes
            .list
            .iter()
            .map(|scope| {
                let consented = state.consented_scopes.contains(&scope.value);
                let check = if consented { "[x]" } else { "[ ]" };
                let mut spans = vec![
                    Span::raw(format!("{check} ")),
                    Span::styled(
                        format!("{:28}", scope.value),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(scope.description.clone(), Style::default().fg(Color::Gray)),
                ];
                if scope.is_admin {
                    spans.push(Span::styled(
                        "  admin consent",
                        Style::default().fg(Color::Yellow),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(state.highlighted_scope));

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("► ");
        frame.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    let help = Paragraph::new("j/k: Move  |  Space: Consent  |  p/Esc: Close")
        .style(Style::default().fg(Color::Rgb(150, 150, 150)))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 10);
        let modal = modal_area(area, 0.5, 60.0, 20);
        assert_eq!(modal.width, 50);
        assert_eq!(modal.height, 10);
        assert_eq!(modal.x, 25);
        assert_eq!(modal.y, 0);
    }
}
