//! Response tab rendering
//!
//! One function per response viewer. The deferred viewers receive their
//! loaded state from the panel, which shows a placeholder until it is ready.

use super::styling;
use crate::catalog::CardTemplate;
use crate::lookup::ToolkitUrls;
use crate::response::card::{render_card, CardLine, CardViewer, TextWeight};
use crate::response::try_format_json;
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

pub fn render_preview_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    let response = &state.graph_response;

    if state.is_loading_data {
        lines.push(Line::from(vec![Span::styled(
            "⏳ Running query...",
            Style::default().fg(Color::Cyan),
        )]));
    } else if response.is_error {
        lines.push(Line::from(vec![Span::styled(
            "❌ Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));

        if let Some(ref err_msg) = response.error_message {
            for line in err_msg.lines() {
                lines.push(Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    } else if response.status == 0 {
        lines.push(Line::from(Span::styled(
            "Pick a sample and press [Enter], or press [r] to run the current query",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} {}", response.status, response.status_text),
                Style::default().fg(styling::http_status_color(response.status)),
            ),
            Span::raw("  "),
            Span::styled("Duration: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}ms", response.duration.as_millis())),
        ]));
        lines.push(Line::from(""));

        let body_style = if state.yank_flash {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default()
        };
        let formatted_body = try_format_json(&response.body);
        for line in formatted_body.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), body_style)));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll as u16, 0));

    frame.render_widget(content, area);
}

pub fn render_headers_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    let response = &state.graph_response;

    if response.status == 0 {
        lines.push(Line::from(Span::styled(
            "No response yet",
            Style::default().fg(Color::DarkGray),
        )));
    } else if response.headers.is_empty() {
        lines.push(Line::from(Span::styled(
            "No headers",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let mut header_vec: Vec<_> = response.headers.iter().collect();
        header_vec.sort_by_key(|(k, _)| k.as_str());

        for (key, value) in header_vec {
            lines.push(Line::from(vec![
                Span::styled(format!("{key}: "), Style::default().fg(Color::Cyan)),
                Span::raw(value.to_string()),
            ]));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll as u16, 0));

    frame.render_widget(content, area);
}

pub fn render_snippets_tab(frame: &mut Frame, area: Rect, state: &AppState) {
    let snippets = &state.snippets;
    if snippets.snippets.is_empty() {
        let empty = Paragraph::new("No snippets for this query")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let accent = styling::accent(state.theme);
    let mut spans = Vec::new();
    for (index, (language, _)) in snippets.snippets.iter().enumerate() {
        let style = if index == snippets.selected_language {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(styling::default_fg(state.theme))
        };
        spans.push(Span::styled(format!(" {language} "), style));
        spans.push(Span::styled("|", Style::default().fg(Color::DarkGray)));
    }
    spans.pop();
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let code = snippets
        .snippets
        .get(snippets.selected_language)
        .map(|(_, code)| code.as_str())
        .unwrap_or_default();

    let style = if state.yank_flash {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::LightYellow)
    };

    let content = Paragraph::new(code.to_string())
        .style(style)
        .block(Block::default())
        .scroll((state.response_scroll as u16, 0));
    frame.render_widget(content, chunks[1]);
}

pub fn render_toolkit_tab(frame: &mut Frame, area: Rect, state: &AppState, urls: &ToolkitUrls) {
    let lines = match urls.both() {
        Some((toolkit_url, example_url)) if state.graph_response.has_body() => vec![
            Line::from(Span::styled(
                "A toolkit component renders this response",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Playground: ", Style::default().fg(Color::Cyan)),
                Span::raw(toolkit_url.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Example:    ", Style::default().fg(Color::Cyan)),
                Span::raw(example_url.to_string()),
            ]),
        ],
        _ => vec![Line::from(Span::styled(
            "No toolkit component is available for this query",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

pub fn render_card_tab(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    viewer: &CardViewer,
    template: Option<&CardTemplate>,
) {
    let host = viewer.host_config(state);
    let base = Style::default()
        .fg(styling::rgb(host.foreground))
        .bg(styling::rgb(host.background));

    let card = match template {
        Some(template) if state.graph_response.has_body() => {
            render_card(&template.template, &state.graph_response.body)
        }
        _ => None,
    };

    let Some(card) = card else {
        let empty = Paragraph::new("No adaptive card is available for this response")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let lines: Vec<Line> = card
        .into_iter()
        .map(|line| match line {
            CardLine::Text { text, weight } => {
                let style = match weight {
                    TextWeight::Heading => base
                        .fg(styling::rgb(host.accent))
                        .add_modifier(Modifier::BOLD),
                    TextWeight::Subtle => base.fg(styling::rgb(host.subtle)),
                    TextWeight::Normal => base,
                };
                Line::from(Span::styled(text, style))
            }
            CardLine::Fact { title, value } => Line::from(vec![
                Span::styled(
                    format!("{title}: "),
                    base.fg(styling::rgb(host.fact_title))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(value, base),
            ]),
            CardLine::Unsupported(kind) => Line::from(Span::styled(
                format!("[{kind} not shown]"),
                base.fg(styling::rgb(host.attention))
                    .add_modifier(Modifier::ITALIC),
            )),
        })
        .collect();

    let content = Paragraph::new(lines)
        .style(base)
        .block(Block::default().style(base).title(format!(" {} ", host.name)))
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll as u16, 0));
    frame.render_widget(content, area);
}
