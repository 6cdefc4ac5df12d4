//! Styling utilities and color schemes
//!
//! This module contains color helpers and style constants used throughout the UI.

use crate::types::{MessageType, Theme};
use ratatui::style::Color;

/// Get the color for an HTTP method
pub fn get_method_color(method: &str) -> Color {
    match method.to_uppercase().as_str() {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "DELETE" => Color::Red,
        "PATCH" => Color::Cyan,
        _ => Color::White,
    }
}

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn unfocused_border() -> Color {
    Color::DarkGray
}

/// Foreground for inactive labels
pub fn default_fg(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Black,
        Theme::Dark => Color::Gray,
        Theme::HighContrast => Color::White,
    }
}

/// Accent used for active tabs and titles
pub fn accent(theme: Theme) -> Color {
    match theme {
        Theme::HighContrast => Color::Yellow,
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    }
}

pub fn status_color(message_type: MessageType) -> Color {
    match message_type {
        MessageType::Info => Color::Cyan,
        MessageType::Success => Color::Green,
        MessageType::Warning => Color::Yellow,
        MessageType::Error => Color::Red,
    }
}

pub fn http_status_color(status: u16) -> Color {
    match status {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Braille spinner frames
pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
