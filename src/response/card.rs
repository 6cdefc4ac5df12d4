//! Adaptive card preview
//!
//! Binds a card template to the JSON response body and flattens the result
//! into styled lines. Only `TextBlock` and `FactSet` elements are bound;
//! anything else is listed by type so the user knows it was skipped.

use crate::types::{Theme, ThemeReader};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

const LIGHT_HOST_CONFIG: &str = include_str!("../../assets/host_config_light.json");
const DARK_HOST_CONFIG: &str = include_str!("../../assets/host_config_dark.json");

/// Colors a card is drawn with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    pub name: String,
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub subtle: [u8; 3],
    pub accent: [u8; 3],
    pub attention: [u8; 3],
    pub fact_title: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardViewer {
    light: HostConfig,
    dark: HostConfig,
}

impl CardViewer {
    pub fn load() -> Result<Self> {
        Ok(Self {
            light: serde_json::from_str(LIGHT_HOST_CONFIG).context("light host config")?,
            dark: serde_json::from_str(DARK_HOST_CONFIG).context("dark host config")?,
        })
    }

    /// Light host config for the light theme, dark for everything else
    pub fn host_config(&self, theme: &dyn ThemeReader) -> &HostConfig {
        match theme.current_theme() {
            Theme::Light => &self.light,
            Theme::Dark | Theme::HighContrast => &self.dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextWeight {
    Heading,
    Subtle,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLine {
    Text { text: String, weight: TextWeight },
    Fact { title: String, value: String },
    Unsupported(String),
}

/// Bind `template` against `body`. Returns `None` if the body is not JSON.
pub fn render_card(template: &Value, body: &str) -> Option<Vec<CardLine>> {
    let data: Value = serde_json::from_str(body).ok()?;
    let mut lines = Vec::new();

    let elements = template
        .get("body")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for element in elements {
        match element.get("type").and_then(Value::as_str) {
            Some("TextBlock") => {
                let text = bind(element.get("text").and_then(Value::as_str).unwrap_or(""), &data);
                let weight = if element.get("weight").and_then(Value::as_str) == Some("Bolder") {
                    TextWeight::Heading
                } else if element.get("isSubtle").and_then(Value::as_bool) == Some(true) {
                    TextWeight::Subtle
                } else {
                    TextWeight::Normal
                };
                lines.push(CardLine::Text { text, weight });
            }
            Some("FactSet") => {
                let facts = element
                    .get("facts")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for fact in facts {
                    let field = |name: &str| fact.get(name).and_then(Value::as_str).unwrap_or("");
                    lines.push(CardLine::Fact {
                        title: bind(field("title"), &data),
                        value: bind(field("value"), &data),
                    });
                }
            }
            Some(other) => lines.push(CardLine::Unsupported(other.to_string())),
            None => {}
        }
    }

    Some(lines)
}

/// Replace every `${path}` in `text` with the value at `path` in `data`.
/// Missing values bind to an empty string.
fn bind(text: &str, data: &Value) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                out.push_str(&resolve(data, &after[..end]));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolve a dotted path with optional indexes, e.g. `value[0].from.emailAddress.name`
fn resolve(data: &Value, path: &str) -> String {
    let mut current = data;

    for part in path.split('.') {
        let (key, index) = match part.find('[') {
            Some(open) => {
                let index = part[open + 1..]
                    .trim_end_matches(']')
                    .parse::<usize>()
                    .ok();
                (&part[..open], index)
            }
            None => (part, None),
        };

        if !key.is_empty() {
            match current.get(key) {
                Some(next) => current = next,
                None => return String::new(),
            }
        }
        if let Some(i) = index {
            match current.get(i) {
                Some(next) => current = next,
                None => return String::new(),
            }
        }
    }

    match current {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_template() -> Value {
        json!({
            "type": "AdaptiveCard",
            "body": [
                { "type": "TextBlock", "weight": "Bolder", "text": "${displayName}" },
                { "type": "TextBlock", "isSubtle": true, "text": "${jobTitle}" },
                { "type": "FactSet", "facts": [{ "title": "Email", "value": "${mail}" }] },
                { "type": "Image", "url": "${photo}" }
            ]
        })
    }

    #[test]
    fn test_render_profile_card() {
        let body = r#"{"displayName":"Megan Bowen","jobTitle":"Auditor","mail":"megan@contoso.com"}"#;
        let lines = render_card(&profile_template(), body).unwrap();

        assert_eq!(
            lines,
            vec![
                CardLine::Text {
                    text: "Megan Bowen".to_string(),
                    weight: TextWeight::Heading
                },
                CardLine::Text {
                    text: "Auditor".to_string(),
                    weight: TextWeight::Subtle
                },
                CardLine::Fact {
                    title: "Email".to_string(),
                    value: "megan@contoso.com".to_string()
                },
                CardLine::Unsupported("Image".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_json_body() {
        assert!(render_card(&profile_template(), "<html>").is_none());
    }

    #[test]
    fn test_bind_nested_and_indexed() {
        let data = json!({"value": [{"from": {"emailAddress": {"name": "Alex"}}, "size": 42}]});
        assert_eq!(bind("From ${value[0].from.emailAddress.name}", &data), "From Alex");
        assert_eq!(bind("${value[0].size} bytes", &data), "42 bytes");
        assert_eq!(bind("${value[3].size}", &data), "");
        assert_eq!(bind("${missing}!", &data), "!");
        assert_eq!(bind("unterminated ${oops", &data), "unterminated ${oops");
    }

    #[test]
    fn test_host_config_follows_theme() {
        let viewer = CardViewer::load().unwrap();
        assert_eq!(viewer.host_config(&Theme::Light).name, "light");
        assert_eq!(viewer.host_config(&Theme::Dark).name, "dark");
        assert_eq!(viewer.host_config(&Theme::HighContrast).name, "dark");
    }
}
