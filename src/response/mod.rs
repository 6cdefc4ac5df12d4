//! Response viewers
//!
//! - `tabs`: which viewer tabs exist and which carry a marker
//! - `lazy`: deferred loading of the complete-mode viewers
//! - `snippets`: code snippet generation
//! - `card`: adaptive card binding and host configs

pub mod card;
pub mod lazy;
pub mod snippets;
pub mod tabs;

pub use lazy::{activate_tab, TabLoad, TabViewer};
pub use tabs::{compose_tabs, ResponseTab, ResponseTabKind};

/// Attempts to pretty-print JSON, returns original string if not valid JSON
pub fn try_format_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_format_json() {
        assert_eq!(try_format_json(r#"{"id":1}"#), "{\n  \"id\": 1\n}");
        assert_eq!(try_format_json("not json"), "not json");
    }
}
