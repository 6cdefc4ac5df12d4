//! Code snippet generation for the active query

use crate::types::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetLanguage {
    Http,
    Curl,
    JavaScript,
    Python,
    Rust,
}

impl SnippetLanguage {
    pub fn label(self) -> &'static str {
        match self {
            SnippetLanguage::Http => "HTTP",
            SnippetLanguage::Curl => "cURL",
            SnippetLanguage::JavaScript => "JavaScript",
            SnippetLanguage::Python => "Python",
            SnippetLanguage::Rust => "Rust",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetGenerator {
    languages: Vec<SnippetLanguage>,
}

impl Default for SnippetGenerator {
    fn default() -> Self {
        use SnippetLanguage::*;
        Self {
            languages: vec![Http, Curl, JavaScript, Python, Rust],
        }
    }
}

impl SnippetGenerator {
    /// One `(language label, code)` pair per supported language
    pub fn generate(&self, query: &Query) -> Vec<(String, String)> {
        self.languages
            .iter()
            .map(|&lang| (lang.label().to_string(), snippet(lang, query)))
            .collect()
    }
}

fn snippet(lang: SnippetLanguage, query: &Query) -> String {
    let verb = query.selected_verb.to_uppercase();
    let url = &query.sample_url;
    let body = query.sample_body.as_deref().filter(|b| !b.is_empty());

    match lang {
        SnippetLanguage::Http => {
            let mut out = format!("{verb} {url}\n");
            for h in &query.sample_headers {
                out.push_str(&format!("{}: {}\n", h.name, h.value));
            }
            if let Some(body) = body {
                out.push('\n');
                out.push_str(&super::try_format_json(body));
                out.push('\n');
            }
            out
        }
        SnippetLanguage::Curl => {
            let mut out = format!("curl -X {verb} '{url}' \\\n  -H 'Authorization: Bearer $TOKEN'");
            for h in &query.sample_headers {
                out.push_str(&format!(" \\\n  -H '{}: {}'", h.name, h.value));
            }
            if let Some(body) = body {
                out.push_str(&format!(" \\\n  -d '{}'", body.replace('\'', "'\\''")));
            }
            out.push('\n');
            out
        }
        SnippetLanguage::JavaScript => {
            let mut headers = vec!["    Authorization: `Bearer ${token}`".to_string()];
            headers.extend(
                query
                    .sample_headers
                    .iter()
                    .map(|h| format!("    '{}': '{}'", h.name, h.value)),
            );
            let body_line = body
                .map(|b| format!("  body: JSON.stringify({b}),\n"))
                .unwrap_or_default();
            format!(
                "const response = await fetch('{url}', {{\n  method: '{verb}',\n  headers: {{\n{}\n  }},\n{body_line}}});\nconst data = await response.json();\n",
                headers.join(",\n")
            )
        }
        SnippetLanguage::Python => {
            let mut out = String::from("import requests\n\n");
            out.push_str("headers = {\"Authorization\": f\"Bearer {token}\"");
            for h in &query.sample_headers {
                out.push_str(&format!(", \"{}\": \"{}\"", h.name, h.value));
            }
            out.push_str("}\n");
            let body_arg = match body {
                Some(b) => {
                    out.push_str(&format!("payload = {b}\n"));
                    ", json=payload"
                }
                None => "",
            };
            out.push_str(&format!(
                "response = requests.request(\"{verb}\", \"{url}\", headers=headers{body_arg})\nprint(response.json())\n"
            ));
            out
        }
        SnippetLanguage::Rust => {
            let method = match verb.as_str() {
                "GET" | "POST" | "PUT" | "PATCH" | "DELETE" | "HEAD" => {
                    format!("reqwest::Method::{verb}")
                }
                other => format!("reqwest::Method::from_bytes(b\"{other}\")?"),
            };
            let mut out = format!(
                "let response = reqwest::Client::new()\n    .request({method}, \"{url}\")\n    .bearer_auth(&token)\n"
            );
            for h in &query.sample_headers {
                out.push_str(&format!("    .header(\"{}\", \"{}\")\n", h.name, h.value));
            }
            if let Some(b) = body {
                out.push_str(&format!("    .body(r#\"{b}\"#)\n"));
            }
            out.push_str("    .send()\n    .await?;\n");
            out
        }
    }
}
