use url::Url;

use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use crate::types::{GraphResponse, HistoryItem, MessageType, Query, Status, User};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the active query in the background and records the response and history
pub fn execute_query_background(state: Arc<RwLock<AppState>>) {
    let (query, token) = {
        let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
        if s.is_loading_data {
            debug!("query already running, ignoring");
            return;
        }
        apply_action(AppAction::SetLoadingData(true), &mut s);
        apply_action(AppAction::ClearQueryResponseStatus, &mut s);
        (s.sample_query.clone(), s.auth_token.clone())
    };

    tokio::spawn(async move {
        let response = match build_request_url(&query) {
            Ok(url) => execute_request(&url, &query, token.as_deref()).await,
            Err(e) => GraphResponse::error(format!("Failed to build URL: {e}")),
        };

        info!(
            method = %query.selected_verb,
            url = %query.sample_url,
            status = response.status,
            elapsed_ms = response.duration.as_millis() as u64,
            "query finished"
        );

        let mut actions = vec![AppAction::AddHistoryItem(HistoryItem {
            query: query.clone(),
            status: response.status,
            duration: response.duration,
            created_at: chrono::Utc::now(),
        })];

        if let Some(message) = &response.error_message {
            actions.push(AppAction::SetQueryResponseStatus(Status {
                status_text: "Request failed".to_string(),
                status: message.clone(),
                ok: false,
                message_type: MessageType::Error,
            }));
        } else if response.status >= 400 {
            actions.push(AppAction::SetQueryResponseStatus(Status {
                status_text: format!("{} {}", response.status, response.status_text),
                status: query.sample_url.clone(),
                ok: false,
                message_type: MessageType::Warning,
            }));
        }

        actions.push(AppAction::SetGraphResponse(response));
        actions.push(AppAction::SetLoadingData(false));

        let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
        for action in actions {
            apply_action(action, &mut s);
        }
    });
}

/// Fetches the signed-in user's profile for the active cloud
pub fn fetch_profile_background(state: Arc<RwLock<AppState>>) {
    let (base_url, token) = {
        let s = state.read().unwrap_or_else(PoisonError::into_inner);
        (s.base_url(), s.auth_token.clone())
    };
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return;
    };

    tokio::spawn(async move {
        let url = format!("{}/v1.0/me", base_url.trim_end_matches('/'));
        let query = Query {
            sample_url: url.clone(),
            ..Default::default()
        };
        let response = execute_request(&url, &query, Some(&token)).await;

        let profile = if response.status == 200 {
            parse_profile(&response.body)
        } else {
            None
        };

        let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
        match profile {
            Some(user) => {
                info!(user = %user.display_name, "profile loaded");
                apply_action(AppAction::SetProfile(Some(user)), &mut s);
            }
            None => {
                warn!(status = response.status, error = ?response.error_message, "profile request failed");
                apply_action(
                    AppAction::SetQueryResponseStatus(Status {
                        status_text: "Could not load profile".to_string(),
                        status: format!("{} {}", response.status, response.status_text),
                        ok: false,
                        message_type: MessageType::Warning,
                    }),
                    &mut s,
                );
            }
        }
    });
}

async fn execute_request(url: &str, query: &Query, token: Option<&str>) -> GraphResponse {
    let method = match reqwest::Method::from_bytes(query.selected_verb.to_uppercase().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return GraphResponse::error(format!("Unsupported method: {}", query.selected_verb))
        }
    };

    let client = reqwest::Client::new();
    let mut request_builder = client.request(method, url);

    for header in &query.sample_headers {
        request_builder = request_builder.header(&header.name, &header.value);
    }

    if let Some(body) = query.sample_body.as_ref().filter(|b| !b.trim().is_empty()) {
        if !query
            .sample_headers
            .iter()
            .any(|h| h.name.eq_ignore_ascii_case("content-type"))
        {
            request_builder = request_builder.header("Content-Type", "application/json");
        }
        request_builder = request_builder.body(body.clone());
    }

    if let Some(token) = token {
        request_builder = request_builder.bearer_auth(token);
    }

    let start = Instant::now();

    match request_builder.send().await {
        Ok(response) => {
            let duration = start.elapsed();

            let status = response.status().as_u16();
            let status_text = response
                .status()
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string();

            // Keys normalized to lowercase
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str().to_lowercase(),
                        value.to_str().unwrap_or("").to_string(),
                    )
                })
                .collect();

            match response.text().await {
                Ok(body) => GraphResponse {
                    status,
                    status_text,
                    headers,
                    body,
                    duration,
                    is_error: false,
                    error_message: None,
                },
                Err(e) => GraphResponse {
                    duration,
                    ..GraphResponse::error(format!("Failed to read response body: {e}"))
                },
            }
        }
        Err(e) => GraphResponse {
            duration: start.elapsed(),
            ..GraphResponse::error(format!("Request failed: {e}"))
        },
    }
}

/// Validate the query URL, normalizing encoding
pub(crate) fn build_request_url(query: &Query) -> Result<String, String> {
    let url = Url::parse(query.sample_url.trim()).map_err(|e| format!("Invalid URL: {e}"))?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(format!("Unsupported scheme: {other}")),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    display_name: Option<String>,
    mail: Option<String>,
    user_principal_name: Option<String>,
}

/// Reads a `/me` response. Falls back to the principal name when `mail` is unset.
pub(crate) fn parse_profile(body: &str) -> Option<User> {
    let profile: ProfileBody = serde_json::from_str(body).ok()?;
    let email_address = profile.mail.or(profile.user_principal_name)?;

    Some(User {
        display_name: profile
            .display_name
            .unwrap_or_else(|| email_address.clone()),
        email_address,
    })
}
