//! On-demand loading of the heavier result viewers
//!
//! Snippets, toolkit and adaptive-card viewers are only prepared the first
//! time their tab is activated. Until then the tab renders a placeholder.

use super::card::CardViewer;
use super::snippets::SnippetGenerator;
use super::tabs::ResponseTabKind;
use crate::actions::{apply_action, AppAction};
use crate::state::AppState;
use anyhow::Result;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq)]
pub enum TabViewer {
    Snippets(SnippetGenerator),
    Toolkit,
    AdaptiveCard(CardViewer),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TabLoad {
    #[default]
    NotStarted,
    Loading,
    Ready(TabViewer),
    Failed(String),
}

/// Prepare the viewer behind a deferred tab
pub async fn load_viewer(kind: ResponseTabKind) -> Result<TabViewer> {
    match kind {
        ResponseTabKind::Snippets => Ok(TabViewer::Snippets(SnippetGenerator::default())),
        ResponseTabKind::Toolkit => Ok(TabViewer::Toolkit),
        ResponseTabKind::AdaptiveCards => {
            let viewer = tokio::task::spawn_blocking(CardViewer::load).await??;
            Ok(TabViewer::AdaptiveCard(viewer))
        }
        ResponseTabKind::Preview | ResponseTabKind::Headers => {
            anyhow::bail!("{} is not a deferred tab", kind.item_key())
        }
    }
}

/// Switch to `kind`, kicking off its load the first time it is shown
pub fn activate_tab(state: Arc<RwLock<AppState>>, kind: ResponseTabKind) {
    let needs_load = {
        let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
        apply_action(AppAction::SelectResponseTab(kind), &mut s);

        let needs_load = kind.is_deferred()
            && s.active_response_tab == kind
            && *s.tab_load(kind) == TabLoad::NotStarted;
        if needs_load {
            apply_action(AppAction::StartTabLoad(kind), &mut s);
        }
        needs_load
    };

    if !needs_load {
        return;
    }

    debug!(tab = kind.item_key(), "loading viewer");
    tokio::spawn(async move {
        let result = load_viewer(kind).await.map_err(|e| {
            error!(tab = kind.item_key(), error = %e, "viewer failed to load");
            e.to_string()
        });

        let mut s = state.write().unwrap_or_else(PoisonError::into_inner);
        apply_action(AppAction::FinishTabLoad(kind, result), &mut s);
    });
}
