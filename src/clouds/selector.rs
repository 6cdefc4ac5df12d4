//! Cloud selector dialog behavior
//!
//! Every handler returns the actions to dispatch instead of touching state,
//! so the event layer applies them under one write lock and tests can
//! replay them against a plain `AppState`.

use super::options::CloudOption;
use super::registry::{get_cloud_properties, get_current_cloud, global_cloud, replace_base_url};
use super::store::CloudStore;
use crate::actions::AppAction;
use crate::types::{MessageType, Query, Status};
use tracing::{info, warn};

/// Index of the option to highlight when the dialog opens
pub fn initial_option_index(store: &dyn CloudStore, options: &[CloudOption]) -> usize {
    let current = get_current_cloud(store).unwrap_or_else(global_cloud);
    options
        .iter()
        .position(|o| o.key == current.name)
        .unwrap_or(0)
}

/// Resolve, persist and activate the cloud behind `option_key`, then
/// point the active query at it
pub fn set_selected_cloud(
    option_key: &str,
    sample_query: &Query,
    store: &mut dyn CloudStore,
) -> Vec<AppAction> {
    let active_cloud = get_cloud_properties(option_key).unwrap_or_else(global_cloud);

    if let Err(e) = store.store_cloud_value(&active_cloud.name) {
        warn!(cloud = %active_cloud.name, error = %e, "failed to persist cloud selection");
    }
    info!(cloud = %active_cloud.name, base_url = %active_cloud.base_url, "active cloud changed");

    let mut query = sample_query.clone();
    query.sample_url = replace_base_url(&query.sample_url, &active_cloud);

    vec![
        AppAction::SetActiveCloud(active_cloud),
        AppAction::SetSampleQuery(query),
    ]
}

/// The user picked an option in the dialog
pub fn handle_cloud_selection(
    option: &CloudOption,
    sample_query: &Query,
    store: &mut dyn CloudStore,
) -> Vec<AppAction> {
    let mut actions = set_selected_cloud(&option.key, sample_query, store);
    actions.push(AppAction::SetQueryResponseStatus(Status {
        status_text: "Cloud selected".to_string(),
        status: option.key.clone(),
        ok: true,
        message_type: MessageType::Success,
    }));
    actions
}

/// Close the dialog. Picks the global cloud first if none was ever chosen.
pub fn dismiss(sample_query: &Query, store: &mut dyn CloudStore) -> Vec<AppAction> {
    let mut actions = Vec::new();

    if get_current_cloud(store).is_none() {
        actions.extend(set_selected_cloud(
            &global_cloud().name,
            sample_query,
            store,
        ));
    }

    actions.push(AppAction::CloseCloudSelector);
    actions
}
