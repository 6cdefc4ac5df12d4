//! Known sovereign clouds and base-URL rewriting

use super::store::CloudStore;
use url::Url;

pub const GLOBAL_CLOUD_NAME: &str = "Global";

/// name, display name, base URL
const CLOUDS: &[(&str, &str, &str)] = &[
    (GLOBAL_CLOUD_NAME, "Global service", "https://graph.microsoft.com"),
    (
        "US Government L4",
        "US Government L4",
        "https://graph.microsoft.us",
    ),
    (
        "US Government L5 (DOD)",
        "US Government L5 (DOD)",
        "https://dod-graph.microsoft.us",
    ),
    (
        "China",
        "China operated by 21Vianet",
        "https://microsoftgraph.chinacloudapi.cn",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudDescriptor {
    pub name: String,
    pub display_name: String,
    pub base_url: String,
}

impl CloudDescriptor {
    fn from_entry((name, display_name, base_url): &(&str, &str, &str)) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

pub fn global_cloud() -> CloudDescriptor {
    CloudDescriptor::from_entry(&CLOUDS[0])
}

/// Every registered cloud, global first
pub fn all_clouds() -> Vec<CloudDescriptor> {
    CLOUDS.iter().map(CloudDescriptor::from_entry).collect()
}

/// Look up a cloud by name (case-insensitive)
pub fn get_cloud_properties(name: &str) -> Option<CloudDescriptor> {
    CLOUDS
        .iter()
        .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
        .map(CloudDescriptor::from_entry)
}

/// The persisted cloud, if one was stored and is still known
pub fn get_current_cloud(store: &dyn CloudStore) -> Option<CloudDescriptor> {
    store
        .load_cloud_value()
        .and_then(|name| get_cloud_properties(&name))
}

/// The cloud to use at startup: the persisted one, or the global default
pub fn resolve_startup_cloud(store: &dyn CloudStore) -> CloudDescriptor {
    get_current_cloud(store).unwrap_or_else(global_cloud)
}

/// Swap the scheme and host of `url` for the base URL of `cloud`, keeping path and query.
/// Example: https://graph.microsoft.com/v1.0/me -> https://graph.microsoft.us/v1.0/me
pub fn replace_base_url(url: &str, cloud: &CloudDescriptor) -> String {
    let base = cloud.base_url.trim_end_matches('/');

    match Url::parse(url) {
        Ok(parsed) => {
            let mut rest = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                rest.push('?');
                rest.push_str(query);
            }
            if let Some(fragment) = parsed.fragment() {
                rest.push('#');
                rest.push_str(fragment);
            }
            if rest == "/" {
                rest.clear();
            }
            format!("{base}{rest}")
        }
        // Relative URL like `v1.0/me` or `/v1.0/me`
        Err(_) => format!("{base}/{}", url.trim_start_matches('/')),
    }
}
