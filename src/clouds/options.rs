//! Which clouds a user may pick

use super::registry::{all_clouds, global_cloud};
use crate::types::User;

/// One choice in the cloud selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudOption {
    pub key: String,
    pub text: String,
}

/// Ordered options available to `profile`.
///
/// Anonymous sessions can only use the global cloud. Signed-in users are
/// offered every registered cloud; picking one requires signing in again.
pub fn options_for(profile: Option<&User>) -> Vec<CloudOption> {
    let clouds = match profile {
        Some(_) => all_clouds(),
        None => vec![global_cloud()],
    };

    clouds
        .into_iter()
        .map(|cloud| CloudOption {
            key: cloud.name,
            text: cloud.display_name,
        })
        .collect()
}
