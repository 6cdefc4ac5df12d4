//! Sovereign cloud support
//!
//! - `registry`: known clouds, lookup and base-URL rewriting
//! - `store`: the persisted "current cloud" key
//! - `options`: which clouds a profile may choose
//! - `selector`: cloud selector dialog behavior

pub mod options;
pub mod registry;
pub mod selector;
pub mod store;

pub use options::{options_for, CloudOption};
pub use registry::{global_cloud, resolve_startup_cloud, CloudDescriptor};
pub use store::CloudStore;
#[cfg(test)]
pub use store::MemoryCloudStore;
