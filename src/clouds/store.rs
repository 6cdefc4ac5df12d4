//! Durable storage for the chosen cloud

use color_eyre::Result;

/// A single durable key holding the chosen cloud's name
pub trait CloudStore {
    fn load_cloud_value(&self) -> Option<String>;
    fn store_cloud_value(&mut self, name: &str) -> Result<()>;
}

/// In-process store for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryCloudStore {
    value: Option<String>,
}

#[cfg(test)]
impl CloudStore for MemoryCloudStore {
    fn load_cloud_value(&self) -> Option<String> {
        self.value.clone()
    }

    fn store_cloud_value(&mut self, name: &str) -> Result<()> {
        self.value = Some(name.to_string());
        Ok(())
    }
}
