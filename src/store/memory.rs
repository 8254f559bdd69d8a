use crate::core::store::KeyValueCollection;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory collection backed by a HashMap
#[derive(Default)]
pub struct MemoryCollection {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCollection for MemoryCollection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.inner.read().map_err(|e| anyhow!("{e}"))?;
        let value = map.get(key).cloned();
        debug!(
            "Memory {} for key: {}",
            if value.is_some() { "HIT" } else { "MISS" },
            key
        );
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.inner.write().map_err(|e| anyhow!("{e}"))?;
        map.insert(key.to_string(), value.to_string());
        debug!("Memory PUT for key: {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.inner.write().map_err(|e| anyhow!("{e}"))?;
        map.remove(key);
        debug!("Memory REMOVE for key: {}", key);
        Ok(())
    }
}
