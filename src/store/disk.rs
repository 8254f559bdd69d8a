use crate::core::store::KeyValueCollection;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

/// Name of the partition holding the portfolio keys.
pub const PORTFOLIO_PARTITION: &str = "portfolio";

/// Collection persisted to a fjall partition on disk.
pub struct DiskCollection {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskCollection {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PORTFOLIO_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open portfolio partition")?;
        debug!("Opened store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn flush(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to flush store to disk")
    }
}

impl KeyValueCollection for DiskCollection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(bytes) = self.partition.get(key)? else {
            debug!("Disk MISS for key: {}", key);
            return Ok(None);
        };
        debug!("Disk HIT for key: {}", key);
        let value = String::from_utf8(bytes.to_vec())
            .with_context(|| format!("Stored value for {key} is not valid UTF-8"))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.partition.insert(key.as_bytes(), value.as_bytes())?;
        self.flush()?;
        debug!("Disk PUT for key: {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.partition.remove(key.as_bytes())?;
        self.flush()?;
        debug!("Disk REMOVE for key: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::{AssetUpdate, DistributionFrequency, NewAsset};
    use crate::core::portfolio::Portfolio;
    use crate::core::store::{KeyValuePortfolioStore, PortfolioStore};
    use tempfile::tempdir;

    #[test]
    fn test_disk_get_set_remove() {
        let dir = tempdir().unwrap();
        let c = DiskCollection::open(dir.path()).unwrap();

        assert!(c.get("key1").unwrap().is_none());
        c.set("key1", "123").unwrap();
        assert_eq!(c.get("key1").unwrap().as_deref(), Some("123"));

        c.remove("key1").unwrap();
        assert!(c.get("key1").unwrap().is_none());
    }

    #[test]
    fn test_portfolio_survives_reopen() {
        let dir = tempdir().unwrap();

        let mut portfolio = Portfolio::default();
        portfolio.total_investment = 20000.0;
        let id = portfolio.add_asset(NewAsset::new("VGS", DistributionFrequency::Quarterly).unwrap());
        portfolio.update_asset(&id, AssetUpdate::Price(120.0)).unwrap();

        {
            let store = KeyValuePortfolioStore::new(DiskCollection::open(dir.path()).unwrap());
            store.save(&portfolio).unwrap();
        }

        let store = KeyValuePortfolioStore::new(DiskCollection::open(dir.path()).unwrap());
        assert_eq!(store.load(), portfolio);
    }
}
