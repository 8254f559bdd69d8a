pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::store::KeyValuePortfolioStore;
use anyhow::Result;
use disk::DiskCollection;

/// Opens the on-disk portfolio store at the configured data path.
pub fn open_disk_store(config: &AppConfig) -> Result<KeyValuePortfolioStore<DiskCollection>> {
    let path = config.data_path()?.join("store");
    Ok(KeyValuePortfolioStore::new(DiskCollection::open(&path)?))
}
