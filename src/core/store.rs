//! Persistence abstractions

use crate::core::asset::Asset;
use crate::core::portfolio::Portfolio;
use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Key holding the JSON array of assets.
pub const ASSETS_KEY: &str = "savedAssets";
/// Key holding the total investment as decimal text.
pub const INVESTMENT_KEY: &str = "investmentAmount";

/// A flat string key-value collection.
pub trait KeyValueCollection: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Loads and saves a whole portfolio snapshot.
pub trait PortfolioStore {
    /// Never fails: anything missing or unreadable starts empty.
    fn load(&self) -> Portfolio;
    fn save(&self, portfolio: &Portfolio) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Stores a portfolio under [`ASSETS_KEY`] and [`INVESTMENT_KEY`].
pub struct KeyValuePortfolioStore<C: KeyValueCollection> {
    collection: C,
}

impl<C: KeyValueCollection> KeyValuePortfolioStore<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    fn load_assets(&self) -> Vec<Asset> {
        match self.collection.get(ASSETS_KEY) {
            Ok(Some(raw)) => match parse_assets(&raw) {
                Ok(assets) => {
                    debug!("Loaded {} saved assets", assets.len());
                    assets
                }
                Err(e) => {
                    warn!("Ignoring malformed saved assets: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read saved assets: {e}");
                Vec::new()
            }
        }
    }

    fn load_investment(&self) -> f64 {
        match self.collection.get(INVESTMENT_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    warn!("Ignoring malformed investment amount: {raw:?}");
                    0.0
                }
            },
            Ok(None) => 0.0,
            Err(e) => {
                warn!("Failed to read investment amount: {e}");
                0.0
            }
        }
    }
}

/// Parses the saved asset list. One bad record rejects the whole list.
fn parse_assets(raw: &str) -> Result<Vec<Asset>> {
    let assets: Vec<Asset> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    for asset in &assets {
        if !asset.is_valid() {
            bail!("asset {} has a blank name or an invalid number", asset.id);
        }
        if !seen.insert(asset.id) {
            bail!("asset id {} appears more than once", asset.id);
        }
    }
    Ok(assets)
}

impl<C: KeyValueCollection> PortfolioStore for KeyValuePortfolioStore<C> {
    fn load(&self) -> Portfolio {
        Portfolio::new(self.load_assets(), self.load_investment())
    }

    fn save(&self, portfolio: &Portfolio) -> Result<()> {
        let assets =
            serde_json::to_string(&portfolio.assets).context("Failed to serialize assets")?;
        self.collection
            .set(ASSETS_KEY, &assets)
            .context("Failed to save assets")?;
        self.collection
            .set(INVESTMENT_KEY, &portfolio.total_investment.to_string())
            .context("Failed to save investment amount")?;
        debug!("Saved {} assets", portfolio.assets.len());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.collection.remove(ASSETS_KEY)?;
        self.collection.remove(INVESTMENT_KEY)?;
        debug!("Cleared saved portfolio");
        Ok(())
    }
}
