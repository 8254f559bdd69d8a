//! Core business logic abstractions

pub mod asset;
pub mod config;
pub mod log;
pub mod metrics;
pub mod overview;
pub mod portfolio;
pub mod store;

// Re-export main types for cleaner imports
pub use asset::{Asset, AssetId, AssetUpdate, DistributionFrequency, NewAsset, Pricing};
pub use overview::Overview;
pub use portfolio::{EditOutcome, Portfolio, PortfolioError};
pub use store::{KeyValueCollection, PortfolioStore};
