//! Asset records and the typed edits that can be applied to them

use crate::core::portfolio::PortfolioError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, immutable identifier assigned when an asset is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to pick an asset on the command line.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AssetId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| anyhow::anyhow!("Invalid asset id {s}: {e}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionFrequency {
    Monthly,
    Quarterly,
}

impl Display for DistributionFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DistributionFrequency::Monthly => "Monthly",
                DistributionFrequency::Quarterly => "Quarterly",
            }
        )
    }
}

impl FromStr for DistributionFrequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "m" => Ok(DistributionFrequency::Monthly),
            "quarterly" | "q" => Ok(DistributionFrequency::Quarterly),
            _ => Err(anyhow::anyhow!("Invalid distribution frequency: {}", s)),
        }
    }
}

/// A single holding. Price, units and yield are filled in independently after
/// creation, so each stays optional until the user supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<f64>,
    /// Annualized distribution yield in percent ("cpu").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_rate: Option<f64>,
    pub distribution_frequency: DistributionFrequency,
}

/// Price, units and yield of an asset that has all three set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub price: f64,
    pub units: f64,
    pub yield_rate: f64,
}

impl Asset {
    pub fn pricing(&self) -> Option<Pricing> {
        match (self.price, self.units, self.yield_rate) {
            (Some(price), Some(units), Some(yield_rate)) => Some(Pricing {
                price,
                units,
                yield_rate,
            }),
            _ => None,
        }
    }

    /// Non-blank name and no negative or non-finite numbers.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && [self.price, self.units, self.yield_rate]
                .into_iter()
                .flatten()
                .all(is_valid_amount)
    }

    /// Applies one field edit in place. Callers check [`AssetUpdate::is_valid`].
    pub fn apply(&mut self, update: AssetUpdate) {
        match update {
            AssetUpdate::Name(name) => self.name = name,
            AssetUpdate::Price(price) => self.price = Some(price),
            AssetUpdate::Units(units) => self.units = Some(units),
            AssetUpdate::YieldRate(rate) => self.yield_rate = Some(rate),
            AssetUpdate::Frequency(freq) => self.distribution_frequency = freq,
        }
    }
}

/// A validated request to create an asset: non-empty name and a chosen frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    name: String,
    frequency: DistributionFrequency,
}

impl NewAsset {
    pub fn new(
        name: impl Into<String>,
        frequency: DistributionFrequency,
    ) -> Result<Self, PortfolioError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PortfolioError::EmptyName);
        }
        Ok(Self { name, frequency })
    }

    pub(crate) fn into_asset(self) -> Asset {
        Asset {
            id: AssetId::new(),
            name: self.name,
            price: None,
            units: None,
            yield_rate: None,
            distribution_frequency: self.frequency,
        }
    }
}

/// One edit to one field of an asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetUpdate {
    Name(String),
    Price(f64),
    Units(f64),
    YieldRate(f64),
    Frequency(DistributionFrequency),
}

impl AssetUpdate {
    pub fn is_valid(&self) -> bool {
        match self {
            AssetUpdate::Name(name) => !name.trim().is_empty(),
            AssetUpdate::Price(v) | AssetUpdate::Units(v) | AssetUpdate::YieldRate(v) => {
                is_valid_amount(*v)
            }
            AssetUpdate::Frequency(_) => true,
        }
    }
}

fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Numeric fields that accept free-form user text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Price,
    Units,
    YieldRate,
}

impl NumericField {
    pub fn update(self, value: f64) -> AssetUpdate {
        match self {
            NumericField::Price => AssetUpdate::Price(value),
            NumericField::Units => AssetUpdate::Units(value),
            NumericField::YieldRate => AssetUpdate::YieldRate(value),
        }
    }
}

impl Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NumericField::Price => "price",
                NumericField::Units => "units",
                NumericField::YieldRate => "cpu",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset() -> Asset {
        NewAsset::new("VAS", DistributionFrequency::Quarterly)
            .unwrap()
            .into_asset()
    }

    #[test]
    fn test_new_asset_starts_unpriced() {
        let a = asset();
        assert_eq!(a.name, "VAS");
        assert!(a.price.is_none());
        assert!(a.units.is_none());
        assert!(a.yield_rate.is_none());
        assert!(a.pricing().is_none());
    }

    #[test]
    fn test_new_asset_rejects_blank_name() {
        assert!(NewAsset::new("", DistributionFrequency::Monthly).is_err());
        assert!(NewAsset::new("   ", DistributionFrequency::Monthly).is_err());
    }

    #[test]
    fn test_pricing_requires_all_fields() {
        let mut a = asset();
        a.apply(AssetUpdate::Price(10.0));
        a.apply(AssetUpdate::Units(5.0));
        assert!(a.pricing().is_none());

        a.apply(AssetUpdate::YieldRate(4.0));
        assert_eq!(
            a.pricing(),
            Some(Pricing {
                price: 10.0,
                units: 5.0,
                yield_rate: 4.0
            })
        );
    }

    #[test]
    fn test_update_validity() {
        assert!(AssetUpdate::Price(0.0).is_valid());
        assert!(AssetUpdate::Units(12.5).is_valid());
        assert!(!AssetUpdate::Price(-10.0).is_valid());
        assert!(!AssetUpdate::YieldRate(f64::NAN).is_valid());
        assert!(!AssetUpdate::Units(f64::INFINITY).is_valid());
        assert!(!AssetUpdate::Name(" ".into()).is_valid());
        assert!(AssetUpdate::Frequency(DistributionFrequency::Monthly).is_valid());
    }

    #[test]
    fn test_asset_validity() {
        let mut a = asset();
        assert!(a.is_valid());
        a.price = Some(-5.0);
        assert!(!a.is_valid());
        a.price = Some(5.0);
        a.yield_rate = Some(f64::NAN);
        assert!(!a.is_valid());
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!(
            "Monthly".parse::<DistributionFrequency>().unwrap(),
            DistributionFrequency::Monthly
        );
        assert_eq!(
            "q".parse::<DistributionFrequency>().unwrap(),
            DistributionFrequency::Quarterly
        );
        assert!("yearly".parse::<DistributionFrequency>().is_err());
    }

    #[test]
    fn test_serialized_shape_omits_missing_fields() {
        let mut a = asset();
        a.apply(AssetUpdate::YieldRate(3.5));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["name"], "VAS");
        assert_eq!(json["yieldRate"], 3.5);
        assert_eq!(json["distributionFrequency"], "quarterly");
        assert!(json.get("price").is_none());
        assert!(json.get("units").is_none());
    }

    #[test]
    fn test_short_id_is_prefix_of_full_id() {
        let id = AssetId::new();
        let full = id.to_string().replace('-', "");
        assert!(full.starts_with(&id.short()));
        assert_eq!(id.to_string().parse::<AssetId>().unwrap(), id);
    }
}
