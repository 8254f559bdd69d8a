use crate::core::asset::{Asset, AssetId, AssetUpdate, NewAsset, NumericField};
use crate::core::metrics;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    #[error("Asset name must not be empty")]
    EmptyName,
    #[error("No asset with id {0}")]
    AssetNotFound(String),
    #[error("Asset id prefix {0} matches more than one asset")]
    AmbiguousId(String),
}

/// Whether an edit changed the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The input was not usable; the previous value is kept.
    Rejected,
}

/// The user's target capital and the assets planned against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub assets: Vec<Asset>,
    pub total_investment: f64,
}

impl Portfolio {
    pub fn new(assets: Vec<Asset>, total_investment: f64) -> Self {
        Self {
            assets,
            total_investment,
        }
    }

    pub fn add_asset(&mut self, new_asset: NewAsset) -> AssetId {
        let asset = new_asset.into_asset();
        let id = asset.id;
        debug!("Adding asset {} ({})", asset.name, id);
        self.assets.push(asset);
        id
    }

    pub fn get(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    pub fn update_asset(
        &mut self,
        id: &AssetId,
        update: AssetUpdate,
    ) -> Result<EditOutcome, PortfolioError> {
        let asset = self
            .assets
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| PortfolioError::AssetNotFound(id.to_string()))?;
        if !update.is_valid() {
            debug!("Rejected update for asset {}: {:?}", id, update);
            return Ok(EditOutcome::Rejected);
        }
        debug!("Updating asset {}: {:?}", id, update);
        asset.apply(update);
        Ok(EditOutcome::Applied)
    }

    /// Applies free-form text to a numeric field. Text that is not a
    /// non-negative finite number leaves the field unchanged.
    pub fn apply_input(
        &mut self,
        id: &AssetId,
        field: NumericField,
        text: &str,
    ) -> Result<EditOutcome, PortfolioError> {
        if self.get(id).is_none() {
            return Err(PortfolioError::AssetNotFound(id.to_string()));
        }
        match parse_number(text) {
            Some(value) => self.update_asset(id, field.update(value)),
            None => {
                debug!("Rejected {field} input {text:?} for asset {id}");
                Ok(EditOutcome::Rejected)
            }
        }
    }

    /// Sets an asset's units so that it makes up `text` percent of the total
    /// investment. Needs a usable price; otherwise nothing changes.
    pub fn set_units_from_percentage(
        &mut self,
        id: &AssetId,
        text: &str,
    ) -> Result<EditOutcome, PortfolioError> {
        let price = self
            .get(id)
            .ok_or_else(|| PortfolioError::AssetNotFound(id.to_string()))?
            .price;

        let Some(pct) = parse_number(text) else {
            debug!("Rejected percentage input {text:?} for asset {id}");
            return Ok(EditOutcome::Rejected);
        };

        match metrics::units_from_target_percentage(pct, self.total_investment, price) {
            Ok(units) => self.update_asset(id, AssetUpdate::Units(units)),
            Err(e) => {
                debug!("Cannot derive units for asset {id}: {e}");
                Ok(EditOutcome::Rejected)
            }
        }
    }

    pub fn remove_asset(&mut self, id: &AssetId) -> Result<Asset, PortfolioError> {
        let pos = self
            .assets
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| PortfolioError::AssetNotFound(id.to_string()))?;
        let removed = self.assets.remove(pos);
        debug!("Removed asset {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Sets the total investment from user text. Anything that is not a number
    /// counts as zero.
    pub fn set_total_investment_input(&mut self, text: &str) -> f64 {
        self.total_investment = parse_number(text).unwrap_or(0.0);
        debug!("Total investment set to {}", self.total_investment);
        self.total_investment
    }

    /// Finds an asset by full id or by a unique prefix of its hex digits.
    pub fn resolve_id(&self, text: &str) -> Result<AssetId, PortfolioError> {
        if let Ok(id) = text.parse::<AssetId>() {
            return self
                .get(&id)
                .map(|a| a.id)
                .ok_or_else(|| PortfolioError::AssetNotFound(text.to_string()));
        }

        let needle = text.trim().replace('-', "").to_lowercase();
        if needle.is_empty() {
            return Err(PortfolioError::AssetNotFound(text.to_string()));
        }
        let mut matches = self
            .assets
            .iter()
            .filter(|a| a.id.to_string().replace('-', "").starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(asset), None) => Ok(asset.id),
            (Some(_), Some(_)) => Err(PortfolioError::AmbiguousId(text.to_string())),
            (None, _) => Err(PortfolioError::AssetNotFound(text.to_string())),
        }
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::DistributionFrequency;
    use approx::assert_relative_eq;

    fn portfolio_with(name: &str) -> (Portfolio, AssetId) {
        let mut p = Portfolio::default();
        let id = p.add_asset(NewAsset::new(name, DistributionFrequency::Monthly).unwrap());
        (p, id)
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut p = Portfolio::default();
        let a = p.add_asset(NewAsset::new("A", DistributionFrequency::Monthly).unwrap());
        let b = p.add_asset(NewAsset::new("B", DistributionFrequency::Quarterly).unwrap());
        let c = p.add_asset(NewAsset::new("A", DistributionFrequency::Monthly).unwrap());
        assert_ne!(a, c);
        let ids: Vec<_> = p.assets.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![a, b, c]);

        p.update_asset(&b, AssetUpdate::Name("B2".into())).unwrap();
        let ids_after: Vec<_> = p.assets.iter().map(|x| x.id).collect();
        assert_eq!(ids_after, ids);
    }

    #[test]
    fn test_invalid_numeric_input_keeps_previous_value() {
        let (mut p, id) = portfolio_with("VAS");
        assert_eq!(
            p.apply_input(&id, NumericField::Price, "12.5").unwrap(),
            EditOutcome::Applied
        );
        for bad in ["abc", "", "-3", "NaN", "inf"] {
            assert_eq!(
                p.apply_input(&id, NumericField::Price, bad).unwrap(),
                EditOutcome::Rejected,
                "input {bad:?}"
            );
        }
        assert_eq!(p.get(&id).unwrap().price, Some(12.5));
    }

    #[test]
    fn test_typed_update_rejects_negative_and_nan() {
        let (mut p, id) = portfolio_with("VAS");
        p.update_asset(&id, AssetUpdate::Price(4.0)).unwrap();

        for update in [
            AssetUpdate::Price(-10.0),
            AssetUpdate::Price(f64::NAN),
            AssetUpdate::Units(-1.0),
            AssetUpdate::YieldRate(f64::NEG_INFINITY),
            AssetUpdate::Name(String::new()),
        ] {
            assert_eq!(
                p.update_asset(&id, update.clone()).unwrap(),
                EditOutcome::Rejected,
                "update {update:?}"
            );
        }

        let asset = p.get(&id).unwrap();
        assert_eq!(asset.price, Some(4.0));
        assert!(asset.units.is_none());
        assert!(asset.yield_rate.is_none());
        assert_eq!(asset.name, "VAS");
    }

    #[test]
    fn test_negative_percentage_is_rejected() {
        let (mut p, id) = portfolio_with("VAS");
        p.total_investment = 1000.0;
        p.update_asset(&id, AssetUpdate::Price(10.0)).unwrap();
        assert_eq!(
            p.set_units_from_percentage(&id, "-20").unwrap(),
            EditOutcome::Rejected
        );
        assert!(p.get(&id).unwrap().units.is_none());
    }

    #[test]
    fn test_zero_is_a_valid_input() {
        let (mut p, id) = portfolio_with("VAS");
        p.apply_input(&id, NumericField::Units, "0").unwrap();
        assert_eq!(p.get(&id).unwrap().units, Some(0.0));
    }

    #[test]
    fn test_edit_unknown_asset_fails() {
        let (mut p, _) = portfolio_with("VAS");
        let other = AssetId::new();
        assert!(matches!(
            p.update_asset(&other, AssetUpdate::Price(1.0)),
            Err(PortfolioError::AssetNotFound(_))
        ));
        assert!(p.apply_input(&other, NumericField::Price, "1").is_err());
        assert!(p.remove_asset(&other).is_err());
    }

    #[test]
    fn test_units_from_percentage() {
        let (mut p, id) = portfolio_with("VAS");
        p.total_investment = 1000.0;
        p.update_asset(&id, AssetUpdate::Price(10.0)).unwrap();

        assert_eq!(
            p.set_units_from_percentage(&id, "25").unwrap(),
            EditOutcome::Applied
        );
        assert_relative_eq!(p.get(&id).unwrap().units.unwrap(), 25.0);
    }

    #[test]
    fn test_units_from_percentage_without_price_is_noop() {
        let (mut p, id) = portfolio_with("VAS");
        p.total_investment = 1000.0;
        p.update_asset(&id, AssetUpdate::Units(3.0)).unwrap();

        assert_eq!(
            p.set_units_from_percentage(&id, "25").unwrap(),
            EditOutcome::Rejected
        );
        p.update_asset(&id, AssetUpdate::Price(0.0)).unwrap();
        assert_eq!(
            p.set_units_from_percentage(&id, "25").unwrap(),
            EditOutcome::Rejected
        );
        assert_eq!(
            p.set_units_from_percentage(&id, "lots").unwrap(),
            EditOutcome::Rejected
        );
        assert_eq!(p.get(&id).unwrap().units, Some(3.0));
    }

    #[test]
    fn test_remove_by_id() {
        let mut p = Portfolio::default();
        let a = p.add_asset(NewAsset::new("A", DistributionFrequency::Monthly).unwrap());
        let b = p.add_asset(NewAsset::new("B", DistributionFrequency::Monthly).unwrap());
        let removed = p.remove_asset(&a).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(p.assets.len(), 1);
        assert_eq!(p.assets[0].id, b);
    }

    #[test]
    fn test_total_investment_falls_back_to_zero() {
        let mut p = Portfolio::default();
        assert_eq!(p.set_total_investment_input("2500"), 2500.0);
        assert_eq!(p.set_total_investment_input("lots"), 0.0);
        assert_eq!(p.set_total_investment_input("1e3"), 1000.0);
        assert_eq!(p.set_total_investment_input(""), 0.0);
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let (p, id) = portfolio_with("VAS");
        assert_eq!(p.resolve_id(&id.to_string()).unwrap(), id);
        assert_eq!(p.resolve_id(&id.short()).unwrap(), id);
        assert!(matches!(
            p.resolve_id("zzzz"),
            Err(PortfolioError::AssetNotFound(_))
        ));
        assert!(p.resolve_id("").is_err());
    }
}
