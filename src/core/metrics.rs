//! Pure calculations over a portfolio snapshot.
//!
//! Partially filled assets are the normal state while a user is editing, so
//! nothing here fails: missing inputs contribute `0`, and the only operation
//! that cannot always produce a number returns a [`SolveError`].
use crate::core::asset::{Asset, DistributionFrequency};
use thiserror::Error;

/// Why units could not be derived from a target percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("price has not been set")]
    PriceNotSet,
    #[error("price is zero")]
    ZeroPrice,
    #[error("price is not a valid number")]
    InvalidPrice,
    #[error("units could not be computed from the given inputs")]
    NotComputable,
}

/// Projected distribution totals, one per frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Distributions {
    pub monthly: f64,
    pub quarterly: f64,
}

impl Distributions {
    pub fn for_frequency(&self, frequency: DistributionFrequency) -> f64 {
        match frequency {
            DistributionFrequency::Monthly => self.monthly,
            DistributionFrequency::Quarterly => self.quarterly,
        }
    }
}

/// `price * units`, or `0` unless both are present and finite.
pub fn asset_value(asset: &Asset) -> f64 {
    match (asset.price, asset.units) {
        (Some(price), Some(units)) if price.is_finite() && units.is_finite() => price * units,
        _ => 0.0,
    }
}

pub fn total_portfolio_value(assets: &[Asset]) -> f64 {
    assets.iter().map(asset_value).sum()
}

/// Share of `total_investment` covered by `total_value`, in percent.
///
/// Returns `0` when the investment is zero or NaN. Values above 100 are valid
/// and mean the portfolio is over-allocated.
pub fn allocation_percentage(total_value: f64, total_investment: f64) -> f64 {
    if total_investment == 0.0 || total_investment.is_nan() {
        return 0.0;
    }
    let pct = (total_value / total_investment) * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// Share of `total_investment` held in a single asset, in percent.
pub fn percentage_of_investment(asset_value: f64, total_investment: f64) -> f64 {
    allocation_percentage(asset_value, total_investment)
}

/// Units needed for an asset to make up `target_percentage` of the investment.
pub fn units_from_target_percentage(
    target_percentage: f64,
    total_investment: f64,
    price: Option<f64>,
) -> Result<f64, SolveError> {
    let price = price.ok_or(SolveError::PriceNotSet)?;
    if price.is_nan() || price.is_infinite() || price < 0.0 {
        return Err(SolveError::InvalidPrice);
    }
    if price == 0.0 {
        return Err(SolveError::ZeroPrice);
    }

    let units = (total_investment * (target_percentage / 100.0)) / price;
    if units.is_finite() {
        Ok(units)
    } else {
        Err(SolveError::NotComputable)
    }
}

/// Projected distribution for one asset: `units * yield / 100`.
///
/// Price does not enter the formula but must still be set; only fully priced
/// assets distribute.
pub fn distribution_amount(asset: &Asset) -> f64 {
    match asset.pricing() {
        Some(p) => {
            let amount = p.units * (p.yield_rate / 100.0);
            if amount.is_finite() { amount } else { 0.0 }
        }
        None => 0.0,
    }
}

pub fn aggregate_distributions(assets: &[Asset]) -> Distributions {
    assets
        .iter()
        .fold(Distributions::default(), |mut acc, asset| {
            let amount = distribution_amount(asset);
            match asset.distribution_frequency {
                DistributionFrequency::Monthly => acc.monthly += amount,
                DistributionFrequency::Quarterly => acc.quarterly += amount,
            }
            acc
        })
}
