//! Everything the shell renders for a portfolio, computed in one pass.
use crate::core::asset::{AssetId, DistributionFrequency};
use crate::core::metrics;
use crate::core::portfolio::Portfolio;

/// Derived figures for a single asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub id: AssetId,
    pub name: String,
    pub price: Option<f64>,
    pub units: Option<f64>,
    pub yield_rate: Option<f64>,
    pub frequency: DistributionFrequency,
    /// Present only when both price and units are set.
    pub value: Option<f64>,
    pub percentage_of_investment: f64,
    pub distribution: f64,
}

/// Percentage and amount still to allocate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remaining {
    pub percentage: f64,
    pub amount: f64,
}

/// One slice of the allocation breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_investment: f64,
    pub rows: Vec<AssetRow>,
    pub total_value: f64,
    pub allocation_percentage: f64,
    /// Absent without a positive investment to allocate against, or when
    /// over-allocated.
    pub remaining: Option<Remaining>,
    pub distributions: metrics::Distributions,
    pub slices: Vec<AllocationSlice>,
}

impl Overview {
    pub fn compute(portfolio: &Portfolio) -> Self {
        let investment = portfolio.total_investment;

        let rows: Vec<AssetRow> = portfolio
            .assets
            .iter()
            .map(|asset| {
                let value = metrics::asset_value(asset);
                AssetRow {
                    id: asset.id,
                    name: asset.name.clone(),
                    price: asset.price,
                    units: asset.units,
                    yield_rate: asset.yield_rate,
                    frequency: asset.distribution_frequency,
                    value: asset.price.and(asset.units).map(|_| value),
                    percentage_of_investment: metrics::percentage_of_investment(value, investment),
                    distribution: metrics::distribution_amount(asset),
                }
            })
            .collect();

        let total_value = metrics::total_portfolio_value(&portfolio.assets);
        let allocation_percentage = metrics::allocation_percentage(total_value, investment);
        let distributions = metrics::aggregate_distributions(&portfolio.assets);

        let has_target = investment.is_finite() && investment > 0.0;
        let remaining = (has_target && allocation_percentage <= 100.0).then(|| Remaining {
            percentage: 100.0 - allocation_percentage,
            amount: investment - total_value,
        });

        let slices = rows
            .iter()
            .map(|row| AllocationSlice {
                name: row.name.clone(),
                value: row.value.map_or(0.0, |v| (v * 100.0).round() / 100.0),
            })
            .collect();

        Self {
            total_investment: investment,
            rows,
            total_value,
            allocation_percentage,
            remaining,
            distributions,
            slices,
        }
    }

    pub fn is_over_allocated(&self) -> bool {
        self.allocation_percentage > 100.0
    }
}
