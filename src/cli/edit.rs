use super::ui;
use crate::core::asset::{AssetUpdate, DistributionFrequency, NewAsset, NumericField};
use crate::core::{EditOutcome, Portfolio};
use anyhow::Result;
use tracing::info;

/// Field edits requested for one asset. Numeric values are raw user text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldEdits {
    pub name: Option<String>,
    pub frequency: Option<DistributionFrequency>,
    pub price: Option<String>,
    pub units: Option<String>,
    pub cpu: Option<String>,
    /// Target percentage of the total investment, solved into units.
    pub percent: Option<String>,
}

pub fn invest(portfolio: &mut Portfolio, amount: &str, symbol: &str) -> String {
    let total = portfolio.set_total_investment_input(amount);
    info!("Total investment set to {total}");
    format!("I want to invest {}", ui::format_money(total, symbol))
}

pub fn add(portfolio: &mut Portfolio, name: &str, frequency: DistributionFrequency) -> Result<String> {
    let id = portfolio.add_asset(NewAsset::new(name, frequency)?);
    info!("Added asset {name} ({id})");
    Ok(format!("Added {name} [{}]", id.short()))
}

/// Applies edits in a fixed order: name, frequency, price, units, cpu, then
/// percent, so a target percentage is solved against the new price.
pub fn edit(portfolio: &mut Portfolio, id: &str, edits: &FieldEdits) -> Result<String> {
    let id = portfolio.resolve_id(id)?;
    let mut applied = Vec::new();

    if let Some(name) = &edits.name {
        if portfolio.update_asset(&id, AssetUpdate::Name(name.clone()))? == EditOutcome::Applied {
            applied.push("name");
        }
    }
    if let Some(frequency) = edits.frequency {
        if portfolio.update_asset(&id, AssetUpdate::Frequency(frequency))? == EditOutcome::Applied
        {
            applied.push("frequency");
        }
    }

    let numeric = [
        (NumericField::Price, &edits.price, "price"),
        (NumericField::Units, &edits.units, "units"),
        (NumericField::YieldRate, &edits.cpu, "cpu"),
    ];
    for (field, text, label) in numeric {
        if let Some(text) = text {
            if portfolio.apply_input(&id, field, text)? == EditOutcome::Applied {
                applied.push(label);
            }
        }
    }

    if let Some(percent) = &edits.percent {
        if portfolio.set_units_from_percentage(&id, percent)? == EditOutcome::Applied
            && !applied.contains(&"units")
        {
            applied.push("units");
        }
    }

    let name = portfolio
        .get(&id)
        .map(|a| a.name.clone())
        .unwrap_or_default();
    info!("Edited asset {name} ({id}): {applied:?}");
    if applied.is_empty() {
        Ok(format!("{name}: nothing changed"))
    } else {
        Ok(format!("Updated {name}: {}", applied.join(", ")))
    }
}

pub fn remove(portfolio: &mut Portfolio, id: &str) -> Result<String> {
    let id = portfolio.resolve_id(id)?;
    let removed = portfolio.remove_asset(&id)?;
    info!("Removed asset {} ({id})", removed.name);
    Ok(format!("Removed {}", removed.name))
}
