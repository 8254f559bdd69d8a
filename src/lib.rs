pub mod cli;
pub mod core;
pub mod store;

use crate::cli::edit::FieldEdits;
use crate::core::config::AppConfig;
use crate::core::{DistributionFrequency, Overview, PortfolioStore};
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Show,
    Invest {
        amount: String,
    },
    Add {
        name: String,
        frequency: DistributionFrequency,
    },
    Edit {
        id: String,
        edits: FieldEdits,
    },
    Remove {
        id: String,
    },
    Reset,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("etfalloc starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = store::open_disk_store(&config)?;
    run_with_store(command, &config, &store)
}

/// Runs one command against `store`, saving afterwards if it changed anything.
pub fn run_with_store(
    command: AppCommand,
    config: &AppConfig,
    store: &dyn PortfolioStore,
) -> Result<()> {
    let symbol = config.currency_symbol.as_str();
    let mut portfolio = store.load();

    let message = match command {
        AppCommand::Show => {
            cli::summary::run(&Overview::compute(&portfolio), symbol);
            return Ok(());
        }
        AppCommand::Reset => {
            store.clear()?;
            println!("Cleared saved portfolio");
            return Ok(());
        }
        AppCommand::Invest { amount } => cli::edit::invest(&mut portfolio, &amount, symbol),
        AppCommand::Add { name, frequency } => cli::edit::add(&mut portfolio, &name, frequency)?,
        AppCommand::Edit { id, edits } => cli::edit::edit(&mut portfolio, &id, &edits)?,
        AppCommand::Remove { id } => cli::edit::remove(&mut portfolio, &id)?,
    };

    store.save(&portfolio)?;
    println!("{message}");
    println!("{}", Overview::compute(&portfolio).display_totals(symbol));
    Ok(())
}
