use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use etfalloc::cli::edit::FieldEdits;
use etfalloc::core::DistributionFrequency;
use etfalloc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display assets, allocation and distributions
    Show,
    /// Set the total amount to invest
    Invest {
        /// Amount; anything that is not a number counts as zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Add a new asset
    Add {
        /// Asset name
        name: String,
        /// Distribution frequency (monthly or quarterly)
        #[arg(short, long)]
        frequency: DistributionFrequency,
    },
    /// Edit fields of an asset; invalid numbers are ignored
    Edit {
        /// Asset id or a unique prefix of it
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        units: Option<String>,
        /// Annual distribution yield in percent
        #[arg(long, allow_hyphen_values = true)]
        cpu: Option<String>,
        #[arg(short, long)]
        frequency: Option<DistributionFrequency>,
        /// Set units so the asset makes up this percentage of the investment
        #[arg(long, allow_hyphen_values = true)]
        percent: Option<String>,
    },
    /// Remove an asset
    Remove {
        /// Asset id or a unique prefix of it
        id: String,
    },
    /// Delete the saved portfolio
    Reset,
}

impl From<Commands> for etfalloc::AppCommand {
    fn from(cmd: Commands) -> etfalloc::AppCommand {
        match cmd {
            Commands::Show => etfalloc::AppCommand::Show,
            Commands::Invest { amount } => etfalloc::AppCommand::Invest { amount },
            Commands::Add { name, frequency } => etfalloc::AppCommand::Add { name, frequency },
            Commands::Edit {
                id,
                name,
                price,
                units,
                cpu,
                frequency,
                percent,
            } => etfalloc::AppCommand::Edit {
                id,
                edits: FieldEdits {
                    name,
                    frequency,
                    price,
                    units,
                    cpu,
                    percent,
                },
            },
            Commands::Remove { id } => etfalloc::AppCommand::Remove { id },
            Commands::Reset => etfalloc::AppCommand::Reset,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => etfalloc::cli::setup::setup(),
        Some(cmd) => etfalloc::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
