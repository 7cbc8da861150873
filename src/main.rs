use anyhow::Result;
use clap::{Parser, Subcommand};
use fxrates::core::log::init_logging;

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
    /// Run the HTTP API (default)
    Serve,
    /// Fetch and display all currency prices
    Prices,
    /// Display the exchange rate between two currencies
    Rate {
        /// Currency code or display name, e.g. USD
        currency1: String,
        /// Currency code or display name, e.g. EUR
        currency2: String,
    },
    /// List tracked currencies
    Currencies,
}

impl From<Commands> for fxrates::AppCommand {
    fn from(cmd: Commands) -> fxrates::AppCommand {
        match cmd {
            Commands::Serve => fxrates::AppCommand::Serve,
            Commands::Prices => fxrates::AppCommand::Prices,
            Commands::Rate {
                currency1,
                currency2,
            } => fxrates::AppCommand::Rate {
                currency1,
                currency2,
            },
            Commands::Currencies => fxrates::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxrates::cli::setup::setup(),
        Some(cmd) => fxrates::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => fxrates::run_command(fxrates::AppCommand::Serve, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
