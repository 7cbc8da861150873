pub mod cli;
pub mod core;
pub mod providers;
pub mod rates;
pub mod server;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use crate::core::config::AppConfig;
use crate::core::registry;
use crate::providers::tgju::TgjuProvider;
use crate::rates::RateService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Serve,
    Prices,
    Rate {
        currency1: String,
        currency2: String,
    },
    Currencies,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

fn rate_service(config: &AppConfig) -> Result<RateService> {
    let provider = TgjuProvider::new(&config.upstream.url, config.upstream.timeout())
        .context("Failed to build HTTP client")?;
    Ok(RateService::new(Arc::new(provider)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;

    match command {
        AppCommand::Serve => server::serve(&config).await,
        AppCommand::Prices => {
            let service = rate_service(&config)?;
            let spinner = cli::ui::new_spinner("Fetching currency prices...");
            let snapshot = service.get_price_snapshot().await;
            spinner.finish_and_clear();
            println!("{}", snapshot?.display_as_table());
            Ok(())
        }
        AppCommand::Rate {
            currency1,
            currency2,
        } => {
            let service = rate_service(&config)?;
            let spinner = cli::ui::new_spinner("Fetching currency prices...");
            let rate = service.get_exchange_rate(&currency1, &currency2).await;
            spinner.finish_and_clear();
            let rate = rate?;

            // Both resolved, or the service would have failed above
            if let (Some(from), Some(to)) = (
                registry::resolve(&currency1),
                registry::resolve(&currency2),
            ) {
                println!("{}", cli::prices::display_rate(from, to, rate));
            }
            Ok(())
        }
        AppCommand::Currencies => {
            println!("{}", cli::prices::display_currencies(registry::all()));
            Ok(())
        }
    }
}
