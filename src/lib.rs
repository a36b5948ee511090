pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Commands that need the rate provider.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
    Rates {
        from: Option<String>,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::ExchangeRateApiProvider::new(&config.provider)
        .context("Failed to create rate provider")?;
    let rate_store = Arc::new(store::RateStore::new(
        Arc::new(provider),
        &config.base_currency,
    ));

    match command {
        AppCommand::Convert { amount, from, to } => {
            let from = from.as_deref().unwrap_or(&config.default_from);
            let to = to.as_deref().unwrap_or(&config.default_to);
            cli::convert::run(&rate_store, &amount, from, to).await
        }
        AppCommand::Rates { from } => {
            let from = from
                .as_deref()
                .map(crate::core::currency::normalize_code)
                .unwrap_or_else(|| config.default_from.clone());
            cli::rates::run(&rate_store, &from, &config.currencies).await
        }
        AppCommand::Interactive => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            cli::interactive::run(rate_store, &config, input, &mut std::io::stdout()).await
        }
    }
}
