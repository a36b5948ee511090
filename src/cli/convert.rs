use super::{display, ui};
use crate::core::currency::normalize_code;
use crate::core::{ConversionRequest, convert};
use crate::store::RateStore;
use anyhow::{Context, Result};
use tracing::debug;

/// Refreshes once, then converts `amount` and prints the result with the rate status.
pub async fn run(store: &RateStore, amount: &str, from: &str, to: &str) -> Result<()> {
    let pb = ui::new_spinner("Updating rates...");
    let refreshed = store.refresh().await;
    pb.finish_and_clear();
    debug!(success = refreshed.is_ok(), "Refresh finished");

    let request = ConversionRequest::new(amount, &normalize_code(from), &normalize_code(to));
    let outcome = convert(&store.current_snapshot(), &request);

    println!("{}", display::render_conversion(&outcome));
    println!("{}", display::render_status(&store.status()));

    outcome
        .map(|_| ())
        .with_context(|| format!("Failed to convert {amount} {from} to {to}"))
}
