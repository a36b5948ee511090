use super::{display, ui};
use crate::core::{ConversionRequest, RateTable, convert};
use crate::store::RateStore;
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

/// Table of the rate from `from` to every code in `currencies`.
pub fn rates_table(snapshot: &RateTable, from: &str, currencies: &[String]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {from}")),
        ui::header_cell(&format!("1 unit in {from}")),
    ]);

    for code in currencies {
        let forward = convert(snapshot, &ConversionRequest::new("1", from, code)).ok();
        table.add_row(vec![
            Cell::new(code),
            ui::format_optional_cell(forward.as_ref(), |r| format!("{:.4}", r.unit_rate)),
            ui::format_optional_cell(forward.as_ref(), |r| format!("{:.4}", 1.0 / r.unit_rate)),
        ]);
    }

    table.to_string()
}

pub async fn run(store: &RateStore, from: &str, currencies: &[String]) -> Result<()> {
    let pb = ui::new_spinner("Updating rates...");
    let refreshed = store.refresh().await;
    pb.finish_and_clear();
    debug!(success = refreshed.is_ok(), "Refresh finished");

    let snapshot = store.current_snapshot();
    println!(
        "Rates from {}\n",
        ui::style_text(from, ui::StyleType::Title)
    );
    println!("{}", rates_table(&snapshot, from, currencies));
    println!("{}", display::render_status(&store.status()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_rates_table() {
        let rates: BTreeMap<String, f64> = [("USD", 1.0), ("TWD", 32.0), ("JPY", 150.0)]
            .iter()
            .map(|(c, r)| (c.to_string(), *r))
            .collect();
        let snapshot = RateTable::new("USD", rates, None).unwrap();

        let output = rates_table(&snapshot, "USD", &codes(&["TWD", "JPY", "KRW"]));
        assert!(output.contains("Per 1 USD"));
        assert!(output.contains("32.0000"));
        assert!(output.contains("0.0067"));
        assert!(output.contains("150.0000"));
        assert!(output.contains("KRW"));
        assert!(output.contains("N/A"));
    }

    #[test]
    fn test_rates_table_without_rates() {
        let output = rates_table(&RateTable::empty("USD"), "USD", &codes(&["TWD"]));
        assert!(output.contains("TWD"));
        assert_eq!(output.matches("N/A").count(), 2);
    }
}
