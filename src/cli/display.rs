//! Text rendering of conversions and rate status.

use super::ui::{self, StyleType};
use crate::core::{ConversionError, ConversionResult};
use crate::store::RateStatus;
use chrono::{DateTime, Local, Utc};

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid number!";

/// `1 USD ≈ 32.0000 TWD`, using the rate that scaled the amount.
pub fn rate_line(result: &ConversionResult) -> String {
    format!("1 {} ≈ {:.4} {}", result.from, result.unit_rate, result.to)
}

/// Result amount and reference rate, or the error in place of the amount.
pub fn render_conversion(outcome: &Result<ConversionResult, ConversionError>) -> String {
    match outcome {
        Ok(result) => format!(
            "{} {}\n{}",
            ui::style_text(&ui::format_amount(result.converted_amount), StyleType::Result),
            result.to,
            ui::style_text(&rate_line(result), StyleType::Subtle)
        ),
        Err(ConversionError::InvalidAmount(_)) => {
            ui::style_text(INVALID_AMOUNT_MESSAGE, StyleType::Warning)
        }
        Err(e @ ConversionError::UnknownCurrency(_)) => format!(
            "{}\n{}",
            ui::style_text("Error", StyleType::Error),
            ui::style_text(&e.to_string(), StyleType::Subtle)
        ),
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Unstyled status line for the current rate table.
pub fn status_text(status: &RateStatus) -> String {
    match status {
        RateStatus::Loading => "Updating rates...".to_string(),
        RateStatus::Fresh { fetched_at } => {
            format!("Rates last updated: {}", format_timestamp(*fetched_at))
        }
        RateStatus::Stale { fetched_at, error } => format!(
            "Rate update failed ({error}); using rates from {}",
            format_timestamp(*fetched_at)
        ),
        RateStatus::Unavailable { error } => {
            format!("Network failure, unable to update rates ({error})")
        }
    }
}

pub fn render_status(status: &RateStatus) -> String {
    let style_type = match status {
        RateStatus::Loading | RateStatus::Fresh { .. } => StyleType::Subtle,
        RateStatus::Stale { .. } => StyleType::Warning,
        RateStatus::Unavailable { .. } => StyleType::Error,
    };
    ui::style_text(&status_text(status), style_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use console::strip_ansi_codes;

    fn result(from: &str, to: &str, amount: f64, unit_rate: f64) -> ConversionResult {
        ConversionResult {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            converted_amount: amount * unit_rate,
            unit_rate,
        }
    }

    #[test]
    fn test_rate_line() {
        assert_eq!(
            rate_line(&result("USD", "TWD", 100.0, 32.0)),
            "1 USD ≈ 32.0000 TWD"
        );
        assert_eq!(
            rate_line(&result("JPY", "TWD", 50.0, 32.0 / 150.0)),
            "1 JPY ≈ 0.2133 TWD"
        );
    }

    #[test]
    fn test_render_successful_conversion() {
        let rendered = render_conversion(&Ok(result("USD", "TWD", 100.0, 32.0)));
        assert_eq!(
            strip_ansi_codes(&rendered),
            "3,200.00 TWD\n1 USD ≈ 32.0000 TWD"
        );
    }

    #[test]
    fn test_render_errors() {
        let rendered = render_conversion(&Err(ConversionError::InvalidAmount("x".to_string())));
        assert_eq!(strip_ansi_codes(&rendered), INVALID_AMOUNT_MESSAGE);

        let rendered =
            render_conversion(&Err(ConversionError::UnknownCurrency("ZZZ".to_string())));
        assert_eq!(strip_ansi_codes(&rendered), "Error\nUnknown currency: ZZZ");
    }

    #[test]
    fn test_status_text() {
        let fetched_at = Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap();
        let local = fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");

        assert_eq!(status_text(&RateStatus::Loading), "Updating rates...");
        assert_eq!(
            status_text(&RateStatus::Fresh { fetched_at }),
            format!("Rates last updated: {local}")
        );
        assert_eq!(
            status_text(&RateStatus::Stale {
                fetched_at,
                error: "HTTP error: 503 Service Unavailable".to_string()
            }),
            format!("Rate update failed (HTTP error: 503 Service Unavailable); using rates from {local}")
        );
        let unavailable = status_text(&RateStatus::Unavailable {
            error: "timed out".to_string(),
        });
        assert!(unavailable.starts_with("Network failure"));
        assert!(unavailable.contains("timed out"));
        assert_eq!(
            strip_ansi_codes(&render_status(&RateStatus::Loading)),
            "Updating rates..."
        );
    }
}
