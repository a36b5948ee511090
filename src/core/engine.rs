//! Conversion of an amount between two currencies over one rate snapshot.

use super::error::ConversionError;
use super::rates::RateTable;

/// One conversion attempt as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: &str, from: &str, to: &str) -> Self {
        Self {
            amount: amount.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Same amount with source and target exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            amount: self.amount.clone(),
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub converted_amount: f64,
    /// Units of `to` per one unit of `from`; the exact factor applied to `amount`.
    pub unit_rate: f64,
}

/// Converts `request.amount` from one currency to another using `snapshot`.
///
/// The amount is checked first, then `from`, then `to`. Nothing is rounded.
/// An amount whose converted value overflows is reported as invalid.
pub fn convert(
    snapshot: &RateTable,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConversionError> {
    let amount = parse_amount(&request.amount)?;
    let rate_from = lookup(snapshot, &request.from)?;
    let rate_to = lookup(snapshot, &request.to)?;

    let unit_rate = rate_to / rate_from;
    let converted_amount = amount * unit_rate;
    if !converted_amount.is_finite() {
        return Err(ConversionError::InvalidAmount(request.amount.clone()));
    }

    Ok(ConversionResult {
        from: request.from.clone(),
        to: request.to.clone(),
        amount,
        converted_amount,
        unit_rate,
    })
}

fn parse_amount(input: &str) -> Result<f64, ConversionError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| ConversionError::InvalidAmount(input.to_string()))
}

fn lookup(snapshot: &RateTable, code: &str) -> Result<f64, ConversionError> {
    snapshot
        .rate(code)
        .ok_or_else(|| ConversionError::UnknownCurrency(code.to_string()))
}
