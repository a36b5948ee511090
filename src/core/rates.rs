//! Rate table and provider abstractions

use super::error::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Multipliers for each currency relative to a single base currency.
///
/// Tables are immutable once built. A refresh produces a whole new table,
/// which readers share as an `Arc<RateTable>` snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base_currency: String,
    rates: BTreeMap<String, f64>,
    fetched_at: Option<DateTime<Utc>>,
}

impl RateTable {
    /// The table held before any fetch has succeeded.
    pub fn empty(base_currency: &str) -> Self {
        RateTable {
            base_currency: base_currency.to_string(),
            rates: BTreeMap::new(),
            fetched_at: None,
        }
    }

    /// Builds a table, rejecting non-positive or non-finite rates and a base
    /// currency that does not map to exactly 1.0.
    pub fn new(
        base_currency: &str,
        rates: BTreeMap<String, f64>,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Result<Self, FetchError> {
        if let Some((code, value)) = rates.iter().find(|(_, v)| !(v.is_finite() && **v > 0.0)) {
            return Err(FetchError::InvalidRate {
                code: code.clone(),
                value: *value,
            });
        }
        if let Some(value) = rates.get(base_currency) {
            if *value != 1.0 {
                return Err(FetchError::InvalidRate {
                    code: base_currency.to_string(),
                    value: *value,
                });
            }
        }

        Ok(RateTable {
            base_currency: base_currency.to_string(),
            rates,
            fetched_at,
        })
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn rates(&self) -> &BTreeMap<String, f64> {
        &self.rates
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Source of base-currency rate tables.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns the multiplier of every known currency relative to `base`.
    async fn fetch_rates(&self, base: &str) -> Result<BTreeMap<String, f64>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect()
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::empty("USD");
        assert!(table.is_empty());
        assert_eq!(table.base_currency(), "USD");
        assert!(table.fetched_at().is_none());
        assert!(table.rate("USD").is_none());
    }

    #[test]
    fn test_valid_table() {
        let now = Utc::now();
        let table =
            RateTable::new("USD", rates(&[("USD", 1.0), ("TWD", 32.0)]), Some(now)).unwrap();
        assert_eq!(table.rate("TWD"), Some(32.0));
        assert_eq!(table.rate("USD"), Some(1.0));
        assert_eq!(table.fetched_at(), Some(now));
        assert_eq!(table.rates().len(), 2);
    }

    #[test]
    fn test_table_without_base_entry_is_valid() {
        let table = RateTable::new("USD", rates(&[("EUR", 0.9)]), None).unwrap();
        assert!(table.rate("USD").is_none());
    }

    #[test]
    fn test_rejects_non_positive_rate() {
        let err = RateTable::new("USD", rates(&[("USD", 1.0), ("JPY", 0.0)]), None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRate { ref code, .. } if code == "JPY"));

        let err = RateTable::new("USD", rates(&[("EUR", -0.9)]), None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid rate -0.9 for currency: EUR");
    }

    #[test]
    fn test_rejects_non_finite_rate() {
        let err = RateTable::new("USD", rates(&[("EUR", f64::INFINITY)]), None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRate { .. }));

        let err = RateTable::new("USD", rates(&[("EUR", f64::NAN)]), None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRate { .. }));
    }

    #[test]
    fn test_rejects_base_not_equal_to_one() {
        let err = RateTable::new("USD", rates(&[("USD", 1.01), ("EUR", 0.9)]), None).unwrap_err();
        assert!(matches!(err, FetchError::InvalidRate { ref code, .. } if code == "USD"));
    }
}
