//! Currency codes offered for selection

/// Codes offered when the config does not list its own.
pub const DEFAULT_CURRENCIES: [&str; 10] = [
    "TWD", "USD", "JPY", "EUR", "KRW", "CNY", "GBP", "AUD", "HKD", "SGD",
];

/// Upper-cases and trims a user-entered currency code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
