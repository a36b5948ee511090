//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod engine;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use engine::{ConversionRequest, ConversionResult, convert};
pub use error::{ConversionError, FetchError};
pub use rates::{RateProvider, RateTable};
