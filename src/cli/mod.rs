pub mod convert;
pub mod display;
pub mod interactive;
pub mod rates;
pub mod setup;
pub mod ui;
