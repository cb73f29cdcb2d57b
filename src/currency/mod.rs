//! Currency conversion and display formatting.
//!
//! This module converts amounts between the currencies a country
//! configuration knows and renders amounts and percentages for display.

mod convert;
mod format;

pub use convert::CurrencyConverter;
pub use format::{format_amount, format_percentage};
