//! Request types for the salary calculation engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::models::{InputMode, SalaryInput};

/// Request body for the `/calculate` endpoint.
///
/// Every field is optional; omitted fields fall back to the resolved
/// country's configured defaults, so an empty object is a valid request
/// that calculates the default scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The country to calculate for. Defaults to the default country.
    #[serde(default)]
    pub country_code: Option<String>,
    /// How the gross salary is derived. Defaults to monthly.
    #[serde(default)]
    pub input_mode: InputMode,
    /// The monthly gross salary in the local currency (monthly mode).
    #[serde(default)]
    pub gross_salary: Option<Decimal>,
    /// The hourly rate (hourly mode).
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// The currency the hourly rate is expressed in (hourly mode).
    #[serde(default)]
    pub hourly_rate_currency: Option<String>,
    /// The number of working hours per month.
    #[serde(default)]
    pub hours_per_month: Option<Decimal>,
    /// Currency to render the display summary in. Defaults to the
    /// country's local currency.
    #[serde(default)]
    pub display_currency: Option<String>,
}

impl CalculationRequest {
    /// Builds the calculation input, seeding omitted fields from the
    /// country's configured defaults.
    pub fn to_input(&self, config: &TaxConfig) -> SalaryInput {
        let defaults = &config.defaults;
        SalaryInput {
            mode: self.input_mode,
            monthly_gross: self.gross_salary.unwrap_or(defaults.gross_salary),
            hourly_rate: self.hourly_rate.unwrap_or(defaults.hourly_rate),
            hourly_rate_currency: self
                .hourly_rate_currency
                .clone()
                .unwrap_or_else(|| defaults.hourly_rate_currency.clone()),
            hours_per_month: self.hours_per_month.unwrap_or(defaults.hours_per_month),
        }
    }
}
