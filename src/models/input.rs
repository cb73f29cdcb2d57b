//! Input models for salary calculations.
//!
//! This module contains the [`SalaryInput`] type describing what the
//! caller wants calculated, either from a monthly gross amount or from
//! an hourly rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;

/// Selects how the gross salary is derived from the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// The gross salary is given directly as a monthly amount.
    #[default]
    Monthly,
    /// The gross salary is derived from an hourly rate and monthly hours.
    Hourly,
}

/// The input to a salary calculation.
///
/// Carries both monthly and hourly fields; [`InputMode`] selects which
/// of them drive the calculation. Fields for the inactive mode are
/// ignored.
///
/// # Example
///
/// ```
/// use salary_engine::models::{InputMode, SalaryInput};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = SalaryInput::monthly(
///     Decimal::from_str("2000").unwrap(),
///     Decimal::from_str("160").unwrap(),
/// );
/// assert_eq!(input.mode, InputMode::Monthly);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// How the gross salary is derived.
    pub mode: InputMode,
    /// The monthly gross salary in the local currency (monthly mode).
    pub monthly_gross: Decimal,
    /// The hourly rate (hourly mode).
    pub hourly_rate: Decimal,
    /// The currency the hourly rate is expressed in (hourly mode).
    pub hourly_rate_currency: String,
    /// The number of working hours per month.
    pub hours_per_month: Decimal,
}

impl SalaryInput {
    /// Creates a monthly-mode input from a gross salary and hours.
    pub fn monthly(monthly_gross: Decimal, hours_per_month: Decimal) -> Self {
        Self {
            mode: InputMode::Monthly,
            monthly_gross,
            hourly_rate: Decimal::ZERO,
            hourly_rate_currency: String::new(),
            hours_per_month,
        }
    }

    /// Creates an hourly-mode input from a rate, its currency, and hours.
    pub fn hourly(
        hourly_rate: Decimal,
        hourly_rate_currency: impl Into<String>,
        hours_per_month: Decimal,
    ) -> Self {
        Self {
            mode: InputMode::Hourly,
            monthly_gross: Decimal::ZERO,
            hourly_rate,
            hourly_rate_currency: hourly_rate_currency.into(),
            hours_per_month,
        }
    }

    /// Creates a monthly-mode input from a country's configured defaults.
    pub fn from_defaults(config: &TaxConfig) -> Self {
        Self {
            mode: InputMode::Monthly,
            monthly_gross: config.defaults.gross_salary,
            hourly_rate: config.defaults.hourly_rate,
            hourly_rate_currency: config.defaults.hourly_rate_currency.clone(),
            hours_per_month: config.defaults.hours_per_month,
        }
    }
}
