//! Calculation logic for the salary calculation engine.
//!
//! This module contains all the calculation functions for a gross-to-net
//! breakdown, including gross salary normalization, the social security
//! ceiling cap, employee and employer contribution calculation, income
//! tax, ceiling savings, ratios, effective hourly rates, and the
//! orchestrating breakdown pipeline.

mod breakdown;
mod ceiling_savings;
mod gross_salary;
mod hourly_rates;
mod income_tax;
mod ratios;
mod social_security;

pub use breakdown::{BreakdownResult, calculate_breakdown};
pub use ceiling_savings::{CeilingSavingsResult, calculate_ceiling_savings};
pub use gross_salary::{GrossSalaryResult, normalize_gross_salary};
pub use hourly_rates::{HourlyRatesResult, calculate_hourly_rates};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use ratios::{RatiosResult, calculate_ratios};
pub use social_security::{
    CeilingResult, ContributionSide, ContributionsResult, apply_ceiling, calculate_contributions,
};
