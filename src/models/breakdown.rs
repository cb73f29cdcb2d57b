//! Breakdown models for salary calculations.
//!
//! This module contains the [`SalaryBreakdown`] type and its associated
//! structures that capture all outputs of a gross-to-net calculation,
//! including per-contribution lines, tax, totals, and ratios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single social security contribution line in a breakdown.
///
/// # Example
///
/// ```
/// use salary_engine::models::ContributionLine;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = ContributionLine {
///     name: "pension".to_string(),
///     display_name: "Pension fund".to_string(),
///     rate: Decimal::from_str("0.0978").unwrap(),
///     base: Decimal::from_str("2000").unwrap(),
///     amount: Decimal::from_str("195.60").unwrap(),
///     capped: false,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLine {
    /// Stable identifier for the contribution (e.g. "pension").
    pub name: String,
    /// Human-readable name of the contribution.
    pub display_name: String,
    /// The rate applied to the base.
    pub rate: Decimal,
    /// The base amount the rate was applied to.
    pub base: Decimal,
    /// The resulting contribution amount (base * rate).
    pub amount: Decimal,
    /// Whether the base was capped at the social security ceiling.
    pub capped: bool,
}

/// The contribution lines and total for one side (employee or employer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// The individual contribution lines.
    pub lines: Vec<ContributionLine>,
    /// The sum of all line amounts.
    pub total: Decimal,
}

impl ContributionBreakdown {
    /// Builds a breakdown from its lines, computing the total.
    pub fn from_lines(lines: Vec<ContributionLine>) -> Self {
        let total = lines.iter().map(|line| line.amount).sum();
        Self { lines, total }
    }

    /// Returns the amount for the named contribution, if present.
    pub fn amount(&self, name: &str) -> Option<Decimal> {
        self.lines
            .iter()
            .find(|line| line.name == name)
            .map(|line| line.amount)
    }
}

/// Effective hourly rates derived from the monthly figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRates {
    /// Gross salary per hour.
    pub gross: Decimal,
    /// Net salary per hour.
    pub net: Decimal,
    /// Total cost to company per hour.
    pub total_cost: Decimal,
}

/// The complete result of a gross-to-net salary calculation.
///
/// All amounts are monthly figures in the local currency of the country
/// the calculation ran for. The breakdown is fully deterministic: the
/// same input and configuration always produce the same breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// The gross monthly salary the calculation ran on.
    pub gross_salary: Decimal,
    /// The number of working hours per month used for hourly rates.
    pub hours_per_month: Decimal,
    /// The social security base after applying the ceiling.
    pub social_security_base: Decimal,
    /// Contributions withheld from the employee.
    pub employee_contributions: ContributionBreakdown,
    /// The income subject to tax (gross minus employee contributions).
    pub taxable_income: Decimal,
    /// The income tax amount.
    pub income_tax: Decimal,
    /// The net salary paid out to the employee.
    pub net_salary: Decimal,
    /// Contributions paid by the employer on top of gross.
    pub employer_contributions: ContributionBreakdown,
    /// Gross salary plus all employer contributions.
    pub total_cost_to_company: Decimal,
    /// Employee contributions plus income tax.
    pub total_employee_deductions: Decimal,
    /// All contributions from both sides plus income tax.
    pub total_taxes_paid: Decimal,
    /// Net salary as a percentage of gross salary.
    pub net_to_gross_ratio: Decimal,
    /// Total cost to company as a percentage of net salary.
    pub total_cost_ratio: Decimal,
    /// Whether the social security ceiling capped the contribution base.
    pub is_ceiling_applied: bool,
    /// Contributions avoided because of the ceiling, across both sides.
    pub social_security_savings: Decimal,
    /// Effective hourly rates derived from the monthly figures.
    pub hourly_rates: HourlyRates,
}
