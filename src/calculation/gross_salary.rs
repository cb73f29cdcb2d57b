//! Gross salary normalization.
//!
//! This module turns a [`SalaryInput`] into a monthly gross amount in the
//! local currency, converting from an hourly rate when the input is in
//! hourly mode.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, InputMode, SalaryInput};

/// The result of normalizing the input, including the audit step.
#[derive(Debug, Clone)]
pub struct GrossSalaryResult {
    /// The monthly gross salary in the local currency.
    pub gross_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Normalizes the calculation input into a monthly gross salary.
///
/// In monthly mode the gross amount is taken as given. In hourly mode it
/// is derived as `hourly_rate * exchange_rate * hours_per_month`, where
/// the exchange rate converts the rate's currency into the local one
/// (one for the local currency itself).
///
/// # Arguments
///
/// * `input` - The calculation input
/// * `exchange_rate` - Rate from the hourly rate currency into the local currency
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `GrossSalaryResult` containing the gross salary and an audit
/// step, or `InvalidInput` if an amount is negative, the hours are not
/// positive, or the exchange rate is not positive.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::normalize_gross_salary;
/// use salary_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = SalaryInput::monthly(
///     Decimal::from_str("2000").unwrap(),
///     Decimal::from_str("160").unwrap(),
/// );
/// let result = normalize_gross_salary(&input, Decimal::ONE, 1).unwrap();
/// assert_eq!(result.gross_salary, Decimal::from_str("2000").unwrap());
/// ```
pub fn normalize_gross_salary(
    input: &SalaryInput,
    exchange_rate: Decimal,
    step_number: u32,
) -> EngineResult<GrossSalaryResult> {
    if input.hours_per_month <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "hours_per_month".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    match input.mode {
        InputMode::Monthly => {
            if input.monthly_gross < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: "gross_salary".to_string(),
                    message: "must not be negative".to_string(),
                });
            }

            let gross_salary = input.monthly_gross;

            let audit_step = AuditStep {
                step_number,
                rule_id: "gross_salary".to_string(),
                rule_name: "Gross Salary".to_string(),
                input: serde_json::json!({
                    "mode": "monthly",
                    "gross_salary": gross_salary.normalize().to_string()
                }),
                output: serde_json::json!({
                    "gross_salary": gross_salary.normalize().to_string()
                }),
                reasoning: format!(
                    "Gross salary given directly as monthly amount: {}",
                    gross_salary.normalize()
                ),
            };

            Ok(GrossSalaryResult {
                gross_salary,
                audit_step,
            })
        }
        InputMode::Hourly => {
            if input.hourly_rate < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: "hourly_rate".to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            if exchange_rate <= Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: "exchange_rate".to_string(),
                    message: "must be positive".to_string(),
                });
            }

            let gross_salary = input.hourly_rate * exchange_rate * input.hours_per_month;

            let audit_step = AuditStep {
                step_number,
                rule_id: "gross_salary".to_string(),
                rule_name: "Gross Salary".to_string(),
                input: serde_json::json!({
                    "mode": "hourly",
                    "hourly_rate": input.hourly_rate.normalize().to_string(),
                    "hourly_rate_currency": input.hourly_rate_currency,
                    "exchange_rate": exchange_rate.normalize().to_string(),
                    "hours_per_month": input.hours_per_month.normalize().to_string()
                }),
                output: serde_json::json!({
                    "gross_salary": gross_salary.normalize().to_string()
                }),
                reasoning: format!(
                    "{} {}/h x {} x {} h = {}",
                    input.hourly_rate.normalize(),
                    input.hourly_rate_currency,
                    exchange_rate.normalize(),
                    input.hours_per_month.normalize(),
                    gross_salary.normalize()
                ),
            };

            Ok(GrossSalaryResult {
                gross_salary,
                audit_step,
            })
        }
    }
}
