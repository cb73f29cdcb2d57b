//! Effective hourly rate derivation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, HourlyRates};

/// The result of deriving the effective hourly rates.
#[derive(Debug, Clone)]
pub struct HourlyRatesResult {
    /// The derived hourly rates.
    pub rates: HourlyRates,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives effective hourly rates from the monthly figures.
///
/// Divides the gross salary, net salary, and total cost to company by
/// the monthly working hours.
///
/// # Arguments
///
/// * `gross_salary` - The monthly gross salary
/// * `net_salary` - The net salary
/// * `total_cost` - The total cost to company
/// * `hours_per_month` - The monthly working hours
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns the hourly rates, or `InvalidInput` when the hours are not
/// positive.
pub fn calculate_hourly_rates(
    gross_salary: Decimal,
    net_salary: Decimal,
    total_cost: Decimal,
    hours_per_month: Decimal,
    step_number: u32,
) -> EngineResult<HourlyRatesResult> {
    if hours_per_month <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "hours_per_month".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let rates = HourlyRates {
        gross: gross_salary / hours_per_month,
        net: net_salary / hours_per_month,
        total_cost: total_cost / hours_per_month,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rates".to_string(),
        rule_name: "Hourly Rates".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string(),
            "total_cost": total_cost.normalize().to_string(),
            "hours_per_month": hours_per_month.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_per_hour": rates.gross.normalize().to_string(),
            "net_per_hour": rates.net.normalize().to_string(),
            "total_cost_per_hour": rates.total_cost.normalize().to_string()
        }),
        reasoning: format!(
            "Monthly figures over {} h: gross {}/h, net {}/h, total cost {}/h",
            hours_per_month.normalize(),
            rates.gross.normalize(),
            rates.net.normalize(),
            rates.total_cost.normalize()
        ),
    };

    Ok(HourlyRatesResult { rates, audit_step })
}
