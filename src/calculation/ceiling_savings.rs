//! Social security savings from the contribution ceiling.
//!
//! When the gross salary exceeds the monthly ceiling, the part above it
//! carries no ceiling-bound contributions. This module quantifies the
//! combined amount both sides avoid paying because of the cap.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::models::AuditStep;

/// The result of the ceiling savings calculation.
#[derive(Debug, Clone)]
pub struct CeilingSavingsResult {
    /// Contributions avoided because of the ceiling, across both sides.
    pub savings: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the contributions avoided because of the ceiling.
///
/// The savings are the excess above the ceiling multiplied by the
/// combined employee and employer rates of the ceiling-bound
/// contributions only. Uncapped contributions (e.g. work accidents) are
/// still paid on the full gross and save nothing.
///
/// # Arguments
///
/// * `gross_salary` - The monthly gross salary
/// * `config` - The country tax configuration
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_ceiling_savings(
    gross_salary: Decimal,
    config: &TaxConfig,
    step_number: u32,
) -> CeilingSavingsResult {
    let ceiling = config.social_security_ceiling_monthly;
    let combined_rate = config.employee_capped_rate() + config.employer_capped_rate();

    let excess = if gross_salary > ceiling {
        gross_salary - ceiling
    } else {
        Decimal::ZERO
    };
    let savings = excess * combined_rate;

    let reasoning = if excess > Decimal::ZERO {
        format!(
            "Excess above ceiling {} x combined capped rate {} = {} saved",
            excess.normalize(),
            combined_rate.normalize(),
            savings.normalize()
        )
    } else {
        format!(
            "Gross {} does not exceed ceiling {}, no savings",
            gross_salary.normalize(),
            ceiling.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "ceiling_savings".to_string(),
        rule_name: "Ceiling Savings".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "ceiling": ceiling.normalize().to_string(),
            "combined_capped_rate": combined_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "excess": excess.normalize().to_string(),
            "savings": savings.normalize().to_string()
        }),
        reasoning,
    };

    CeilingSavingsResult {
        savings,
        audit_step,
    }
}
