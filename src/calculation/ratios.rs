//! Net-to-gross and cost-to-net percentage calculations.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of the ratio calculations.
#[derive(Debug, Clone)]
pub struct RatiosResult {
    /// Net salary as a percentage of gross salary.
    pub net_to_gross_ratio: Decimal,
    /// Total cost to company as a percentage of net salary.
    pub total_cost_ratio: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the net-to-gross and cost-to-net percentages.
///
/// `net_to_gross_ratio` is `net / gross x 100` and `total_cost_ratio`
/// is `total_cost / net x 100`. A zero denominator has no meaningful
/// percentage; the affected ratio is reported as zero and the audit
/// step notes the degenerate input.
///
/// # Arguments
///
/// * `gross_salary` - The monthly gross salary
/// * `net_salary` - The net salary
/// * `total_cost` - The total cost to company
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_ratios(
    gross_salary: Decimal,
    net_salary: Decimal,
    total_cost: Decimal,
    step_number: u32,
) -> RatiosResult {
    let net_to_gross_ratio = if gross_salary.is_zero() {
        Decimal::ZERO
    } else {
        net_salary / gross_salary * Decimal::ONE_HUNDRED
    };
    let total_cost_ratio = if net_salary.is_zero() {
        Decimal::ZERO
    } else {
        total_cost / net_salary * Decimal::ONE_HUNDRED
    };

    let net_part = if gross_salary.is_zero() {
        "Gross is zero, net/gross reported as 0".to_string()
    } else {
        format!(
            "Net {} / gross {} = {}%",
            net_salary.normalize(),
            gross_salary.normalize(),
            net_to_gross_ratio.round_dp(2).normalize()
        )
    };
    let cost_part = if net_salary.is_zero() {
        "net is zero, cost/net reported as 0".to_string()
    } else {
        format!(
            "cost {} / net {} = {}%",
            total_cost.normalize(),
            net_salary.normalize(),
            total_cost_ratio.round_dp(2).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "ratios".to_string(),
        rule_name: "Salary Ratios".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "net_salary": net_salary.normalize().to_string(),
            "total_cost": total_cost.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_to_gross_ratio": net_to_gross_ratio.normalize().to_string(),
            "total_cost_ratio": total_cost_ratio.normalize().to_string()
        }),
        reasoning: format!("{}; {}", net_part, cost_part),
    };

    RatiosResult {
        net_to_gross_ratio,
        total_cost_ratio,
        audit_step,
    }
}
