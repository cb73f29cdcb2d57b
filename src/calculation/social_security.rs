//! Social security base and contribution calculations.
//!
//! This module applies the monthly social security ceiling to the gross
//! salary and calculates the per-contribution amounts for both the
//! employee and the employer side.

use rust_decimal::Decimal;

use crate::config::Contribution;
use crate::models::{AuditStep, ContributionBreakdown, ContributionLine};

/// The result of applying the social security ceiling.
#[derive(Debug, Clone)]
pub struct CeilingResult {
    /// The contribution base after applying the ceiling.
    pub base: Decimal,
    /// Whether the ceiling actually capped the base.
    pub is_ceiling_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Caps the contribution base at the monthly social security ceiling.
///
/// The base equals the gross salary when it is at or below the ceiling,
/// and the ceiling itself when the gross salary exceeds it. A gross
/// salary exactly at the ceiling is not considered capped.
///
/// # Arguments
///
/// * `gross_salary` - The monthly gross salary
/// * `ceiling` - The monthly social security ceiling
/// * `step_number` - The step number for audit trail sequencing
pub fn apply_ceiling(gross_salary: Decimal, ceiling: Decimal, step_number: u32) -> CeilingResult {
    let is_ceiling_applied = gross_salary > ceiling;
    let base = if is_ceiling_applied {
        ceiling
    } else {
        gross_salary
    };

    let reasoning = if is_ceiling_applied {
        format!(
            "Gross {} exceeds ceiling {}, base capped at {}",
            gross_salary.normalize(),
            ceiling.normalize(),
            base.normalize()
        )
    } else {
        format!(
            "Gross {} is within ceiling {}, base is {}",
            gross_salary.normalize(),
            ceiling.normalize(),
            base.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security_ceiling".to_string(),
        rule_name: "Social Security Ceiling".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "ceiling": ceiling.normalize().to_string()
        }),
        output: serde_json::json!({
            "base": base.normalize().to_string(),
            "is_ceiling_applied": is_ceiling_applied
        }),
        reasoning,
    };

    CeilingResult {
        base,
        is_ceiling_applied,
        audit_step,
    }
}

/// The side a set of contributions belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionSide {
    /// Contributions withheld from the employee's gross salary.
    Employee,
    /// Contributions paid by the employer on top of gross.
    Employer,
}

/// The result of calculating one side's contributions.
#[derive(Debug, Clone)]
pub struct ContributionsResult {
    /// The per-contribution lines and their total.
    pub breakdown: ContributionBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the contribution amounts for one side.
///
/// Each configured contribution is applied to the capped base, except
/// entries whose `ceiling_applies` is false, which are applied to the
/// uncapped gross salary (e.g. the Bulgarian work accidents fund).
///
/// # Arguments
///
/// * `side` - Which side the contributions belong to
/// * `entries` - The configured contribution entries
/// * `gross_salary` - The uncapped monthly gross salary
/// * `capped_base` - The base after applying the ceiling
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_contributions(
    side: ContributionSide,
    entries: &[Contribution],
    gross_salary: Decimal,
    capped_base: Decimal,
    step_number: u32,
) -> ContributionsResult {
    let (rule_id, rule_name, side_str) = match side {
        ContributionSide::Employee => (
            "employee_contributions",
            "Employee Contributions",
            "employee",
        ),
        ContributionSide::Employer => (
            "employer_contributions",
            "Employer Contributions",
            "employer",
        ),
    };

    let lines: Vec<ContributionLine> = entries
        .iter()
        .map(|entry| {
            let base = if entry.ceiling_applies {
                capped_base
            } else {
                gross_salary
            };
            ContributionLine {
                name: entry.name.clone(),
                display_name: entry.display_name.clone(),
                rate: entry.rate,
                base,
                amount: base * entry.rate,
                capped: entry.ceiling_applies && gross_salary > capped_base,
            }
        })
        .collect();

    let breakdown = ContributionBreakdown::from_lines(lines);

    let reasoning = if breakdown.lines.is_empty() {
        format!("No {} contributions configured", side_str)
    } else {
        let parts: Vec<String> = breakdown
            .lines
            .iter()
            .map(|line| {
                format!(
                    "{} {} x {} = {}",
                    line.name,
                    line.base.normalize(),
                    line.rate.normalize(),
                    line.amount.normalize()
                )
            })
            .collect();
        format!("{}; total {}", parts.join("; "), breakdown.total.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "side": side_str,
            "gross_salary": gross_salary.normalize().to_string(),
            "capped_base": capped_base.normalize().to_string()
        }),
        output: serde_json::json!({
            "lines": breakdown
                .lines
                .iter()
                .map(|line| {
                    serde_json::json!({
                        "name": line.name,
                        "base": line.base.normalize().to_string(),
                        "rate": line.rate.normalize().to_string(),
                        "amount": line.amount.normalize().to_string()
                    })
                })
                .collect::<Vec<_>>(),
            "total": breakdown.total.normalize().to_string()
        }),
        reasoning,
    };

    ContributionsResult {
        breakdown,
        audit_step,
    }
}
