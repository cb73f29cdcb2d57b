//! Income tax calculation.
//!
//! Income tax is levied on the gross salary after deducting the
//! employee's social security contributions. Bulgaria applies a flat
//! rate; the schedule kind is matched so other schedules can be added.

use rust_decimal::Decimal;

use crate::config::{IncomeTax, TaxKind};
use crate::models::AuditStep;

/// The result of the income tax calculation.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The income subject to tax.
    pub taxable_income: Decimal,
    /// The income tax amount.
    pub income_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates income tax on the gross salary less employee contributions.
///
/// # Arguments
///
/// * `gross_salary` - The monthly gross salary
/// * `employee_total` - The total employee social security contributions
/// * `tax` - The income tax configuration
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate_income_tax;
/// use salary_engine::config::{IncomeTax, TaxKind};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = IncomeTax {
///     rate: Decimal::from_str("0.10").unwrap(),
///     kind: TaxKind::Flat,
/// };
/// let result = calculate_income_tax(
///     Decimal::from_str("2000").unwrap(),
///     Decimal::from_str("275.60").unwrap(),
///     &tax,
///     1,
/// );
/// assert_eq!(result.income_tax, Decimal::from_str("172.44").unwrap());
/// ```
pub fn calculate_income_tax(
    gross_salary: Decimal,
    employee_total: Decimal,
    tax: &IncomeTax,
    step_number: u32,
) -> IncomeTaxResult {
    let taxable_income = gross_salary - employee_total;

    let income_tax = match tax.kind {
        TaxKind::Flat => taxable_income * tax.rate,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "employee_contributions_total": employee_total.normalize().to_string(),
            "rate": tax.rate.normalize().to_string(),
            "kind": "flat"
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "income_tax": income_tax.normalize().to_string()
        }),
        reasoning: format!(
            "Taxable income {} - {} = {}; flat tax {} x {} = {}",
            gross_salary.normalize(),
            employee_total.normalize(),
            taxable_income.normalize(),
            taxable_income.normalize(),
            tax.rate.normalize(),
            income_tax.normalize()
        ),
    };

    IncomeTaxResult {
        taxable_income,
        income_tax,
        audit_step,
    }
}
