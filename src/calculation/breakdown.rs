//! Full gross-to-net breakdown orchestration.
//!
//! This module wires the individual calculation rules into the complete
//! gross-to-net pipeline and assembles the final [`SalaryBreakdown`]
//! together with its audit trace.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, InputMode, SalaryBreakdown, SalaryInput,
};

use super::ceiling_savings::calculate_ceiling_savings;
use super::gross_salary::normalize_gross_salary;
use super::hourly_rates::calculate_hourly_rates;
use super::income_tax::calculate_income_tax;
use super::ratios::calculate_ratios;
use super::social_security::{apply_ceiling, calculate_contributions, ContributionSide};

/// The complete result of a calculation: the breakdown and its audit trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownResult {
    /// The calculated salary breakdown.
    pub breakdown: SalaryBreakdown,
    /// The audit trace explaining every figure in the breakdown.
    pub audit: AuditTrace,
}

/// Calculates the full gross-to-net breakdown for the given input.
///
/// The pipeline normalizes the input into a monthly gross amount, caps
/// the social security base at the ceiling, calculates employee and
/// employer contributions, applies income tax, and derives totals,
/// ratios, and effective hourly rates. Every rule application is
/// recorded as an audit step.
///
/// The result is deterministic: the same input and configuration always
/// produce the same breakdown and audit trace.
///
/// # Arguments
///
/// * `input` - The calculation input
/// * `config` - The country tax configuration
///
/// # Returns
///
/// Returns the breakdown and audit trace, or an error when the input is
/// invalid or an hourly rate currency has no configured exchange rate.
///
/// # Example
///
/// ```no_run
/// use salary_engine::calculation::calculate_breakdown;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/countries")?;
/// let config = loader.country("BG")?;
///
/// let input = SalaryInput::monthly(
///     Decimal::from_str("2000").unwrap(),
///     Decimal::from_str("160").unwrap(),
/// );
/// let result = calculate_breakdown(&input, config)?;
/// println!("Net salary: {}", result.breakdown.net_salary);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn calculate_breakdown(
    input: &SalaryInput,
    config: &TaxConfig,
) -> EngineResult<BreakdownResult> {
    let exchange_rate = match input.mode {
        InputMode::Monthly => Decimal::ONE,
        InputMode::Hourly => config
            .exchange_rate_to_local(&input.hourly_rate_currency)
            .ok_or_else(|| EngineError::UnsupportedCurrency {
                from: input.hourly_rate_currency.clone(),
                to: config.currency.clone(),
            })?,
    };

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let gross_result = normalize_gross_salary(input, exchange_rate, step_number)?;
    let gross_salary = gross_result.gross_salary;
    steps.push(gross_result.audit_step);
    step_number += 1;

    let ceiling_result = apply_ceiling(
        gross_salary,
        config.social_security_ceiling_monthly,
        step_number,
    );
    let social_security_base = ceiling_result.base;
    let is_ceiling_applied = ceiling_result.is_ceiling_applied;
    steps.push(ceiling_result.audit_step);
    step_number += 1;

    let employee_result = calculate_contributions(
        ContributionSide::Employee,
        &config.employee_contributions,
        gross_salary,
        social_security_base,
        step_number,
    );
    let employee_contributions = employee_result.breakdown;
    steps.push(employee_result.audit_step);
    step_number += 1;

    let tax_result = calculate_income_tax(
        gross_salary,
        employee_contributions.total,
        &config.income_tax,
        step_number,
    );
    let taxable_income = tax_result.taxable_income;
    let income_tax = tax_result.income_tax;
    steps.push(tax_result.audit_step);
    step_number += 1;

    let net_salary = gross_salary - employee_contributions.total - income_tax;

    let employer_result = calculate_contributions(
        ContributionSide::Employer,
        &config.employer_contributions,
        gross_salary,
        social_security_base,
        step_number,
    );
    let employer_contributions = employer_result.breakdown;
    steps.push(employer_result.audit_step);
    step_number += 1;

    let total_cost_to_company = gross_salary + employer_contributions.total;

    let savings_result = calculate_ceiling_savings(gross_salary, config, step_number);
    let social_security_savings = savings_result.savings;
    steps.push(savings_result.audit_step);
    step_number += 1;

    let ratios_result = calculate_ratios(
        gross_salary,
        net_salary,
        total_cost_to_company,
        step_number,
    );
    let net_to_gross_ratio = ratios_result.net_to_gross_ratio;
    let total_cost_ratio = ratios_result.total_cost_ratio;
    steps.push(ratios_result.audit_step);
    step_number += 1;

    let hourly_result = calculate_hourly_rates(
        gross_salary,
        net_salary,
        total_cost_to_company,
        input.hours_per_month,
        step_number,
    )?;
    let hourly_rates = hourly_result.rates;
    steps.push(hourly_result.audit_step);

    if gross_salary < config.minimum_wage_monthly {
        warnings.push(AuditWarning {
            code: "BELOW_MINIMUM_WAGE".to_string(),
            message: format!(
                "Gross salary {} is below the minimum wage {}",
                gross_salary.normalize(),
                config.minimum_wage_monthly.normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    let total_employee_deductions = employee_contributions.total + income_tax;
    let total_taxes_paid =
        employee_contributions.total + employer_contributions.total + income_tax;

    Ok(BreakdownResult {
        breakdown: SalaryBreakdown {
            gross_salary,
            hours_per_month: input.hours_per_month,
            social_security_base,
            employee_contributions,
            taxable_income,
            income_tax,
            net_salary,
            employer_contributions,
            total_cost_to_company,
            total_employee_deductions,
            total_taxes_paid,
            net_to_gross_ratio,
            total_cost_ratio,
            is_ceiling_applied,
            social_security_savings,
            hourly_rates,
        },
        audit: AuditTrace { steps, warnings },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CalculationDefaults, ConfigMetadata, Contribution, IncomeTax, TaxKind, WorkingHoursMethod,
    };
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn contribution(name: &str, rate: &str, ceiling_applies: bool) -> Contribution {
        Contribution {
            name: name.to_string(),
            display_name: name.to_string(),
            rate: dec(rate),
            ceiling_applies,
        }
    }

    fn create_test_config() -> TaxConfig {
        TaxConfig {
            code: "BG".to_string(),
            name: "Bulgaria".to_string(),
            is_default: true,
            currency: "BGN".to_string(),
            exchange_rates: HashMap::from([("EUR".to_string(), dec("1.95583"))]),
            social_security_ceiling_monthly: dec("4130"),
            employee_contributions: vec![
                contribution("pension", "0.0978", true),
                contribution("health", "0.032", true),
                contribution("unemployment", "0.008", true),
            ],
            employer_contributions: vec![
                contribution("pension", "0.1292", true),
                contribution("health", "0.048", true),
                contribution("unemployment", "0.01", true),
                contribution("work_accidents", "0.002", false),
            ],
            income_tax: IncomeTax {
                rate: dec("0.10"),
                kind: TaxKind::Flat,
            },
            minimum_wage_monthly: dec("933"),
            defaults: CalculationDefaults {
                gross_salary: dec("2000"),
                hourly_rate: dec("50"),
                hourly_rate_currency: "EUR".to_string(),
                hours_per_month: dec("160"),
            },
            working_hours_methods: HashMap::from([(
                "legal".to_string(),
                WorkingHoursMethod {
                    name: "Legal working days".to_string(),
                    description: "22 working days x 8 hours".to_string(),
                    hours: dec("176"),
                },
            )]),
            metadata: ConfigMetadata {
                year: 2025,
                notes: vec![],
            },
        }
    }

    #[test]
    fn test_standard_monthly_salary_below_ceiling() {
        let config = create_test_config();
        let input = SalaryInput::monthly(dec("2000"), dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        let breakdown = &result.breakdown;

        assert_eq!(breakdown.gross_salary, dec("2000"));
        assert_eq!(breakdown.social_security_base, dec("2000"));
        assert_eq!(breakdown.employee_contributions.total, dec("275.60"));
        assert_eq!(breakdown.taxable_income, dec("1724.40"));
        assert_eq!(breakdown.income_tax, dec("172.44"));
        assert_eq!(breakdown.net_salary, dec("1551.96"));
        assert_eq!(breakdown.employer_contributions.total, dec("378.40"));
        assert_eq!(breakdown.total_cost_to_company, dec("2378.40"));
        assert_eq!(breakdown.total_employee_deductions, dec("448.04"));
        assert_eq!(breakdown.total_taxes_paid, dec("826.44"));
        assert_eq!(breakdown.net_to_gross_ratio, dec("77.598"));
        assert_eq!(breakdown.total_cost_ratio.round_dp(4), dec("153.2513"));
        assert!(!breakdown.is_ceiling_applied);
        assert_eq!(breakdown.social_security_savings, Decimal::ZERO);
        assert_eq!(breakdown.hourly_rates.gross, dec("12.5"));
        assert!(result.audit.warnings.is_empty());
    }

    #[test]
    fn test_salary_above_ceiling_is_capped() {
        let config = create_test_config();
        let input = SalaryInput::monthly(dec("5000"), dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        let breakdown = &result.breakdown;

        assert_eq!(breakdown.social_security_base, dec("4130"));
        assert!(breakdown.is_ceiling_applied);
        assert_eq!(breakdown.employee_contributions.total, dec("569.114"));
        assert_eq!(breakdown.taxable_income, dec("4430.886"));
        assert_eq!(breakdown.income_tax, dec("443.0886"));
        assert_eq!(breakdown.net_salary, dec("3987.7974"));
        // Employer still pays work_accidents on the full gross
        assert_eq!(breakdown.employer_contributions.total, dec("783.136"));
        assert_eq!(breakdown.total_cost_to_company, dec("5783.136"));
        assert_eq!(breakdown.social_security_savings, dec("282.75"));
    }

    #[test]
    fn test_hourly_mode_converts_eur_rate() {
        let config = create_test_config();
        let input = SalaryInput::hourly(dec("50"), "EUR", dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        let breakdown = &result.breakdown;

        // 50 x 1.95583 x 160 = 15646.64
        assert_eq!(breakdown.gross_salary, dec("15646.64"));
        assert_eq!(breakdown.social_security_base, dec("4130"));
        assert!(breakdown.is_ceiling_applied);
        assert_eq!(breakdown.employee_contributions.total, dec("569.114"));
        assert_eq!(breakdown.net_salary, dec("13569.7734"));
    }

    #[test]
    fn test_hourly_mode_in_local_currency_needs_no_rate() {
        let config = create_test_config();
        let input = SalaryInput::hourly(dec("12.50"), "BGN", dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        assert_eq!(result.breakdown.gross_salary, dec("2000"));
    }

    #[test]
    fn test_hourly_mode_with_unknown_currency_returns_error() {
        let config = create_test_config();
        let input = SalaryInput::hourly(dec("50"), "JPY", dec("160"));

        let result = calculate_breakdown(&input, &config);
        match result {
            Err(EngineError::UnsupportedCurrency { from, to }) => {
                assert_eq!(from, "JPY");
                assert_eq!(to, "BGN");
            }
            _ => panic!("Expected UnsupportedCurrency error"),
        }
    }

    #[test]
    fn test_salary_below_minimum_wage_adds_warning() {
        let config = create_test_config();
        let input = SalaryInput::monthly(dec("800"), dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();

        assert_eq!(result.breakdown.net_salary, dec("620.784"));
        assert_eq!(result.audit.warnings.len(), 1);
        assert_eq!(result.audit.warnings[0].code, "BELOW_MINIMUM_WAGE");
        assert_eq!(result.audit.warnings[0].severity, "medium");
        assert!(result.audit.warnings[0].message.contains("933"));
    }

    #[test]
    fn test_zero_gross_salary_is_all_zeros_with_warning() {
        let config = create_test_config();
        let input = SalaryInput::monthly(Decimal::ZERO, dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        let breakdown = &result.breakdown;

        assert_eq!(breakdown.gross_salary, Decimal::ZERO);
        assert_eq!(breakdown.net_salary, Decimal::ZERO);
        assert_eq!(breakdown.total_cost_to_company, Decimal::ZERO);
        assert_eq!(breakdown.net_to_gross_ratio, Decimal::ZERO);
        assert_eq!(breakdown.total_cost_ratio, Decimal::ZERO);
        assert_eq!(breakdown.hourly_rates.gross, Decimal::ZERO);
        assert_eq!(result.audit.warnings.len(), 1);
    }

    #[test]
    fn test_audit_steps_are_sequential_and_ordered() {
        let config = create_test_config();
        let input = SalaryInput::monthly(dec("2000"), dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        let steps = &result.audit.steps;

        let rule_ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "gross_salary",
                "social_security_ceiling",
                "employee_contributions",
                "income_tax",
                "employer_contributions",
                "ceiling_savings",
                "ratios",
                "hourly_rates",
            ]
        );

        for (index, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let config = create_test_config();
        let input = SalaryInput::hourly(dec("50"), "EUR", dec("160"));

        let first = calculate_breakdown(&input, &config).unwrap();
        let second = calculate_breakdown(&input, &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_totals_are_consistent() {
        let config = create_test_config();
        let input = SalaryInput::monthly(dec("3456.78"), dec("160"));

        let result = calculate_breakdown(&input, &config).unwrap();
        let breakdown = &result.breakdown;

        assert_eq!(
            breakdown.net_salary,
            breakdown.gross_salary - breakdown.total_employee_deductions
        );
        assert_eq!(
            breakdown.total_cost_to_company,
            breakdown.gross_salary + breakdown.employer_contributions.total
        );
        assert_eq!(
            breakdown.total_taxes_paid,
            breakdown.total_employee_deductions + breakdown.employer_contributions.total
        );
    }

    #[test]
    fn test_negative_gross_returns_invalid_input() {
        let config = create_test_config();
        let input = SalaryInput::monthly(dec("-1"), dec("160"));

        match calculate_breakdown(&input, &config) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "gross_salary");
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }
}
