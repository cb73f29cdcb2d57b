//! Configuration types for salary calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML country configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, EngineResult};

/// A single social security contribution entry.
///
/// Each entry describes one contribution line (e.g. pension fund) with its
/// rate and whether the social security ceiling applies to its base.
#[derive(Debug, Clone, Deserialize)]
pub struct Contribution {
    /// Stable identifier for the contribution (e.g. "pension").
    pub name: String,
    /// Human-readable name shown in breakdowns (e.g. "Pension fund").
    pub display_name: String,
    /// The contribution rate as a fraction (e.g. 0.0978 for 9.78%).
    pub rate: Decimal,
    /// Whether the contribution base is capped at the social security
    /// ceiling. Defaults to true; only uncapped entries need to set it.
    #[serde(default = "default_ceiling_applies")]
    pub ceiling_applies: bool,
}

fn default_ceiling_applies() -> bool {
    true
}

/// The kind of income tax schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxKind {
    /// A single flat rate applied to the full taxable income.
    Flat,
}

/// Income tax configuration.
///
/// # Example
///
/// ```
/// use salary_engine::config::{IncomeTax, TaxKind};
///
/// let tax: IncomeTax = serde_yaml::from_str("rate: 0.10\nkind: flat").unwrap();
/// assert_eq!(tax.kind, TaxKind::Flat);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTax {
    /// The tax rate as a fraction (e.g. 0.10 for 10%).
    pub rate: Decimal,
    /// The kind of tax schedule.
    pub kind: TaxKind,
}

/// Default input values used when a calculation request omits them.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationDefaults {
    /// Default monthly gross salary in the local currency.
    pub gross_salary: Decimal,
    /// Default hourly rate for hourly-mode calculations.
    pub hourly_rate: Decimal,
    /// The currency the default hourly rate is expressed in.
    pub hourly_rate_currency: String,
    /// Default number of working hours per month.
    pub hours_per_month: Decimal,
}

/// A named method for deriving monthly working hours.
///
/// Countries publish several conventions for the hours in a standard
/// month (legal working days, simplified round figures, weekly averages).
#[derive(Debug, Clone, Deserialize)]
pub struct WorkingHoursMethod {
    /// Human-readable name of the method.
    pub name: String,
    /// A description of how the figure is derived.
    pub description: String,
    /// The monthly hours this method yields.
    pub hours: Decimal,
}

/// Metadata about a country configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigMetadata {
    /// The tax year the configuration describes.
    pub year: i32,
    /// Free-form notes about the rules encoded in the file.
    #[serde(default)]
    pub notes: Vec<String>,
}

/// The complete tax configuration for one country.
///
/// Deserialized from a single YAML file in the country configuration
/// directory. All rates are fractions, all amounts are in the local
/// currency unless stated otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// ISO-style country code (e.g. "BG").
    pub code: String,
    /// Human-readable country name.
    pub name: String,
    /// Whether this country is the default when a request names none.
    #[serde(rename = "default", default)]
    pub is_default: bool,
    /// The local currency code (e.g. "BGN").
    pub currency: String,
    /// Exchange rates from foreign currencies into the local currency.
    /// One unit of the foreign currency equals this many local units.
    #[serde(default)]
    pub exchange_rates: HashMap<String, Decimal>,
    /// The monthly social security ceiling in local currency.
    pub social_security_ceiling_monthly: Decimal,
    /// Contributions withheld from the employee.
    pub employee_contributions: Vec<Contribution>,
    /// Contributions paid by the employer on top of gross.
    pub employer_contributions: Vec<Contribution>,
    /// Income tax configuration.
    pub income_tax: IncomeTax,
    /// The statutory minimum monthly wage in local currency.
    pub minimum_wage_monthly: Decimal,
    /// Default input values for calculations.
    pub defaults: CalculationDefaults,
    /// Named working hours methods, keyed by method identifier.
    #[serde(default)]
    pub working_hours_methods: HashMap<String, WorkingHoursMethod>,
    /// Metadata about this configuration.
    pub metadata: ConfigMetadata,
}

impl TaxConfig {
    /// Returns the sum of all employee contribution rates.
    pub fn employee_rate_total(&self) -> Decimal {
        self.employee_contributions.iter().map(|c| c.rate).sum()
    }

    /// Returns the sum of all employer contribution rates.
    pub fn employer_rate_total(&self) -> Decimal {
        self.employer_contributions.iter().map(|c| c.rate).sum()
    }

    /// Returns the sum of employee contribution rates that are subject
    /// to the social security ceiling.
    pub fn employee_capped_rate(&self) -> Decimal {
        self.employee_contributions
            .iter()
            .filter(|c| c.ceiling_applies)
            .map(|c| c.rate)
            .sum()
    }

    /// Returns the sum of employer contribution rates that are subject
    /// to the social security ceiling.
    pub fn employer_capped_rate(&self) -> Decimal {
        self.employer_contributions
            .iter()
            .filter(|c| c.ceiling_applies)
            .map(|c| c.rate)
            .sum()
    }

    /// Returns the monthly hours for a named working hours method.
    ///
    /// Unknown method keys fall back to the configured default hours,
    /// so callers always get a usable figure.
    pub fn hours_for_method(&self, method: &str) -> Decimal {
        self.working_hours_methods
            .get(method)
            .map(|m| m.hours)
            .unwrap_or(self.defaults.hours_per_month)
    }

    /// Returns the exchange rate from the given currency into the local
    /// currency, or `None` if the currency has no configured rate.
    ///
    /// The local currency itself always returns a rate of one.
    pub fn exchange_rate_to_local(&self, currency: &str) -> Option<Decimal> {
        if currency == self.currency {
            Some(Decimal::ONE)
        } else {
            self.exchange_rates.get(currency).copied()
        }
    }

    /// Returns a summary of this country for listing endpoints.
    pub fn summary(&self) -> CountrySummary {
        CountrySummary {
            code: self.code.clone(),
            name: self.name.clone(),
            currency: self.currency.clone(),
        }
    }

    /// Validates the semantic constraints on this configuration.
    ///
    /// Called once at load time so that calculations can rely on the
    /// configuration being well-formed.
    pub fn validate(&self) -> EngineResult<()> {
        if self.code.trim().is_empty() {
            return Err(self.invalid("country code must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(self.invalid("country name must not be empty"));
        }
        if self.currency.trim().is_empty() {
            return Err(self.invalid("currency must not be empty"));
        }
        if self.social_security_ceiling_monthly < Decimal::ZERO {
            return Err(self.invalid("social security ceiling must not be negative"));
        }
        if self.minimum_wage_monthly < Decimal::ZERO {
            return Err(self.invalid("minimum wage must not be negative"));
        }
        for (currency, rate) in &self.exchange_rates {
            if *rate <= Decimal::ZERO {
                return Err(self.invalid(format!(
                    "exchange rate for '{}' must be positive",
                    currency
                )));
            }
        }
        self.validate_contributions("employee", &self.employee_contributions)?;
        self.validate_contributions("employer", &self.employer_contributions)?;
        if self.employee_rate_total() > Decimal::ONE {
            return Err(self.invalid("employee contribution rates must not sum above 1"));
        }
        if self.employer_rate_total() > Decimal::ONE {
            return Err(self.invalid("employer contribution rates must not sum above 1"));
        }
        if self.income_tax.rate < Decimal::ZERO || self.income_tax.rate > Decimal::ONE {
            return Err(self.invalid("income tax rate must be between 0 and 1"));
        }
        if self.defaults.hours_per_month <= Decimal::ZERO {
            return Err(self.invalid("default hours per month must be positive"));
        }
        if self.defaults.gross_salary < Decimal::ZERO {
            return Err(self.invalid("default gross salary must not be negative"));
        }
        if self.defaults.hourly_rate < Decimal::ZERO {
            return Err(self.invalid("default hourly rate must not be negative"));
        }
        for (key, method) in &self.working_hours_methods {
            if method.hours <= Decimal::ZERO {
                return Err(self.invalid(format!(
                    "working hours method '{}' must have positive hours",
                    key
                )));
            }
        }
        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> EngineError {
        EngineError::InvalidConfig {
            code: self.code.clone(),
            message: message.into(),
        }
    }

    fn validate_contributions(
        &self,
        side: &str,
        contributions: &[Contribution],
    ) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for contribution in contributions {
            if contribution.rate < Decimal::ZERO || contribution.rate > Decimal::ONE {
                return Err(self.invalid(format!(
                    "{} contribution '{}' rate must be between 0 and 1",
                    side, contribution.name
                )));
            }
            if !seen.insert(contribution.name.as_str()) {
                return Err(self.invalid(format!(
                    "duplicate {} contribution name '{}'",
                    side, contribution.name
                )));
            }
        }
        Ok(())
    }
}

/// A short summary of a configured country for listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    /// ISO-style country code.
    pub code: String,
    /// Human-readable country name.
    pub name: String,
    /// The local currency code.
    pub currency: String,
}
