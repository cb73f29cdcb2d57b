//! Currency conversion against a country's configured exchange rates.
//!
//! All configured rates are quoted against the local currency, so a
//! conversion between two foreign currencies passes through the local
//! one.

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::error::{EngineError, EngineResult};

/// Converts amounts between the currencies a country configuration knows.
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::currency::CurrencyConverter;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/countries")?;
/// let converter = CurrencyConverter::new(loader.country("BG")?);
///
/// let eur = converter.convert(Decimal::from_str("1955.83").unwrap(), "BGN", "EUR")?;
/// assert_eq!(eur, Decimal::from_str("1000").unwrap());
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter<'a> {
    config: &'a TaxConfig,
}

impl<'a> CurrencyConverter<'a> {
    /// Creates a converter over the given country configuration.
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    /// Converts an amount from one currency to another.
    ///
    /// Conversions into a foreign currency divide by its configured
    /// rate; conversions from a foreign currency multiply. Converting a
    /// currency to itself returns the amount unchanged.
    ///
    /// # Returns
    ///
    /// Returns the converted amount, or `UnsupportedCurrency` when
    /// either currency has no configured rate.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> EngineResult<Decimal> {
        if from == to {
            return Ok(amount);
        }

        let in_local = match self.config.exchange_rate_to_local(from) {
            Some(rate) => amount * rate,
            None => return Err(self.unsupported(from, to)),
        };

        if to == self.config.currency {
            return Ok(in_local);
        }

        match self.config.exchange_rate_to_local(to) {
            Some(rate) => Ok(in_local / rate),
            None => Err(self.unsupported(from, to)),
        }
    }

    /// Returns the rate `f` such that `amount_from * f = amount_to`.
    pub fn exchange_rate(&self, from: &str, to: &str) -> EngineResult<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        let from_rate = self
            .config
            .exchange_rate_to_local(from)
            .ok_or_else(|| self.unsupported(from, to))?;
        let to_rate = self
            .config
            .exchange_rate_to_local(to)
            .ok_or_else(|| self.unsupported(from, to))?;

        Ok(from_rate / to_rate)
    }

    /// Returns all currencies this converter supports, the local
    /// currency first and the foreign ones sorted by code.
    pub fn supported_currencies(&self) -> Vec<String> {
        let mut foreign: Vec<String> = self
            .config
            .exchange_rates
            .keys()
            .filter(|code| code.as_str() != self.config.currency)
            .cloned()
            .collect();
        foreign.sort();

        let mut currencies = Vec::with_capacity(foreign.len() + 1);
        currencies.push(self.config.currency.clone());
        currencies.extend(foreign);
        currencies
    }

    fn unsupported(&self, from: &str, to: &str) -> EngineError {
        EngineError::UnsupportedCurrency {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalculationDefaults, ConfigMetadata, IncomeTax, TaxKind};
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_config() -> TaxConfig {
        TaxConfig {
            code: "BG".to_string(),
            name: "Bulgaria".to_string(),
            is_default: true,
            currency: "BGN".to_string(),
            exchange_rates: HashMap::from([
                ("EUR".to_string(), dec("1.95583")),
                ("USD".to_string(), dec("1.80")),
            ]),
            social_security_ceiling_monthly: dec("4130"),
            employee_contributions: vec![],
            employer_contributions: vec![],
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
            working_hours_methods: HashMap::new(),
            metadata: ConfigMetadata {
                year: 2025,
                notes: vec![],
            },
        }
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert_eq!(
            converter.convert(dec("123.45"), "BGN", "BGN").unwrap(),
            dec("123.45")
        );
        assert_eq!(
            converter.convert(dec("123.45"), "EUR", "EUR").unwrap(),
            dec("123.45")
        );
    }

    #[test]
    fn test_convert_foreign_to_local_multiplies() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert_eq!(
            converter.convert(dec("100"), "EUR", "BGN").unwrap(),
            dec("195.583")
        );
    }

    #[test]
    fn test_convert_local_to_foreign_divides() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert_eq!(
            converter.convert(dec("1955.83"), "BGN", "EUR").unwrap(),
            dec("1000")
        );
    }

    #[test]
    fn test_convert_cross_currency_passes_through_local() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        // 100 EUR -> 195.583 BGN -> / 1.80
        let result = converter.convert(dec("100"), "EUR", "USD").unwrap();
        assert_eq!(result.round_dp(6), dec("108.657222"));
    }

    #[test]
    fn test_convert_unknown_source_currency_returns_error() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        match converter.convert(dec("100"), "JPY", "BGN") {
            Err(EngineError::UnsupportedCurrency { from, to }) => {
                assert_eq!(from, "JPY");
                assert_eq!(to, "BGN");
            }
            _ => panic!("Expected UnsupportedCurrency error"),
        }
    }

    #[test]
    fn test_convert_unknown_target_currency_returns_error() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert!(converter.convert(dec("100"), "BGN", "JPY").is_err());
    }

    #[test]
    fn test_exchange_rate_from_foreign_equals_configured_rate() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert_eq!(converter.exchange_rate("EUR", "BGN").unwrap(), dec("1.95583"));
    }

    #[test]
    fn test_exchange_rate_to_foreign_is_reciprocal() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        let rate = converter.exchange_rate("BGN", "EUR").unwrap();
        assert_eq!((rate * dec("1.95583")).round_dp(10), Decimal::ONE);
    }

    #[test]
    fn test_exchange_rate_same_currency_is_one() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert_eq!(converter.exchange_rate("BGN", "BGN").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_supported_currencies_local_first_then_sorted() {
        let config = create_test_config();
        let converter = CurrencyConverter::new(&config);

        assert_eq!(
            converter.supported_currencies(),
            vec!["BGN".to_string(), "EUR".to_string(), "USD".to_string()]
        );
    }
}
