//! Configuration loading and management for the salary calculation engine.
//!
//! This module provides functionality to load country tax configurations
//! from YAML files, including contribution rates, the social security
//! ceiling, income tax settings, and calculation defaults.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/countries").unwrap();
//! let bulgaria = loader.country("BG").unwrap();
//! println!("Loaded configuration for: {}", bulgaria.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculationDefaults, ConfigMetadata, Contribution, CountrySummary, IncomeTax, TaxConfig,
    TaxKind, WorkingHoursMethod,
};
