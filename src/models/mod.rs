//! Core data models for the salary calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod breakdown;
mod input;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use breakdown::{ContributionBreakdown, ContributionLine, HourlyRates, SalaryBreakdown};
pub use input::{InputMode, SalaryInput};
