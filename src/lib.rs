//! Salary Calculation Engine for Bulgarian Payroll
//!
//! This crate provides functionality for calculating net salary from gross salary
//! under the Bulgarian tax and social security rules, driven by YAML country
//! configurations and producing a full audit trace for every calculation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod currency;
pub mod error;
pub mod models;
