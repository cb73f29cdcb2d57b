//! HTTP API module for the salary calculation engine.
//!
//! This module provides the REST API endpoints for calculating net salary
//! breakdowns from country tax configurations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, CountriesResponse, DisplayAmount,
    DisplaySummary,
};
pub use state::AppState;
