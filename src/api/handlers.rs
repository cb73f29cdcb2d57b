//! HTTP request handlers for the salary calculation engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_breakdown;
use crate::config::TaxConfig;
use crate::currency::{CurrencyConverter, format_amount};
use crate::error::EngineResult;
use crate::models::SalaryBreakdown;

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, CountriesResponse, DisplayAmount,
    DisplaySummary,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/countries", get(countries_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the calculated salary breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    // Resolve the country configuration
    let config = match state.config().country_or_default(request.country_code.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                country_code = ?request.country_code,
                "Country not found"
            );
            let api_error: ApiErrorResponse = err.into();
            return (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response();
        }
    };

    // Fill unspecified fields from the country defaults
    let input = request.to_input(config);
    let display_currency = request
        .display_currency
        .clone()
        .unwrap_or_else(|| config.currency.clone());

    // Perform the calculation
    let start_time = Instant::now();
    let result = calculate_breakdown(&input, config)
        .and_then(|result| {
            let display = build_display(&result.breakdown, config, &display_currency)?;
            Ok((result, display))
        });
    match result {
        Ok((result, display)) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                country_code = %config.code,
                gross_salary = %result.breakdown.gross_salary,
                net_salary = %result.breakdown.net_salary,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                country_code: config.code.clone(),
                currency: config.currency.clone(),
                breakdown: result.breakdown,
                display,
                audit_trace: result.audit,
                duration_us: duration.as_micros() as u64,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /countries endpoint.
///
/// Lists the configured countries and which one is the default.
async fn countries_handler(State(state): State<AppState>) -> impl IntoResponse {
    let loader = state.config();
    let response = CountriesResponse {
        countries: loader.countries(),
        default_code: loader.default_code().to_string(),
    };
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Builds the display summary by converting the headline figures from the
/// local currency into the display currency.
///
/// Each figure is converted exactly once, so a display currency equal to
/// the local currency reproduces the breakdown amounts unchanged.
fn build_display(
    breakdown: &SalaryBreakdown,
    config: &TaxConfig,
    display_currency: &str,
) -> EngineResult<DisplaySummary> {
    let converter = CurrencyConverter::new(config);
    let display_amount = |amount| -> EngineResult<DisplayAmount> {
        let converted = converter.convert(amount, &config.currency, display_currency)?;
        Ok(DisplayAmount {
            amount: converted,
            formatted: format_amount(converted, display_currency),
        })
    };
    Ok(DisplaySummary {
        currency: display_currency.to_string(),
        gross_salary: display_amount(breakdown.gross_salary)?,
        net_salary: display_amount(breakdown.net_salary)?,
        total_cost_to_company: display_amount(breakdown.total_cost_to_company)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/countries").expect("Failed to load config");
        AppState::new(config)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn post_calculate(body: &str) -> axum::response::Response {
        let state = create_test_state();
        let router = create_router(state);
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_body(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let response = post_calculate(r#"{"gross_salary": "2000"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);

        // Verify Content-Type header
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = read_body(response).await;
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.country_code, "BG");
        assert_eq!(result.currency, "BGN");
        assert_eq!(result.breakdown.net_salary, dec("1551.96"));
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let response = post_calculate("{invalid json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_body(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_empty_request_uses_defaults() {
        let response = post_calculate("{}").await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = read_body(response).await;
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        // The default input is a 2000 BGN monthly gross
        assert_eq!(result.breakdown.gross_salary, dec("2000"));
        assert_eq!(result.breakdown.net_salary, dec("1551.96"));
    }

    #[tokio::test]
    async fn test_api_004_unknown_country_returns_400() {
        let response = post_calculate(r#"{"country_code": "XX"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_body(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "COUNTRY_NOT_FOUND");
        assert!(error.message.contains("XX"));
    }

    #[tokio::test]
    async fn test_api_005_negative_gross_returns_400() {
        let response = post_calculate(r#"{"gross_salary": "-100"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_body(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("gross_salary"));
    }

    #[tokio::test]
    async fn test_api_006_unsupported_display_currency_returns_400() {
        let response =
            post_calculate(r#"{"gross_salary": "2000", "display_currency": "JPY"}"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_body(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(error.code, "UNSUPPORTED_CURRENCY");
    }

    #[tokio::test]
    async fn test_hourly_mode_with_eur_display() {
        let body = r#"{
            "input_mode": "hourly",
            "hourly_rate": "50",
            "hourly_rate_currency": "EUR",
            "hours_per_month": "160",
            "display_currency": "EUR"
        }"#;
        let response = post_calculate(body).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = read_body(response).await;
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        // 50 EUR/h * 1.95583 * 160 h = 15646.64 BGN
        assert_eq!(result.breakdown.gross_salary, dec("15646.64"));
        assert_eq!(result.breakdown.net_salary, dec("13569.7734"));
        // Converting the gross back into EUR reproduces the hourly input exactly
        assert_eq!(result.display.currency, "EUR");
        assert_eq!(result.display.gross_salary.amount, dec("8000"));
        assert_eq!(result.display.gross_salary.formatted, "8.000,00 €");
    }

    #[tokio::test]
    async fn test_display_defaults_to_local_currency() {
        let response = post_calculate(r#"{"gross_salary": "2000"}"#).await;
        let body = read_body(response).await;
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.display.currency, "BGN");
        assert_eq!(result.display.net_salary.amount, dec("1551.96"));
        assert_eq!(result.display.net_salary.formatted, "1 551,96 лв.");
    }

    #[tokio::test]
    async fn test_below_minimum_wage_warning_in_response() {
        let response = post_calculate(r#"{"gross_salary": "800"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = read_body(response).await;
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "BELOW_MINIMUM_WAGE");
    }

    #[tokio::test]
    async fn test_countries_endpoint_lists_default() {
        let state = create_test_state();
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/countries")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = read_body(response).await;
        let result: CountriesResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.default_code, "BG");
        assert!(result.countries.iter().any(|c| c.code == "BG"));
    }
}
