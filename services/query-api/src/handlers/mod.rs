//! HTTP handlers for the dashboard query API.

pub mod geodata;
pub mod metrics;
pub mod timeseries;

pub use geodata::geodata_handler;
pub use metrics::{health_handler, metrics_handler, ready_handler};
pub use timeseries::timeseries_handler;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

use aetheris_common::AetherisError;

/// JSON error body: `{error}` plus the remote `details` when an upstream
/// call failed. The status mirrors [`AetherisError::http_status_code`], so
/// remote failures pass their status through.
pub fn error_response(err: &AetherisError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut body = json!({ "error": err.to_string() });
    if let AetherisError::Upstream {
        details: Some(details),
        ..
    } = err
    {
        body["details"] = details.clone();
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_passthrough() {
        let err = AetherisError::Upstream {
            status: 503,
            message: "WTSS time_series failed".to_string(),
            details: Some(json!({"code": "SERVICE_UNAVAILABLE"})),
        };
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_response_invalid_argument() {
        let err = AetherisError::invalid("lat", "latitude must be a finite number");
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
