//! GET /api/timeseries - proxy to the remote time-series service.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use aetheris_common::{AetherisError, AetherisResult, GeoPoint};
use provider::wtss::TimeSeriesRequest;

use crate::policy::{resolve_bands, resolve_window, split_csv};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TimeseriesParams {
    lat: Option<f64>,
    lng: Option<f64>,
    coverage: Option<String>,
    /// Comma-separated band names; ignored entirely if any is undeclared.
    bands: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

/// GET /api/timeseries?lat&lng&coverage&bands?&start_date?&end_date?
///
/// The remote body is returned unmodified; the session layer parses it.
#[instrument(skip(state))]
pub async fn timeseries_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TimeseriesParams>,
) -> Response {
    metrics::counter!("timeseries_requests_total").increment(1);

    match lookup(&state, &params).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            metrics::counter!("timeseries_failures_total").increment(1);
            super::error_response(&err)
        }
    }
}

async fn lookup(state: &AppState, params: &TimeseriesParams) -> AetherisResult<serde_json::Value> {
    let lat = params
        .lat
        .ok_or_else(|| AetherisError::MissingParameter("lat".to_string()))?;
    let lng = params
        .lng
        .ok_or_else(|| AetherisError::MissingParameter("lng".to_string()))?;
    let point = GeoPoint::new(lat, lng)?;

    let coverage = params
        .coverage
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AetherisError::MissingParameter("coverage".to_string()))?;

    let product = state
        .products
        .get(coverage)
        .await?
        .ok_or_else(|| AetherisError::ProductNotFound(coverage.to_string()))?;

    let requested = split_csv(params.bands.as_deref());
    let attributes = resolve_bands(&product, &requested)?;
    if attributes != requested {
        debug!(coverage, requested = ?requested, resolved = ?attributes, "falling back to default bands");
    }

    let (start_date, end_date) =
        resolve_window(params.start_date.as_deref(), params.end_date.as_deref());

    state
        .wtss
        .time_series(&TimeSeriesRequest {
            coverage: coverage.to_string(),
            attributes,
            point,
            start_date,
            end_date,
        })
        .await
}
