//! GET /api/geodata - products available at a clicked point.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use aetheris_common::{AetherisError, AetherisResult, GeoPoint, ProductRecord};

use crate::policy::split_csv;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeodataParams {
    lat: Option<f64>,
    lng: Option<f64>,
    /// Comma-separated platform ids mapped from the selected satellite tags.
    satelites: Option<String>,
}

/// GET /api/geodata?lat&lng&satelites=
#[instrument(skip(state))]
pub async fn geodata_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<GeodataParams>,
) -> Response {
    metrics::counter!("geodata_requests_total").increment(1);

    match lookup(&state, &params).await {
        Ok(products) => Json(products).into_response(),
        Err(err) => {
            metrics::counter!("geodata_failures_total").increment(1);
            super::error_response(&err)
        }
    }
}

async fn lookup(state: &AppState, params: &GeodataParams) -> AetherisResult<Vec<ProductRecord>> {
    let lat = params
        .lat
        .ok_or_else(|| AetherisError::MissingParameter("lat".to_string()))?;
    let lng = params
        .lng
        .ok_or_else(|| AetherisError::MissingParameter("lng".to_string()))?;
    let point = GeoPoint::new(lat, lng)?;

    let platform_ids = split_csv(params.satelites.as_deref());

    let collections = state.stac.search_collections_at(point).await?;
    if collections.is_empty() {
        return Ok(Vec::new());
    }

    state.products.find_available(&collections, &platform_ids).await
}
