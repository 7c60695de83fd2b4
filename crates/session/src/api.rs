//! Client seams for the backend API and the WTSS service.
//!
//! Controllers depend on these traits; the reqwest-backed implementations
//! below are what a running session wires in, and tests substitute mocks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use aetheris_common::{AetherisError, AetherisResult, GeoPoint, ProductRecord};
use provider::wtss::{AttributeSeries, CoverageDetail, TimeSeriesRequest, WtssClient};

/// Read access to the dashboard backend (`/api/geodata`, `/api/timeseries`).
#[async_trait]
pub trait GeodataApi: Send + Sync {
    /// Point lookup: candidate products at a location, optionally filtered
    /// by platform ids.
    async fn geodata(
        &self,
        point: GeoPoint,
        platform_ids: &[String],
    ) -> AetherisResult<Vec<ProductRecord>>;

    /// Time-series lookup through the backend proxy. Returns the remote
    /// body as-is.
    async fn timeseries(
        &self,
        point: GeoPoint,
        coverage: &str,
        bands: &[String],
    ) -> AetherisResult<serde_json::Value>;
}

/// Direct access to the WTSS service used by the multi-series panel.
#[async_trait]
pub trait WtssApi: Send + Sync {
    async fn list_coverages(&self) -> AetherisResult<Vec<String>>;

    async fn describe_coverage(&self, coverage: &str) -> AetherisResult<CoverageDetail>;

    /// Fetch one attribute's series for a point and window. `None` means
    /// the service answered but had no data for the attribute.
    async fn fetch_series(
        &self,
        point: GeoPoint,
        coverage: &str,
        attribute: &str,
        start_date: &str,
        end_date: &str,
    ) -> AetherisResult<Option<AttributeSeries>>;
}

#[async_trait]
impl WtssApi for WtssClient {
    async fn list_coverages(&self) -> AetherisResult<Vec<String>> {
        WtssClient::list_coverages(self).await
    }

    async fn describe_coverage(&self, coverage: &str) -> AetherisResult<CoverageDetail> {
        WtssClient::describe_coverage(self, coverage).await
    }

    async fn fetch_series(
        &self,
        point: GeoPoint,
        coverage: &str,
        attribute: &str,
        start_date: &str,
        end_date: &str,
    ) -> AetherisResult<Option<AttributeSeries>> {
        let body = self
            .time_series(&TimeSeriesRequest {
                coverage: coverage.to_string(),
                attributes: vec![attribute.to_string()],
                point,
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            })
            .await?;

        Ok(AttributeSeries::from_response(&body, attribute))
    }
}

/// reqwest-backed client for the dashboard backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> AetherisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AetherisError::InternalError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: String, context: &str) -> AetherisResult<serde_json::Value> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AetherisError::UpstreamTransport(format!("{}: {}", context, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let details = serde_json::from_str::<serde_json::Value>(&body).ok();
            let message = details
                .as_ref()
                .and_then(|d| d.get("error"))
                .and_then(|e| e.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} failed", context));
            return Err(AetherisError::Upstream {
                status: status.as_u16(),
                message,
                details,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AetherisError::UpstreamTransport(format!("{}: {}", context, e)))
    }
}

#[async_trait]
impl GeodataApi for BackendClient {
    async fn geodata(
        &self,
        point: GeoPoint,
        platform_ids: &[String],
    ) -> AetherisResult<Vec<ProductRecord>> {
        let url = format!(
            "{}/api/geodata?lat={}&lng={}&satelites={}",
            self.base_url,
            point.lat,
            point.lng,
            platform_ids.join(",")
        );

        let body = self.get_json(url, "geodata lookup").await?;
        serde_json::from_value(body)
            .map_err(|e| AetherisError::UpstreamTransport(format!("geodata parse: {}", e)))
    }

    async fn timeseries(
        &self,
        point: GeoPoint,
        coverage: &str,
        bands: &[String],
    ) -> AetherisResult<serde_json::Value> {
        let mut url = format!(
            "{}/api/timeseries?lat={}&lng={}&coverage={}",
            self.base_url, point.lat, point.lng, coverage
        );
        if !bands.is_empty() {
            url.push_str(&format!("&bands={}", bands.join(",")));
        }

        self.get_json(url, "timeseries lookup").await
    }
}
