//! WTSS time-series client: coverage listing, coverage detail and
//! per-point time-series extraction.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use aetheris_common::{AetherisError, AetherisResult, GeoPoint};

use crate::remote::{response_json, transport_error};

/// Default WTSS base URL (INPE Brazil Data Cube).
pub const DEFAULT_WTSS_BASE: &str = "https://data.inpe.br/bdc/wtss/v4";

/// Client for the remote WTSS-like time-series API.
#[derive(Clone)]
pub struct WtssClient {
    client: Client,
    base_url: String,
}

/// Parameters of one time-series request.
#[derive(Debug, Clone)]
pub struct TimeSeriesRequest {
    pub coverage: String,
    pub attributes: Vec<String>,
    pub point: GeoPoint,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
}

impl WtssClient {
    pub fn new(base_url: impl Into<String>) -> AetherisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AetherisError::InternalError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// List all coverage names exposed by the service.
    pub async fn list_coverages(&self) -> AetherisResult<Vec<String>> {
        let url = format!("{}/list_coverages", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, "WTSS list_coverages"))?;

        let data = response_json(response, "WTSS list_coverages").await?;

        let coverages = data
            .get("coverages")
            .and_then(|c| c.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|c| c.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(coverages)
    }

    /// Fetch the detail document (timeline + attributes) for one coverage.
    pub async fn describe_coverage(&self, coverage: &str) -> AetherisResult<CoverageDetail> {
        let url = format!("{}/{}", self.base_url, coverage);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, "WTSS coverage detail"))?;

        let data = response_json(response, "WTSS coverage detail").await?;

        serde_json::from_value(data).map_err(|e| {
            AetherisError::UpstreamTransport(format!("coverage detail parse: {}", e))
        })
    }

    /// Fetch a time series and return the remote body unmodified.
    ///
    /// The backend proxies this verbatim; the session layer parses it with
    /// [`AttributeSeries::from_response`].
    pub async fn time_series(&self, req: &TimeSeriesRequest) -> AetherisResult<serde_json::Value> {
        let url = format!("{}/time_series", self.base_url);

        debug!(
            coverage = %req.coverage,
            attributes = %req.attributes.join(","),
            start = %req.start_date,
            end = %req.end_date,
            "WTSS time series request"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("coverage", req.coverage.as_str()),
                ("attributes", &req.attributes.join(",")),
                ("latitude", &req.point.lat.to_string()),
                ("longitude", &req.point.lng.to_string()),
                ("start_date", &req.start_date),
                ("end_date", &req.end_date),
            ])
            .send()
            .await
            .map_err(|e| transport_error(e, "WTSS time_series"))?;

        response_json(response, "WTSS time_series").await
    }
}

/// Detail document for one coverage.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageDetail {
    #[serde(default)]
    pub attributes: Vec<CoverageAttribute>,
    #[serde(default)]
    pub timeline: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageAttribute {
    pub attribute: String,
}

impl CoverageDetail {
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.attribute.clone()).collect()
    }

    pub fn first_date(&self) -> Option<&str> {
        self.timeline.first().map(String::as_str)
    }

    pub fn last_date(&self) -> Option<&str> {
        self.timeline.last().map(String::as_str)
    }
}

/// One attribute's series extracted from a time-series response body.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSeries {
    pub attribute: String,
    pub timeline: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl AttributeSeries {
    /// Pull a single attribute's series out of a raw WTSS response.
    ///
    /// Returns `None` when the attribute is absent or has no values; the
    /// caller decides whether that is an empty-data state or an error.
    pub fn from_response(body: &serde_json::Value, attribute: &str) -> Option<Self> {
        let result = body.get("result")?;
        let timeline: Vec<String> = result
            .get("timeline")
            .and_then(|t| t.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|d| d.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let attr = result
            .get("attributes")
            .and_then(|a| a.as_array())?
            .iter()
            .find(|a| a.get("attribute").and_then(|n| n.as_str()) == Some(attribute))?;

        let values: Vec<Option<f64>> = attr
            .get("values")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().map(|v| v.as_f64()).collect())
            .unwrap_or_default();

        if values.is_empty() {
            return None;
        }

        Some(Self {
            attribute: attribute.to_string(),
            timeline,
            values,
        })
    }
}
