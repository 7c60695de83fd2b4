//! STAC catalog client: point-intersection search and collection listings.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use aetheris_common::{AetherisError, AetherisResult, GeoPoint, Variable};

use crate::remote::{response_json, transport_error};

/// Default catalog base URL (INPE Brazil Data Cube).
pub const DEFAULT_STAC_BASE: &str = "https://data.inpe.br/bdc/stac/v1";

/// Client for the remote STAC-like catalog API.
#[derive(Clone)]
pub struct StacClient {
    client: Client,
    base_url: String,
}

impl StacClient {
    pub fn new(base_url: impl Into<String>) -> AetherisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AetherisError::InternalError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Search for features intersecting a point and return the distinct
    /// collection ids, in first-seen order.
    pub async fn search_collections_at(&self, point: GeoPoint) -> AetherisResult<Vec<String>> {
        let url = format!("{}/search", self.base_url);
        let body = json!({
            "intersects": {
                "type": "Point",
                "coordinates": point.geojson_coordinates(),
            }
        });

        debug!(%point, "STAC point search");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, "STAC search"))?;

        let data = response_json(response, "STAC search").await?;

        let collections = distinct_collection_ids(&data);

        debug!(count = collections.len(), "collections available at point");

        Ok(collections)
    }

    /// List all collection ids known to the catalog.
    pub async fn list_collections(&self) -> AetherisResult<Vec<String>> {
        let url = format!("{}/collections", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, "STAC collections"))?;

        let data = response_json(response, "STAC collections").await?;

        let ids = data
            .get("collections")
            .and_then(|c| c.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|c| c.get("id").and_then(|id| id.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ids)
    }

    /// Fetch the detail document for one collection.
    pub async fn collection_detail(&self, id: &str) -> AetherisResult<CollectionDetail> {
        let url = format!("{}/collections/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, "STAC collection detail"))?;

        let data = response_json(response, "STAC collection detail").await?;

        serde_json::from_value(data).map_err(|e| {
            warn!(collection = id, error = %e, "malformed collection detail");
            AetherisError::UpstreamTransport(format!("collection detail parse: {}", e))
        })
    }
}

/// Detail document for a single STAC collection.
///
/// Band declarations live either in `properties["eo:bands"]` or in
/// `cube:dimensions.bands.values`, depending on the product family.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDetail {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Option<serde_json::Value>,
    #[serde(default, rename = "cube:dimensions")]
    pub cube_dimensions: Option<serde_json::Value>,
}

impl CollectionDetail {
    /// Display title falling back to the collection id.
    pub fn title_or_id(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or(&self.id)
    }

    /// Extract declared bands: `eo:bands` first, then the band dimension
    /// of the data cube, else empty.
    pub fn variables(&self) -> Vec<Variable> {
        if let Some(bands) = self
            .properties
            .as_ref()
            .and_then(|p| p.get("eo:bands"))
            .and_then(|b| b.as_array())
        {
            if !bands.is_empty() {
                return bands.iter().filter_map(parse_band_entry).collect();
            }
        }

        self.cube_dimensions
            .as_ref()
            .and_then(|d| d.get("bands"))
            .and_then(|b| b.get("values"))
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(parse_band_entry).collect())
            .unwrap_or_default()
    }
}

/// Distinct collection ids from a search response, in first-seen order.
fn distinct_collection_ids(search_response: &serde_json::Value) -> Vec<String> {
    let features = search_response
        .get("features")
        .and_then(|f| f.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut collections: Vec<String> = Vec::new();
    for feature in features {
        if let Some(id) = feature.get("collection").and_then(|c| c.as_str()) {
            if !collections.iter().any(|c| c == id) {
                collections.push(id.to_string());
            }
        }
    }
    collections
}

fn parse_band_entry(entry: &serde_json::Value) -> Option<Variable> {
    if let Some(name) = entry.as_str() {
        return Some(Variable::named(name));
    }

    let name = entry.get("name").and_then(|n| n.as_str()).map(str::to_string);
    let id = entry.get("id").and_then(|i| i.as_str()).map(str::to_string);

    if name.is_none() && id.is_none() {
        None
    } else {
        Some(Variable { name, id })
    }
}
