//! STAC results panel controller.
//!
//! Drives the "click point → list products" flow as a small state machine
//! (`Idle → Loading → Populated | Empty | Error`) plus the per-product
//! chart sub-flow. Clicks are tagged with a generation so a slow response
//! from an earlier click can never overwrite a newer panel.

use std::sync::Arc;

use tracing::{debug, warn};

use aetheris_common::tables::friendly_name_for;
use aetheris_common::{AetherisResult, GeoPoint, ProductRecord};
use charting::ChartSpec;
use provider::wtss::AttributeSeries;

use crate::api::GeodataApi;
use crate::tags::TagFilter;

/// Panel states rendered by the STAC tab.
#[derive(Debug, Clone)]
pub enum StacPanelState {
    Idle,
    Loading {
        point: GeoPoint,
    },
    Populated {
        point: GeoPoint,
        products: Vec<ProductSummary>,
    },
    Empty {
        point: GeoPoint,
    },
    Error {
        message: String,
    },
}

/// One product block in the populated panel.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub record: ProductRecord,
    pub friendly_name: String,
    pub bands: Vec<String>,
    /// Bands pre-selected for the chart trigger: the first two declared.
    pub chart_bands: Vec<String>,
}

impl ProductSummary {
    fn from_record(record: ProductRecord) -> Self {
        let friendly_name = friendly_name_for(&record.product_name).to_string();
        let bands = record.declared_bands();
        let chart_bands = record.default_bands();
        Self {
            record,
            friendly_name,
            bands,
            chart_bands,
        }
    }
}

/// Outcome of the chart sub-flow. An empty timeline is a distinct,
/// non-alarming state, not an error.
#[derive(Debug, Clone)]
pub enum ChartOutcome {
    Chart(ChartSpec),
    EmptySeries { product: String },
    Error { message: String },
}

pub struct StacPanelController<A: GeodataApi> {
    api: Arc<A>,
    state: StacPanelState,
    generation: u64,
}

impl<A: GeodataApi> StacPanelController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: StacPanelState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &StacPanelState {
        &self.state
    }

    /// Start a new click: clears the open panel into `Loading` and returns
    /// the generation token the eventual result must carry.
    pub fn begin_click(&mut self, point: GeoPoint) -> u64 {
        self.generation += 1;
        self.state = StacPanelState::Loading { point };
        self.generation
    }

    /// Apply a lookup result. Results from a superseded click (older
    /// generation) are dropped; returns whether the state changed.
    pub fn apply_result(
        &mut self,
        generation: u64,
        point: GeoPoint,
        result: AetherisResult<Vec<ProductRecord>>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale geodata response");
            return false;
        }

        self.state = match result {
            Ok(products) if products.is_empty() => StacPanelState::Empty { point },
            Ok(products) => StacPanelState::Populated {
                point,
                products: products.into_iter().map(ProductSummary::from_record).collect(),
            },
            Err(e) => {
                warn!(error = %e, "geodata lookup failed");
                StacPanelState::Error {
                    message: e.to_string(),
                }
            }
        };

        true
    }

    /// The whole click flow: begin, fetch with the current tag filter,
    /// apply.
    pub async fn on_map_click(&mut self, point: GeoPoint, tags: &TagFilter) {
        let generation = self.begin_click(point);
        let result = self.api.geodata(point, &tags.platform_ids()).await;
        self.apply_result(generation, point, result);
    }

    /// Chart sub-flow for one product block: fetch its default bands and
    /// build the multi-band chart spec.
    pub async fn fetch_time_series_and_plot(
        &self,
        point: GeoPoint,
        product: &ProductSummary,
    ) -> ChartOutcome {
        match self
            .api
            .timeseries(point, &product.record.product_name, &product.chart_bands)
            .await
        {
            Ok(body) => build_chart(product, &body),
            Err(e) => ChartOutcome::Error {
                message: e.to_string(),
            },
        }
    }
}

fn build_chart(product: &ProductSummary, body: &serde_json::Value) -> ChartOutcome {
    let timeline: Vec<String> = body
        .get("result")
        .and_then(|r| r.get("timeline"))
        .and_then(|t| t.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|d| d.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if timeline.is_empty() {
        return ChartOutcome::EmptySeries {
            product: product.friendly_name.clone(),
        };
    }

    let bands: Vec<(String, Vec<Option<f64>>)> = product
        .chart_bands
        .iter()
        .filter_map(|band| {
            AttributeSeries::from_response(body, band).map(|series| (band.clone(), series.values))
        })
        .collect();

    if bands.is_empty() {
        return ChartOutcome::EmptySeries {
            product: product.friendly_name.clone(),
        };
    }

    ChartOutcome::Chart(ChartSpec::multi_band(
        product.friendly_name.clone(),
        &timeline,
        &bands,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use aetheris_common::{AetherisError, Variable};

    /// Scripted backend: records calls, returns canned responses.
    #[derive(Default)]
    struct MockApi {
        geodata_response: Mutex<Option<AetherisResult<Vec<ProductRecord>>>>,
        timeseries_response: Mutex<Option<AetherisResult<serde_json::Value>>>,
        geodata_calls: Mutex<Vec<Vec<String>>>,
        timeseries_calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl GeodataApi for MockApi {
        async fn geodata(
            &self,
            _point: GeoPoint,
            platform_ids: &[String],
        ) -> AetherisResult<Vec<ProductRecord>> {
            self.geodata_calls.lock().unwrap().push(platform_ids.to_vec());
            self.geodata_response
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(Vec::new()))
        }

        async fn timeseries(
            &self,
            _point: GeoPoint,
            coverage: &str,
            bands: &[String],
        ) -> AetherisResult<serde_json::Value> {
            self.timeseries_calls
                .lock()
                .unwrap()
                .push((coverage.to_string(), bands.to_vec()));
            self.timeseries_response
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(serde_json::json!({})))
        }
    }

    fn point() -> GeoPoint {
        GeoPoint::new(-14.2, -51.9).unwrap()
    }

    fn record(name: &str, bands: &[&str]) -> ProductRecord {
        ProductRecord {
            product_name: name.to_string(),
            friendly_name: name.to_string(),
            description: None,
            variables: bands.iter().map(|b| Variable::named(*b)).collect(),
            platform_id: None,
        }
    }

    #[tokio::test]
    async fn test_click_populates_panel() {
        let api = Arc::new(MockApi::default());
        *api.geodata_response.lock().unwrap() =
            Some(Ok(vec![record("S2-16D-2", &["B01", "B02", "NDVI"])]));

        let mut controller = StacPanelController::new(api.clone());
        let mut tags = TagFilter::new();
        tags.select("Sentinel-2");
        controller.on_map_click(point(), &tags).await;

        match controller.state() {
            StacPanelState::Populated { products, .. } => {
                assert_eq!(products.len(), 1);
                assert_eq!(products[0].friendly_name, "Sentinel-2 (Data Cube 16D)");
                assert_eq!(products[0].chart_bands, vec!["B01", "B02"]);
            }
            other => panic!("expected Populated, got {:?}", other),
        }

        // the tag filter was forwarded as platform ids
        assert_eq!(api.geodata_calls.lock().unwrap()[0], vec!["sentinel2"]);
    }

    #[tokio::test]
    async fn test_empty_result_is_distinct_state() {
        let api = Arc::new(MockApi::default());
        let mut controller = StacPanelController::new(api);
        controller.on_map_click(point(), &TagFilter::new()).await;
        assert!(matches!(controller.state(), StacPanelState::Empty { .. }));
    }

    #[tokio::test]
    async fn test_failure_renders_error_state() {
        let api = Arc::new(MockApi::default());
        *api.geodata_response.lock().unwrap() = Some(Err(AetherisError::Upstream {
            status: 502,
            message: "STAC search failed".to_string(),
            details: None,
        }));

        let mut controller = StacPanelController::new(api);
        controller.on_map_click(point(), &TagFilter::new()).await;
        match controller.state() {
            StacPanelState::Error { message } => assert!(message.contains("502")),
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let api = Arc::new(MockApi::default());
        let mut controller = StacPanelController::new(api);

        let first = controller.begin_click(point());
        let second = controller.begin_click(point());

        // the slow first response arrives after the newer click
        let applied = controller.apply_result(first, point(), Ok(vec![record("old", &["B1"])]));
        assert!(!applied);
        assert!(matches!(controller.state(), StacPanelState::Loading { .. }));

        let applied = controller.apply_result(second, point(), Ok(Vec::new()));
        assert!(applied);
        assert!(matches!(controller.state(), StacPanelState::Empty { .. }));
    }

    #[tokio::test]
    async fn test_chart_flow_requests_default_bands() {
        let api = Arc::new(MockApi::default());
        *api.timeseries_response.lock().unwrap() = Some(Ok(serde_json::json!({
            "result": {
                "timeline": ["2024-01-01", "2024-01-17"],
                "attributes": [
                    {"attribute": "B01", "values": [1000, 2000]},
                    {"attribute": "B02", "values": [3000, 4000]}
                ]
            }
        })));

        let controller = StacPanelController::new(api.clone());
        let summary = ProductSummary::from_record(record("S2-16D-2", &["B01", "B02", "B03"]));
        let outcome = controller.fetch_time_series_and_plot(point(), &summary).await;

        match outcome {
            ChartOutcome::Chart(spec) => {
                assert_eq!(spec.datasets.len(), 2);
                assert_eq!(spec.datasets[0].points[0].y, Some(0.1));
            }
            other => panic!("expected Chart, got {:?}", other),
        }

        let calls = api.timeseries_calls.lock().unwrap();
        assert_eq!(calls[0].1, vec!["B01", "B02"]);
    }

    #[tokio::test]
    async fn test_chart_flow_empty_timeline_is_not_error() {
        let api = Arc::new(MockApi::default());
        *api.timeseries_response.lock().unwrap() =
            Some(Ok(serde_json::json!({"result": {"timeline": [], "attributes": []}})));

        let controller = StacPanelController::new(api);
        let summary = ProductSummary::from_record(record("S2-16D-2", &["B01"]));
        let outcome = controller.fetch_time_series_and_plot(point(), &summary).await;
        assert!(matches!(outcome, ChartOutcome::EmptySeries { .. }));
    }

    #[tokio::test]
    async fn test_chart_flow_transport_error() {
        let api = Arc::new(MockApi::default());
        *api.timeseries_response.lock().unwrap() = Some(Err(AetherisError::UpstreamTransport(
            "connection refused".to_string(),
        )));

        let controller = StacPanelController::new(api);
        let summary = ProductSummary::from_record(record("S2-16D-2", &["B01"]));
        let outcome = controller.fetch_time_series_and_plot(point(), &summary).await;
        match outcome {
            ChartOutcome::Error { message } => assert!(message.contains("connection refused")),
            other => panic!("expected Error, got {:?}", other),
        }
    }
}
