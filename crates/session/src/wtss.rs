//! WTSS multi-series panel controller.
//!
//! Owns the session-wide coverage discovery cache and the growing gallery
//! of chart panels. Discovery runs at most once per session and is
//! single-flight: concurrent first clicks share one pass instead of each
//! fanning out over every coverage detail endpoint. Panels are independent
//! resources keyed by id; plotting appends, closing removes one, and the
//! compare overlay reads retained data without touching the network.

use std::sync::Arc;

use chrono::{Months, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use aetheris_common::tables::fallback_attributes;
use aetheris_common::{AetherisError, AetherisResult, GeoPoint};
use charting::{
    autoscale, bundle_charts, ChartRenderer, ChartSpec, RenderedChart, WTSS_DEFAULT_RANGE,
};

use crate::api::WtssApi;

/// A usable coverage discovered from the WTSS service: its name, the
/// bounds of its timeline and the attribute list offered in the attribute
/// selector.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDescriptor {
    pub coverage: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub attributes: Vec<String>,
}

impl CollectionDescriptor {
    /// The attribute pre-selected when this coverage is chosen: the first
    /// one containing "NDVI", else the first.
    pub fn default_attribute(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.contains("NDVI"))
            .or_else(|| self.attributes.first())
            .map(String::as_str)
    }
}

/// Content of one panel. A fetch that came back without data is an inline
/// entry in the gallery, not a global error.
#[derive(Debug, Clone)]
pub enum PanelBody {
    Chart {
        spec: ChartSpec,
        /// Set on first expand; panels render lazily.
        rendered: Option<RenderedChart>,
    },
    Failed {
        message: String,
    },
}

/// One appended chart panel.
#[derive(Debug, Clone)]
pub struct ChartPanel {
    pub id: Uuid,
    pub coverage: String,
    pub attribute: String,
    pub selected: bool,
    pub body: PanelBody,
}

impl ChartPanel {
    fn rendered_png(&self) -> Option<&[u8]> {
        match &self.body {
            PanelBody::Chart {
                rendered: Some(chart),
                ..
            } => Some(&chart.png),
            _ => None,
        }
    }
}

/// Result of a chart export.
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// ZIP bytes bundling every rendered chart.
    Archive(Vec<u8>),
    /// Nothing is rendered yet; tell the user, do nothing.
    NothingRendered,
}

/// Panels a compare overlay may cover.
const COMPARE_MIN: usize = 1;
const COMPARE_MAX: usize = 6;

pub struct WtssController<W: WtssApi> {
    api: Arc<W>,
    /// Discovery cache. The lock is held across the whole discovery pass
    /// so late joiners wait for the in-flight result instead of starting
    /// their own. Only a successful pass populates it; a failed click
    /// leaves it empty and the next click retries.
    discovery: Mutex<Option<Arc<Vec<CollectionDescriptor>>>>,
    panels: Vec<ChartPanel>,
}

impl<W: WtssApi> WtssController<W> {
    pub fn new(api: Arc<W>) -> Self {
        Self {
            api,
            discovery: Mutex::new(None),
            panels: Vec::new(),
        }
    }

    pub fn panels(&self) -> &[ChartPanel] {
        &self.panels
    }

    /// Usable coverages for the selector, discovering them on first use.
    ///
    /// A coverage whose detail omits attributes falls back to the static
    /// per-coverage table; coverages with neither are dropped. Zero usable
    /// coverages is an error for this click.
    pub async fn collections(&self) -> AetherisResult<Arc<Vec<CollectionDescriptor>>> {
        let mut cache = self.discovery.lock().await;
        if let Some(found) = cache.as_ref() {
            return Ok(Arc::clone(found));
        }

        let coverages = self.api.list_coverages().await?;
        let mut usable = Vec::new();
        for coverage in coverages {
            let (declared, start_date, end_date) = match self.api.describe_coverage(&coverage).await
            {
                Ok(detail) => (
                    detail.attribute_names(),
                    detail.first_date().map(str::to_string),
                    detail.last_date().map(str::to_string),
                ),
                Err(e) => {
                    warn!(coverage = %coverage, error = %e, "coverage detail failed");
                    (Vec::new(), None, None)
                }
            };

            let attributes = if declared.is_empty() {
                match fallback_attributes(&coverage) {
                    Some(fallback) => fallback.iter().map(|a| a.to_string()).collect(),
                    None => {
                        debug!(coverage = %coverage, "no attributes declared and no fallback, dropping");
                        continue;
                    }
                }
            } else {
                declared
            };

            usable.push(CollectionDescriptor {
                coverage,
                start_date,
                end_date,
                attributes,
            });
        }

        if usable.is_empty() {
            return Err(AetherisError::Empty(
                "no usable time-series coverages discovered".to_string(),
            ));
        }

        let usable = Arc::new(usable);
        *cache = Some(Arc::clone(&usable));
        Ok(usable)
    }

    /// Fetch one attribute's series over the default one-year window and
    /// append a panel. A fetch without data or a failed fetch still
    /// appends, as an inline failed entry; siblings are never touched.
    pub async fn plot(&mut self, point: GeoPoint, coverage: &str, attribute: &str) -> Uuid {
        let (start_date, end_date) = default_window();

        let body = match self
            .api
            .fetch_series(point, coverage, attribute, &start_date, &end_date)
            .await
        {
            Ok(Some(series)) => PanelBody::Chart {
                spec: ChartSpec::single_attribute(
                    format!("WTSS - {} ({})", coverage, attribute),
                    attribute,
                    &series.timeline,
                    &series.values,
                ),
                rendered: None,
            },
            Ok(None) => PanelBody::Failed {
                message: format!("Sem dados de {} para este ponto", attribute),
            },
            Err(e) => {
                warn!(coverage, attribute, error = %e, "time series fetch failed");
                PanelBody::Failed {
                    message: e.to_string(),
                }
            }
        };

        let panel = ChartPanel {
            id: Uuid::new_v4(),
            coverage: coverage.to_string(),
            attribute: attribute.to_string(),
            selected: false,
            body,
        };
        let id = panel.id;
        self.panels.push(panel);
        id
    }

    /// Accordion expand: render the chart on first expand only. Returns
    /// `Ok(false)` when the panel was closed before the deferred render
    /// ran; that is a silent no-op, not an error.
    pub fn expand(&mut self, id: Uuid, renderer: &dyn ChartRenderer) -> AetherisResult<bool> {
        let Some(panel) = self.panels.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "expand on a removed panel, ignoring");
            return Ok(false);
        };

        if let PanelBody::Chart { spec, rendered } = &mut panel.body {
            if rendered.is_none() {
                *rendered = Some(renderer.render(spec)?);
            }
        }

        Ok(true)
    }

    /// Toggle a panel's compare checkbox. Returns whether the panel exists.
    pub fn set_selected(&mut self, id: Uuid, selected: bool) -> bool {
        match self.panels.iter_mut().find(|p| p.id == id) {
            Some(panel) => {
                panel.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Overlay chart for the checked panels, built from their retained
    /// series regardless of accordion state. Outside 1..=6 checked this is
    /// a guard message and nothing else happens.
    pub fn compare_selected(&self) -> AetherisResult<ChartSpec> {
        let selected: Vec<&ChartPanel> = self.panels.iter().filter(|p| p.selected).collect();
        if selected.len() < COMPARE_MIN || selected.len() > COMPARE_MAX {
            return Err(AetherisError::GuardViolation(format!(
                "selecione entre {} e {} gráficos para comparar",
                COMPARE_MIN, COMPARE_MAX
            )));
        }

        let datasets: Vec<_> = selected
            .iter()
            .filter_map(|p| match &p.body {
                PanelBody::Chart { spec, .. } => Some(spec.datasets.clone()),
                PanelBody::Failed { .. } => None,
            })
            .flatten()
            .collect();

        let y_range = autoscale(
            datasets
                .iter()
                .flat_map(|d| d.valid_values().collect::<Vec<_>>()),
            WTSS_DEFAULT_RANGE,
        );

        Ok(ChartSpec {
            title: "Comparação de séries".to_string(),
            datasets,
            y_range,
        })
    }

    /// Close one panel, dropping its retained data. Siblings are intact.
    pub fn close(&mut self, id: Uuid) -> bool {
        let before = self.panels.len();
        self.panels.retain(|p| p.id != id);
        self.panels.len() != before
    }

    /// Remove every panel and its retained data.
    pub fn clear_all(&mut self) {
        self.panels.clear();
    }

    /// Bundle every currently rendered chart into a ZIP. With nothing
    /// rendered this is a user message, not an error.
    pub fn export(&self) -> AetherisResult<ExportOutcome> {
        let entries: Vec<(String, Vec<u8>)> = self
            .panels
            .iter()
            .filter_map(|p| p.rendered_png())
            .enumerate()
            .map(|(i, png)| (format!("grafico_wtss_{}.png", i + 1), png.to_vec()))
            .collect();

        if entries.is_empty() {
            return Ok(ExportOutcome::NothingRendered);
        }

        Ok(ExportOutcome::Archive(bundle_charts(&entries)?))
    }
}

/// `[today − 1 year, today]` as `YYYY-MM-DD`.
fn default_window() -> (String, String) {
    let today = Utc::now().date_naive();
    let start = today.checked_sub_months(Months::new(12)).unwrap_or(today);
    (
        start.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}
