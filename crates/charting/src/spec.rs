//! Chart specs handed to the external renderer.

use serde::Serialize;

use crate::scale::{autoscale, scale_series, AxisRange, STAC_DEFAULT_RANGE, WTSS_DEFAULT_RANGE};
use crate::series::{attribute_color, series_color, Dataset};

/// A fully resolved line chart: scaled datasets plus the computed y range.
/// The x axis is always a monthly time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub datasets: Vec<Dataset>,
    pub y_range: AxisRange,
}

impl ChartSpec {
    /// Multi-band chart for the STAC panel: one dataset per band, raw
    /// values scaled, colors per the band policy, y range autoscaled over
    /// all series.
    pub fn multi_band(
        title: impl Into<String>,
        timeline: &[String],
        bands: &[(String, Vec<Option<f64>>)],
    ) -> Self {
        let datasets: Vec<Dataset> = bands
            .iter()
            .enumerate()
            .map(|(index, (band, raw))| {
                Dataset::new(
                    band.clone(),
                    series_color(band, index),
                    timeline,
                    &scale_series(raw),
                )
            })
            .collect();

        let y_range = autoscale(
            datasets.iter().flat_map(|d| d.valid_values().collect::<Vec<_>>()),
            STAC_DEFAULT_RANGE,
        );

        Self {
            title: title.into(),
            datasets,
            y_range,
        }
    }

    /// Single-attribute chart for one WTSS panel.
    pub fn single_attribute(
        title: impl Into<String>,
        attribute: &str,
        timeline: &[String],
        raw_values: &[Option<f64>],
    ) -> Self {
        let dataset = Dataset::new(
            attribute,
            attribute_color(attribute),
            timeline,
            &scale_series(raw_values),
        );

        let y_range = autoscale(dataset.valid_values().collect::<Vec<_>>(), WTSS_DEFAULT_RANGE);

        Self {
            title: title.into(),
            datasets: vec![dataset],
            y_range,
        }
    }
}
