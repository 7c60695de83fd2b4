//! Series color policy and dataset assembly.

use serde::Serialize;

/// Color for one band series in the multi-band STAC chart.
///
/// NDVI and EVI bands get fixed signature colors; everything else rotates
/// through hues keyed by the band's index.
pub fn series_color(band: &str, index: usize) -> String {
    let upper = band.to_uppercase();
    if upper.contains("NDVI") {
        "rgba(0, 128, 0, 1)".to_string()
    } else if upper.contains("EVI") {
        "rgba(0, 0, 255, 1)".to_string()
    } else {
        format!("hsl({}, 70%, 50%)", index * 60)
    }
}

/// Color for a single-attribute WTSS panel chart.
pub fn attribute_color(attribute: &str) -> String {
    if attribute.to_uppercase().contains("NDVI") {
        "green".to_string()
    } else {
        "blue".to_string()
    }
}

/// A single plotted point: date paired with a scaled value (null gaps
/// preserved so the chart breaks the line).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: String,
    pub y: Option<f64>,
}

/// One line series handed to the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub color: String,
    pub points: Vec<DataPoint>,
}

impl Dataset {
    /// Pair a timeline with already-scaled values. The series is truncated
    /// to the shorter of the two.
    pub fn new(label: impl Into<String>, color: String, timeline: &[String], scaled: &[Option<f64>]) -> Self {
        let points = timeline
            .iter()
            .zip(scaled.iter())
            .map(|(date, value)| DataPoint {
                x: date.clone(),
                y: *value,
            })
            .collect();

        Self {
            label: label.into(),
            color,
            points,
        }
    }

    /// Valid (non-null) y values of this series.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndvi_and_evi_signature_colors() {
        assert_eq!(series_color("NDVI", 3), "rgba(0, 128, 0, 1)");
        assert_eq!(series_color("ndvi_mean", 0), "rgba(0, 128, 0, 1)");
        assert_eq!(series_color("EVI", 1), "rgba(0, 0, 255, 1)");
    }

    #[test]
    fn test_hue_rotation_keyed_by_index() {
        assert_eq!(series_color("B04", 0), "hsl(0, 70%, 50%)");
        assert_eq!(series_color("B04", 2), "hsl(120, 70%, 50%)");
        // deterministic for the same index
        assert_eq!(series_color("B08", 2), series_color("swir16", 2));
    }

    #[test]
    fn test_attribute_color() {
        assert_eq!(attribute_color("NDVI"), "green");
        assert_eq!(attribute_color("LST_Day_1km"), "blue");
    }

    #[test]
    fn test_dataset_pairs_timeline_and_values() {
        let timeline = vec!["2024-01-01".to_string(), "2024-01-17".to_string()];
        let ds = Dataset::new("NDVI", "green".to_string(), &timeline, &[Some(0.4), None]);
        assert_eq!(ds.points.len(), 2);
        assert_eq!(ds.points[0].x, "2024-01-01");
        assert_eq!(ds.points[1].y, None);
        assert_eq!(ds.valid_values().collect::<Vec<_>>(), vec![0.4]);
    }

    #[test]
    fn test_dataset_truncates_to_shorter_side() {
        let timeline = vec!["2024-01-01".to_string()];
        let ds = Dataset::new("NDVI", "green".to_string(), &timeline, &[Some(0.4), Some(0.5)]);
        assert_eq!(ds.points.len(), 1);
    }
}
