//! Value scaling and y-axis autoscale policy.

use serde::Serialize;

/// Fixed linear scale applied to raw provider values before plotting.
pub const VALUE_SCALE: f64 = 0.0001;

/// Floor for the autoscale padding, avoiding degenerate ranges when all
/// values are equal.
const MIN_PAD: f64 = 0.1;

/// Default y range for the STAC multi-band chart when no values exist.
pub const STAC_DEFAULT_RANGE: AxisRange = AxisRange { min: -2.0, max: 1.5 };

/// Default y range for WTSS panel charts when no values exist.
pub const WTSS_DEFAULT_RANGE: AxisRange = AxisRange { min: -2.5, max: 2.5 };

pub fn apply_scale(raw: f64) -> f64 {
    raw * VALUE_SCALE
}

/// Scale a raw series, carrying nulls through.
pub fn scale_series(raw: &[Option<f64>]) -> Vec<Option<f64>> {
    raw.iter().map(|v| v.map(apply_scale)).collect()
}

/// A y-axis range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Compute the y range for a set of plotted (post-scale) values.
///
/// The min/max are padded by 10% of the span, with a floor of 0.1. With no
/// valid values the given default range is used.
pub fn autoscale<I>(values: I, default: AxisRange) -> AxisRange
where
    I: IntoIterator<Item = f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;

    for v in values {
        if v.is_finite() {
            seen = true;
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !seen {
        return default;
    }

    let pad = ((max - min) * 0.1).max(MIN_PAD);
    AxisRange {
        min: min - pad,
        max: max + pad,
    }
}
