//! Chart construction model shared by the STAC and WTSS panels.
//!
//! The actual drawing is done by an external charting library; this crate
//! owns everything the dashboard decides itself: the raw-value scale, the
//! series color policy, y-axis autoscaling, the spec handed to the
//! renderer, and the ZIP bundling used by chart export.

pub mod archive;
pub mod render;
pub mod scale;
pub mod series;
pub mod spec;

pub use archive::bundle_charts;
pub use render::{ChartRenderer, RenderedChart};
pub use scale::{apply_scale, autoscale, AxisRange, STAC_DEFAULT_RANGE, WTSS_DEFAULT_RANGE};
pub use series::{attribute_color, series_color, DataPoint, Dataset};
pub use spec::ChartSpec;
