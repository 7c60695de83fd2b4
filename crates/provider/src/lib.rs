//! HTTP clients for the remote data provider.
//!
//! Two opaque JSON APIs are consumed: a STAC-like catalog (metadata search
//! and collection listings) and a WTSS-like time-series service. Formats
//! are dictated by the provider; these clients parse only the fields the
//! dashboard needs and pass everything else through untouched.

pub mod stac;
pub mod wtss;

mod remote;

pub use stac::{CollectionDetail, StacClient};
pub use wtss::{AttributeSeries, CoverageDetail, TimeSeriesRequest, WtssClient};
