//! Renderer seam.
//!
//! Chart drawing itself belongs to an external library; the session layer
//! only needs something that can turn a [`ChartSpec`] into a rasterized
//! image it can retain and later export.

use bytes::Bytes;

use aetheris_common::AetherisResult;

use crate::spec::ChartSpec;

/// A rasterized chart retained by a panel.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    /// PNG-encoded image bytes.
    pub png: Bytes,
}

impl RenderedChart {
    pub fn new(png: impl Into<Bytes>) -> Self {
        Self { png: png.into() }
    }
}

/// Renders chart specs into images.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, spec: &ChartSpec) -> AetherisResult<RenderedChart>;
}
