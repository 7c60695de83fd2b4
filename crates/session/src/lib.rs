//! Session-scoped dashboard orchestration.
//!
//! Everything the browser session owns lives here as explicit controller
//! objects: the tag filter and point selection, the STAC results panel
//! state machine, and the WTSS multi-series chart gallery. The map widget,
//! the chart drawing library and the HTTP endpoints stay behind traits so
//! the controllers can be driven and tested without a browser.

pub mod api;
pub mod selection;
pub mod stac_panel;
pub mod tags;
pub mod wtss;

pub use api::{BackendClient, GeodataApi, WtssApi};
pub use selection::{LayerHandle, MapSurface, SelectionController};
pub use stac_panel::{ChartOutcome, ProductSummary, StacPanelController, StacPanelState};
pub use tags::TagFilter;
pub use wtss::{ChartPanel, CollectionDescriptor, ExportOutcome, PanelBody, WtssController};
