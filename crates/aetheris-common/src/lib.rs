//! Common types and utilities shared across all aetheris services.

pub mod error;
pub mod point;
pub mod product;
pub mod tables;

pub use error::{AetherisError, AetherisResult};
pub use point::GeoPoint;
pub use product::{ProductRecord, Variable, DEFAULT_BAND_COUNT};
