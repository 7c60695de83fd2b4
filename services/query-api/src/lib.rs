//! Dashboard query API service library.
//!
//! This module exposes the internal modules for testing purposes.

pub mod handlers;
pub mod policy;
pub mod state;
