//! Product metadata cache backed by PostgreSQL.

pub mod products;

pub use products::ProductStore;
