//! Application layer with services built on the domain.

/// Catalog and formatting services.
pub mod services;

pub use services::GeoCatalog;
