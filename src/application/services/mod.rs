//! Application services.

mod geo_catalog;
pub mod time_format;

pub use geo_catalog::GeoCatalog;
