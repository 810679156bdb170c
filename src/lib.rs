//! Wardrobe core - services behind a wardrobe catalog app.
//!
//! Provides a cancellable remote image loader with a bounded cache, a static
//! destination/time-zone catalog and a persistent record store, arranged in
//! domain, application, infrastructure and presentation layers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing catalog and formatting services.
pub mod application;
/// Composition root.
pub mod app;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing view-side state holders.
pub mod presentation;

pub use app::App;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "wardrobe";
