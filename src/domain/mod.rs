//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CityInfo, ClothingItem, ImageKey, ImageStatus, LoadToken};
pub use errors::{LoadError, StoreError};
pub use ports::{ImageCachePort, ImageFetcherPort, RecordStorePort};
