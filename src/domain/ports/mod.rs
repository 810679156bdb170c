mod image_cache_port;
mod image_fetcher_port;
mod record_store_port;

pub use image_cache_port::ImageCachePort;
#[cfg(test)]
pub use image_fetcher_port::MockImageFetcherPort;
pub use image_fetcher_port::ImageFetcherPort;
pub use record_store_port::{FetchDescriptor, Predicate, Record, RecordStorePort, SortOrder};

#[cfg(test)]
pub mod mocks {
    pub use super::image_fetcher_port::mock::{StubFetcher, StubReply, png_bytes};
}
