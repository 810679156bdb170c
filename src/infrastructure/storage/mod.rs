//! Record storage adapters.

mod json_record_store;

pub use json_record_store::JsonRecordStore;
