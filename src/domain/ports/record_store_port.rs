//! Persistent record store port definition.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::errors::StoreError;

/// A value the record store can persist.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable identity used for upsert and delete.
    fn id(&self) -> Uuid;
}

/// Filter applied to each record during a fetch.
pub type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Ordering applied to fetch results.
pub type SortOrder<R> = Box<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Describes which records a fetch returns and in what order.
pub struct FetchDescriptor<R> {
    predicate: Option<Predicate<R>>,
    sort: Option<SortOrder<R>>,
    limit: Option<usize>,
}

impl<R> FetchDescriptor<R> {
    /// Matches every record, in insertion order.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            predicate: None,
            sort: None,
            limit: None,
        }
    }

    /// Keeps only records for which `predicate` holds.
    #[must_use]
    pub fn filter(mut self, predicate: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Sorts results with `compare`.
    #[must_use]
    pub fn sort_by(mut self, compare: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort = Some(Box::new(compare));
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies the descriptor to a set of records.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a R>) -> Vec<R>
    where
        R: Clone + 'a,
    {
        let mut out: Vec<R> = records
            .into_iter()
            .filter(|r| self.predicate.as_ref().is_none_or(|p| p(*r)))
            .cloned()
            .collect();

        if let Some(sort) = &self.sort {
            out.sort_by(|a, b| sort(a, b));
        }
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

impl<R> Default for FetchDescriptor<R> {
    fn default() -> Self {
        Self::all()
    }
}

impl<R> std::fmt::Debug for FetchDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchDescriptor")
            .field("has_predicate", &self.predicate.is_some())
            .field("has_sort", &self.sort.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}

/// Port for persisting domain records.
#[async_trait]
pub trait RecordStorePort<R: Record>: Send + Sync {
    /// Inserts a record, replacing any record with the same id.
    async fn insert(&self, record: R);

    /// Deletes the record with the same id. Returns whether one existed.
    async fn delete(&self, record: &R) -> bool;

    /// Flushes pending changes to durable storage.
    async fn save(&self) -> Result<(), StoreError>;

    /// Returns the records selected by `descriptor`.
    async fn fetch(&self, descriptor: FetchDescriptor<R>) -> Result<Vec<R>, StoreError>;
}
