//! JSON file adapter for the record store port.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::errors::StoreError;
use crate::domain::ports::{FetchDescriptor, Record, RecordStorePort};

const FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct RecordFile<R> {
    #[allow(dead_code)]
    version: u32,
    records: Vec<R>,
}

#[derive(Serialize)]
struct RecordFileRef<'a, R> {
    version: u32,
    records: &'a [R],
}

struct StoreState<R> {
    records: Vec<R>,
    dirty: bool,
}

/// Keeps records in memory and flushes them to a JSON file on `save`.
pub struct JsonRecordStore<R> {
    path: PathBuf,
    state: RwLock<StoreState<R>>,
}

impl<R: Record> JsonRecordStore<R> {
    /// Opens the store at `path`. A missing or empty file is an empty store.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or does not hold valid records.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let records = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => {
                serde_json::from_str::<RecordFile<R>>(&content)
                    .map_err(|e| StoreError::Corrupt {
                        path: path.clone(),
                        message: e.to_string(),
                    })?
                    .records
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), count = records.len(), "Opened record store");

        Ok(Self {
            path,
            state: RwLock::new(StoreState {
                records,
                dirty: false,
            }),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records held.
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Returns true if no records are held.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }

    /// Returns true if there are changes not yet saved.
    pub async fn has_changes(&self) -> bool {
        self.state.read().await.dirty
    }
}

impl<R> std::fmt::Debug for JsonRecordStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRecordStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R: Record> RecordStorePort<R> for JsonRecordStore<R> {
    async fn insert(&self, record: R) {
        let mut state = self.state.write().await;
        let id = record.id();
        if let Some(existing) = state.records.iter_mut().find(|r| r.id() == id) {
            *existing = record;
            debug!(id = %id, "Replaced record");
        } else {
            state.records.push(record);
            debug!(id = %id, "Inserted record");
        }
        state.dirty = true;
    }

    async fn delete(&self, record: &R) -> bool {
        let mut state = self.state.write().await;
        let id = record.id();
        let before = state.records.len();
        state.records.retain(|r| r.id() != id);
        let removed = state.records.len() != before;
        if removed {
            state.dirty = true;
            debug!(id = %id, "Deleted record");
        }
        removed
    }

    async fn save(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.dirty {
            return Ok(());
        }

        let content = serde_json::to_vec_pretty(&RecordFileRef {
            version: FORMAT_VERSION,
            records: &state.records,
        })?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &content))
            .await
            .map_err(|e| StoreError::task(format!("Save task panicked: {e}")))??;

        state.dirty = false;
        info!(path = %self.path.display(), count = state.records.len(), "Saved records");
        Ok(())
    }

    async fn fetch(&self, descriptor: FetchDescriptor<R>) -> Result<Vec<R>, StoreError> {
        let state = self.state.read().await;
        Ok(descriptor.apply(&state.records))
    }
}

fn write_atomically(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
