//! Clothing item record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::Record;

/// A cataloged piece of clothing with an optional remote photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingItem {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Remote photo location, resolved through the image loader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// When the item was added to the wardrobe.
    pub added_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Creates a new item with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image_url: None,
            added_at: Utc::now(),
        }
    }

    /// Sets the remote photo URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub const fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }
}

impl Record for ClothingItem {
    fn id(&self) -> Uuid {
        self.id
    }
}
