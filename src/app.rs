//! Composition root: builds the long-lived services from configuration.

use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::runtime::Handle;
use tracing::info;

use crate::application::GeoCatalog;
use crate::domain::entities::ClothingItem;
use crate::infrastructure::{
    AppConfig, CompletionQueue, ImageLoader, JsonRecordStore, StorageManager, completion_channel,
    init_logging,
};

/// Shared services handed to the presentation layer.
#[derive(Debug)]
pub struct App {
    /// Effective configuration.
    pub config: AppConfig,
    /// The single process-wide image loader.
    pub images: Arc<ImageLoader>,
    /// Queue the UI loop drains to run image completions.
    pub completions: CompletionQueue,
    /// Destination and time-zone catalog.
    pub catalog: GeoCatalog,
    /// Persisted clothing items.
    pub wardrobe: Arc<JsonRecordStore<ClothingItem>>,
}

impl App {
    /// Loads `config.toml` (or `config_path`), installs logging and builds
    /// every service.
    ///
    /// # Errors
    /// Returns error if the config cannot be read, the log file cannot be
    /// opened or [`Self::bootstrap`] fails.
    pub async fn start(config_path: Option<&Path>) -> Result<Self> {
        let storage = StorageManager::new().wrap_err("Failed to locate config directory")?;
        let config = storage
            .load_config(config_path)
            .wrap_err("Failed to load configuration")?;

        init_logging(&config)?;
        Self::bootstrap(config).await
    }

    /// Builds every service. Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the record file
    /// cannot be opened.
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        let (dispatcher, completions) = completion_channel();

        let images = ImageLoader::with_http(config.images.clone(), dispatcher, Handle::current())
            .wrap_err("Failed to create image loader")?;

        let catalog = GeoCatalog::new(&config.time.home_time_zone, config.time.time_format.clone());

        let store_path = config
            .effective_store_path()
            .ok_or_else(|| eyre!("Could not determine a record file location"))?;
        let wardrobe = JsonRecordStore::<ClothingItem>::open(&store_path)
            .await
            .wrap_err_with(|| format!("Failed to open records at {}", store_path.display()))?;

        info!(version = crate::VERSION, "Services ready");

        Ok(Self {
            config,
            images: Arc::new(images),
            completions,
            catalog,
            wardrobe: Arc::new(wardrobe),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FetchDescriptor, RecordStorePort};
    use crate::infrastructure::config::StoreConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_bootstrap_wires_services() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig {
            store: StoreConfig {
                path: Some(dir.path().join("wardrobe.json")),
            },
            ..AppConfig::default()
        };
        config.images.cache_capacity = 7;
        config.time.home_time_zone = "Asia/Tokyo".to_string();

        let mut app = App::bootstrap(config).await.unwrap();

        assert_eq!(app.images.config().cache_capacity, 7);
        assert_eq!(app.catalog.home_zone(), chrono_tz::Tz::Asia__Tokyo);

        app.wardrobe
            .insert(ClothingItem::new("Trench").with_image_url("ftp://nope/t.png"))
            .await;
        app.wardrobe.save().await.unwrap();
        let items = app.wardrobe.fetch(FetchDescriptor::all()).await.unwrap();
        assert_eq!(items.len(), 1);

        let token = app.images.load(items[0].image_url.as_deref(), |image| {
            assert!(image.is_none());
        });
        assert!(token.is_none());
        assert!(app.completions.run_next().await);
    }

    #[tokio::test]
    async fn test_start_reads_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let mut config = AppConfig {
            log_path: Some(dir.path().join("wardrobe.log")),
            store: StoreConfig {
                path: Some(dir.path().join("wardrobe.json")),
            },
            ..AppConfig::default()
        };
        config.images.cache_capacity = 3;
        config.images.request_timeout_secs = 0;
        std::fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let app = App::start(Some(&config_path)).await.unwrap();

        assert_eq!(app.config, config);
        assert_eq!(app.images.config().request_timeout(), None);
        assert!(dir.path().join("wardrobe.log").exists());
    }

    #[tokio::test]
    async fn test_bootstrap_reports_corrupt_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wardrobe.json");
        std::fs::write(&path, "[").unwrap();
        let config = AppConfig {
            store: StoreConfig { path: Some(path) },
            ..AppConfig::default()
        };

        let err = App::bootstrap(config).await.unwrap_err();
        assert!(format!("{err:?}").contains("Failed to open records"));
    }
}
