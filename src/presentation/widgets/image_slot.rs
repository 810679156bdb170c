//! Image state for a reusable image-bearing view.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::domain::entities::{ImageStatus, LoadToken};
use crate::infrastructure::image::{ImageLoader, SharedImage};

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    url: Option<String>,
    status: ImageStatus,
    image: Option<SharedImage>,
}

/// Tracks what one view is showing and cancels stale loads when the view is
/// reused. Completions for content the slot no longer shows are dropped.
pub struct ImageSlot {
    loader: Arc<ImageLoader>,
    state: Arc<Mutex<SlotState>>,
    token: Option<LoadToken>,
}

impl ImageSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new(loader: Arc<ImageLoader>) -> Self {
        Self {
            loader,
            state: Arc::new(Mutex::new(SlotState::default())),
            token: None,
        }
    }

    /// Points the slot at `url`, cancelling whatever it was loading before.
    pub fn show(&mut self, url: Option<&str>) {
        {
            let state = self.state.lock();
            let same_url = state.url.as_deref() == url;
            if same_url && (state.status.is_ready() || state.status.is_loading()) {
                return;
            }
        }

        self.loader.cancel(self.token.take());

        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.url = url.map(str::to_string);
            state.status = ImageStatus::Loading;
            state.image = None;
            state.generation
        };

        let state = self.state.clone();
        self.token = self.loader.load(url, move |image| {
            let mut state = state.lock();
            if state.generation != generation {
                trace!(generation, current = state.generation, "Dropping stale image");
                return;
            }
            state.status = if image.is_some() {
                ImageStatus::Ready
            } else {
                ImageStatus::Placeholder
            };
            state.image = image;
        });
    }

    /// Cancels any pending load and clears the slot.
    pub fn prepare_for_reuse(&mut self) {
        self.loader.cancel(self.token.take());
        let mut state = self.state.lock();
        state.generation += 1;
        state.url = None;
        state.status = ImageStatus::NotStarted;
        state.image = None;
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ImageStatus {
        self.state.lock().status
    }

    /// The decoded image, once ready.
    #[must_use]
    pub fn image(&self) -> Option<SharedImage> {
        self.state.lock().image.clone()
    }

    /// URL the slot currently shows.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.state.lock().url.clone()
    }
}

impl Drop for ImageSlot {
    fn drop(&mut self) {
        self.loader.cancel(self.token.take());
    }
}

impl std::fmt::Debug for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ImageSlot")
            .field("url", &state.url)
            .field("status", &state.status)
            .field("has_image", &state.image.is_some())
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{StubFetcher, StubReply};
    use crate::infrastructure::image::{CompletionQueue, ImageLoaderConfig, completion_channel};
    use std::time::Duration;
    use tokio::runtime::Handle;

    const SLOW: &str = "https://img.example.com/slow.png";
    const FAST: &str = "https://img.example.com/fast.png";

    fn setup(stub: StubFetcher) -> (Arc<ImageLoader>, Arc<StubFetcher>, CompletionQueue) {
        let stub = Arc::new(stub);
        let (dispatcher, queue) = completion_channel();
        let loader = ImageLoader::new(
            ImageLoaderConfig::default(),
            stub.clone(),
            dispatcher,
            Handle::current(),
        );
        (Arc::new(loader), stub, queue)
    }

    async fn drain(queue: &mut CompletionQueue, count: usize) {
        for _ in 0..count {
            let ran = tokio::time::timeout(Duration::from_secs(5), queue.run_next())
                .await
                .expect("completion timed out");
            assert!(ran);
        }
    }

    #[tokio::test]
    async fn test_show_loads_image() {
        let (loader, _, mut queue) = setup(StubFetcher::new().reply(
            FAST,
            StubReply::Image {
                width: 8,
                height: 6,
            },
        ));
        let mut slot = ImageSlot::new(loader);

        slot.show(Some(FAST));
        assert_eq!(slot.status(), ImageStatus::Loading);

        drain(&mut queue, 1).await;
        assert_eq!(slot.status(), ImageStatus::Ready);
        assert_eq!(slot.image().map(|i| i.width()), Some(8));
    }

    #[tokio::test]
    async fn test_reused_slot_never_shows_previous_image() {
        let (loader, stub, mut queue) = setup(
            StubFetcher::gated()
                .reply(
                    SLOW,
                    StubReply::Image {
                        width: 1,
                        height: 1,
                    },
                )
                .reply(
                    FAST,
                    StubReply::Image {
                        width: 2,
                        height: 2,
                    },
                ),
        );
        let mut slot = ImageSlot::new(loader.clone());

        slot.show(Some(SLOW));
        slot.show(Some(FAST));
        assert_eq!(loader.pending_count(), 1);
        stub.open_gate();

        drain(&mut queue, 2).await;
        assert_eq!(slot.status(), ImageStatus::Ready);
        assert_eq!(slot.image().map(|i| i.width()), Some(2));
        assert_eq!(slot.url().as_deref(), Some(FAST));
    }

    #[tokio::test]
    async fn test_failed_load_shows_placeholder() {
        let (loader, _, mut queue) = setup(StubFetcher::new());
        let mut slot = ImageSlot::new(loader);

        slot.show(Some("ftp://img.example.com/a.png"));
        drain(&mut queue, 1).await;
        assert!(slot.status().is_placeholder());

        slot.show(Some("https://img.example.com/missing.png"));
        drain(&mut queue, 1).await;
        assert!(slot.status().is_placeholder());
        assert!(slot.image().is_none());
    }

    #[tokio::test]
    async fn test_prepare_for_reuse_cancels_and_resets() {
        let (loader, _, mut queue) = setup(StubFetcher::new().reply(SLOW, StubReply::Hang));
        let mut slot = ImageSlot::new(loader.clone());

        slot.show(Some(SLOW));
        assert_eq!(loader.pending_count(), 1);

        slot.prepare_for_reuse();
        assert_eq!(loader.pending_count(), 0);

        drain(&mut queue, 1).await;
        assert_eq!(slot.status(), ImageStatus::NotStarted);
        assert!(slot.url().is_none());
    }

    #[tokio::test]
    async fn test_dropping_slot_cancels_its_load() {
        let (loader, _, mut queue) = setup(StubFetcher::new().reply(SLOW, StubReply::Hang));
        let mut slot = ImageSlot::new(loader.clone());

        slot.show(Some(SLOW));
        drop(slot);

        assert_eq!(loader.pending_count(), 0);
        drain(&mut queue, 1).await;
    }

    #[tokio::test]
    async fn test_showing_same_url_twice_does_not_reload() {
        let (loader, stub, mut queue) = setup(StubFetcher::new().reply(
            FAST,
            StubReply::Image {
                width: 3,
                height: 3,
            },
        ));
        let mut slot = ImageSlot::new(loader);

        slot.show(Some(FAST));
        slot.show(Some(FAST));
        drain(&mut queue, 1).await;
        slot.show(Some(FAST));

        assert_eq!(stub.calls(), 1);
        assert!(queue.is_empty());
    }
}
