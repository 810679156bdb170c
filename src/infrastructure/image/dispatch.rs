//! Completion delivery onto the UI context.
//!
//! Loads finish on runtime worker threads; their callbacks are posted here
//! and only run when the UI loop drains the [`CompletionQueue`].

use tokio::sync::mpsc;
use tracing::warn;

/// A deferred completion callback.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Creates a connected dispatcher/queue pair.
#[must_use]
pub fn completion_channel() -> (CompletionDispatcher, CompletionQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CompletionDispatcher { tx }, CompletionQueue { rx })
}

/// Posts completions to the UI context. Cheap to clone.
#[derive(Clone)]
pub struct CompletionDispatcher {
    tx: mpsc::UnboundedSender<Completion>,
}

impl CompletionDispatcher {
    /// Schedules `f` to run on the UI context.
    ///
    /// If the queue has been dropped the completion is discarded: there is
    /// no UI left to deliver to.
    pub fn dispatch(&self, f: impl FnOnce() + Send + 'static) {
        if self.tx.send(Box::new(f)).is_err() {
            warn!("Completion queue closed, dropping completion");
        }
    }
}

impl std::fmt::Debug for CompletionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionDispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Receiving end, owned by the UI loop.
#[derive(Debug)]
pub struct CompletionQueue {
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl CompletionQueue {
    /// Runs every completion that is ready without waiting.
    /// Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(completion) = self.rx.try_recv() {
            completion();
            ran += 1;
        }
        ran
    }

    /// Waits for the next completion and runs it.
    /// Returns false once every dispatcher has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(completion) => {
                completion();
                true
            }
            None => false,
        }
    }

    /// Number of completions waiting to run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns true if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_dispatch_is_deferred_until_drained() {
        let (dispatcher, mut queue) = completion_channel();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = counter.clone();
            dispatcher.dispatch(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.run_pending(), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_completions_run_in_dispatch_order() {
        let (dispatcher, mut queue) = completion_channel();
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for i in 0..5 {
            let log = log.clone();
            dispatcher.dispatch(move || log.lock().push(i));
        }
        queue.run_pending();

        assert_eq!(*log.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_run_next_reports_closed_queue() {
        let (dispatcher, mut queue) = completion_channel();
        drop(dispatcher);
        assert!(!tokio_test::block_on(queue.run_next()));
    }

    #[test]
    fn test_dispatch_after_queue_dropped_is_harmless() {
        let (dispatcher, queue) = completion_channel();
        drop(queue);
        dispatcher.dispatch(|| panic!("must not run"));
    }
}
