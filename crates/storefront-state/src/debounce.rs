//! Search-term debouncing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Quiet period before a search term is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Emits a value only once no newer value arrived within the quiet period.
///
/// Each call to [`Debouncer::settle`] supersedes the calls before it; only the
/// last one resolves to `Some`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the quiet period. `None` when a newer value arrived meanwhile.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) == mine {
            Some(value)
        } else {
            debug!("debounced value superseded");
            None
        }
    }

    /// Drop any pending value.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
