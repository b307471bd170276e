//! In-memory notice feed. Publishers push whole snapshots; every open stream
//! receives each one in order.
//!
//! Used by tests and by embedders that already hold the notice set in memory.

use crate::domain::{DomainError, Notice};
use crate::ports::{NoticeSource, NoticeStream};
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

#[derive(Default)]
struct FeedState {
    current: Vec<Notice>,
    subscribers: Vec<mpsc::UnboundedSender<Vec<Notice>>>,
}

#[derive(Default)]
pub struct MemoryNoticeFeed {
    state: Mutex<FeedState>,
}

impl MemoryNoticeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current notice set and deliver it to every open stream.
    /// Streams whose receiver has been dropped are forgotten.
    pub async fn publish(&self, notices: Vec<Notice>) {
        let mut state = self.state.lock().await;
        state
            .subscribers
            .retain(|tx| tx.send(notices.clone()).is_ok());
        debug!(
            count = notices.len(),
            subscribers = state.subscribers.len(),
            "published notice snapshot"
        );
        state.current = notices;
    }

    pub async fn subscriber_count(&self) -> usize {
        self.state.lock().await.subscribers.len()
    }
}

#[async_trait::async_trait]
impl NoticeSource for MemoryNoticeFeed {
    async fn open(&self) -> Result<NoticeStream, DomainError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock().await;
        tx.send(state.current.clone())
            .map_err(|e| DomainError::Feed(e.to_string()))?;
        state.subscribers.push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_sends_current_snapshot() {
        let feed = MemoryNoticeFeed::new();
        let mut rx = feed.open().await.unwrap();
        assert_eq!(rx.recv().await, Some(Vec::new()));
        assert_eq!(feed.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_dropped_stream_is_forgotten() {
        let feed = MemoryNoticeFeed::new();
        let rx = feed.open().await.unwrap();
        drop(rx);
        feed.publish(Vec::new()).await;
        assert_eq!(feed.subscriber_count().await, 0);
    }
}
