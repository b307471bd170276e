//! Feed use case: forward full notice snapshots from a `NoticeSource` to the display.
//!
//! Snapshots are whole-state, so a delayed or skipped delivery needs no
//! reconciliation: the next one replaces everything. Last delivered wins.

use crate::domain::{DomainError, Notice};
use crate::ports::{NoticeSource, NoticeStream};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Pinned notices first, then newest first. Ties keep upstream order.
pub fn notice_order(a: &Notice, b: &Notice) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

pub struct AnnouncementFeedAdapter {
    source: Arc<dyn NoticeSource>,
}

impl AnnouncementFeedAdapter {
    pub fn new(source: Arc<dyn NoticeSource>) -> Self {
        Self { source }
    }

    /// Open a pull-style subscription. Used by the display loop so that a
    /// snapshot is applied within the same loop turn that receives it.
    pub async fn subscription(&self) -> Result<FeedSubscription, DomainError> {
        let rx = self.source.open().await?;
        info!("subscribed to notice feed");
        Ok(FeedSubscription { rx })
    }

    /// Callback-style subscription: `on_snapshot` runs for every ordered
    /// snapshot until the returned handle is dropped or unsubscribed.
    pub async fn subscribe<F>(&self, mut on_snapshot: F) -> Result<UnsubscribeHandle, DomainError>
    where
        F: FnMut(Vec<Notice>) + Send + 'static,
    {
        let mut subscription = self.subscription().await?;
        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.next_snapshot().await {
                on_snapshot(snapshot);
            }
            debug!("notice feed closed by upstream");
        });
        Ok(UnsubscribeHandle { task })
    }
}

/// An open feed subscription. Dropping it releases the upstream stream.
pub struct FeedSubscription {
    rx: NoticeStream,
}

impl FeedSubscription {
    /// Next snapshot in display order, or `None` once the upstream has closed.
    pub async fn next_snapshot(&mut self) -> Option<Vec<Notice>> {
        let mut notices = self.rx.recv().await?;
        notices.sort_by(notice_order);
        debug!(count = notices.len(), "notice snapshot received");
        Some(notices)
    }
}

/// Stops callback delivery when dropped.
pub struct UnsubscribeHandle {
    task: JoinHandle<()>,
}

impl UnsubscribeHandle {
    pub fn unsubscribe(self) {
        self.task.abort();
    }

    /// True once delivery has stopped (upstream closed or unsubscribed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for UnsubscribeHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
