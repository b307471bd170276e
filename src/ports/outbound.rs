//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DaySchedule, DisplayFrame, DomainError, Instant, JummahSlot, Notice};
use chrono::NaiveDate;
use tokio::sync::mpsc;

/// Receiving end of a notice subscription. Every message is the complete
/// current notice set, never a delta. Dropping it ends the subscription.
pub type NoticeStream = mpsc::UnboundedReceiver<Vec<Notice>>;

/// Supplier of already-computed daily timetables for one mosque.
#[async_trait::async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Schedule for `date`. `Ok(None)` when the timetable has no row for that day.
    async fn day_schedule(&self, date: NaiveDate) -> Result<Option<DaySchedule>, DomainError>;

    /// Friday congregational slots. Empty when the mosque has none configured.
    async fn jummah_slots(&self) -> Result<Vec<JummahSlot>, DomainError>;
}

/// Push subscription to the mosque's active notices.
#[async_trait::async_trait]
pub trait NoticeSource: Send + Sync {
    /// Open a subscription. Implementations send the current set right away and
    /// again on every change, and stop once the stream is dropped.
    async fn open(&self) -> Result<NoticeStream, DomainError>;
}

/// Local wall-clock time. The only place the application reads "now" from.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> Instant;
}

/// Unattended display surface (terminal, kiosk browser bridge, ...).
#[async_trait::async_trait]
pub trait DisplayPort: Send + Sync {
    /// Repaint with the given frame.
    async fn render(&self, frame: &DisplayFrame) -> Result<(), DomainError>;
}
