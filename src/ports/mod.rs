//! Port traits. API boundaries for the hexagon.
//!
//! Outbound only: the application calls into schedule storage, the notice
//! feed, the clock and the display. The binary drives the use cases directly.

pub mod outbound;

pub use outbound::{ClockPort, DisplayPort, NoticeSource, NoticeStream, ScheduleSource};
