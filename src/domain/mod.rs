//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod countdown;
pub mod entities;
pub mod errors;
pub mod resolver;
pub mod rotation;
pub mod time;

pub use countdown::{NOW_MARKER, format_clock, format_remaining};
pub use entities::{
    COUNTDOWN_DWELL, DaySchedule, DisplayFrame, JummahSlot, NOTICE_DWELL, Notice, NoticeCategory,
    Phase, PrayerEvent, PrayerKind, ResolvedStatus, Slide, TimetableRow,
};
pub use errors::DomainError;
pub use resolver::{resolve, tomorrow_fajr_adhan};
pub use rotation::{RotationState, SlideRotationEngine};
pub use time::{Instant, TimeFormat, TimeOfDay, combine, signed_duration};
