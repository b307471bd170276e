//! Application use cases. Orchestrate domain logic via ports.

pub mod announcement_feed;
pub mod display_session;
pub mod timetable_view;

pub use announcement_feed::{AnnouncementFeedAdapter, FeedSubscription, UnsubscribeHandle};
pub use display_session::{DisplaySession, SessionIntervals};
pub use timetable_view::{jummah_lines, timetable_rows};
