//! Schedule persistence adapters. Implement `ScheduleSource`.

pub mod timetable_json;

pub use timetable_json::{JsonTimetable, Timetable, parse_timetable};
