//! Domain entities. Pure data structures for the core business.
//!
//! No file or terminal types here; adapters map their raw shapes into these.

use crate::domain::time::{Instant, TimeOfDay};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The daily devotional windows in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerKind {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKind {
    pub const ALL: [PrayerKind; 6] = [
        PrayerKind::Fajr,
        PrayerKind::Sunrise,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ];

    /// Kinds that take part in "next prayer" resolution. Sunrise is display-only.
    pub const RESOLVABLE: [PrayerKind; 5] = [
        PrayerKind::Fajr,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ];

    pub fn has_iqama(self) -> bool {
        self != PrayerKind::Sunrise
    }

    pub fn name(self) -> &'static str {
        match self {
            PrayerKind::Fajr => "Fajr",
            PrayerKind::Sunrise => "Sunrise",
            PrayerKind::Dhuhr => "Dhuhr",
            PrayerKind::Asr => "Asr",
            PrayerKind::Maghrib => "Maghrib",
            PrayerKind::Isha => "Isha",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PrayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a day's timetable. `None` means no data for that day, never midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerEvent {
    pub kind: PrayerKind,
    pub adhan: Option<TimeOfDay>,
    pub iqama: Option<TimeOfDay>,
}

impl PrayerEvent {
    /// Build an event; an Iqama given for Sunrise is discarded.
    pub fn new(kind: PrayerKind, adhan: Option<TimeOfDay>, iqama: Option<TimeOfDay>) -> Self {
        Self {
            kind,
            adhan,
            iqama: iqama.filter(|_| kind.has_iqama()),
        }
    }

    pub fn missing(kind: PrayerKind) -> Self {
        Self::new(kind, None, None)
    }
}

/// A Friday congregational slot. Display-only: replaces Dhuhr's Iqama column on Fridays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JummahSlot {
    pub time: TimeOfDay,
    pub label: String,
}

/// One mosque's timetable for one calendar day. Always carries all six kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    date: NaiveDate,
    events: [PrayerEvent; 6],
}

impl DaySchedule {
    /// Missing kinds are filled with absent times. If a kind is given twice the later event wins.
    pub fn new(date: NaiveDate, events: impl IntoIterator<Item = PrayerEvent>) -> Self {
        let mut slots = PrayerKind::ALL.map(PrayerEvent::missing);
        for event in events {
            slots[event.kind.index()] = PrayerEvent::new(event.kind, event.adhan, event.iqama);
        }
        Self {
            date,
            events: slots,
        }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, std::iter::empty())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn events(&self) -> &[PrayerEvent] {
        &self.events
    }

    pub fn event(&self, kind: PrayerKind) -> &PrayerEvent {
        &self.events[kind.index()]
    }

    pub fn is_friday(&self) -> bool {
        self.date.weekday() == Weekday::Fri
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the Adhan; counting down to it.
    Upcoming,
    /// Between Adhan and Iqama; counting down to the Iqama.
    InWindow,
    /// Every window today has elapsed; the next event is tomorrow's Fajr.
    CarriedToNextDay,
}

/// Result of a single resolution call. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStatus {
    pub active_kind: PrayerKind,
    pub phase: Phase,
    /// Absent only when carried to the next day without a following-day schedule.
    pub target: Option<Instant>,
}

impl ResolvedStatus {
    pub fn remaining(&self, now: Instant) -> Option<TimeDelta> {
        self.target.map(|t| t.signed_duration_since(now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Event,
    Alert,
    Jummah,
    #[default]
    #[serde(other)]
    General,
}

impl NoticeCategory {
    pub fn label(self) -> &'static str {
        match self {
            NoticeCategory::General => "general",
            NoticeCategory::Event => "event",
            NoticeCategory::Alert => "alert",
            NoticeCategory::Jummah => "jummah",
        }
    }
}

/// An active notice as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub category: NoticeCategory,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
}

/// Countdown dwell.
pub const COUNTDOWN_DWELL: Duration = Duration::from_secs(60);
/// Notice dwell.
pub const NOTICE_DWELL: Duration = Duration::from_secs(10);

/// What the unattended display shows in its main area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    /// Render the current `ResolvedStatus`.
    Countdown,
    Notice(Notice),
}

impl Slide {
    pub fn dwell(&self) -> Duration {
        match self {
            Slide::Countdown => COUNTDOWN_DWELL,
            Slide::Notice(_) => NOTICE_DWELL,
        }
    }

    pub fn is_countdown(&self) -> bool {
        matches!(self, Slide::Countdown)
    }
}

/// One row of the rendered timetable sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    pub kind: PrayerKind,
    pub adhan: String,
    pub iqama: String,
    pub is_next: bool,
}

/// Everything a renderer needs for one repaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub mosque_name: String,
    pub now: Instant,
    pub status: ResolvedStatus,
    /// `H:MM:SS` or `Now`; absent when there is no target instant.
    pub countdown: Option<String>,
    /// Wall-clock rendering of the target, e.g. `6:15 AM`.
    pub target_clock: Option<String>,
    pub rows: Vec<TimetableRow>,
    /// Friday only: one `label  time` entry per Jummah slot.
    pub jummahs: Vec<String>,
    pub slide: Slide,
    pub slide_index: usize,
    pub slide_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    #[test]
    fn test_day_schedule_fills_missing_kinds() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let day = DaySchedule::new(
            date,
            [PrayerEvent::new(PrayerKind::Isha, Some(t(21, 0)), Some(t(21, 15)))],
        );
        assert_eq!(day.events().len(), 6);
        for (event, kind) in day.events().iter().zip(PrayerKind::ALL) {
            assert_eq!(event.kind, kind);
        }
        assert_eq!(day.event(PrayerKind::Fajr).adhan, None);
        assert_eq!(day.event(PrayerKind::Isha).iqama, Some(t(21, 15)));
        assert!(day.is_friday());
    }

    #[test]
    fn test_sunrise_never_has_iqama() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        let day = DaySchedule::new(
            date,
            [PrayerEvent {
                kind: PrayerKind::Sunrise,
                adhan: Some(t(7, 1)),
                iqama: Some(t(7, 20)),
            }],
        );
        assert_eq!(day.event(PrayerKind::Sunrise).iqama, None);
        assert!(!day.is_friday());
    }

    #[test]
    fn test_unknown_notice_category_is_general() {
        let json = r#"{"id":"n1","title":"T","body":"B","category":"bake-sale","createdAt":"2025-03-01T10:00:00Z"}"#;
        let notice: Notice = serde_json::from_str(json).unwrap();
        assert_eq!(notice.category, NoticeCategory::General);
        assert!(!notice.pinned);
    }
}
