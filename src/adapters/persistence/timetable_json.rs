//! Implements ScheduleSource using a JSON timetable file.
//!
//! Same shape as the portal's per-month timetable document: a `days` array
//! with one row per date (`fajr`, `fajrIqama`, ... as time strings) and the
//! mosque's `jummahs`. Time strings are parsed with the configured
//! `TimeFormat`; blank cells are absent times. The file is re-read on every
//! call so edits are picked up by the next schedule refresh.

use crate::domain::{
    DaySchedule, DomainError, JummahSlot, PrayerEvent, PrayerKind, TimeFormat, TimeOfDay,
};
use crate::ports::ScheduleSource;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
struct RawTimetable {
    #[serde(default)]
    days: Vec<RawDay>,
    #[serde(default)]
    jummahs: Vec<RawJummah>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDay {
    date: NaiveDate,
    #[serde(default)]
    fajr: Option<String>,
    #[serde(default)]
    fajr_iqama: Option<String>,
    #[serde(default)]
    sunrise: Option<String>,
    #[serde(default)]
    dhuhr: Option<String>,
    #[serde(default)]
    dhuhr_iqama: Option<String>,
    #[serde(default)]
    asr: Option<String>,
    #[serde(default)]
    asr_iqama: Option<String>,
    #[serde(default)]
    maghrib: Option<String>,
    #[serde(default)]
    maghrib_iqama: Option<String>,
    #[serde(default)]
    isha: Option<String>,
    #[serde(default)]
    isha_iqama: Option<String>,
}

impl RawDay {
    fn cells(&self, kind: PrayerKind) -> (Option<&str>, Option<&str>) {
        let (adhan, iqama) = match kind {
            PrayerKind::Fajr => (&self.fajr, Some(&self.fajr_iqama)),
            PrayerKind::Sunrise => (&self.sunrise, None),
            PrayerKind::Dhuhr => (&self.dhuhr, Some(&self.dhuhr_iqama)),
            PrayerKind::Asr => (&self.asr, Some(&self.asr_iqama)),
            PrayerKind::Maghrib => (&self.maghrib, Some(&self.maghrib_iqama)),
            PrayerKind::Isha => (&self.isha, Some(&self.isha_iqama)),
        };
        (adhan.as_deref(), iqama.and_then(|i| i.as_deref()))
    }
}

/// The portal stores the slot's note (usually the khutbah language) as `language`.
#[derive(Debug, Deserialize)]
struct RawJummah {
    time: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl RawJummah {
    fn label(&self, position: usize) -> String {
        [&self.label, &self.language]
            .into_iter()
            .flatten()
            .find(|l| !l.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Jummah {}", position + 1))
    }
}

/// A cell that cannot be parsed in the configured format is logged and treated
/// as missing data; it is never reinterpreted in the other convention.
fn parse_cell(
    format: TimeFormat,
    date: NaiveDate,
    field: &str,
    cell: Option<&str>,
) -> Option<TimeOfDay> {
    let value = cell.map(str::trim).filter(|v| !v.is_empty() && *v != "-" && *v != "--:--")?;
    match format.parse(value) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(%date, field, error = %e, "unparseable timetable cell treated as missing");
            None
        }
    }
}

fn day_to_schedule(format: TimeFormat, raw: &RawDay) -> DaySchedule {
    let events = PrayerKind::ALL.map(|kind| {
        let (adhan, iqama) = raw.cells(kind);
        let key = kind.name();
        PrayerEvent::new(
            kind,
            parse_cell(format, raw.date, key, adhan),
            parse_cell(format, raw.date, key, iqama),
        )
    });
    DaySchedule::new(raw.date, events)
}

/// Parsed timetable file.
#[derive(Debug, Default)]
pub struct Timetable {
    pub days: Vec<DaySchedule>,
    pub jummahs: Vec<JummahSlot>,
}

impl Timetable {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date() == date)
    }
}

/// Parse a timetable document.
pub fn parse_timetable(json: &str, format: TimeFormat) -> Result<Timetable, DomainError> {
    let raw: RawTimetable = serde_json::from_str(json)
        .map_err(|e| DomainError::Schedule(format!("parse timetable: {}", e)))?;
    let days = raw.days.iter().map(|d| day_to_schedule(format, d)).collect();
    let jummahs = raw
        .jummahs
        .iter()
        .enumerate()
        .filter_map(|(i, j)| match format.parse(&j.time) {
            Ok(time) => Some(JummahSlot {
                time,
                label: j.label(i),
            }),
            Err(e) => {
                warn!(error = %e, "unparseable jummah slot skipped");
                None
            }
        })
        .collect();
    Ok(Timetable { days, jummahs })
}

pub struct JsonTimetable {
    path: PathBuf,
    format: TimeFormat,
}

impl JsonTimetable {
    pub fn new(path: impl AsRef<Path>, format: TimeFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    async fn load(&self) -> Result<Timetable, DomainError> {
        let s = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Schedule(format!("read {}: {}", self.path.display(), e))
        })?;
        let timetable = parse_timetable(&s, self.format)?;
        debug!(
            path = %self.path.display(),
            days = timetable.days.len(),
            jummahs = timetable.jummahs.len(),
            "timetable loaded"
        );
        Ok(timetable)
    }
}

#[async_trait::async_trait]
impl ScheduleSource for JsonTimetable {
    async fn day_schedule(&self, date: NaiveDate) -> Result<Option<DaySchedule>, DomainError> {
        Ok(self.load().await?.day(date).cloned())
    }

    async fn jummah_slots(&self) -> Result<Vec<JummahSlot>, DomainError> {
        Ok(self.load().await?.jummahs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_24H: &str = r#"{
        "days": [
            {"date":"2025-03-07","fajr":"05:12","fajrIqama":"05:30","sunrise":"06:40",
             "dhuhr":"12:31","dhuhrIqama":"13:00","asr":"15:50","asrIqama":"",
             "sunset":"18:20","maghrib":"18:22","maghribIqama":"18:27","isha":"19:45"},
            {"date":"2025-03-08","fajr":"05:10"}
        ],
        "jummahs": [{"time":"13:15","label":"First"},{"time":"14:00"}]
    }"#;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn t(h: u32, m: u32) -> Option<TimeOfDay> {
        Some(TimeOfDay::new(h, m).unwrap())
    }

    #[test]
    fn test_parse_timetable_24h() {
        let tt = parse_timetable(SAMPLE_24H, TimeFormat::H24).unwrap();
        assert_eq!(tt.days.len(), 2);

        let day = tt.day(date(7)).unwrap();
        assert_eq!(day.event(PrayerKind::Fajr).adhan, t(5, 12));
        assert_eq!(day.event(PrayerKind::Fajr).iqama, t(5, 30));
        assert_eq!(day.event(PrayerKind::Sunrise).adhan, t(6, 40));
        assert_eq!(day.event(PrayerKind::Asr).iqama, None);
        assert_eq!(day.event(PrayerKind::Isha).iqama, None);

        let sparse = tt.day(date(8)).unwrap();
        assert_eq!(sparse.event(PrayerKind::Fajr).adhan, t(5, 10));
        assert_eq!(sparse.event(PrayerKind::Dhuhr).adhan, None);

        assert_eq!(tt.jummahs.len(), 2);
        assert_eq!(tt.jummahs[0].label, "First");
        assert_eq!(tt.jummahs[1].label, "Jummah 2");
        assert_eq!(tt.jummahs[1].time, TimeOfDay::new(14, 0).unwrap());
    }

    #[test]
    fn test_parse_timetable_12h() {
        let json = r#"{"days":[{"date":"2025-03-07","fajr":"5:12 AM","dhuhr":"12:31 PM","isha":"7:45 PM","ishaIqama":"8:00 PM"}]}"#;
        let tt = parse_timetable(json, TimeFormat::H12).unwrap();
        let day = tt.day(date(7)).unwrap();
        assert_eq!(day.event(PrayerKind::Fajr).adhan, t(5, 12));
        assert_eq!(day.event(PrayerKind::Dhuhr).adhan, t(12, 31));
        assert_eq!(day.event(PrayerKind::Isha).iqama, t(20, 0));
        assert!(tt.jummahs.is_empty());
    }

    #[test]
    fn test_wrong_convention_is_missing_not_guessed() {
        let json = r#"{"days":[{"date":"2025-03-07","fajr":"5:12 AM","dhuhr":"13:05"}]}"#;
        let tt = parse_timetable(json, TimeFormat::H24).unwrap();
        let day = tt.day(date(7)).unwrap();
        assert_eq!(day.event(PrayerKind::Fajr).adhan, None);
        assert_eq!(day.event(PrayerKind::Dhuhr).adhan, t(13, 5));
    }

    #[test]
    fn test_jummah_language_note_is_the_label() {
        let json = r#"{"jummahs":[
            {"time":"13:15","language":"English"},
            {"time":"14:00","label":"Second","language":"Arabic"},
            {"time":"14:45","language":" "}
        ]}"#;
        let tt = parse_timetable(json, TimeFormat::H24).unwrap();
        let labels: Vec<&str> = tt.jummahs.iter().map(|j| j.label.as_str()).collect();
        assert_eq!(labels, vec!["English", "Second", "Jummah 3"]);
    }

    #[tokio::test]
    async fn test_json_timetable_source() {
        let path = std::env::temp_dir()
            .join(format!("masjid-tv-timetable-{}.json", std::process::id()));
        tokio::fs::write(&path, SAMPLE_24H).await.unwrap();
        let source = JsonTimetable::new(&path, TimeFormat::H24);

        let day = source.day_schedule(date(7)).await.unwrap().unwrap();
        assert_eq!(day.date(), date(7));
        assert!(source.day_schedule(date(9)).await.unwrap().is_none());
        assert_eq!(source.jummah_slots().await.unwrap().len(), 2);

        let _ = tokio::fs::remove_file(&path).await;
        assert!(source.day_schedule(date(7)).await.is_err());
    }
}
