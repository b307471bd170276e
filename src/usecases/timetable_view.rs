//! Timetable sidebar rows for the display.
//!
//! On Fridays with Jummah slots configured, Dhuhr's Iqama cell lists the
//! Jummah times instead. This is display-only; the resolver never sees it.

use crate::domain::{
    DaySchedule, JummahSlot, PrayerKind, ResolvedStatus, TimeFormat, TimeOfDay, TimetableRow,
};

/// Placeholder for a cell with no data.
pub const EMPTY_CELL: &str = "--:--";

pub fn timetable_rows(
    today: &DaySchedule,
    jummahs: &[JummahSlot],
    status: &ResolvedStatus,
    format: TimeFormat,
) -> Vec<TimetableRow> {
    let jummah_override = (today.is_friday() && !jummahs.is_empty()).then(|| {
        jummahs
            .iter()
            .map(|j| format.render(j.time))
            .collect::<Vec<_>>()
            .join(", ")
    });

    today
        .events()
        .iter()
        .map(|event| {
            let cell = |t: Option<TimeOfDay>| {
                t.map(|t| format.render(t))
                    .unwrap_or_else(|| EMPTY_CELL.to_string())
            };
            let iqama = match (&jummah_override, event.kind) {
                (Some(times), PrayerKind::Dhuhr) => times.clone(),
                (_, PrayerKind::Sunrise) => String::new(),
                _ => cell(event.iqama),
            };
            TimetableRow {
                kind: event.kind,
                adhan: cell(event.adhan),
                iqama,
                is_next: event.kind == status.active_kind,
            }
        })
        .collect()
}

/// Labelled Jummah slots for the Friday listing; empty on other days.
pub fn jummah_lines(
    today: &DaySchedule,
    jummahs: &[JummahSlot],
    format: TimeFormat,
) -> Vec<String> {
    if !today.is_friday() {
        return Vec::new();
    }
    jummahs
        .iter()
        .map(|j| format!("{}  {}", j.label, format.render(j.time)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Phase, PrayerEvent, combine, resolve};
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn day(date: NaiveDate) -> DaySchedule {
        DaySchedule::new(
            date,
            [
                PrayerEvent::new(PrayerKind::Fajr, Some(t(5, 12)), Some(t(5, 30))),
                PrayerEvent::new(PrayerKind::Sunrise, Some(t(6, 40)), None),
                PrayerEvent::new(PrayerKind::Dhuhr, Some(t(12, 31)), Some(t(13, 0))),
                PrayerEvent::new(PrayerKind::Asr, Some(t(15, 50)), None),
            ],
        )
    }

    fn slots() -> Vec<JummahSlot> {
        vec![
            JummahSlot {
                time: t(13, 15),
                label: "First".into(),
            },
            JummahSlot {
                time: t(14, 0),
                label: "Second".into(),
            },
        ]
    }

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
    }

    #[test]
    fn test_rows_cover_all_kinds_with_placeholders() {
        let today = day(thursday());
        let status = resolve(thursday().and_hms_opt(9, 0, 0).unwrap(), &today, None);
        let rows = timetable_rows(&today, &[], &status, TimeFormat::H24);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].adhan, "05:12");
        assert_eq!(rows[1].iqama, "");
        assert_eq!(rows[3].iqama, EMPTY_CELL);
        assert_eq!(rows[4].adhan, EMPTY_CELL);
        assert!(rows[2].is_next);
        assert_eq!(rows.iter().filter(|r| r.is_next).count(), 1);
    }

    #[test]
    fn test_friday_replaces_dhuhr_iqama_with_jummah() {
        let today = day(friday());
        let status = resolve(friday().and_hms_opt(9, 0, 0).unwrap(), &today, None);
        let rows = timetable_rows(&today, &slots(), &status, TimeFormat::H12);
        assert_eq!(rows[2].kind, PrayerKind::Dhuhr);
        assert_eq!(rows[2].iqama, "1:15 PM, 2:00 PM");
        assert_eq!(rows[2].adhan, "12:31 PM");
        assert_eq!(rows[0].iqama, "5:30 AM");
    }

    #[test]
    fn test_jummah_ignored_on_other_days() {
        let today = day(thursday());
        let status = resolve(thursday().and_hms_opt(9, 0, 0).unwrap(), &today, None);
        let rows = timetable_rows(&today, &slots(), &status, TimeFormat::H24);
        assert_eq!(rows[2].iqama, "13:00");
        assert!(jummah_lines(&today, &slots(), TimeFormat::H24).is_empty());
    }

    #[test]
    fn test_jummah_lines_carry_labels_on_friday() {
        let lines = jummah_lines(&day(friday()), &slots(), TimeFormat::H12);
        assert_eq!(lines, vec!["First  1:15 PM", "Second  2:00 PM"]);
    }

    #[test]
    fn test_jummah_does_not_change_resolver_target() {
        let today = day(friday());
        let before_dhuhr = friday().and_hms_opt(12, 0, 0).unwrap();
        let status = resolve(before_dhuhr, &today, None);
        let _rows = timetable_rows(&today, &slots(), &status, TimeFormat::H24);
        assert_eq!(status.active_kind, PrayerKind::Dhuhr);
        assert_eq!(status.target, Some(combine(friday(), t(12, 31))));

        let in_window = resolve(friday().and_hms_opt(12, 45, 0).unwrap(), &today, None);
        assert_eq!(in_window.phase, Phase::InWindow);
        assert_eq!(in_window.target, Some(combine(friday(), t(13, 0))));
    }
}
