//! Prayer status resolution: which window is active or next, and what to count down to.
//!
//! Pure and deterministic. Callers re-invoke it as `now` advances.

use crate::domain::entities::{DaySchedule, Phase, PrayerKind, ResolvedStatus};
use crate::domain::time::{Instant, combine};

/// Resolve the status at `now` against today's schedule.
///
/// Walks Fajr, Dhuhr, Asr, Maghrib, Isha in order. A kind without an Adhan is
/// skipped. Before the Adhan the kind is `Upcoming`; between Adhan and Iqama it
/// is `InWindow`; after that the walk moves on. When nothing matches the
/// status is carried to tomorrow's Fajr, with `tomorrow_fajr_adhan` as target.
pub fn resolve(
    now: Instant,
    today: &DaySchedule,
    tomorrow_fajr_adhan: Option<Instant>,
) -> ResolvedStatus {
    for kind in PrayerKind::RESOLVABLE {
        let event = today.event(kind);
        let Some(adhan) = event.adhan else {
            continue;
        };

        let adhan_at = combine(today.date(), adhan);
        if now < adhan_at {
            return ResolvedStatus {
                active_kind: kind,
                phase: Phase::Upcoming,
                target: Some(adhan_at),
            };
        }

        // Iqama is assumed to fall on the same day as its Adhan.
        if let Some(iqama) = event.iqama {
            let iqama_at = combine(today.date(), iqama);
            if now < iqama_at {
                return ResolvedStatus {
                    active_kind: kind,
                    phase: Phase::InWindow,
                    target: Some(iqama_at),
                };
            }
        }
    }

    ResolvedStatus {
        active_kind: PrayerKind::Fajr,
        phase: Phase::CarriedToNextDay,
        target: tomorrow_fajr_adhan,
    }
}

/// Tomorrow's Fajr Adhan as an instant, if the following day's schedule has one.
pub fn tomorrow_fajr_adhan(tomorrow: Option<&DaySchedule>) -> Option<Instant> {
    let day = tomorrow?;
    let adhan = day.event(PrayerKind::Fajr).adhan?;
    Some(combine(day.date(), adhan))
}
