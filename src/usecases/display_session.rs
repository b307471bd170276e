//! Display session use case: a single cooperative loop drives the unattended display.
//!
//! The loop owns every timer of the session: the one-second clock tick, the
//! resolver re-evaluation, the schedule refresh and the rotation dwell deadline,
//! plus the notice feed subscription. All of them are dropped when `run` returns.
//! Branches are polled in a fixed order so that a feed snapshot that is ready
//! is always applied before a dwell expiry that is ready at the same time.

use crate::domain::{
    DaySchedule, DisplayFrame, DomainError, Instant, JummahSlot, ResolvedStatus,
    SlideRotationEngine, TimeFormat, format_clock, format_remaining, resolve, tomorrow_fajr_adhan,
};
use crate::ports::{ClockPort, DisplayPort, ScheduleSource};
use crate::usecases::announcement_feed::AnnouncementFeedAdapter;
use crate::usecases::timetable_view::{jummah_lines, timetable_rows};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periods of the session's recurring activities.
#[derive(Debug, Clone, Copy)]
pub struct SessionIntervals {
    /// Countdown repaint.
    pub tick: Duration,
    /// Resolver re-evaluation (boundary crossings, day rollover).
    pub resolve: Duration,
    /// Reload of the day's schedule from the `ScheduleSource`.
    pub schedule_refresh: Duration,
}

impl Default for SessionIntervals {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            resolve: Duration::from_secs(60),
            schedule_refresh: Duration::from_secs(600),
        }
    }
}

/// Schedule data for the day on screen.
#[derive(Debug, Clone)]
struct LoadedDay {
    today: DaySchedule,
    tomorrow_fajr: Option<Instant>,
    jummahs: Vec<JummahSlot>,
}

impl LoadedDay {
    fn status_at(&self, now: Instant) -> ResolvedStatus {
        resolve(now, &self.today, self.tomorrow_fajr)
    }
}

pub struct DisplaySession {
    schedule: Arc<dyn ScheduleSource>,
    feed: AnnouncementFeedAdapter,
    clock: Arc<dyn ClockPort>,
    display: Arc<dyn DisplayPort>,
    intervals: SessionIntervals,
    time_format: TimeFormat,
    mosque_name: String,
}

impl DisplaySession {
    pub fn new(
        schedule: Arc<dyn ScheduleSource>,
        feed: AnnouncementFeedAdapter,
        clock: Arc<dyn ClockPort>,
        display: Arc<dyn DisplayPort>,
        mosque_name: impl Into<String>,
    ) -> Self {
        Self {
            schedule,
            feed,
            clock,
            display,
            intervals: SessionIntervals::default(),
            time_format: TimeFormat::default(),
            mosque_name: mosque_name.into(),
        }
    }

    pub fn with_intervals(mut self, intervals: SessionIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn with_time_format(mut self, time_format: TimeFormat) -> Self {
        self.time_format = time_format;
        self
    }

    /// Run until `shutdown` turns true or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut subscription = self.feed.subscription().await?;

        let start = time::Instant::now();
        let mut rotation = SlideRotationEngine::new(start);
        let now = self.clock.now();
        let mut day = self.load_day(now.date(), None).await;
        let mut status = day.status_at(now);
        info!(
            mosque = %self.mosque_name,
            date = %now.date(),
            next = %status.active_kind,
            "display session started"
        );

        let mut tick = time::interval(self.intervals.tick);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut resolve_timer =
            time::interval_at(start + self.intervals.resolve, self.intervals.resolve);
        resolve_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut refresh_timer = time::interval_at(
            start + self.intervals.schedule_refresh,
            self.intervals.schedule_refresh,
        );
        refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut feed_open = true;

        loop {
            if *shutdown.borrow() {
                break;
            }
            let deadline = rotation.deadline();

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }

                snapshot = subscription.next_snapshot(), if feed_open => match snapshot {
                    Some(notices) => {
                        rotation.set_slides(notices, time::Instant::now());
                    }
                    None => {
                        warn!("notice feed closed; keeping last notices");
                        feed_open = false;
                        continue;
                    }
                },

                _ = time::sleep_until(deadline.unwrap_or(start)), if deadline.is_some() => {
                    if !rotation.advance_if_due(time::Instant::now()) {
                        continue;
                    }
                    debug!(
                        index = rotation.state().current_index(),
                        slides = rotation.state().len(),
                        "slide advanced"
                    );
                }

                _ = resolve_timer.tick() => {
                    let now = self.clock.now();
                    if now.date() != day.today.date() {
                        info!(date = %now.date(), "day rolled over; loading schedule");
                        day = self.load_day(now.date(), Some(day)).await;
                    }
                    let next = day.status_at(now);
                    if next != status {
                        info!(
                            kind = %next.active_kind,
                            phase = ?next.phase,
                            "prayer status changed"
                        );
                    }
                    status = next;
                }

                _ = refresh_timer.tick() => {
                    let now = self.clock.now();
                    day = self.load_day(now.date(), Some(day)).await;
                    status = day.status_at(now);
                }

                _ = tick.tick() => {}
            }

            self.paint(&rotation, &day, &status).await;
        }

        drop(subscription);
        info!(mosque = %self.mosque_name, "display session stopped");
        Ok(())
    }

    /// Load `date` and the following day's Fajr. On a failed read the previous
    /// data for the same date is kept; a day without data resolves as exhausted.
    async fn load_day(&self, date: NaiveDate, previous: Option<LoadedDay>) -> LoadedDay {
        let previous = previous.filter(|p| p.today.date() == date);

        let today = match self.schedule.day_schedule(date).await {
            Ok(Some(day)) => day,
            Ok(None) => {
                warn!(%date, "timetable has no entry for today");
                DaySchedule::empty(date)
            }
            Err(e) => {
                warn!(%date, error = %e, "schedule load failed");
                match &previous {
                    Some(p) => p.today.clone(),
                    None => DaySchedule::empty(date),
                }
            }
        };

        let tomorrow_fajr = match date.succ_opt() {
            Some(next) => match self.schedule.day_schedule(next).await {
                Ok(day) => tomorrow_fajr_adhan(day.as_ref()),
                Err(e) => {
                    warn!(date = %next, error = %e, "next-day schedule load failed");
                    previous.as_ref().and_then(|p| p.tomorrow_fajr)
                }
            },
            None => None,
        };

        let jummahs = match self.schedule.jummah_slots().await {
            Ok(slots) => slots,
            Err(e) => {
                warn!(error = %e, "jummah slots load failed");
                previous.map(|p| p.jummahs).unwrap_or_default()
            }
        };

        LoadedDay {
            today,
            tomorrow_fajr,
            jummahs,
        }
    }

    fn frame(
        &self,
        now: Instant,
        rotation: &SlideRotationEngine,
        day: &LoadedDay,
        status: &ResolvedStatus,
    ) -> DisplayFrame {
        let state = rotation.state();
        DisplayFrame {
            mosque_name: self.mosque_name.clone(),
            now,
            status: *status,
            countdown: status.remaining(now).map(format_remaining),
            target_clock: status.target.map(format_clock),
            rows: timetable_rows(&day.today, &day.jummahs, status, self.time_format),
            jummahs: jummah_lines(&day.today, &day.jummahs, self.time_format),
            slide: state.current().clone(),
            slide_index: state.current_index(),
            slide_count: state.len(),
        }
    }

    async fn paint(
        &self,
        rotation: &SlideRotationEngine,
        day: &LoadedDay,
        status: &ResolvedStatus,
    ) {
        let frame = self.frame(self.clock.now(), rotation, day, status);
        if let Err(e) = self.display.render(&frame).await {
            warn!(error = %e, "render failed");
        }
    }
}
