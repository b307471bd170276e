//! Implements DisplayPort on a terminal (kiosk TTY or a TV attached to a small host).
//!
//! Owns the alternate screen for its lifetime: entered in `open`, left on drop.

use crate::adapters::ui::banner::{EMERALD, GOLD};
use crate::domain::{DisplayFrame, DomainError, NoticeCategory, Phase, Slide};
use crate::ports::DisplayPort;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{Write, stdout};

const NO_COUNTDOWN: &str = "--:--:--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Muted,
    Highlight,
    Gold,
    Alert,
}

impl Tone {
    fn color(self) -> Color {
        let rgb = |(r, g, b): (u8, u8, u8)| Color::Rgb { r, g, b };
        match self {
            Tone::Normal => Color::White,
            Tone::Muted => Color::DarkGrey,
            Tone::Highlight => rgb(EMERALD),
            Tone::Gold => rgb(GOLD),
            Tone::Alert => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn blank() -> Self {
        Self::new(Tone::Normal, "")
    }
}

/// Lay out a frame as colored text lines: header, timetable, main slide, slide dots.
pub fn frame_lines(frame: &DisplayFrame) -> Vec<Line> {
    let mut lines = vec![
        Line::new(Tone::Highlight, frame.mosque_name.clone()),
        Line::new(
            Tone::Muted,
            format!(
                "{}   {}",
                frame.now.format("%A, %B %-d, %Y"),
                frame.now.format("%-I:%M:%S %p")
            ),
        ),
        Line::blank(),
        Line::new(
            Tone::Muted,
            format!("  {:<10}{:>10}{:>22}", "PRAYER", "ADHAN", "IQAMAH"),
        ),
    ];

    for row in &frame.rows {
        let marker = if row.is_next { '>' } else { ' ' };
        let tone = if row.is_next { Tone::Highlight } else { Tone::Normal };
        lines.push(Line::new(
            tone,
            format!(
                "{} {:<10}{:>10}{:>22}",
                marker,
                row.kind.name(),
                row.adhan,
                row.iqama
            ),
        ));
    }
    for jummah in &frame.jummahs {
        lines.push(Line::new(Tone::Gold, format!("  Jummah: {}", jummah)));
    }
    lines.push(Line::blank());

    match &frame.slide {
        Slide::Countdown => {
            let heading = match frame.status.phase {
                Phase::Upcoming => "Next Prayer",
                Phase::InWindow => "Iqamah In",
                Phase::CarriedToNextDay => "Next Prayer (Tomorrow)",
            };
            lines.push(Line::new(Tone::Highlight, heading));
            lines.push(Line::new(Tone::Normal, frame.status.active_kind.name()));
            lines.push(Line::new(
                Tone::Gold,
                frame.countdown.as_deref().unwrap_or(NO_COUNTDOWN),
            ));
            if let Some(clock) = &frame.target_clock {
                lines.push(Line::new(Tone::Muted, clock.clone()));
            }
        }
        Slide::Notice(notice) => {
            let accent = if notice.category == NoticeCategory::Alert {
                Tone::Alert
            } else {
                Tone::Gold
            };
            lines.push(Line::new(accent, notice.category.label().to_uppercase()));
            lines.push(Line::new(Tone::Normal, notice.title.clone()));
            for body_line in notice.body.lines() {
                lines.push(Line::new(Tone::Muted, body_line));
            }
        }
    }

    lines.push(Line::blank());
    let dots: Vec<&str> = (0..frame.slide_count)
        .map(|i| if i == frame.slide_index { "●" } else { "○" })
        .collect();
    lines.push(Line::new(Tone::Highlight, dots.join(" ")));
    lines
}

/// Terminal-backed display. Leaves the alternate screen when dropped.
pub struct TerminalDisplay {
    _private: (),
}

impl TerminalDisplay {
    pub fn open() -> Result<Self, DomainError> {
        execute!(stdout(), EnterAlternateScreen, Hide)
            .map_err(|e| DomainError::Render(format!("enter alternate screen: {}", e)))?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
    }
}

#[async_trait::async_trait]
impl DisplayPort for TerminalDisplay {
    async fn render(&self, frame: &DisplayFrame) -> Result<(), DomainError> {
        let io = |e: std::io::Error| DomainError::Render(e.to_string());
        let mut out = stdout().lock();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0)).map_err(io)?;
        for line in frame_lines(frame) {
            queue!(
                out,
                SetForegroundColor(line.tone.color()),
                Print(line.text),
                ResetColor,
                Print("\r\n")
            )
            .map_err(io)?;
        }
        out.flush().map_err(io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Notice, PrayerKind, ResolvedStatus, TimetableRow};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn frame(slide: Slide, slide_index: usize, slide_count: usize) -> DisplayFrame {
        let now = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(12, 10, 5)
            .unwrap();
        DisplayFrame {
            mosque_name: "Masjid Al-Noor".into(),
            now,
            status: ResolvedStatus {
                active_kind: PrayerKind::Dhuhr,
                phase: Phase::Upcoming,
                target: None,
            },
            countdown: Some("0:20:55".into()),
            target_clock: Some("12:31 PM".into()),
            rows: vec![TimetableRow {
                kind: PrayerKind::Dhuhr,
                adhan: "12:31".into(),
                iqama: "13:15, 14:00".into(),
                is_next: true,
            }],
            jummahs: vec!["First  1:15 PM".into()],
            slide,
            slide_index,
            slide_count,
        }
    }

    #[test]
    fn test_countdown_layout() {
        let lines = frame_lines(&frame(Slide::Countdown, 0, 2));
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts[0], "Masjid Al-Noor");
        assert!(texts[1].starts_with("Friday, March 7, 2025"));
        assert!(texts.iter().any(|t| t.starts_with("> Dhuhr") && t.ends_with("13:15, 14:00")));
        assert!(texts.contains(&"Next Prayer"));
        assert!(texts.contains(&"0:20:55"));
        assert!(texts.contains(&"12:31 PM"));
        assert!(texts.contains(&"  Jummah: First  1:15 PM"));
        assert_eq!(*texts.last().unwrap(), "● ○");
    }

    #[test]
    fn test_alert_notice_layout() {
        let notice = Notice {
            id: "n1".into(),
            title: "Car park closed".into(),
            body: "Use the side entrance.\nThank you".into(),
            category: NoticeCategory::Alert,
            pinned: true,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
        };
        let lines = frame_lines(&frame(Slide::Notice(notice), 1, 2));
        let alert = lines.iter().find(|l| l.text == "ALERT").unwrap();
        assert_eq!(alert.tone, Tone::Alert);
        assert!(lines.iter().any(|l| l.text == "Thank you"));
        assert!(!lines.iter().any(|l| l.text == "Next Prayer"));
        assert_eq!(lines.last().unwrap().text, "○ ●");
    }
}
