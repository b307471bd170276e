//! Wall-clock helpers. A `TimeOfDay` has no date and only becomes comparable
//! once it is anchored to a calendar day with [`combine`].

use crate::domain::DomainError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

/// A point in local wall-clock time.
pub type Instant = NaiveDateTime;

/// Hour (0-23) and minute (0-59) with no date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, DomainError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidTime(format!("{}:{:02}", hour, minute)))
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Parse the canonical 24-hour form `HH:MM` (a single-digit hour is accepted).
    pub fn parse_24h(s: &str) -> Result<Self, DomainError> {
        let (hour, minute) = split_clock(s.trim()).ok_or_else(|| invalid(s))?;
        if hour > 23 {
            return Err(invalid(s));
        }
        Self::new(hour, minute)
    }

    /// Parse a 12-hour `hh:mm AM/PM` string. `12:xx AM` is just after midnight,
    /// `12:xx PM` is just after noon.
    pub fn parse_12h(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        let (clock, modifier) = trimmed
            .rsplit_once(' ')
            .map(|(c, m)| (c.trim_end(), m))
            .ok_or_else(|| invalid(s))?;
        let (hour, minute) = split_clock(clock).ok_or_else(|| invalid(s))?;
        if !(1..=12).contains(&hour) {
            return Err(invalid(s));
        }
        let hour = match modifier.to_ascii_uppercase().as_str() {
            "AM" if hour == 12 => 0,
            "AM" => hour,
            "PM" if hour == 12 => 12,
            "PM" => hour + 12,
            _ => return Err(invalid(s)),
        };
        Self::new(hour, minute)
    }

    /// Render as `h:mm AM/PM`.
    pub fn to_12h_string(self) -> String {
        let (pm, hour) = self.0.hour12();
        format!("{}:{:02} {}", hour, self.minute(), if pm { "PM" } else { "AM" })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_24h(s)
    }
}

/// `H:MM` / `HH:MM` with exactly two minute digits.
fn split_clock(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
        return None;
    }
    Some((h.parse().ok()?, m.parse().ok()?))
}

fn invalid(s: &str) -> DomainError {
    DomainError::InvalidTime(format!("{:?}", s))
}

/// Anchor a time of day to a calendar date.
pub fn combine(date: NaiveDate, time: TimeOfDay) -> Instant {
    date.and_time(time.0)
}

/// Signed duration from `from` to `to` (negative when `to` is earlier).
pub fn signed_duration(from: Instant, to: Instant) -> TimeDelta {
    to.signed_duration_since(from)
}

/// Which clock convention a source's time strings use. Chosen explicitly by
/// configuration; strings are never sniffed for AM/PM markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    H24,
    H12,
}

impl TimeFormat {
    pub fn parse(self, s: &str) -> Result<TimeOfDay, DomainError> {
        match self {
            TimeFormat::H24 => TimeOfDay::parse_24h(s),
            TimeFormat::H12 => TimeOfDay::parse_12h(s),
        }
    }

    pub fn render(self, time: TimeOfDay) -> String {
        match self {
            TimeFormat::H24 => time.to_string(),
            TimeFormat::H12 => time.to_12h_string(),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24h" | "24" => Ok(TimeFormat::H24),
            "12h" | "12" => Ok(TimeFormat::H12),
            other => Err(DomainError::Config(format!(
                "unknown time format {:?} (expected 24h or 12h)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn test_parse_24h() {
        assert_eq!(TimeOfDay::parse_24h("06:15").unwrap(), TimeOfDay::new(6, 15).unwrap());
        assert_eq!(TimeOfDay::parse_24h("5:07").unwrap(), TimeOfDay::new(5, 7).unwrap());
        assert_eq!(TimeOfDay::parse_24h(" 23:59 ").unwrap(), TimeOfDay::new(23, 59).unwrap());
    }

    #[test]
    fn test_parse_24h_rejects_12h_and_garbage() {
        assert!(TimeOfDay::parse_24h("1:15 PM").is_err());
        assert!(TimeOfDay::parse_24h("24:00").is_err());
        assert!(TimeOfDay::parse_24h("12:60").is_err());
        assert!(TimeOfDay::parse_24h("12:5").is_err());
        assert!(TimeOfDay::parse_24h("").is_err());
    }

    #[test]
    fn test_parse_12h() {
        assert_eq!(TimeOfDay::parse_12h("12:05 AM").unwrap(), TimeOfDay::new(0, 5).unwrap());
        assert_eq!(TimeOfDay::parse_12h("12:30 PM").unwrap(), TimeOfDay::new(12, 30).unwrap());
        assert_eq!(TimeOfDay::parse_12h("1:15 PM").unwrap(), TimeOfDay::new(13, 15).unwrap());
        assert_eq!(TimeOfDay::parse_12h("05:40 am").unwrap(), TimeOfDay::new(5, 40).unwrap());
        assert!(TimeOfDay::parse_12h("13:00 PM").is_err());
        assert!(TimeOfDay::parse_12h("13:00").is_err());
    }

    #[test]
    fn test_display_forms() {
        let t = TimeOfDay::new(13, 5).unwrap();
        assert_eq!(t.to_string(), "13:05");
        assert_eq!(t.to_12h_string(), "1:05 PM");
        assert_eq!(TimeOfDay::new(0, 0).unwrap().to_12h_string(), "12:00 AM");
    }

    #[test]
    fn test_combine_and_duration() {
        let a = combine(date(), TimeOfDay::new(6, 0).unwrap());
        let b = combine(date(), TimeOfDay::new(6, 15).unwrap());
        assert!(a < b);
        assert_eq!(signed_duration(a, b), TimeDelta::minutes(15));
        assert_eq!(signed_duration(b, a), TimeDelta::minutes(-15));
    }

    #[test]
    fn test_time_format_from_str() {
        assert_eq!("12h".parse::<TimeFormat>().unwrap(), TimeFormat::H12);
        assert_eq!("24H".parse::<TimeFormat>().unwrap(), TimeFormat::H24);
        assert!("ampm".parse::<TimeFormat>().is_err());
    }
}
