//! Application configuration. Data paths, time convention, session intervals.

use crate::domain::TimeFormat;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TIMETABLE_PATH: &str = "./data/timetable.json";
pub const DEFAULT_NOTICES_PATH: &str = "./data/notices.json";
pub const DEFAULT_LOG_PATH: &str = "./data/masjid-tv.log";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Timetable JSON file. Read from MASJID_TV_TIMETABLE_PATH.
    #[serde(default)]
    pub timetable_path: Option<String>,

    /// Notice JSON file, polled for changes. Read from MASJID_TV_NOTICES_PATH.
    #[serde(default)]
    pub notices_path: Option<String>,

    /// Clock convention of the timetable's time strings: `24h` (default) or `12h`.
    /// Also used for the timetable columns on screen. Read from MASJID_TV_TIME_FORMAT.
    #[serde(default)]
    pub time_format: Option<String>,

    /// Seconds between notice file polls (default 5). Read from MASJID_TV_FEED_POLL_SECS.
    #[serde(default)]
    pub feed_poll_secs: Option<u64>,

    /// Seconds between timetable reloads (default 600). Read from MASJID_TV_SCHEDULE_REFRESH_SECS.
    #[serde(default)]
    pub schedule_refresh_secs: Option<u64>,

    /// Seconds between resolver passes (default 60). Read from MASJID_TV_RESOLVE_INTERVAL_SECS.
    #[serde(default)]
    pub resolve_interval_secs: Option<u64>,

    /// Name shown in the banner and the display header. Read from MASJID_TV_MOSQUE_NAME.
    #[serde(default)]
    pub mosque_name: Option<String>,

    /// Print the startup banner (default true). Read from MASJID_TV_SHOW_BANNER.
    #[serde(default)]
    pub show_banner: Option<bool>,

    /// Log file, appended to. `-` or `stderr` logs to stderr, which shares the
    /// display's terminal. Read from MASJID_TV_LOG_PATH.
    #[serde(default)]
    pub log_path: Option<String>,
}

impl AppConfig {
    /// Environment (`MASJID_TV_*`, `.env` included) layered over an optional
    /// file named by MASJID_TV_CONFIG.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("MASJID_TV_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("MASJID_TV").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn timetable_path_or_default(&self) -> String {
        self.timetable_path
            .clone()
            .unwrap_or_else(|| DEFAULT_TIMETABLE_PATH.to_string())
    }

    pub fn notices_path_or_default(&self) -> String {
        self.notices_path
            .clone()
            .unwrap_or_else(|| DEFAULT_NOTICES_PATH.to_string())
    }

    /// Configured time convention. An unrecognized value is an error rather
    /// than a silent fallback, since it decides how every timetable cell is read.
    pub fn time_format(&self) -> Result<TimeFormat, crate::domain::DomainError> {
        match self.time_format.as_deref() {
            Some(s) => s.parse(),
            None => Ok(TimeFormat::default()),
        }
    }

    pub fn feed_poll_interval(&self) -> Duration {
        Duration::from_secs(self.feed_poll_secs.unwrap_or(5).max(1))
    }

    pub fn schedule_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.schedule_refresh_secs.unwrap_or(600).max(1))
    }

    pub fn resolve_interval(&self) -> Duration {
        Duration::from_secs(self.resolve_interval_secs.unwrap_or(60).max(1))
    }

    pub fn mosque_name_or_default(&self) -> String {
        self.mosque_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Masjid".to_string())
    }

    pub fn show_banner(&self) -> bool {
        self.show_banner.unwrap_or(true)
    }

    /// Log file to append to, or `None` to log to stderr.
    pub fn log_path_or_default(&self) -> Option<PathBuf> {
        match self.log_path.as_deref().map(str::trim) {
            Some("-") | Some("stderr") => None,
            Some(p) if !p.is_empty() => Some(PathBuf::from(p)),
            _ => Some(PathBuf::from(DEFAULT_LOG_PATH)),
        }
    }
}
