//! Wiring & DI. Entry point: bootstrap adapters, inject into the display session, run it.
//! No business logic here.

use dotenv::dotenv;
use masjid_tv::adapters::clock::SystemClock;
use masjid_tv::adapters::feed::JsonFileNoticeFeed;
use masjid_tv::adapters::persistence::JsonTimetable;
use masjid_tv::adapters::ui::TerminalDisplay;
use masjid_tv::ports::{ClockPort, DisplayPort, NoticeSource, ScheduleSource};
use masjid_tv::shared::config::AppConfig;
use masjid_tv::usecases::{AnnouncementFeedAdapter, DisplaySession, SessionIntervals};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// How long the banner stays up before the display takes over the screen.
const BANNER_HOLD: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    let loaded = AppConfig::load();
    let log_path = match &loaded {
        Ok(cfg) => cfg.log_path_or_default(),
        Err(_) => AppConfig::default().log_path_or_default(),
    };

    // The display repaints the whole terminal, so logs go to a file unless
    // MASJID_TV_LOG_PATH asks for stderr.
    let (writer, log_error) = match log_path.as_deref().map(open_log_file) {
        Some(Ok(file)) => (BoxMakeWriter::new(Mutex::new(file)), None),
        Some(Err(e)) => (BoxMakeWriter::new(std::io::stderr), Some(e)),
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }
    if let Some(e) = log_error {
        warn!(error = %e, "log file unavailable, logging to stderr");
    }

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config load failed, using defaults");
            AppConfig::default()
        }
    };
    let time_format = cfg.time_format().map_err(|e| anyhow::anyhow!("{}", e))?;
    let mosque_name = cfg.mosque_name_or_default();

    if cfg.show_banner() {
        match masjid_tv::adapters::ui::init_ui(&mosque_name) {
            Ok(()) => tokio::time::sleep(BANNER_HOLD).await,
            Err(e) => warn!(error = %e, "banner skipped"),
        }
    }

    // --- Sources ---
    let timetable_path = cfg.timetable_path_or_default();
    let notices_path = cfg.notices_path_or_default();
    info!(
        timetable = %timetable_path,
        notices = %notices_path,
        time_format = ?time_format,
        "data sources"
    );
    let schedule: Arc<dyn ScheduleSource> =
        Arc::new(JsonTimetable::new(&timetable_path, time_format));
    let notices: Arc<dyn NoticeSource> = Arc::new(JsonFileNoticeFeed::new(
        &notices_path,
        cfg.feed_poll_interval(),
    ));
    let feed = AnnouncementFeedAdapter::new(notices);
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    // --- Session ---
    let intervals = SessionIntervals {
        resolve: cfg.resolve_interval(),
        schedule_refresh: cfg.schedule_refresh_interval(),
        ..SessionIntervals::default()
    };
    info!(
        resolve_secs = intervals.resolve.as_secs(),
        schedule_refresh_secs = intervals.schedule_refresh.as_secs(),
        "session intervals"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    let display: Arc<dyn DisplayPort> =
        Arc::new(TerminalDisplay::open().map_err(|e| anyhow::anyhow!("{}", e))?);
    let session = DisplaySession::new(schedule, feed, clock, display, mosque_name)
        .with_intervals(intervals)
        .with_time_format(time_format);

    // --- Run until Ctrl-C ---
    session
        .run(shutdown_rx)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!("bye");
    Ok(())
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
