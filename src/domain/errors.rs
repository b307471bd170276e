//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// A time-of-day string or hour/minute pair that does not name a valid wall-clock time.
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Schedule source error: {0}")]
    Schedule(String),

    #[error("Notice feed error: {0}")]
    Feed(String),

    #[error("Display error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
