//! Implements NoticeSource by polling a JSON file.
//!
//! The file holds an array of notices. A snapshot is sent when the stream is
//! opened and whenever the parsed content changes. A missing file is an empty
//! notice set; an unreadable or malformed file is skipped until the next poll,
//! and a malformed record is left out of its snapshot.

use crate::domain::{DomainError, Notice, NoticeCategory};
use crate::ports::{NoticeSource, NoticeStream};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const DEFAULT_TITLE: &str = "Announcement";

/// Notice as written by the admin portal. Older records carry `message`,
/// `type` and `isPinned` instead of `body`, `category` and `pinned`; a record
/// may carry both spellings, in which case the current one wins.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNotice {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    category: Option<NoticeCategory>,
    #[serde(default, rename = "type")]
    legacy_type: Option<NoticeCategory>,
    #[serde(default)]
    pinned: Option<bool>,
    #[serde(default)]
    is_pinned: Option<bool>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl RawNotice {
    fn into_notice(self, position: usize) -> Notice {
        let body = non_blank(self.body)
            .or_else(|| non_blank(self.content))
            .or_else(|| non_blank(self.message))
            .unwrap_or_default();
        Notice {
            id: non_blank(self.id).unwrap_or_else(|| format!("notice-{}", position)),
            title: non_blank(self.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body,
            category: self.category.or(self.legacy_type).unwrap_or_default(),
            pinned: self.pinned.or(self.is_pinned).unwrap_or(false),
            created_at: self.created_at.unwrap_or_default(),
        }
    }
}

/// Parse a notice file's content. The file must be a JSON array; a record
/// that does not fit the notice shape is logged and left out of the snapshot.
pub fn parse_notices(json: &str) -> Result<Vec<Notice>, DomainError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| DomainError::Feed(format!("parse notices: {}", e)))?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value::<RawNotice>(record) {
            Ok(raw) => Some(raw.into_notice(i)),
            Err(e) => {
                warn!(position = i, error = %e, "malformed notice skipped");
                None
            }
        })
        .collect())
}

pub struct JsonFileNoticeFeed {
    path: PathBuf,
    poll_interval: Duration,
}

impl JsonFileNoticeFeed {
    pub fn new(path: impl AsRef<Path>, poll_interval: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            poll_interval,
        }
    }

    async fn read(path: &Path) -> Result<Vec<Notice>, DomainError> {
        match tokio::fs::read_to_string(path).await {
            Ok(s) => parse_notices(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(DomainError::Feed(format!("read {}: {}", path.display(), e))),
        }
    }
}

#[async_trait::async_trait]
impl NoticeSource for JsonFileNoticeFeed {
    async fn open(&self) -> Result<NoticeStream, DomainError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let path = self.path.clone();
        let poll_interval = self.poll_interval;
        info!(
            path = %path.display(),
            poll_secs = poll_interval.as_secs(),
            "watching notice file"
        );

        tokio::spawn(async move {
            let mut last: Option<Vec<Notice>> = None;
            loop {
                match Self::read(&path).await {
                    Ok(notices) if last.as_ref() != Some(&notices) => {
                        debug!(count = notices.len(), "notice file changed");
                        if tx.send(notices.clone()).is_err() {
                            break;
                        }
                        last = Some(notices);
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "notice file skipped"),
                }
                tokio::select! {
                    _ = tokio::time::sleep(poll_interval) => {}
                    _ = tx.closed() => break,
                }
            }
            debug!(path = %path.display(), "notice file watcher stopped");
        });

        Ok(rx)
    }
}
