//! Read-only inspection of on-disk lock records.
//!
//! Used by the `status` and `clear` commands to report on a record without
//! constructing a handle (and therefore without any claim of ownership).

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// A snapshot of an existing lock record.
#[derive(Debug, Clone)]
pub struct RecordInfo {
    /// The record path.
    pub path: PathBuf,

    /// The owner token stored in the record.
    pub owner: String,

    /// Last heartbeat time (the record's modification timestamp).
    pub modified: DateTime<Utc>,
}

impl RecordInfo {
    /// Age of the record relative to now.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.modified)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let seconds = age.num_seconds().max(0);
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds % 60)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Whether the record is stale against the given TTL in seconds.
    ///
    /// A TTL of zero disables the staleness check: the record is always
    /// considered valid.
    pub fn is_stale(&self, ttl_secs: u64) -> bool {
        ttl_secs != 0 && self.age().num_seconds() >= ttl_secs as i64
    }
}

/// Inspect the record at `path`.
///
/// Returns `Ok(None)` when no record exists. Content is taken verbatim;
/// the record format is the raw owner token with no framing.
pub fn inspect(path: &Path) -> io::Result<Option<RecordInfo>> {
    let owner = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let modified = fs::metadata(path)?.modified()?;

    Ok(Some(RecordInfo {
        path: path.to_path_buf(),
        owner,
        modified: modified.into(),
    }))
}
