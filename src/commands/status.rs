//! Implementation of the `lockrun status` command.
//!
//! Read-only: reports on a lock record without claiming ownership.

use crate::cli::StatusArgs;
use crate::error::{LockrunError, Result};
use crate::lock::{RecordInfo, inspect};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Machine-readable status report for `--json` output.
#[derive(Debug, Serialize)]
struct StatusReport {
    path: String,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stale: Option<bool>,
}

impl StatusReport {
    fn new(path: &Path, record: Option<&RecordInfo>, ttl: Option<u64>) -> Self {
        Self {
            path: path.display().to_string(),
            exists: record.is_some(),
            owner: record.map(|r| r.owner.clone()),
            modified: record.map(|r| r.modified),
            age_seconds: record.map(|r| r.age().num_seconds()),
            stale: record.and_then(|r| ttl.map(|ttl| r.is_stale(ttl))),
        }
    }
}

/// Execute the `lockrun status` command.
pub fn cmd_status(args: StatusArgs) -> Result<()> {
    let record = inspect(&args.lock).map_err(|e| {
        LockrunError::UserError(format!(
            "failed to read lock '{}': {}",
            args.lock.display(),
            e
        ))
    })?;

    if args.json {
        let report = StatusReport::new(&args.lock, record.as_ref(), args.ttl);
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            LockrunError::UserError(format!("failed to serialize status: {}", e))
        })?;
        println!("{}", json);
        return Ok(());
    }

    match record {
        None => println!("No lock present at {}", args.lock.display()),
        Some(record) => {
            println!("Lock:       {}", record.path.display());
            println!("Owner:      {}", record.owner);
            println!(
                "Heartbeat:  {}",
                record.modified.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Age:        {}", record.age_string());
            if let Some(ttl) = args.ttl {
                if record.is_stale(ttl) {
                    println!("Status:     STALE (exceeds {}s threshold)", ttl);
                } else {
                    println!("Status:     valid (within {}s threshold)", ttl);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, OpenOptions};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn status_report_for_missing_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.lock");

        let report = StatusReport::new(&path, None, Some(300));
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();

        assert_eq!(json["exists"], false);
        assert!(json.get("owner").is_none());
        assert!(json.get("stale").is_none());
    }

    #[test]
    fn status_report_for_stale_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.lock");
        fs::write(&path, "worker-3").unwrap();
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(400))
            .unwrap();

        let record = inspect(&path).unwrap();
        let report = StatusReport::new(&path, record.as_ref(), Some(300));
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();

        assert_eq!(json["exists"], true);
        assert_eq!(json["owner"], "worker-3");
        assert_eq!(json["stale"], true);
        assert!(json["age_seconds"].as_i64().unwrap() >= 400);
    }

    #[test]
    fn status_without_ttl_omits_staleness() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.lock");
        fs::write(&path, "worker-3").unwrap();

        let record = inspect(&path).unwrap();
        let report = StatusReport::new(&path, record.as_ref(), None);
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();

        assert_eq!(json["exists"], true);
        assert!(json.get("stale").is_none());
    }

    #[test]
    fn cmd_status_succeeds_for_present_and_missing_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.lock");

        cmd_status(StatusArgs {
            lock: path.clone(),
            ttl: Some(300),
            json: true,
        })
        .unwrap();

        fs::write(&path, "worker-3").unwrap();
        cmd_status(StatusArgs {
            lock: path,
            ttl: Some(300),
            json: false,
        })
        .unwrap();
    }
}
