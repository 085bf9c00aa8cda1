//! Classified lock failures.
//!
//! Every failure mode of the lock lifecycle has its own variant so callers
//! can distinguish "another instance is running" (expected during normal
//! operation, typically a quiet exit) from environment problems and from
//! loss of ownership. Nothing is retried or swallowed inside this module;
//! each operation either fully completes its filesystem effect or reports
//! the failure with no effect assumed.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures of lock acquisition and lifecycle operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// An existing record is younger than the TTL: another instance is
    /// running. Not an I/O error; callers typically exit quietly.
    #[error(
        "previous lock '{}' is still valid ({}s old, ttl {}s)",
        .path.display(),
        .age.as_secs(),
        .ttl.as_secs()
    )]
    PreviousLockValid {
        path: PathBuf,
        age: Duration,
        ttl: Duration,
    },

    /// A stale record exists and takeover was not requested.
    #[error("lock '{}' already exists", .path.display())]
    LockAlreadyExists { path: PathBuf },

    /// Deleting a stale record during takeover failed.
    #[error("cannot destroy previous lock '{}': {source}", .path.display())]
    CannotDestroyPreviousLock {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the new record failed (permissions, disk, path).
    #[error("cannot create lock '{}': {source}", .path.display())]
    CannotCreateLock {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The record vanished: another actor removed it. Fatal for the
    /// handle; it no longer holds exclusivity.
    #[error("lock '{}' destroyed", .path.display())]
    LockDestroyed { path: PathBuf },

    /// The record contains a different owner token: the lock was taken
    /// over. Fatal for the handle.
    #[error("lock '{}' contains another owner", .path.display())]
    LockWrongOwner { path: PathBuf },

    /// The heartbeat touch failed.
    #[error("cannot update lock '{}' time: {source}", .path.display())]
    CannotUpdateLock {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Deleting the record during release failed. The record may remain
    /// orphaned until a future takeover.
    #[error("cannot delete lock '{}': {source}", .path.display())]
    CannotDeleteLock {
        path: PathBuf,
        source: std::io::Error,
    },
}
