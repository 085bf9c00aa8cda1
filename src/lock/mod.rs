//! Process lock over a single filesystem record.
//!
//! This module implements advisory mutual exclusion for independent
//! processes (typically cron-style jobs) that must not run more than one
//! live instance at a time:
//! - A lock is one file at a caller-supplied path.
//! - The file content is the owner token, raw text with no framing.
//! - The file modification time is the liveness heartbeat: a record older
//!   than the caller's TTL is stale and eligible for takeover.
//!
//! # Lock Records
//!
//! Records are created with **create_new** semantics (exclusive create) so
//! two processes racing for the same path cannot both believe they won.
//! After creation the record is chmod'd to 0666 (best effort) so a
//! cooperating process under another user can still remove a stale record.
//!
//! # Lifecycle
//!
//! `Unacquired -> Held` on a successful [`ProcessLock::acquire`],
//! `Held -> Released` on [`ProcessLock::release`], and
//! `Held -> Invalidated` when another actor deletes or overwrites the
//! record (detected lazily by the next validate/refresh/release call,
//! never silently). `Released` and `Invalidated` are terminal.
//!
//! # Guaranteed Release
//!
//! [`ProcessLock`] releases on drop. If the record can no longer be
//! deleted (or is no longer ours) during drop, a warning is printed but
//! the program does not crash. Callers that care about release errors
//! call [`ProcessLock::release`] explicitly.

mod error;
mod handle;
mod record;
mod token;


// Re-export public API
pub use error::LockError;
pub use handle::{AcquireOptions, ProcessLock};
pub use record::{RecordInfo, inspect};
pub use token::generate_owner_token;
