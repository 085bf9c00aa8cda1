//! Implementation of the `lockrun run` command.
//!
//! Acquires the lock, spawns the supervised command, refreshes the lock
//! on a heartbeat interval while the command runs, and releases the lock
//! when the command exits. If the lock is lost mid-run (destroyed or
//! taken over), exclusivity can no longer be assumed and the command is
//! killed.

use crate::cli::RunArgs;
use crate::error::{LockrunError, Result};
use crate::exit_codes;
use crate::lock::{AcquireOptions, ProcessLock};
use std::process::{Child, Command, ExitStatus};
use std::time::{Duration, Instant};

/// Child poll interval while waiting for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Execute the `lockrun run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let argv = shell_words::split(&args.command).map_err(|e| {
        LockrunError::UserError(format!("failed to parse command '{}': {}", args.command, e))
    })?;
    let (program, rest) = argv
        .split_first()
        .ok_or_else(|| LockrunError::UserError("empty command".to_string()))?;

    let lock = ProcessLock::acquire(
        &args.lock,
        AcquireOptions {
            ttl: Duration::from_secs(args.ttl),
            takeover: args.takeover,
            owner: args.owner.clone(),
        },
    )?;

    if !args.quiet {
        eprintln!(
            "lockrun: acquired '{}' as owner {}",
            lock.path().display(),
            lock.owner()
        );
    }

    // On spawn failure the handle is dropped here, which releases the lock.
    let mut child = Command::new(program).args(rest).spawn().map_err(|e| {
        LockrunError::UserError(format!("failed to spawn '{}': {}", program, e))
    })?;

    let status = supervise(&lock, &mut child, heartbeat(args.refresh_secs, args.ttl))?;

    lock.release()?;
    if !args.quiet {
        eprintln!("lockrun: released '{}'", args.lock.display());
    }

    if status.success() {
        Ok(())
    } else {
        Err(LockrunError::ChildFailed {
            status: status.code().unwrap_or(exit_codes::USER_ERROR),
        })
    }
}

/// Resolve the heartbeat interval.
///
/// Defaults to half the TTL (at least one second). Disabled when the
/// caller passes 0 or when the TTL is 0, since a zero-TTL record never
/// goes stale and needs no heartbeat.
fn heartbeat(refresh_secs: Option<u64>, ttl: u64) -> Option<Duration> {
    match refresh_secs {
        Some(0) => None,
        Some(n) => Some(Duration::from_secs(n)),
        None if ttl == 0 => None,
        None => Some(Duration::from_secs((ttl / 2).max(1))),
    }
}

/// Wait for the child to exit, refreshing the lock on the heartbeat.
///
/// A refresh failure means the lock is gone or stolen; the child is
/// killed and the lock failure is surfaced instead of the child status.
fn supervise(
    lock: &ProcessLock,
    child: &mut Child,
    heartbeat: Option<Duration>,
) -> Result<ExitStatus> {
    let mut last_refresh = Instant::now();

    loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|e| LockrunError::UserError(format!("failed to poll command: {}", e)))?
        {
            return Ok(status);
        }

        if let Some(every) = heartbeat
            && last_refresh.elapsed() >= every
        {
            if let Err(e) = lock.refresh() {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
            last_refresh = Instant::now();
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}
