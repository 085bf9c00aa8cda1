//! Implementation of the `lockrun clear` command.
//!
//! Removes an orphaned lock record left behind by a crashed holder.
//! The caller is responsible for being certain the holder is gone, which
//! is why --force is required.

use crate::cli::ClearArgs;
use crate::error::{LockrunError, Result};
use crate::lock::inspect;
use std::fs;

/// Execute the `lockrun clear` command.
pub fn cmd_clear(args: ClearArgs) -> Result<()> {
    if !args.force {
        return Err(LockrunError::UserError(format!(
            "refusing to clear lock without --force flag.\n\n\
             Clearing a lock that a live process still holds defeats the mutual\n\
             exclusion it provides. Only clear locks when you are certain the\n\
             holder has crashed.\n\n\
             To clear the lock, run:\n  lockrun clear --lock {} --force",
            args.lock.display()
        )));
    }

    // Read the record before removing so the details can be reported.
    let record = inspect(&args.lock)
        .map_err(|e| {
            LockrunError::UserError(format!(
                "failed to read lock '{}': {}",
                args.lock.display(),
                e
            ))
        })?
        .ok_or_else(|| {
            LockrunError::UserError(format!("no lock present at {}", args.lock.display()))
        })?;

    fs::remove_file(&args.lock).map_err(|e| {
        LockrunError::UserError(format!(
            "failed to clear lock '{}': {}",
            args.lock.display(),
            e
        ))
    })?;

    println!("Cleared lock: {}", args.lock.display());
    println!("  Owner:      {}", record.owner);
    println!(
        "  Heartbeat:  {}",
        record.modified.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Age:        {}", record.age_string());

    Ok(())
}
