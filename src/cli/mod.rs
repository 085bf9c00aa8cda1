//! CLI argument parsing for lockrun.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lockrun: advisory file-based process lock for single-instance jobs.
///
/// A lock is one file: its content is the owner token, its modification
/// time is the heartbeat. A record older than the TTL is stale and can be
/// taken over; anything younger means another instance is running.
#[derive(Parser, Debug)]
#[command(name = "lockrun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lockrun.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command while holding the lock.
    ///
    /// Acquires the lock, spawns the command, refreshes the lock
    /// periodically while the command runs, and releases it afterwards.
    /// The command's exit status is propagated as-is, so a command that
    /// exits 2 or 3 is indistinguishable from lockrun's own busy/failure
    /// codes; commands needing that distinction should use other values.
    Run(RunArgs),

    /// Show the state of a lock record.
    ///
    /// Reports owner, last heartbeat, age, and (given --ttl) staleness.
    Status(StatusArgs),

    /// Remove an orphaned lock record.
    ///
    /// Requires --force to prevent accidental clearing.
    Clear(ClearArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the lock record.
    #[arg(long)]
    pub lock: PathBuf,

    /// Staleness threshold in seconds for an existing record.
    /// 0 means an existing record never goes stale.
    #[arg(long, default_value_t = 300)]
    pub ttl: u64,

    /// Take over a stale record instead of failing.
    #[arg(long)]
    pub takeover: bool,

    /// Owner token to store in the record. Generated when omitted.
    #[arg(long)]
    pub owner: Option<String>,

    /// Heartbeat interval in seconds. Defaults to half the TTL;
    /// 0 disables the heartbeat.
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Suppress informational output.
    #[arg(long)]
    pub quiet: bool,

    /// The command to run (parsed with shell quoting rules).
    pub command: String,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Path to the lock record.
    #[arg(long)]
    pub lock: PathBuf,

    /// Staleness threshold in seconds used to classify the record.
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Emit machine-readable JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `clear` command.
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Path to the lock record.
    #[arg(long)]
    pub lock: PathBuf,

    /// Force clearing the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_run_minimal() {
        let cli =
            Cli::try_parse_from(["lockrun", "run", "--lock", "/tmp/job.lock", "true"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.lock, PathBuf::from("/tmp/job.lock"));
            assert_eq!(args.ttl, 300);
            assert!(!args.takeover);
            assert!(args.owner.is_none());
            assert!(args.refresh_secs.is_none());
            assert!(!args.quiet);
            assert_eq!(args.command, "true");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_full() {
        let cli = Cli::try_parse_from([
            "lockrun",
            "run",
            "--lock",
            "/tmp/job.lock",
            "--ttl",
            "600",
            "--takeover",
            "--owner",
            "worker-1",
            "--refresh-secs",
            "30",
            "--quiet",
            "backup --verbose /srv/data",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.ttl, 600);
            assert!(args.takeover);
            assert_eq!(args.owner.as_deref(), Some("worker-1"));
            assert_eq!(args.refresh_secs, Some(30));
            assert!(args.quiet);
            assert_eq!(args.command, "backup --verbose /srv/data");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_requires_lock() {
        assert!(Cli::try_parse_from(["lockrun", "run", "true"]).is_err());
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from([
            "lockrun",
            "status",
            "--lock",
            "/tmp/job.lock",
            "--ttl",
            "300",
            "--json",
        ])
        .unwrap();
        if let Command::Status(args) = cli.command {
            assert_eq!(args.lock, PathBuf::from("/tmp/job.lock"));
            assert_eq!(args.ttl, Some(300));
            assert!(args.json);
        } else {
            panic!("Expected Status command");
        }
    }

    #[test]
    fn parse_clear() {
        let cli =
            Cli::try_parse_from(["lockrun", "clear", "--lock", "/tmp/job.lock", "--force"])
                .unwrap();
        if let Command::Clear(args) = cli.command {
            assert_eq!(args.lock, PathBuf::from("/tmp/job.lock"));
            assert!(args.force);
        } else {
            panic!("Expected Clear command");
        }
    }

    #[test]
    fn parse_clear_defaults_to_unforced() {
        let cli = Cli::try_parse_from(["lockrun", "clear", "--lock", "/tmp/job.lock"]).unwrap();
        if let Command::Clear(args) = cli.command {
            assert!(!args.force);
        } else {
            panic!("Expected Clear command");
        }
    }
}
