//! Command implementations for lockrun.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod clear;
mod run;
mod status;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Status(args) => status::cmd_status(args),
        Command::Clear(args) => clear::cmd_clear(args),
    }
}
