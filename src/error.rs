//! Error types for the lockrun CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error
//! messages. The lock subsystem has its own classified error taxonomy
//! ([`LockError`]); this type wraps it and maps each failure to an exit
//! code.

use crate::exit_codes;
use crate::lock::LockError;
use thiserror::Error;

/// Main error type for lockrun operations.
#[derive(Error, Debug)]
pub enum LockrunError {
    /// User provided invalid arguments or asked for something impossible.
    #[error("{0}")]
    UserError(String),

    /// A lock operation failed; the variant carries the classification.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// The supervised command ran but exited unsuccessfully. The child's
    /// own exit status is propagated.
    #[error("command exited with status {status}")]
    ChildFailed { status: i32 },
}

impl LockrunError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// `PreviousLockValid` gets its own code so cron wrappers can tell
    /// "another instance is running" apart from real failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockrunError::UserError(_) => exit_codes::USER_ERROR,
            LockrunError::Lock(LockError::PreviousLockValid { .. }) => exit_codes::LOCK_BUSY,
            LockrunError::Lock(_) => exit_codes::LOCK_FAILURE,
            LockrunError::ChildFailed { status } => *status,
        }
    }
}

/// Result type alias for lockrun operations.
pub type Result<T> = std::result::Result<T, LockrunError>;
