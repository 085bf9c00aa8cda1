//! Exit code constants for the lockrun CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, spawn failure)
//! - 2: Lock busy (another instance is running)
//! - 3: Lock failure (environment problem or lost ownership)
//!
//! `lockrun run` propagates the supervised command's own exit status
//! when the command itself fails, so job exit codes survive the wrapper.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an unrunnable command.
pub const USER_ERROR: i32 = 1;

/// Lock busy: a valid previous lock exists, another instance is running.
pub const LOCK_BUSY: i32 = 2;

/// Lock failure: create/update/delete failed or ownership was lost.
pub const LOCK_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, LOCK_BUSY, LOCK_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_have_expected_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(LOCK_BUSY, 2);
        assert_eq!(LOCK_FAILURE, 3);
    }
}
