//! Lock acquisition and lifecycle.

use super::error::LockError;
use super::token::generate_owner_token;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Options controlling lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct AcquireOptions {
    /// Staleness threshold for an existing record. A record older than
    /// this is eligible for takeover. Zero disables the staleness check:
    /// any existing record is treated as valid.
    pub ttl: Duration,

    /// Destroy a stale record instead of failing with
    /// [`LockError::LockAlreadyExists`].
    pub takeover: bool,

    /// Owner token stored in the record. Generated when `None` or empty.
    pub owner: Option<String>,
}

/// A held advisory lock over one filesystem record.
///
/// Constructed by [`ProcessLock::acquire`]; the caller owns exactly one
/// handle per protected path and drives it from a single call sequence
/// (acquire, periodic [`ProcessLock::refresh`], [`ProcessLock::release`]).
/// Ownership is content equality between the record and the handle's
/// owner token, re-checked on every call because other processes can
/// change the filesystem between calls.
///
/// Dropping a handle that was not explicitly released attempts the same
/// validate-then-delete sequence, so the lock is released on every exit
/// path including unwind.
#[derive(Debug)]
pub struct ProcessLock {
    /// Location of the lock record.
    path: PathBuf,

    /// Unique token identifying this handle's owner.
    owner: String,

    /// Whether the lock has been released explicitly.
    released: bool,
}

impl ProcessLock {
    /// Acquire the lock at `path`.
    ///
    /// Creation uses exclusive-create semantics, so two processes racing
    /// for the same path after both observing a stale record cannot both
    /// win: the loser sees the winner's fresh record and fails with
    /// [`LockError::PreviousLockValid`].
    ///
    /// # Errors
    ///
    /// * [`LockError::PreviousLockValid`] - a record exists and is younger
    ///   than the TTL (or the TTL is zero): another instance is running.
    /// * [`LockError::LockAlreadyExists`] - a stale record exists and
    ///   `takeover` is false.
    /// * [`LockError::CannotDestroyPreviousLock`] - deleting the stale
    ///   record failed.
    /// * [`LockError::CannotCreateLock`] - writing the new record failed.
    pub fn acquire(path: impl AsRef<Path>, options: AcquireOptions) -> Result<Self, LockError> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(LockError::CannotCreateLock {
                path,
                source: io::Error::new(ErrorKind::InvalidInput, "empty lock path"),
            });
        }

        let owner = match options.owner {
            Some(owner) if !owner.is_empty() => owner,
            _ => generate_owner_token(),
        };

        match create_record(&path, &owner) {
            Ok(()) => {
                return Ok(Self {
                    path,
                    owner,
                    released: false,
                });
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(LockError::CannotCreateLock { path, source: e }),
        }

        // A record exists; decide whether it still governs the path.
        // A record that vanishes between the create attempt and the stat
        // is treated as absent and the create is retried below.
        match record_age(&path) {
            Ok(Some(age)) => {
                if options.ttl.is_zero() || age < options.ttl {
                    return Err(LockError::PreviousLockValid {
                        path,
                        age,
                        ttl: options.ttl,
                    });
                }
                if !options.takeover {
                    return Err(LockError::LockAlreadyExists { path });
                }
                if let Err(e) = fs::remove_file(&path)
                    && e.kind() != ErrorKind::NotFound
                {
                    return Err(LockError::CannotDestroyPreviousLock { path, source: e });
                }
            }
            Ok(None) => {}
            Err(e) => return Err(LockError::CannotCreateLock { path, source: e }),
        }

        match create_record(&path, &owner) {
            Ok(()) => Ok(Self {
                path,
                owner,
                released: false,
            }),
            // Another process re-created the record inside the takeover
            // window. Its record is brand new and therefore valid.
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(LockError::PreviousLockValid {
                path,
                age: Duration::ZERO,
                ttl: options.ttl,
            }),
            Err(e) => Err(LockError::CannotCreateLock { path, source: e }),
        }
    }

    /// Path of the lock record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// This handle's owner token.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Check that the record still exists and still contains this
    /// handle's owner token.
    ///
    /// Precondition for both [`ProcessLock::refresh`] and
    /// [`ProcessLock::release`]; re-run on every call because other
    /// processes can change the record between calls.
    ///
    /// # Errors
    ///
    /// * [`LockError::LockDestroyed`] - the record is gone.
    /// * [`LockError::LockWrongOwner`] - the record holds another token
    ///   (or can no longer be read, so ownership cannot be confirmed).
    pub fn validate(&self) -> Result<(), LockError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LockError::LockDestroyed {
                    path: self.path.clone(),
                });
            }
            Err(_) => {
                return Err(LockError::LockWrongOwner {
                    path: self.path.clone(),
                });
            }
        };

        if content != self.owner {
            return Err(LockError::LockWrongOwner {
                path: self.path.clone(),
            });
        }

        Ok(())
    }

    /// Update the record's modification time to now.
    ///
    /// Called periodically from a long-running loop to keep the lock
    /// alive past its TTL. Validates first; validation failures propagate
    /// unchanged. Content is left untouched.
    ///
    /// # Errors
    ///
    /// Validation errors, or [`LockError::CannotUpdateLock`] when the
    /// touch itself fails.
    pub fn refresh(&self) -> Result<(), LockError> {
        self.validate()?;

        OpenOptions::new()
            .write(true)
            .open(&self.path)
            .and_then(|file| file.set_modified(SystemTime::now()))
            .map_err(|e| LockError::CannotUpdateLock {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Release the lock, deleting the record.
    ///
    /// Validates first; if the lock was already destroyed or stolen that
    /// failure is surfaced and nothing is deleted - there is nothing
    /// legitimate left to delete. Consumes the handle either way, so
    /// release happens at most once.
    ///
    /// # Errors
    ///
    /// Validation errors, or [`LockError::CannotDeleteLock`] when the
    /// delete fails (the record may remain orphaned until a future
    /// takeover).
    pub fn release(mut self) -> Result<(), LockError> {
        // The caller is handling the outcome explicitly; drop must not
        // attempt a second delete.
        self.released = true;

        self.validate()?;

        fs::remove_file(&self.path).map_err(|e| LockError::CannotDeleteLock {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl Drop for ProcessLock {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        match self.validate() {
            Ok(()) => {
                if let Err(e) = fs::remove_file(&self.path) {
                    eprintln!(
                        "Warning: failed to release lock '{}': {}",
                        self.path.display(),
                        e
                    );
                }
            }
            Err(e) => {
                eprintln!(
                    "Warning: not releasing lock '{}': {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Exclusively create the record and write the owner token.
fn create_record(path: &Path, owner: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;

    if let Err(e) = file.write_all(owner.as_bytes()).and_then(|_| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(e);
    }

    // 0666 so cooperating processes under other users can remove a stale
    // record. Best effort, matching the advisory nature of the lock.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o666));
    }

    Ok(())
}

/// Age of the record at `path`, or `None` when no record exists.
fn record_age(path: &Path) -> io::Result<Option<Duration>> {
    let modified = match fs::metadata(path) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    // A record with a future mtime reads as age zero.
    Ok(Some(
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO),
    ))
}
