//! Owner token generation.

use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a collision-improbable owner token.
///
/// Combines a random value with a high-resolution timestamp so that
/// concurrently starting processes cannot produce the same token. Not
/// cryptographic; it only needs to be unique among cooperating processes
/// and stable for the handle's lifetime.
pub fn generate_owner_token() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("{:016x}.{}", rand::random::<u64>(), nanos)
}
