//! Content fingerprints for snapshots.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::SessionResult;
use crate::schema::{AlloyStore, Configurations, SessionSnapshot};

#[derive(Serialize)]
struct FingerprintInput<'a> {
    configurations: &'a Configurations,
    alloy_store: &'a AlloyStore,
}

/// Hex SHA-256 over configuration and alloys; the capture time is ignored.
pub fn fingerprint(snapshot: &SessionSnapshot) -> SessionResult<String> {
    let input = FingerprintInput {
        configurations: &snapshot.configurations,
        alloy_store: &snapshot.alloy_store,
    };

    let mut hasher = Sha256::new();
    let json = serde_json::to_string(&input)?;
    hasher.update(json.as_bytes());

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}

/// First `len` hex digits, for compact listings.
pub fn short_fingerprint(snapshot: &SessionSnapshot, len: usize) -> SessionResult<String> {
    let mut full = fingerprint(snapshot)?;
    full.truncate(len);
    Ok(full)
}
