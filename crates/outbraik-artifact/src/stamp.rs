//! Canonical serialization and the SHA-256 content stamp.
//!
//! The hash always covers the payload *without* its `sha256` field: the
//! stamper strips the field before hashing, and a verifier must do the same,
//! never feeding the stored hash into its own input.

use outbraik_types::ForecastResult;
use sha2::{Digest, Sha256};

/// Serializes a result to its canonical byte sequence.
///
/// Canonical form: compact JSON with lexicographically sorted object keys
/// (`serde_json`'s default map ordering) and `serde_json`'s deterministic
/// shortest-round-trip float formatting, with any `sha256` field removed.
///
/// # Errors
///
/// Returns the underlying serialization error, which for this payload shape
/// does not occur in practice.
pub fn canonical_bytes(result: &ForecastResult) -> Result<Vec<u8>, serde_json::Error> {
    let mut value = serde_json::to_value(result)?;
    if let Some(object) = value.as_object_mut() {
        object.remove("sha256");
    }
    Ok(value.to_string().into_bytes())
}

/// Computes the SHA-256 content hash of a result's canonical form, as 64
/// lowercase hex characters.
///
/// # Errors
///
/// Propagates [`canonical_bytes`] errors.
pub fn content_hash(result: &ForecastResult) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(canonical_bytes(result)?);
    Ok(hex::encode(hasher.finalize()))
}

/// Attaches the content hash to a result. The result is immutable from the
/// caller's point of view once stamped.
///
/// # Errors
///
/// Propagates [`canonical_bytes`] errors.
pub fn stamp(result: &mut ForecastResult) -> Result<(), serde_json::Error> {
    result.sha256 = Some(content_hash(result)?);
    Ok(())
}

/// Recomputes a result's content hash and compares it with the stored stamp.
///
/// Returns `false` for an unstamped result.
///
/// # Errors
///
/// Propagates [`canonical_bytes`] errors.
pub fn verify(result: &ForecastResult) -> Result<bool, serde_json::Error> {
    match &result.sha256 {
        Some(stored) => Ok(content_hash(result)? == *stored),
        None => Ok(false),
    }
}
