//! Identifier generation

use chrono::Utc;

/// Generate a fresh identifier: millisecond timestamp plus a random hex
/// suffix.
///
/// Collision-safe within a session, which is the only uniqueness scope this
/// store needs; ids are never compared across machines.
#[must_use]
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u16 = rand::random();

    format!("{millis:x}-{suffix:04x}")
}
