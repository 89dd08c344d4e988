//! Placeholder password encoding.
//!
//! The demo system stores passwords base64-encoded with a `hashed:` prefix.
//! This is an explicit stand-in, not a security mechanism: the credentials
//! are public demo data and the encoding is reversible by design.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

/// Prefix baked into every encoding so stale values are recognizable.
const ENCODING_PREFIX: &str = "hashed:";

/// Character set for generated temporary passwords.
const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Encode a password for storage in the credential table.
#[must_use]
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(format!("{ENCODING_PREFIX}{password}"))
}

/// Check a plain password against a stored encoding.
#[must_use]
pub fn verify_password(encoded: &str, password: &str) -> bool {
    STANDARD.decode(encoded).is_ok_and(|decoded| {
        decoded == format!("{ENCODING_PREFIX}{password}").as_bytes()
    })
}

/// Generate a random temporary password of the given length.
#[must_use]
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let index = rng.random_range(0..PASSWORD_CHARSET.len());
            char::from(*PASSWORD_CHARSET.get(index).unwrap_or(&b'x'))
        })
        .collect()
}
