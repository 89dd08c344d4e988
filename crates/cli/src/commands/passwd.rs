//! Demo password utilities.
//!
//! These work with the back-office's placeholder encoding (`hashed:` prefix
//! plus base64). It is not a security mechanism; these tools exist to mint
//! and check demo credentials.

use tillpoint_backoffice::services::auth::password::{
    encode_password, generate_password, verify_password,
};

/// Encode a password with the placeholder scheme.
#[allow(clippy::print_stdout)]
pub fn encode(password: &str) {
    println!("{}", encode_password(password));
}

/// Check a password against an encoded value.
#[allow(clippy::print_stdout)]
pub fn verify(encoded: &str, password: &str) {
    if verify_password(encoded, password) {
        println!("match");
    } else {
        println!("no match");
    }
}

/// Generate a temporary password.
#[allow(clippy::print_stdout)]
pub fn generate(length: usize) {
    println!("{}", generate_password(length));
}
