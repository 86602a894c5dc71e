//! Password hashing and verification.
//!
//! Digests are Argon2id PHC strings with a random per-password salt, so the
//! same plaintext never hashes to the same value twice.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a plaintext password into a digest that is safe to persist.
#[instrument(name = "credentials::hash_password", skip(plaintext), err(Display))]
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);

    match Argon2::default().hash_password(plaintext.as_bytes(), &salt) {
        Ok(digest) => {
            debug!("Password hashed successfully");
            Ok(digest.to_string())
        }
        Err(argon_err) => {
            error!(error = %argon_err, "Argon2 password hashing failed");
            Err(CredentialError::Hashing(argon_err.to_string()))
        }
    }
}

/// Check a plaintext password against a stored digest.
///
/// A mismatch is `false`. So is a stored digest that cannot be parsed; that
/// case is logged since it means the row was not written by [`hash_password`].
#[instrument(name = "credentials::verify_password", skip_all, fields(digest_len = digest.len()))]
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(parse_err) => {
            error!(error = %parse_err, "Stored password digest is malformed");
            return false;
        }
    };

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => {
            debug!("Password verification succeeded");
            true
        }
        Err(argon2::password_hash::Error::Password) => {
            debug!("Password verification failed: passwords do not match");
            false
        }
        Err(other) => {
            warn!(error = %other, "Password verification encountered an error");
            false
        }
    }
}
