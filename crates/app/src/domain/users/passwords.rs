//! Password hashing.
//!
//! Hashes are argon2id PHC strings with a per-password random salt. The async
//! wrappers run on the blocking thread pool.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use tokio::task::{self, JoinError};
use zeroize::Zeroizing;

/// Password hashing errors.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// argon2 rejected the input or parameters.
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),

    /// The blocking task panicked or was cancelled.
    #[error("password hashing task failed")]
    Task(#[source] JoinError),
}

/// Hash a plaintext password.
///
/// # Errors
///
/// Returns an error if argon2 rejects its parameters or the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a plaintext password against a stored hash.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash).map_err(PasswordError::Hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::Hash(error)),
    }
}

pub(crate) async fn hash_password_blocking(
    password: Zeroizing<String>,
) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(PasswordError::Task)?
}

pub(crate) async fn verify_password_blocking(
    password: Zeroizing<String>,
    password_hash: String,
) -> Result<bool, PasswordError> {
    task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(PasswordError::Task)?
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_original_password() -> TestResult {
        let hash = hash_password("correct horse")?;

        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC string");
        assert!(verify_password("correct horse", &hash)?);

        Ok(())
    }

    #[test]
    fn hash_rejects_other_password() -> TestResult {
        let hash = hash_password("correct horse")?;

        assert!(!verify_password("battery staple", &hash)?);

        Ok(())
    }

    #[test]
    fn same_password_hashes_differently() -> TestResult {
        assert_ne!(hash_password("pw")?, hash_password("pw")?, "salt must vary");

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }
}
