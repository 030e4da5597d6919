//! HMAC-SHA256 verifiers for token secrets.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::auth::token::{decode_hex, encode_hex};

type HmacSha256 = Hmac<Sha256>;

/// Shortest accepted server secret, in bytes.
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Computes and checks token verifiers with the server-side secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: Zeroizing<Vec<u8>>,
}

impl TokenSigner {
    /// Build a signer from the configured secret.
    ///
    /// # Errors
    ///
    /// Returns [`SignerError::KeyTooShort`] when the secret is shorter than
    /// [`MIN_SIGNING_KEY_BYTES`].
    pub fn new(key: &[u8]) -> Result<Self, SignerError> {
        if key.len() < MIN_SIGNING_KEY_BYTES {
            return Err(SignerError::KeyTooShort {
                length: key.len(),
                minimum: MIN_SIGNING_KEY_BYTES,
            });
        }

        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
        })
    }

    /// Hex-encoded HMAC of `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAC cannot be keyed.
    pub fn sign(&self, input: &[u8]) -> Result<String, SignerError> {
        let mut mac = self.mac()?;

        mac.update(input);

        Ok(encode_hex(&mac.finalize().into_bytes()))
    }

    /// Constant-time comparison of `input` against a stored verifier.
    ///
    /// A verifier that is not valid hex never matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAC cannot be keyed.
    pub fn verify(&self, input: &[u8], verifier: &str) -> Result<bool, SignerError> {
        let Some(expected) = decode_hex(verifier) else {
            return Ok(false);
        };

        let mut mac = self.mac()?;

        mac.update(input);

        Ok(mac.verify_slice(&expected).is_ok())
    }

    fn mac(&self) -> Result<HmacSha256, SignerError> {
        HmacSha256::new_from_slice(&self.key).map_err(SignerError::InvalidKey)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSigner(**redacted**)")
    }
}

/// Errors building or using a [`TokenSigner`].
#[derive(Debug, Error)]
pub enum SignerError {
    /// Configured secret is too short.
    #[error("signing key is {length} bytes, at least {minimum} required")]
    KeyTooShort { length: usize, minimum: usize },

    /// The MAC rejected the key.
    #[error("signing key rejected")]
    InvalidKey(#[source] hmac::digest::InvalidLength),
}
