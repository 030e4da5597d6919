//! Bearer token format: `sf_v1_<token uuid>.<64 hex secret>`.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Bearer token prefix.
pub const API_TOKEN_PREFIX: &str = "sf";

/// Number of random secret bytes carried by a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

/// Token format version, stored with every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    /// `sf_v1_<uuid>.<hex secret>`
    V1,
}

impl ApiTokenVersion {
    /// Storage representation.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// Random secret half of a bearer token. Zeroed on drop.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    /// Fresh secret from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    /// Wrap raw secret bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    /// Raw secret bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.0
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token split into its parts.
#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    /// Row id of the stored token.
    pub token_uuid: Uuid,
    /// Format version.
    pub version: ApiTokenVersion,
    /// Secret checked against the stored verifier.
    pub secret: ApiTokenSecret,
}

impl ParsedApiToken {
    /// Render the token in its wire form.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{API_TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.token_uuid.simple(),
            encode_hex(self.secret.as_bytes())
        )
    }

    /// Bytes fed to the HMAC: `{token uuid}:{version}:{user uuid}:{secret}`.
    #[must_use]
    pub fn verifier_input(&self, user: UserUuid) -> Vec<u8> {
        format!(
            "{}:{}:{}:{}",
            self.token_uuid.simple(),
            self.version.as_i16(),
            user.into_uuid().simple(),
            encode_hex(self.secret.as_bytes()),
        )
        .into_bytes()
    }
}

impl FromStr for ParsedApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (head, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

        let mut segments = head.splitn(3, '_');

        let (Some(prefix), Some(version), Some(token_uuid)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(ApiTokenError::InvalidFormat);
        };

        if prefix != API_TOKEN_PREFIX {
            return Err(ApiTokenError::InvalidFormat);
        }

        let version = version.parse::<ApiTokenVersion>()?;
        let token_uuid = Uuid::try_parse(token_uuid)
            .ok()
            .ok_or(ApiTokenError::InvalidFormat)?;

        let secret: [u8; API_TOKEN_SECRET_BYTES] = decode_hex(secret_hex)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(ApiTokenError::InvalidSecretEncoding)?;

        Ok(Self {
            token_uuid,
            version,
            secret: ApiTokenSecret::from_bytes(secret),
        })
    }
}

/// Errors parsing a bearer token.
#[derive(Debug, Error)]
pub enum ApiTokenError {
    /// Wrong prefix, separators or UUID.
    #[error("api token format is invalid")]
    InvalidFormat,

    /// Unknown version segment.
    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    /// Secret is not 64 hex digits.
    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);

    for nibble in bytes.iter().flat_map(|byte| [byte >> 4, byte & 0x0f]) {
        encoded.extend(char::from_digit(u32::from(nibble), 16));
    }

    encoded
}

pub(crate) fn decode_hex(encoded: &str) -> Option<Vec<u8>> {
    if encoded.len() % 2 != 0 {
        return None;
    }

    encoded
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| match pair {
            [hi, lo] => Some((decode_nibble(*hi)? << 4) | decode_nibble(*lo)?),
            _ => None,
        })
        .collect()
}

fn decode_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn token() -> ParsedApiToken {
        ParsedApiToken {
            token_uuid: Uuid::now_v7(),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]),
        }
    }

    #[test]
    fn formatted_token_parses_back() -> TestResult {
        let original = token();

        let parsed = original.format().parse::<ParsedApiToken>()?;

        assert_eq!(parsed.token_uuid, original.token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), original.secret.as_bytes());

        Ok(())
    }

    #[test]
    fn formatted_token_has_expected_shape() {
        let formatted = token().format();

        assert!(formatted.starts_with("sf_v1_"), "got {formatted}");
        assert_eq!(
            formatted.split_once('.').map(|(_, secret)| secret.len()),
            Some(64),
            "secret should be 64 hex chars"
        );
    }

    #[test]
    fn parse_rejects_foreign_prefix() {
        let formatted = token().format().replacen("sf_", "lt_", 1);

        assert!(matches!(
            formatted.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let formatted = token().format().replacen("_v1_", "_v9_", 1);

        assert!(matches!(
            formatted.parse::<ParsedApiToken>(),
            Err(ApiTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        let formatted = format!("sf_v1_{}.abcd", Uuid::now_v7().simple());

        assert!(matches!(
            formatted.parse::<ParsedApiToken>(),
            Err(ApiTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not-a-token".parse::<ParsedApiToken>().is_err(), "garbage parsed");
        assert!("".parse::<ParsedApiToken>().is_err(), "empty string parsed");
    }

    #[test]
    fn verifier_input_depends_on_user() {
        let token = token();

        let first = token.verifier_input(UserUuid::new());
        let second = token.verifier_input(UserUuid::new());

        assert_ne!(first, second, "verifier input must bind the user");
    }

    #[test]
    fn hex_decoding_rejects_non_hex() {
        assert_eq!(decode_hex("zz"), None);
        assert_eq!(decode_hex("abc"), None);
        assert_eq!(decode_hex("0aFf"), Some(vec![0x0a, 0xff]));
    }
}
