//! User Data

use std::fmt;

use zeroize::Zeroizing;

/// New User Data
#[derive(Clone, PartialEq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Compared case-insensitively.
    pub email: String,
    /// Plaintext; hashed before storage.
    pub password: Zeroizing<String>,
    /// Default delivery location.
    pub location: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("location", &self.location)
            .finish()
    }
}

/// Login Data
#[derive(Clone, PartialEq)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: Zeroizing<String>,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Emails are matched case-insensitively and stored lowercased.
#[must_use]
pub fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}
