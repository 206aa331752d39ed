//! Operator credential check.
//!
//! The vault has exactly one operator. Their email and password come from
//! configuration and are compared in constant time on every login.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Rejected operator credential configuration.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("VAULT_EMAIL must not be empty")]
    EmptyEmail,

    #[error("VAULT_PASSWORD must not be empty")]
    EmptyPassword,
}

/// The single email/password pair allowed to log in.
///
/// Neither half may be blank: an unreadable login body is checked as two empty
/// strings and must never match. `Debug` prints the email only.
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(
        email: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, CredentialsError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if password.expose_secret().trim().is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }

        Ok(Self { email, password })
    }

    /// Exact, case-sensitive match of both fields.
    ///
    /// Both comparisons always run so timing does not reveal which one failed.
    /// `ct_eq` returns false for unequal lengths without an early exit.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let email_ok = self.email.as_bytes().ct_eq(email.as_bytes());
        let password_ok = self
            .password
            .expose_secret()
            .as_bytes()
            .ct_eq(password.as_bytes());

        (email_ok & password_ok).into()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
