//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. When unset the
///   server keeps records and sessions in memory.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `ENCRYPTION_KEY` (required): 64 hex characters, or a passphrase
/// - `VAULT_EMAIL` / `VAULT_PASSWORD` (required): the operator login
/// - `COOKIE_SECURE` (optional): mark the session cookie `Secure`, defaults to false
/// - `SESSION_INACTIVITY_HOURS` (optional): session lifetime since last use, defaults to 168
/// - `PUBLIC_DIR` (optional): browser assets directory, defaults to `public`
#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    pub encryption_key: String,

    pub vault_email: String,

    #[serde(deserialize_with = "secret_string")]
    pub vault_password: SecretString,

    #[serde(default)]
    pub cookie_secure: bool,

    #[serde(default = "default_session_inactivity_hours")]
    pub session_inactivity_hours: u64,

    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

/// Wrap the value as soon as it is read so no plain copy outlives parsing.
fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// One week.
fn default_session_inactivity_hours() -> u64 {
    24 * 7
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., ENCRYPTION_KEY)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: encryption_key -> ENCRYPTION_KEY
        envy::from_env::<Config>()
    }
}

// Hand-written so the key and password never reach a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("server_port", &self.server_port)
            .field("encryption_key", &"[REDACTED]")
            .field("vault_email", &self.vault_email)
            .field("vault_password", &"[REDACTED]")
            .field("cookie_secure", &self.cookie_secure)
            .field("session_inactivity_hours", &self.session_inactivity_hours)
            .field("public_dir", &self.public_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(vars(&[
            ("ENCRYPTION_KEY", "passphrase"),
            ("VAULT_EMAIL", "me@example.com"),
            ("VAULT_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.server_port, 3000);
        assert!(!config.cookie_secure);
        assert_eq!(config.session_inactivity_hours, 168);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.vault_password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let result = envy::from_iter::<_, Config>(vars(&[("ENCRYPTION_KEY", "passphrase")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://user:pw@localhost/vault"),
            ("ENCRYPTION_KEY", "super-secret-key"),
            ("VAULT_EMAIL", "me@example.com"),
            ("VAULT_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("user:pw"));
        assert!(rendered.contains("me@example.com"));
    }
}
