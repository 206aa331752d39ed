//! Encryption of stored API keys.
//!
//! Every API key is encrypted with **AES-256-GCM** before it reaches the store,
//! using one process-wide key taken from `ENCRYPTION_KEY`. Each encryption draws a
//! fresh 12-byte nonce, so encrypting the same secret twice yields different
//! ciphertexts.
//!
//! # Stored Format
//!
//! The value persisted in `encrypted_key` is lowercase hex of `nonce || ciphertext`
//! (the GCM tag is the trailing 16 bytes of the ciphertext).
//!
//! # Failure Mode
//!
//! A wrong key, a truncated or tampered value, or plaintext that is not UTF-8 is
//! reported as a [`CryptoError`]. Decryption never yields partial plaintext.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use rand::RngCore;
use sha2::{Digest, Sha256};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Errors raised by [`KeyCipher`].
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// `ENCRYPTION_KEY` was empty.
    #[error("encryption key must not be empty")]
    EmptyKey,

    /// The cipher refused to encrypt (should not happen for in-memory input).
    #[error("encryption failed")]
    Encrypt,

    /// Stored value is not hex, or too short to hold a nonce and tag.
    #[error("stored ciphertext is malformed")]
    Malformed,

    /// Authentication tag did not verify: wrong key or tampered data.
    #[error("decryption failed")]
    Decrypt,

    /// Decrypted bytes are not valid UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,
}

/// Symmetric cipher bound to the process-wide key.
#[derive(Clone)]
pub struct KeyCipher {
    cipher: Aes256Gcm,
}

impl KeyCipher {
    /// Build a cipher from the configured key value.
    ///
    /// 64 hex characters are used directly as the 32-byte key. Anything else is
    /// treated as a passphrase and hashed with SHA-256.
    pub fn from_config_value(value: &str) -> Result<Self, CryptoError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CryptoError::EmptyKey);
        }

        let key = match hex::decode(value) {
            Ok(bytes) if bytes.len() == KEY_LEN => bytes,
            _ => {
                tracing::warn!(
                    "ENCRYPTION_KEY is not 64 hex characters; deriving the key with SHA-256"
                );
                Sha256::digest(value.as_bytes()).to_vec()
            }
        };

        Ok(Self::from_key_bytes(&key))
    }

    fn from_key_bytes(key: &[u8]) -> Self {
        // Length is fixed by the callers above
        let cipher = Aes256Gcm::new(aes_gcm::Key::<Aes256Gcm>::from_slice(key));
        Self { cipher }
    }

    /// Encrypt a plaintext secret into its stored hex form.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Encrypt)?;

        let mut stored = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        stored.extend_from_slice(&nonce_bytes);
        stored.extend_from_slice(&ciphertext);

        Ok(hex::encode(stored))
    }

    /// Decrypt a stored hex value back to the plaintext secret.
    pub fn decrypt(&self, stored: &str) -> Result<String, CryptoError> {
        let bytes = hex::decode(stored).map_err(|_| CryptoError::Malformed)?;
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(CryptoError::Malformed);
        }

        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::Decrypt)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

impl std::fmt::Debug for KeyCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyCipher([REDACTED])")
    }
}
