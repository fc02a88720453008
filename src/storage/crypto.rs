//! Reversible filename encryption with AES-256-GCM.
//!
//! Format: base64url(nonce_12bytes || ciphertext || tag_16bytes), no padding.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{AppError, Result};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Prefix of application keys stored as base64.
pub const BASE64_KEY_PREFIX: &str = "base64:";

/// Encrypts file names so stored names do not leak through served URLs.
#[derive(Clone)]
pub struct FilenameCipher {
    key: [u8; KEY_LEN],
}

impl Drop for FilenameCipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl FilenameCipher {
    /// Derive the cipher key from the application key.
    ///
    /// A `base64:` key is decoded first; any other key is used as raw text.
    pub fn new(app_key: &str) -> Self {
        match app_key.strip_prefix(BASE64_KEY_PREFIX).map(|b64| STANDARD.decode(b64.trim())) {
            Some(Ok(mut secret)) => {
                let cipher = Self::from_secret(&secret);
                secret.zeroize();
                cipher
            }
            _ => Self::from_secret(app_key.as_bytes()),
        }
    }

    /// Derive the cipher key from raw secret bytes.
    pub fn from_secret(secret: &[u8]) -> Self {
        let digest = Sha256::digest(secret);
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Encrypt a file name into a URL-safe token.
    pub fn encrypt(&self, name: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key).map_err(|_| AppError::encryption("Invalid key"))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, name.as_bytes())
            .map_err(|_| AppError::encryption("Encryption failed"))?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(&result))
    }

    /// Decrypt a token produced by [`FilenameCipher::encrypt`].
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let data = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| AppError::encryption("Invalid base64"))?;

        if data.len() < NONCE_LEN + TAG_LEN {
            return Err(AppError::encryption("Ciphertext too short"));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key).map_err(|_| AppError::encryption("Invalid key"))?;
        let nonce = Nonce::from_slice(&data[..NONCE_LEN]);

        let plaintext = cipher
            .decrypt(nonce, &data[NONCE_LEN..])
            .map_err(|_| AppError::encryption("Decryption failed (wrong key or tampered data)"))?;

        String::from_utf8(plaintext).map_err(|_| AppError::encryption("Decrypted name is not valid UTF-8"))
    }
}

impl std::fmt::Debug for FilenameCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilenameCipher").finish_non_exhaustive()
    }
}
