//! AEAD (Authenticated Encryption with Associated Data) interface.

use crate::Result;

/// AEAD algorithms supported for HPKE.
///
/// These are the three AEADs registered for HPKE in RFC 9180; all of
/// them use a 16-byte authentication tag and a 12-byte nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadAlgorithm {
    /// AES-128-GCM
    Aes128Gcm,
    /// AES-256-GCM
    Aes256Gcm,
    /// ChaCha20-Poly1305
    ChaCha20Poly1305,
}

impl AeadAlgorithm {
    /// Get the key size in bytes.
    pub const fn key_size(self) -> usize {
        match self {
            AeadAlgorithm::Aes128Gcm => 16,
            AeadAlgorithm::Aes256Gcm => 32,
            AeadAlgorithm::ChaCha20Poly1305 => 32,
        }
    }

    /// Get the nonce size in bytes.
    pub const fn nonce_size(self) -> usize {
        match self {
            AeadAlgorithm::Aes128Gcm
            | AeadAlgorithm::Aes256Gcm
            | AeadAlgorithm::ChaCha20Poly1305 => 12,
        }
    }

    /// Get the authentication tag size in bytes.
    pub const fn tag_size(self) -> usize {
        match self {
            AeadAlgorithm::Aes128Gcm
            | AeadAlgorithm::Aes256Gcm
            | AeadAlgorithm::ChaCha20Poly1305 => 16,
        }
    }

    /// Get the name of this AEAD algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            AeadAlgorithm::Aes128Gcm => "AES-128-GCM",
            AeadAlgorithm::Aes256Gcm => "AES-256-GCM",
            AeadAlgorithm::ChaCha20Poly1305 => "ChaCha20-Poly1305",
        }
    }
}

/// AEAD cipher trait.
///
/// Implementations must be single-shot: each call takes the full key,
/// nonce, associated data and message, and produces the full output.
/// Ciphertext is always `plaintext || tag`.
pub trait Aead: Send + Sync {
    /// Encrypt a message.
    ///
    /// # Arguments
    ///
    /// * `key` - Encryption key (must be exactly `key_size` bytes)
    /// * `nonce` - Nonce (must be exactly `nonce_size` bytes)
    /// * `aad` - Associated authenticated data (may be empty)
    /// * `plaintext` - Data to encrypt
    ///
    /// # Returns
    ///
    /// Ciphertext with the authentication tag appended; the output is
    /// exactly `plaintext.len() + tag_size` bytes.
    fn seal(&self, key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a message.
    ///
    /// # Arguments
    ///
    /// * `key` - Decryption key (must be exactly `key_size` bytes)
    /// * `nonce` - Nonce (must be exactly `nonce_size` bytes)
    /// * `aad` - Associated authenticated data
    /// * `ciphertext` - Data to decrypt, including the trailing tag
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`](crate::Error::AuthenticationFailed)
    /// when tag verification fails. Malformed inputs (e.g. ciphertext
    /// shorter than the tag) are reported distinctly.
    fn open(&self, key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Get the algorithm this cipher implements.
    fn algorithm(&self) -> AeadAlgorithm;
}
