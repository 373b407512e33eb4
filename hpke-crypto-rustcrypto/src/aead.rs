//! AEAD cipher implementations using the RustCrypto AEAD crates.

use aes_gcm::aead::{Aead as _, KeyInit, Payload};
use hpke_crypto::{Aead, AeadAlgorithm, Error, Result};

/// Create an AEAD cipher instance for the specified algorithm.
pub fn create_aead(algorithm: AeadAlgorithm) -> Result<Box<dyn Aead>> {
    match algorithm {
        AeadAlgorithm::Aes128Gcm => Ok(Box::new(Aes128GcmImpl)),
        AeadAlgorithm::Aes256Gcm => Ok(Box::new(Aes256GcmImpl)),
        AeadAlgorithm::ChaCha20Poly1305 => Ok(Box::new(ChaCha20Poly1305Impl)),
    }
}

fn check_lengths(alg: AeadAlgorithm, key: &[u8], nonce: &[u8]) -> Result<()> {
    if key.len() != alg.key_size() {
        return Err(Error::InvalidKeySize {
            expected: alg.key_size(),
            actual: key.len(),
        });
    }
    if nonce.len() != alg.nonce_size() {
        return Err(Error::InvalidNonceSize {
            expected: alg.nonce_size(),
            actual: nonce.len(),
        });
    }
    Ok(())
}

/// AES-128-GCM AEAD cipher.
///
/// - Key size: 16 bytes
/// - Nonce size: 12 bytes
/// - Authentication tag: 16 bytes
#[derive(Debug)]
struct Aes128GcmImpl;

impl Aead for Aes128GcmImpl {
    fn seal(&self, key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(self.algorithm(), key, nonce)?;

        let cipher = aes_gcm::Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::Internal("AES-128-GCM key init".to_string()))?;
        cipher
            .encrypt(
                aes_gcm::Nonce::from_slice(nonce),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| Error::CryptoError("AES-128-GCM encryption failed".to_string()))
    }

    fn open(&self, key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(self.algorithm(), key, nonce)?;
        if ciphertext.len() < self.algorithm().tag_size() {
            return Err(Error::InvalidLength);
        }

        let cipher = aes_gcm::Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::Internal("AES-128-GCM key init".to_string()))?;
        cipher
            .decrypt(
                aes_gcm::Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| Error::AuthenticationFailed)
    }

    fn algorithm(&self) -> AeadAlgorithm {
        AeadAlgorithm::Aes128Gcm
    }
}

/// AES-256-GCM AEAD cipher.
///
/// - Key size: 32 bytes
/// - Nonce size: 12 bytes
/// - Authentication tag: 16 bytes
#[derive(Debug)]
struct Aes256GcmImpl;

impl Aead for Aes256GcmImpl {
    fn seal(&self, key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(self.algorithm(), key, nonce)?;

        let cipher = aes_gcm::Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::Internal("AES-256-GCM key init".to_string()))?;
        cipher
            .encrypt(
                aes_gcm::Nonce::from_slice(nonce),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| Error::CryptoError("AES-256-GCM encryption failed".to_string()))
    }

    fn open(&self, key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(self.algorithm(), key, nonce)?;
        if ciphertext.len() < self.algorithm().tag_size() {
            return Err(Error::InvalidLength);
        }

        let cipher = aes_gcm::Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::Internal("AES-256-GCM key init".to_string()))?;
        cipher
            .decrypt(
                aes_gcm::Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| Error::AuthenticationFailed)
    }

    fn algorithm(&self) -> AeadAlgorithm {
        AeadAlgorithm::Aes256Gcm
    }
}

/// ChaCha20-Poly1305 AEAD cipher.
///
/// - Key size: 32 bytes
/// - Nonce size: 12 bytes
/// - Authentication tag: 16 bytes
#[derive(Debug)]
struct ChaCha20Poly1305Impl;

impl Aead for ChaCha20Poly1305Impl {
    fn seal(&self, key: &[u8], nonce: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(self.algorithm(), key, nonce)?;

        let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(key)
            .map_err(|_| Error::Internal("ChaCha20-Poly1305 key init".to_string()))?;
        cipher
            .encrypt(
                chacha20poly1305::Nonce::from_slice(nonce),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| Error::CryptoError("ChaCha20-Poly1305 encryption failed".to_string()))
    }

    fn open(&self, key: &[u8], nonce: &[u8], aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_lengths(self.algorithm(), key, nonce)?;
        if ciphertext.len() < self.algorithm().tag_size() {
            return Err(Error::InvalidLength);
        }

        let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(key)
            .map_err(|_| Error::Internal("ChaCha20-Poly1305 key init".to_string()))?;
        cipher
            .decrypt(
                chacha20poly1305::Nonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| Error::AuthenticationFailed)
    }

    fn algorithm(&self) -> AeadAlgorithm {
        AeadAlgorithm::ChaCha20Poly1305
    }
}
