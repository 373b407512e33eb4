//! # RustCrypto provider for the HPKE engine
//!
//! Implements the [`hpke_crypto`] contracts with the RustCrypto
//! ecosystem:
//!
//! - AEAD: `aes-gcm`, `chacha20poly1305`
//! - KDF: `hkdf` over `sha2`
//! - Key exchange: `p256` / `p384` / `p521` (ECDH), `x25519-dalek`,
//!   `x448`
//! - Randomness: the OS CSPRNG via `rand`
//!
//! All primitives are pure Rust and constant-time in their
//! security-critical paths.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

mod aead;
mod hkdf;
mod kex;
mod random;

pub use random::OsRandom;

use hpke_crypto::{
    Aead, AeadAlgorithm, CryptoProvider, Kdf, KdfAlgorithm, KeyExchange, KeyExchangeAlgorithm,
    Random, Result,
};

/// Crypto provider backed by the RustCrypto crates.
#[derive(Debug, Default)]
pub struct RustCryptoProvider {
    random: OsRandom,
}

impl CryptoProvider for RustCryptoProvider {
    fn new() -> Self {
        Self::default()
    }

    fn aead(&self, algorithm: AeadAlgorithm) -> Result<Box<dyn Aead>> {
        aead::create_aead(algorithm)
    }

    fn kdf(&self, algorithm: KdfAlgorithm) -> Result<Box<dyn Kdf>> {
        hkdf::create_kdf(algorithm)
    }

    fn key_exchange(&self, algorithm: KeyExchangeAlgorithm) -> Result<Box<dyn KeyExchange>> {
        kex::create_key_exchange(algorithm)
    }

    fn random(&self) -> &dyn Random {
        &self.random
    }
}
