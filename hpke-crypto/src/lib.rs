//! # HPKE Cryptographic Provider Interface
//!
//! This crate defines the cryptographic abstraction layer for the
//! HPKE engine. It provides trait-based interfaces that allow
//! pluggable cryptographic backends.
//!
//! ## Design Goals
//!
//! 1. **Pluggable:** Support multiple crypto libraries behind one set
//!    of contracts
//! 2. **Zero-cost:** Traits compile to static dispatch where possible
//! 3. **Type-safe:** Leverage Rust's type system to prevent misuse
//! 4. **Constant-time:** All security-critical operations must be
//!    constant-time in the backend
//!
//! ## Architecture
//!
//! ```text
//! CryptoProvider (main trait)
//! ├── Aead (AES-GCM, ChaCha20-Poly1305)
//! ├── Kdf (HKDF-SHA256/384/512)
//! ├── KeyExchange (X25519, X448, P-256, P-384, P-521)
//! └── Random (CSPRNG)
//! ```
//!
//! The HPKE engine (`hpke-core`) builds all of RFC 9180 (labelled
//! derivations, the DHKEMs, the key schedule, single-shot seal/open)
//! on top of exactly these four contracts.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod aead;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod key_exchange;
pub mod random;

pub use aead::{Aead, AeadAlgorithm};
pub use error::{Error, Result};
pub use hash::HashAlgorithm;
pub use kdf::{Kdf, KdfAlgorithm};
pub use key_exchange::{KeyExchange, KeyExchangeAlgorithm, PrivateKey, PublicKey, SharedSecret};
pub use random::Random;

/// The main cryptographic provider trait.
///
/// Implementations of this trait provide all cryptographic operations
/// needed by the HPKE engine. The trait is object-safe, allowing for
/// dynamic dispatch, but also supports static dispatch for zero-cost
/// abstractions.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use in
/// multi-threaded environments; HPKE operations themselves share no
/// mutable state.
pub trait CryptoProvider: Send + Sync + 'static {
    /// Create a new instance of the crypto provider.
    fn new() -> Self
    where
        Self: Sized;

    /// Get an AEAD cipher instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm is not supported.
    fn aead(&self, algorithm: AeadAlgorithm) -> Result<Box<dyn Aead>>;

    /// Get a KDF (Key Derivation Function) instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm is not supported.
    fn kdf(&self, algorithm: KdfAlgorithm) -> Result<Box<dyn Kdf>>;

    /// Get a key exchange instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm is not supported.
    fn key_exchange(&self, algorithm: KeyExchangeAlgorithm) -> Result<Box<dyn KeyExchange>>;

    /// Get the random number generator.
    fn random(&self) -> &dyn Random;

    /// Check if the provider supports a specific AEAD algorithm.
    fn supports_aead(&self, algorithm: AeadAlgorithm) -> bool {
        self.aead(algorithm).is_ok()
    }

    /// Check if the provider supports a specific key exchange algorithm.
    fn supports_key_exchange(&self, algorithm: KeyExchangeAlgorithm) -> bool {
        self.key_exchange(algorithm).is_ok()
    }
}
