//! Diffie-Hellman key exchange over the curves HPKE's DHKEMs use.

use crate::Result;
use zeroize::Zeroize;

/// Key exchange algorithms backing the supported DHKEMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyExchangeAlgorithm {
    /// X25519 (Curve25519, RFC 7748)
    X25519,
    /// X448 (Curve448, RFC 7748)
    X448,
    /// secp256r1 (P-256, NIST curve)
    Secp256r1,
    /// secp384r1 (P-384, NIST curve)
    Secp384r1,
    /// secp521r1 (P-521, NIST curve)
    Secp521r1,
}

impl KeyExchangeAlgorithm {
    /// Get the encoded public key size in bytes.
    ///
    /// NIST curves use uncompressed SEC1 points; Montgomery curves use
    /// the fixed-length RFC 7748 encodings.
    pub const fn public_key_size(self) -> usize {
        match self {
            KeyExchangeAlgorithm::X25519 => 32,
            KeyExchangeAlgorithm::X448 => 56,
            KeyExchangeAlgorithm::Secp256r1 => 65,
            KeyExchangeAlgorithm::Secp384r1 => 97,
            KeyExchangeAlgorithm::Secp521r1 => 133,
        }
    }

    /// Get the raw private key (scalar) size in bytes.
    pub const fn private_key_size(self) -> usize {
        match self {
            KeyExchangeAlgorithm::X25519 => 32,
            KeyExchangeAlgorithm::X448 => 56,
            KeyExchangeAlgorithm::Secp256r1 => 32,
            KeyExchangeAlgorithm::Secp384r1 => 48,
            KeyExchangeAlgorithm::Secp521r1 => 66,
        }
    }

    /// Get the raw shared secret size in bytes.
    ///
    /// For NIST curves this is the x-coordinate of the derived point;
    /// for X25519/X448 it is the full RFC 7748 output.
    pub const fn shared_secret_size(self) -> usize {
        match self {
            KeyExchangeAlgorithm::X25519 => 32,
            KeyExchangeAlgorithm::X448 => 56,
            KeyExchangeAlgorithm::Secp256r1 => 32,
            KeyExchangeAlgorithm::Secp384r1 => 48,
            KeyExchangeAlgorithm::Secp521r1 => 66,
        }
    }

    /// Get the algorithm name.
    pub const fn name(self) -> &'static str {
        match self {
            KeyExchangeAlgorithm::X25519 => "X25519",
            KeyExchangeAlgorithm::X448 => "X448",
            KeyExchangeAlgorithm::Secp256r1 => "secp256r1",
            KeyExchangeAlgorithm::Secp384r1 => "secp384r1",
            KeyExchangeAlgorithm::Secp521r1 => "secp521r1",
        }
    }
}

/// Private key for key exchange.
///
/// Wraps the raw private scalar and zeroizes it on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct PrivateKey {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl PrivateKey {
    /// Create a new private key from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the private key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Public key for key exchange.
#[derive(Debug, Clone)]
pub struct PublicKey {
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Create a new public key from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the public key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to owned bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Shared secret from key exchange.
///
/// Wraps the derived secret and zeroizes it on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret")
            .field("bytes", &"<redacted>")
            .finish()
    }
}

impl SharedSecret {
    /// Create a new shared secret from bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Get the shared secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Key exchange trait.
///
/// One instance covers one curve. Besides plain ECDH, the HPKE engine
/// needs raw-scalar import (for private keys arriving from ECH
/// configuration) and public-key derivation (the encoded public value
/// is part of every `kem_context`), so both are part of the contract.
pub trait KeyExchange: Send + Sync {
    /// Generate an ephemeral key pair.
    ///
    /// The private key MUST come from a CSPRNG and is zeroized on
    /// drop. The public key is returned in this curve's wire encoding.
    fn generate_keypair(&self) -> Result<(PrivateKey, PublicKey)>;

    /// Perform the Diffie-Hellman exchange.
    ///
    /// # Errors
    ///
    /// - `InvalidPublicKey` if the peer's encoded public key does not
    ///   parse for this curve
    /// - `KeyExchangeFailed` if the result is the identity / all-zero
    ///   value (small-subgroup input) or derivation fails
    fn exchange(&self, private_key: &PrivateKey, peer_public_key: &[u8]) -> Result<SharedSecret>;

    /// Derive the encoded public key for a private key.
    fn derive_public(&self, private_key: &PrivateKey) -> Result<PublicKey>;

    /// Import a raw private scalar.
    ///
    /// NIST scalars are interpreted big-endian and validated against
    /// the group order; Montgomery keys are taken as-is. The input
    /// must be exactly `private_key_size` bytes.
    fn import_private(&self, bytes: &[u8]) -> Result<PrivateKey>;

    /// Get the algorithm this key exchange implements.
    fn algorithm(&self) -> KeyExchangeAlgorithm;

    /// Get the expected public key size in bytes.
    fn public_key_size(&self) -> usize {
        self.algorithm().public_key_size()
    }

    /// Get the raw private key size in bytes.
    fn private_key_size(&self) -> usize {
        self.algorithm().private_key_size()
    }

    /// Get the shared secret size in bytes.
    fn shared_secret_size(&self) -> usize {
        self.algorithm().shared_secret_size()
    }
}
