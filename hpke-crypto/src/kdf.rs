//! Key Derivation Function (KDF) interface.

use crate::{HashAlgorithm, Result};

/// KDF algorithms supported for HPKE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KdfAlgorithm {
    /// HKDF with SHA-256
    HkdfSha256,
    /// HKDF with SHA-384
    HkdfSha384,
    /// HKDF with SHA-512
    HkdfSha512,
}

impl KdfAlgorithm {
    /// Get the underlying hash algorithm.
    pub const fn hash_algorithm(self) -> HashAlgorithm {
        match self {
            KdfAlgorithm::HkdfSha256 => HashAlgorithm::Sha256,
            KdfAlgorithm::HkdfSha384 => HashAlgorithm::Sha384,
            KdfAlgorithm::HkdfSha512 => HashAlgorithm::Sha512,
        }
    }

    /// Get the HKDF variant running on the given hash.
    ///
    /// DHKEM derivations use the KEM's digest rather than the cipher
    /// suite's KDF, so the engine needs this reverse mapping.
    pub const fn for_hash(hash: HashAlgorithm) -> Self {
        match hash {
            HashAlgorithm::Sha256 => KdfAlgorithm::HkdfSha256,
            HashAlgorithm::Sha384 => KdfAlgorithm::HkdfSha384,
            HashAlgorithm::Sha512 => KdfAlgorithm::HkdfSha512,
        }
    }

    /// Get the name of this KDF algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            KdfAlgorithm::HkdfSha256 => "HKDF-SHA256",
            KdfAlgorithm::HkdfSha384 => "HKDF-SHA384",
            KdfAlgorithm::HkdfSha512 => "HKDF-SHA512",
        }
    }
}

/// KDF trait.
///
/// Provides the RFC 5869 extract/expand primitives:
/// - Extract: `HKDF-Extract(salt, IKM) -> PRK`
/// - Expand: `HKDF-Expand(PRK, info, length) -> OKM`
///
/// HPKE's labelled derivations are built on top of these by the
/// engine; implementations here are plain HKDF.
pub trait Kdf: Send + Sync {
    /// HKDF-Extract: Extract a pseudorandom key from input key material.
    ///
    /// # Arguments
    ///
    /// * `salt` - Optional salt (can be empty)
    /// * `ikm` - Input key material
    ///
    /// # Returns
    ///
    /// Pseudorandom key (PRK) of length `hash_output_size`
    fn extract(&self, salt: &[u8], ikm: &[u8]) -> Vec<u8>;

    /// HKDF-Expand: Expand a pseudorandom key to desired length.
    ///
    /// # Arguments
    ///
    /// * `prk` - Pseudorandom key from extract()
    /// * `info` - Context and application specific information
    /// * `length` - Desired output length in bytes
    ///
    /// # Errors
    ///
    /// Returns error if `length` is too large (> 255 * hash_output_size)
    fn expand(&self, prk: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>>;

    /// HKDF: Combined extract and expand in one operation.
    fn derive(&self, salt: &[u8], ikm: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>> {
        let prk = self.extract(salt, ikm);
        self.expand(&prk, info, length)
    }

    /// Get the KDF algorithm.
    fn algorithm(&self) -> KdfAlgorithm;

    /// Get the output size of the underlying hash function.
    fn hash_output_size(&self) -> usize {
        self.algorithm().hash_algorithm().output_size()
    }
}
