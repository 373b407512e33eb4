//! Hash algorithm identifiers.
//!
//! The HPKE engine never hashes data directly; it only selects which
//! digest an HKDF instance or a DHKEM runs on. This module therefore
//! carries the algorithm enum and its size metadata, nothing more.

/// Hash algorithms used by the supported KDFs and KEMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 (32-byte output)
    Sha256,
    /// SHA-384 (48-byte output)
    Sha384,
    /// SHA-512 (64-byte output)
    Sha512,
}

impl HashAlgorithm {
    /// Get the digest output size in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Get the name of this hash algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}
