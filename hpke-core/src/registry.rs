//! Algorithm registry: immutable tables mapping IANA codepoints to
//! algorithm parameters.
//!
//! The tables are process-wide constants, initialised at compile time
//! and never mutated. Unknown codepoints are reported through the
//! lookup functions rather than sentinel rows.

use hpke_crypto::{AeadAlgorithm, HashAlgorithm, KdfAlgorithm, KeyExchangeAlgorithm};

use crate::error::{Error, Result};
use crate::suite::Suite;

/// DHKEM with P-256 and HKDF-SHA256.
pub const KEM_ID_P256: u16 = 0x0010;
/// DHKEM with P-384 and HKDF-SHA384.
pub const KEM_ID_P384: u16 = 0x0011;
/// DHKEM with P-521 and HKDF-SHA512.
pub const KEM_ID_P521: u16 = 0x0012;
/// DHKEM with X25519 and HKDF-SHA256.
pub const KEM_ID_X25519: u16 = 0x0020;
/// DHKEM with X448 and HKDF-SHA512.
pub const KEM_ID_X448: u16 = 0x0021;

/// HKDF-SHA256.
pub const KDF_ID_HKDF_SHA256: u16 = 0x0001;
/// HKDF-SHA384.
pub const KDF_ID_HKDF_SHA384: u16 = 0x0002;
/// HKDF-SHA512.
pub const KDF_ID_HKDF_SHA512: u16 = 0x0003;

/// AES-128-GCM.
pub const AEAD_ID_AES_128_GCM: u16 = 0x0001;
/// AES-256-GCM.
pub const AEAD_ID_AES_256_GCM: u16 = 0x0002;
/// ChaCha20-Poly1305.
pub const AEAD_ID_CHACHA20_POLY1305: u16 = 0x0003;

/// Parameters of a registered KEM.
#[derive(Debug, Clone, Copy)]
pub struct KemInfo {
    /// IANA codepoint
    pub kem_id: u16,
    /// Curve the DHKEM runs on
    pub kex: KeyExchangeAlgorithm,
    /// Digest used for the KEM's ExtractAndExpand
    pub hash: HashAlgorithm,
    /// Nsecret: KEM shared secret length
    pub nsecret: usize,
    /// Nenc: encapsulated key length
    pub nenc: usize,
    /// Npk: encoded public key length
    pub npk: usize,
    /// Npriv: raw private key length
    pub npriv: usize,
    /// Mnemonic used by the suite parser and formatter
    pub name: &'static str,
}

/// Parameters of a registered KDF.
#[derive(Debug, Clone, Copy)]
pub struct KdfInfo {
    /// IANA codepoint
    pub kdf_id: u16,
    /// The HKDF variant
    pub kdf: KdfAlgorithm,
    /// Nh: extract output length
    pub nh: usize,
    /// Mnemonic used by the suite parser and formatter
    pub name: &'static str,
}

/// Parameters of a registered AEAD.
#[derive(Debug, Clone, Copy)]
pub struct AeadInfo {
    /// IANA codepoint
    pub aead_id: u16,
    /// The cipher
    pub aead: AeadAlgorithm,
    /// Tag length (16 for every registered AEAD)
    pub taglen: usize,
    /// Nk: key length
    pub nk: usize,
    /// Nn: nonce length
    pub nn: usize,
    /// Mnemonic used by the suite parser and formatter
    pub name: &'static str,
}

pub(crate) static KEM_TABLE: [KemInfo; 5] = [
    KemInfo {
        kem_id: KEM_ID_P256,
        kex: KeyExchangeAlgorithm::Secp256r1,
        hash: HashAlgorithm::Sha256,
        nsecret: 32,
        nenc: 65,
        npk: 65,
        npriv: 32,
        name: "P-256",
    },
    KemInfo {
        kem_id: KEM_ID_P384,
        kex: KeyExchangeAlgorithm::Secp384r1,
        hash: HashAlgorithm::Sha384,
        nsecret: 48,
        nenc: 97,
        npk: 97,
        npriv: 48,
        name: "P-384",
    },
    KemInfo {
        kem_id: KEM_ID_P521,
        kex: KeyExchangeAlgorithm::Secp521r1,
        hash: HashAlgorithm::Sha512,
        nsecret: 64,
        nenc: 133,
        npk: 133,
        npriv: 66,
        name: "P-521",
    },
    KemInfo {
        kem_id: KEM_ID_X25519,
        kex: KeyExchangeAlgorithm::X25519,
        hash: HashAlgorithm::Sha256,
        nsecret: 32,
        nenc: 32,
        npk: 32,
        npriv: 32,
        name: "x25519",
    },
    KemInfo {
        kem_id: KEM_ID_X448,
        kex: KeyExchangeAlgorithm::X448,
        hash: HashAlgorithm::Sha512,
        nsecret: 64,
        nenc: 56,
        npk: 56,
        npriv: 56,
        name: "x448",
    },
];

pub(crate) static KDF_TABLE: [KdfInfo; 3] = [
    KdfInfo {
        kdf_id: KDF_ID_HKDF_SHA256,
        kdf: KdfAlgorithm::HkdfSha256,
        nh: 32,
        name: "hkdf-sha256",
    },
    KdfInfo {
        kdf_id: KDF_ID_HKDF_SHA384,
        kdf: KdfAlgorithm::HkdfSha384,
        nh: 48,
        name: "hkdf-sha384",
    },
    KdfInfo {
        kdf_id: KDF_ID_HKDF_SHA512,
        kdf: KdfAlgorithm::HkdfSha512,
        nh: 64,
        name: "hkdf-sha512",
    },
];

pub(crate) static AEAD_TABLE: [AeadInfo; 3] = [
    AeadInfo {
        aead_id: AEAD_ID_AES_128_GCM,
        aead: AeadAlgorithm::Aes128Gcm,
        taglen: 16,
        nk: 16,
        nn: 12,
        name: "aes-128-gcm",
    },
    AeadInfo {
        aead_id: AEAD_ID_AES_256_GCM,
        aead: AeadAlgorithm::Aes256Gcm,
        taglen: 16,
        nk: 32,
        nn: 12,
        name: "aes-256-gcm",
    },
    AeadInfo {
        aead_id: AEAD_ID_CHACHA20_POLY1305,
        aead: AeadAlgorithm::ChaCha20Poly1305,
        taglen: 16,
        nk: 32,
        nn: 12,
        name: "chacha20-poly1305",
    },
];

/// Look up a KEM by IANA codepoint.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuite`] for unknown codepoints.
pub fn lookup_kem(kem_id: u16) -> Result<&'static KemInfo> {
    KEM_TABLE
        .iter()
        .find(|k| k.kem_id == kem_id)
        .ok_or(Error::UnsupportedSuite)
}

/// Look up a KDF by IANA codepoint.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuite`] for unknown codepoints.
pub fn lookup_kdf(kdf_id: u16) -> Result<&'static KdfInfo> {
    KDF_TABLE
        .iter()
        .find(|k| k.kdf_id == kdf_id)
        .ok_or(Error::UnsupportedSuite)
}

/// Look up an AEAD by IANA codepoint.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuite`] for unknown codepoints.
pub fn lookup_aead(aead_id: u16) -> Result<&'static AeadInfo> {
    AEAD_TABLE
        .iter()
        .find(|a| a.aead_id == aead_id)
        .ok_or(Error::UnsupportedSuite)
}

/// Check that every component of a suite is registered.
pub fn suite_supported(suite: Suite) -> bool {
    check_suite(suite).is_ok()
}

pub(crate) fn check_suite(suite: Suite) -> Result<()> {
    lookup_kem(suite.kem_id)?;
    lookup_kdf(suite.kdf_id)?;
    lookup_aead(suite.aead_id)?;
    Ok(())
}

/// NIST-curve KEMs occupy [0x0010, 0x0020); they use uncompressed
/// SEC1 point encoding and big-endian scalars.
pub(crate) fn kem_id_nist_curve(kem_id: u16) -> bool {
    (0x0010..0x0020).contains(&kem_id)
}
