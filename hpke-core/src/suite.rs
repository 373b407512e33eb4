//! Cipher suites, modes, and the suite string parser.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::registry::{self, lookup_aead, lookup_kdf, lookup_kem};

/// Max string length the suite parser will look at.
const MAX_SUITE_STR: usize = 64;

/// An HPKE cipher suite: (kem_id, kdf_id, aead_id).
///
/// Each component is an IANA codepoint from the HPKE registry. Suites
/// are plain values; whether the triple is actually usable is a
/// registry question, answered by [`Suite::supported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Suite {
    /// KEM codepoint
    pub kem_id: u16,
    /// KDF codepoint
    pub kdf_id: u16,
    /// AEAD codepoint
    pub aead_id: u16,
}

impl Suite {
    /// The recommended suite for ECH with P-256.
    pub const P256_SHA256_AES128GCM: Suite = Suite {
        kem_id: registry::KEM_ID_P256,
        kdf_id: registry::KDF_ID_HKDF_SHA256,
        aead_id: registry::AEAD_ID_AES_128_GCM,
    };

    /// The recommended suite for ECH with X25519.
    pub const X25519_SHA256_AES128GCM: Suite = Suite {
        kem_id: registry::KEM_ID_X25519,
        kdf_id: registry::KDF_ID_HKDF_SHA256,
        aead_id: registry::AEAD_ID_AES_128_GCM,
    };

    /// Create a new suite from raw codepoints.
    pub const fn new(kem_id: u16, kdf_id: u16, aead_id: u16) -> Self {
        Self {
            kem_id,
            kdf_id,
            aead_id,
        }
    }

    /// Check that every component is in the algorithm registry.
    pub fn supported(self) -> bool {
        registry::suite_supported(self)
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (
            lookup_kem(self.kem_id),
            lookup_kdf(self.kdf_id),
            lookup_aead(self.aead_id),
        ) {
            (Ok(kem), Ok(kdf), Ok(aead)) => {
                write!(f, "{},{},{}", kem.name, kdf.name, aead.name)
            },
            _ => write!(
                f,
                "0x{:04x},0x{:04x},0x{:04x}",
                self.kem_id, self.kdf_id, self.aead_id
            ),
        }
    }
}

impl FromStr for Suite {
    type Err = Error;

    /// Parse a comma-separated "kem,kdf,aead" triple.
    ///
    /// Each token is either a mnemonic ("P-256", "x25519", "SHA256",
    /// "hkdf-sha256", "AES-128-GCM", "ChaCha20Poly1305", ...) or a
    /// decimal / `0x`-hex codepoint. Matching is case-insensitive.
    /// Exactly three tokens are required and all three must be in the
    /// registry.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_SUITE_STR {
            return Err(Error::BadInput("suite string too long"));
        }
        let mut tokens = s.split(',');
        let (kem, kdf, aead) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some(kem), Some(kdf), Some(aead), None) => (kem, kdf, aead),
            _ => return Err(Error::BadInput("expected kem,kdf,aead")),
        };
        let suite = Suite {
            kem_id: parse_kem_token(kem.trim())?,
            kdf_id: parse_kdf_token(kdf.trim())?,
            aead_id: parse_aead_token(aead.trim())?,
        };
        registry::check_suite(suite)?;
        Ok(suite)
    }
}

fn parse_codepoint(token: &str) -> Option<u16> {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        u16::from_str_radix(hex, 16).ok()
    } else {
        token.parse::<u16>().ok()
    }
}

fn parse_kem_token(token: &str) -> Result<u16> {
    let id = match token.to_ascii_lowercase().as_str() {
        "p-256" => registry::KEM_ID_P256,
        "p-384" => registry::KEM_ID_P384,
        "p-521" => registry::KEM_ID_P521,
        "x25519" => registry::KEM_ID_X25519,
        "x448" => registry::KEM_ID_X448,
        _ => parse_codepoint(token).ok_or(Error::BadInput("unknown KEM token"))?,
    };
    Ok(id)
}

fn parse_kdf_token(token: &str) -> Result<u16> {
    let id = match token.to_ascii_lowercase().as_str() {
        "hkdf-sha256" | "sha256" => registry::KDF_ID_HKDF_SHA256,
        "hkdf-sha384" | "sha384" => registry::KDF_ID_HKDF_SHA384,
        "hkdf-sha512" | "sha512" => registry::KDF_ID_HKDF_SHA512,
        _ => parse_codepoint(token).ok_or(Error::BadInput("unknown KDF token"))?,
    };
    Ok(id)
}

fn parse_aead_token(token: &str) -> Result<u16> {
    let id = match token.to_ascii_lowercase().as_str() {
        "aes-128-gcm" => registry::AEAD_ID_AES_128_GCM,
        "aes-256-gcm" => registry::AEAD_ID_AES_256_GCM,
        "chacha20-poly1305" | "chacha20poly1305" => registry::AEAD_ID_CHACHA20_POLY1305,
        _ => parse_codepoint(token).ok_or(Error::BadInput("unknown AEAD token"))?,
    };
    Ok(id)
}

/// HPKE operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    /// Base mode: no sender authentication, no PSK.
    Base = 0,
    /// PSK mode: a pre-shared key is mixed into the key schedule.
    Psk = 1,
    /// Auth mode: the sender authenticates with a static key pair.
    Auth = 2,
    /// PSK + Auth combined.
    PskAuth = 3,
}

impl Mode {
    /// Convert from the wire byte.
    pub const fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Mode::Base),
            1 => Ok(Mode::Psk),
            2 => Ok(Mode::Auth),
            3 => Ok(Mode::PskAuth),
            other => Err(Error::BadMode(other)),
        }
    }

    /// Convert to the wire byte (the key schedule's mode byte).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Does this mode mix in a PSK?
    pub const fn uses_psk(self) -> bool {
        matches!(self, Mode::Psk | Mode::PskAuth)
    }

    /// Does this mode authenticate the sender with a static key pair?
    pub const fn uses_auth(self) -> bool {
        matches!(self, Mode::Auth | Mode::PskAuth)
    }
}

/// Predict the ciphertext length for a plaintext length.
///
/// AEAD algorithms append an authentication tag; callers size their
/// buffers from this.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSuite`] if the suite is not registered.
pub fn expansion(suite: Suite, clear_len: usize) -> Result<usize> {
    registry::check_suite(suite)?;
    let aead = lookup_aead(suite.aead_id)?;
    Ok(clear_len + aead.taglen)
}
