//! Error types for the HPKE engine.

use core::fmt;

/// Result type for HPKE operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur in HPKE operations.
///
/// Each kind is distinct and none are collapsed into another, with
/// one deliberate exception: decryption failures. [`Error::OpenFailed`]
/// is the only error `open` surfaces once its arguments have been
/// validated, so a peer cannot distinguish a tag mismatch from any
/// other byte-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A suite component (KEM, KDF or AEAD codepoint) is not in the
    /// algorithm registry.
    UnsupportedSuite,

    /// Mode value is not one of BASE, PSK, AUTH, PSK_AUTH.
    BadMode(u8),

    /// PSK parameters are inconsistent with the requested mode: a PSK
    /// mode needs a non-empty psk_id and psk, a non-PSK mode forbids
    /// them.
    BadPskUsage,

    /// A required buffer is missing or has the wrong length, or an
    /// input would overflow an internal bound.
    BadInput(&'static str),

    /// Private key import failed after every decode attempt.
    BadKey,

    /// A caller-provided output buffer is too small; `required` is
    /// the size that would have been needed.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
    },

    /// Decryption failed. Deliberately opaque.
    OpenFailed,

    /// The cryptographic backend failed.
    Crypto(hpke_crypto::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedSuite => write!(f, "Cipher suite not supported"),
            Error::BadMode(m) => write!(f, "Bad HPKE mode: {}", m),
            Error::BadPskUsage => write!(f, "PSK parameters inconsistent with mode"),
            Error::BadInput(msg) => write!(f, "Bad input: {}", msg),
            Error::BadKey => write!(f, "Private key could not be decoded"),
            Error::BufferTooSmall { required } => {
                write!(f, "Output buffer too small: {} bytes required", required)
            },
            Error::OpenFailed => write!(f, "Decryption failed"),
            Error::Crypto(e) => write!(f, "Crypto backend error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<hpke_crypto::Error> for Error {
    fn from(e: hpke_crypto::Error) -> Self {
        Error::Crypto(e)
    }
}
