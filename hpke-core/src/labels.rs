//! RFC 9180 labelled HKDF: LabeledExtract and LabeledExpand.
//!
//! Every derivation in HPKE runs through these two transforms. The
//! byte-exact concatenation order is the interoperability contract:
//!
//! ```text
//! LabeledExtract(salt, label, ikm)
//!     = Extract(salt, "HPKE-v1" || suite_id || label || ikm)
//! LabeledExpand(prk, label, info, L)
//!     = Expand(prk, I2OSP(L, 2) || "HPKE-v1" || suite_id || label || info, L)
//! ```
//!
//! `suite_id` is `"KEM" || I2OSP(kem_id, 2)` inside the KEM and
//! `"HPKE" || I2OSP(kem_id, 2) || I2OSP(kdf_id, 2) || I2OSP(aead_id, 2)`
//! everywhere else. The digest is the KEM's hash in KEM context and
//! the cipher suite KDF's hash otherwise.

use hpke_crypto::{CryptoProvider, KdfAlgorithm};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::registry::{lookup_kdf, lookup_kem};
use crate::suite::Suite;

/// Bound on any labelled concatenation the engine builds. Inputs that
/// would push past this are rejected before any derivation runs.
pub(crate) const MAX_LABELED_INPUT: usize = 4096;

const VERSION_LABEL: &[u8] = b"HPKE-v1";
const KEM_SUITE_LABEL: &[u8] = b"KEM";
const HPKE_SUITE_LABEL: &[u8] = b"HPKE";

/// Which labelling scheme a derivation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelScheme {
    /// HPKE section 4.1: KEM suite_id, KEM hash.
    Kem,
    /// HPKE section 5.1: full suite_id, KDF hash.
    Hpke,
    /// Plain RFC 5869, no labelling. Test hook only; nothing public
    /// reaches this.
    #[cfg(test)]
    Pure,
}

fn kdf_for(suite: Suite, scheme: LabelScheme) -> Result<KdfAlgorithm> {
    match scheme {
        LabelScheme::Kem => Ok(KdfAlgorithm::for_hash(lookup_kem(suite.kem_id)?.hash)),
        LabelScheme::Hpke => Ok(lookup_kdf(suite.kdf_id)?.kdf),
        #[cfg(test)]
        LabelScheme::Pure => Ok(lookup_kdf(suite.kdf_id)?.kdf),
    }
}

fn push_suite_id(buf: &mut Vec<u8>, suite: Suite, scheme: LabelScheme) {
    match scheme {
        LabelScheme::Kem => {
            buf.extend_from_slice(KEM_SUITE_LABEL);
            buf.extend_from_slice(&suite.kem_id.to_be_bytes());
        },
        LabelScheme::Hpke => {
            buf.extend_from_slice(HPKE_SUITE_LABEL);
            buf.extend_from_slice(&suite.kem_id.to_be_bytes());
            buf.extend_from_slice(&suite.kdf_id.to_be_bytes());
            buf.extend_from_slice(&suite.aead_id.to_be_bytes());
        },
        #[cfg(test)]
        LabelScheme::Pure => {},
    }
}

/// LabeledExtract. Returns a PRK of the selected digest's length.
pub(crate) fn labeled_extract(
    provider: &dyn CryptoProvider,
    suite: Suite,
    scheme: LabelScheme,
    salt: &[u8],
    label: &[u8],
    ikm: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let kdf = provider.kdf(kdf_for(suite, scheme)?)?;

    #[cfg(test)]
    if scheme == LabelScheme::Pure {
        return Ok(Zeroizing::new(kdf.extract(salt, ikm)));
    }

    if VERSION_LABEL.len() + 10 + label.len() + ikm.len() > MAX_LABELED_INPUT {
        return Err(Error::BadInput("labelled input too large"));
    }
    let mut labeled_ikm = Zeroizing::new(Vec::with_capacity(
        VERSION_LABEL.len() + 10 + label.len() + ikm.len(),
    ));
    labeled_ikm.extend_from_slice(VERSION_LABEL);
    push_suite_id(&mut labeled_ikm, suite, scheme);
    labeled_ikm.extend_from_slice(label);
    labeled_ikm.extend_from_slice(ikm);

    Ok(Zeroizing::new(kdf.extract(salt, &labeled_ikm)))
}

/// LabeledExpand. Returns `length` bytes of output key material.
pub(crate) fn labeled_expand(
    provider: &dyn CryptoProvider,
    suite: Suite,
    scheme: LabelScheme,
    prk: &[u8],
    label: &[u8],
    info: &[u8],
    length: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if length > u16::MAX as usize {
        return Err(Error::BadInput("expand length exceeds two octets"));
    }
    let kdf = provider.kdf(kdf_for(suite, scheme)?)?;

    #[cfg(test)]
    if scheme == LabelScheme::Pure {
        let mut labeled_info = Vec::with_capacity(label.len() + info.len());
        labeled_info.extend_from_slice(label);
        labeled_info.extend_from_slice(info);
        return Ok(Zeroizing::new(kdf.expand(prk, &labeled_info, length)?));
    }

    if 2 + VERSION_LABEL.len() + 10 + label.len() + info.len() > MAX_LABELED_INPUT {
        return Err(Error::BadInput("labelled input too large"));
    }
    let mut labeled_info = Vec::with_capacity(2 + VERSION_LABEL.len() + 10 + label.len() + info.len());
    labeled_info.extend_from_slice(&(length as u16).to_be_bytes());
    labeled_info.extend_from_slice(VERSION_LABEL);
    push_suite_id(&mut labeled_info, suite, scheme);
    labeled_info.extend_from_slice(label);
    labeled_info.extend_from_slice(info);

    Ok(Zeroizing::new(kdf.expand(prk, &labeled_info, length)?))
}
