//! Single-shot seal and open.
//!
//! Orchestrates KEM, key schedule and AEAD for one message. A
//! caller-supplied sequence number can be XORed into the nonce to
//! emulate HPKE's streaming mode for ECH retry / HRR handling; when
//! absent, the output is byte-identical to vanilla RFC 9180
//! single-shot.

use hpke_crypto::CryptoProvider;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::kem;
use crate::keys::KeyPair;
use crate::registry::{check_suite, lookup_aead, lookup_kem};
use crate::schedule::key_schedule;
use crate::suite::{Mode, Suite};

/// A pre-shared key and its identifier.
///
/// RFC 9180 recommends a PSK with at least 32 bytes of entropy; this
/// is not enforced.
#[derive(Debug, Clone, Copy)]
pub struct Psk<'a> {
    /// PSK identifier (non-empty in PSK modes)
    pub id: &'a [u8],
    /// The PSK itself (non-empty in PSK modes)
    pub key: &'a [u8],
}

/// Optional inputs to [`seal`](crate::Hpke::seal).
#[derive(Debug, Default, Clone, Copy)]
pub struct SealOpts<'a> {
    /// PSK, required for [`Mode::Psk`] / [`Mode::PskAuth`]
    pub psk: Option<Psk<'a>>,
    /// Sender's static key pair, required for [`Mode::Auth`] /
    /// [`Mode::PskAuth`]
    pub sender_auth: Option<&'a KeyPair>,
    /// Externally generated ephemeral key pair; when set, no key is
    /// generated and `enc` equals this pair's public encoding
    pub sender_kp: Option<&'a KeyPair>,
    /// Sequence number, right-aligned big-endian, at most Nn bytes
    pub seq: Option<&'a [u8]>,
}

/// Optional inputs to [`open`](crate::Hpke::open).
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenOpts<'a> {
    /// PSK, required for [`Mode::Psk`] / [`Mode::PskAuth`]
    pub psk: Option<Psk<'a>>,
    /// Sender's static public key, required for [`Mode::Auth`] /
    /// [`Mode::PskAuth`]
    pub sender_pub: Option<&'a [u8]>,
    /// Sequence number, right-aligned big-endian, at most Nn bytes
    pub seq: Option<&'a [u8]>,
}

/// Result of a seal: the encapsulated key and the ciphertext
/// (`plaintext || tag`).
#[derive(Debug, Clone)]
pub struct Sealed {
    /// Encapsulated KEM public value, Nenc bytes
    pub enc: Vec<u8>,
    /// AEAD output, plaintext length + 16 bytes
    pub ciphertext: Vec<u8>,
}

/// Check PSK parameters against the mode: a PSK mode needs both id
/// and key non-empty, any other mode requires both empty or absent.
fn psk_check(mode: Mode, psk: Option<&Psk<'_>>) -> Result<()> {
    match psk {
        Some(p) if mode.uses_psk() => {
            if p.id.is_empty() || p.key.is_empty() {
                return Err(Error::BadPskUsage);
            }
        },
        Some(p) => {
            if !p.id.is_empty() || !p.key.is_empty() {
                return Err(Error::BadPskUsage);
            }
        },
        None if mode.uses_psk() => return Err(Error::BadPskUsage),
        None => {},
    }
    Ok(())
}

/// XOR a right-aligned big-endian sequence value into the base nonce.
///
/// Runs over the full nonce length whatever the seq value, so timing
/// depends only on lengths, which are public.
fn seq_xor(base_nonce: &[u8], seq: Option<&[u8]>) -> Result<Zeroizing<Vec<u8>>> {
    let mut nonce = Zeroizing::new(base_nonce.to_vec());
    if let Some(seq) = seq {
        if seq.len() > nonce.len() {
            return Err(Error::BadInput("sequence longer than nonce"));
        }
        let n = nonce.len();
        for i in 0..n {
            let sv = if i < seq.len() { seq[seq.len() - 1 - i] } else { 0 };
            nonce[n - 1 - i] ^= sv;
        }
    }
    Ok(nonce)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn seal(
    provider: &dyn CryptoProvider,
    mode: Mode,
    suite: Suite,
    pk_r: &[u8],
    info: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    opts: &SealOpts<'_>,
) -> Result<Sealed> {
    check_suite(suite)?;
    psk_check(mode, opts.psk.as_ref())?;
    let auth_kp = if mode.uses_auth() {
        Some(
            opts.sender_auth
                .ok_or(Error::BadInput("authentication key required for mode"))?,
        )
    } else {
        None
    };

    let (enc, shared_secret) = kem::encap(provider, suite, pk_r, opts.sender_kp, auth_kp)?;
    let ks = key_schedule(
        provider,
        suite,
        mode,
        &shared_secret,
        info,
        opts.psk.as_ref(),
    )?;
    let nonce = seq_xor(&ks.base_nonce, opts.seq)?;

    let aead = provider.aead(lookup_aead(suite.aead_id)?.aead)?;
    let ciphertext = aead.seal(&ks.key, &nonce, aad, plaintext)?;

    Ok(Sealed { enc, ciphertext })
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn open(
    provider: &dyn CryptoProvider,
    mode: Mode,
    suite: Suite,
    recipient: &KeyPair,
    enc: &[u8],
    info: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    opts: &OpenOpts<'_>,
) -> Result<Vec<u8>> {
    // Argument validation keeps its distinct error kinds; everything
    // after this point collapses to OpenFailed.
    check_suite(suite)?;
    psk_check(mode, opts.psk.as_ref())?;
    let kem_info = lookup_kem(suite.kem_id)?;
    let aead_info = lookup_aead(suite.aead_id)?;
    if enc.len() != kem_info.nenc {
        return Err(Error::BadInput("encapsulated key length"));
    }
    if ciphertext.len() < aead_info.taglen {
        return Err(Error::BadInput("ciphertext shorter than tag"));
    }
    let pk_s = if mode.uses_auth() {
        let pk = opts
            .sender_pub
            .ok_or(Error::BadInput("sender public key required for mode"))?;
        if pk.len() != kem_info.npk {
            return Err(Error::BadInput("sender public key length"));
        }
        Some(pk)
    } else {
        None
    };
    if let Some(seq) = opts.seq {
        if seq.len() > aead_info.nn {
            return Err(Error::BadInput("sequence longer than nonce"));
        }
    }

    let attempt = || -> Result<Vec<u8>> {
        let shared_secret = kem::decap(provider, suite, enc, recipient, pk_s)?;
        let ks = key_schedule(
            provider,
            suite,
            mode,
            &shared_secret,
            info,
            opts.psk.as_ref(),
        )?;
        let nonce = seq_xor(&ks.base_nonce, opts.seq)?;
        let aead = provider.aead(aead_info.aead)?;
        Ok(aead.open(&ks.key, &nonce, aad, ciphertext)?)
    };
    attempt().map_err(|_| Error::OpenFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psk_check_matrix() {
        let psk = Psk {
            id: b"id",
            key: b"key",
        };
        let empty = Psk { id: b"", key: b"" };

        assert!(psk_check(Mode::Base, None).is_ok());
        assert!(psk_check(Mode::Base, Some(&empty)).is_ok());
        assert_eq!(
            psk_check(Mode::Base, Some(&psk)),
            Err(Error::BadPskUsage)
        );
        assert_eq!(psk_check(Mode::Psk, None), Err(Error::BadPskUsage));
        assert_eq!(
            psk_check(Mode::Psk, Some(&empty)),
            Err(Error::BadPskUsage)
        );
        assert!(psk_check(Mode::Psk, Some(&psk)).is_ok());
        assert!(psk_check(Mode::PskAuth, Some(&psk)).is_ok());
        assert_eq!(psk_check(Mode::Auth, Some(&psk)), Err(Error::BadPskUsage));
    }

    #[test]
    fn test_seq_xor_zero_is_identity() {
        let base = [0xaa; 12];
        let nonce = seq_xor(&base, None).unwrap();
        assert_eq!(&nonce[..], &base[..]);
        let nonce = seq_xor(&base, Some(&[0u8])).unwrap();
        assert_eq!(&nonce[..], &base[..]);
    }

    #[test]
    fn test_seq_xor_is_right_aligned() {
        let base = [0u8; 12];
        let nonce = seq_xor(&base, Some(&[0x01])).unwrap();
        assert_eq!(nonce[11], 0x01);
        assert!(nonce[..11].iter().all(|&b| b == 0));

        let nonce = seq_xor(&base, Some(&[0x02, 0x01])).unwrap();
        assert_eq!(nonce[10], 0x02);
        assert_eq!(nonce[11], 0x01);
    }

    #[test]
    fn test_seq_longer_than_nonce_rejected() {
        let base = [0u8; 12];
        let result = seq_xor(&base, Some(&[0u8; 13]));
        assert!(matches!(result, Err(Error::BadInput(_))));
    }
}
