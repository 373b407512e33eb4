//! RFC 9180 key schedule.
//!
//! Derives the AEAD key, base nonce and exporter secret from the KEM
//! shared secret, the mode, the caller's info, and an optional PSK.

use hpke_crypto::{CryptoProvider, SharedSecret};
use zeroize::Zeroizing;

use crate::error::Result;
use crate::labels::{labeled_expand, labeled_extract, LabelScheme};
use crate::registry::{lookup_aead, lookup_kdf};
use crate::single_shot::Psk;
use crate::suite::{Mode, Suite};

/// Output of the key schedule. Every field is secret and zeroised on
/// drop.
pub(crate) struct KeyScheduleOutput {
    /// AEAD key, Nk bytes
    pub key: Zeroizing<Vec<u8>>,
    /// AEAD base nonce, Nn bytes
    pub base_nonce: Zeroizing<Vec<u8>>,
    /// Exporter secret, Nh bytes. Derived for schedule completeness;
    /// the single-shot API exposes no exporter interface, so it is
    /// zeroised with the rest of the schedule on drop.
    #[allow(dead_code)]
    pub exporter_secret: Zeroizing<Vec<u8>>,
}

/// Run the key schedule.
///
/// For non-PSK modes `psk` is `None` and both the psk_id and the psk
/// itself enter the derivation as empty strings; PSK/mode consistency
/// is the caller's responsibility and has been validated by the time
/// this runs.
pub(crate) fn key_schedule(
    provider: &dyn CryptoProvider,
    suite: Suite,
    mode: Mode,
    shared_secret: &SharedSecret,
    info: &[u8],
    psk: Option<&Psk<'_>>,
) -> Result<KeyScheduleOutput> {
    let (psk_id, psk_key) = match psk {
        Some(p) => (p.id, p.key),
        None => (&[][..], &[][..]),
    };

    let psk_id_hash =
        labeled_extract(provider, suite, LabelScheme::Hpke, b"", b"psk_id_hash", psk_id)?;
    let info_hash = labeled_extract(provider, suite, LabelScheme::Hpke, b"", b"info_hash", info)?;

    let mut ks_context =
        Zeroizing::new(Vec::with_capacity(1 + psk_id_hash.len() + info_hash.len()));
    ks_context.push(mode.to_u8());
    ks_context.extend_from_slice(&psk_id_hash);
    ks_context.extend_from_slice(&info_hash);

    let secret = labeled_extract(
        provider,
        suite,
        LabelScheme::Hpke,
        shared_secret.as_bytes(),
        b"secret",
        psk_key,
    )?;

    let aead = lookup_aead(suite.aead_id)?;
    let kdf = lookup_kdf(suite.kdf_id)?;

    let key = labeled_expand(
        provider,
        suite,
        LabelScheme::Hpke,
        &secret,
        b"key",
        &ks_context,
        aead.nk,
    )?;
    let base_nonce = labeled_expand(
        provider,
        suite,
        LabelScheme::Hpke,
        &secret,
        b"base_nonce",
        &ks_context,
        aead.nn,
    )?;
    let exporter_secret = labeled_expand(
        provider,
        suite,
        LabelScheme::Hpke,
        &secret,
        b"exp",
        &ks_context,
        kdf.nh,
    )?;

    Ok(KeyScheduleOutput {
        key,
        base_nonce,
        exporter_secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpke_crypto_rustcrypto::RustCryptoProvider;

    fn schedule(mode: Mode, psk: Option<&Psk<'_>>, info: &[u8]) -> KeyScheduleOutput {
        let p = RustCryptoProvider::new();
        let suite = Suite::X25519_SHA256_AES128GCM;
        let ss = SharedSecret::from_bytes(vec![0x5a; 32]);
        key_schedule(&p, suite, mode, &ss, info, psk).unwrap()
    }

    #[test]
    fn test_output_lengths() {
        let out = schedule(Mode::Base, None, b"info");
        assert_eq!(out.key.len(), 16);
        assert_eq!(out.base_nonce.len(), 12);
        assert_eq!(out.exporter_secret.len(), 32);
    }

    #[test]
    fn test_deterministic() {
        let a = schedule(Mode::Base, None, b"info");
        let b = schedule(Mode::Base, None, b"info");
        assert_eq!(*a.key, *b.key);
        assert_eq!(*a.base_nonce, *b.base_nonce);
        assert_eq!(*a.exporter_secret, *b.exporter_secret);
    }

    #[test]
    fn test_mode_byte_diverges_schedule() {
        // Same inputs, different mode byte: all outputs change.
        let base = schedule(Mode::Base, None, b"info");
        let auth = schedule(Mode::Auth, None, b"info");
        assert_ne!(*base.key, *auth.key);
        assert_ne!(*base.base_nonce, *auth.base_nonce);
    }

    #[test]
    fn test_psk_diverges_schedule() {
        let psk = Psk {
            id: b"psk-id",
            key: &[0x33; 32],
        };
        let without = schedule(Mode::Psk, None, b"info");
        let with = schedule(Mode::Psk, Some(&psk), b"info");
        assert_ne!(*without.key, *with.key);
    }

    #[test]
    fn test_info_diverges_schedule() {
        let a = schedule(Mode::Base, None, b"one");
        let b = schedule(Mode::Base, None, b"two");
        assert_ne!(*a.key, *b.key);
    }
}
