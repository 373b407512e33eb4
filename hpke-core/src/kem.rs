//! KEM engine: encapsulation and decapsulation, with optional sender
//! authentication.
//!
//! `kem_context` is always assembled as ephemeral public value first,
//! recipient public value second, sender's static (auth) public value
//! last. On decap the peer's `enc` IS the ephemeral value, so both
//! sides hash identical bytes.

use hpke_crypto::{CryptoProvider, PrivateKey, SharedSecret};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::keys::KeyPair;
use crate::labels::{labeled_expand, labeled_extract, LabelScheme};
use crate::registry::{lookup_kem, KemInfo};
use crate::suite::Suite;

/// `ExtractAndExpand(z, kem_context)` with KEM labels and the KEM's
/// digest; output length is Nsecret.
fn extract_and_expand(
    provider: &dyn CryptoProvider,
    suite: Suite,
    kem: &KemInfo,
    z: &[u8],
    kem_context: &[u8],
) -> Result<SharedSecret> {
    let eae_prk = labeled_extract(provider, suite, LabelScheme::Kem, b"", b"eae_prk", z)?;
    let mut okm = labeled_expand(
        provider,
        suite,
        LabelScheme::Kem,
        &eae_prk,
        b"shared_secret",
        kem_context,
        kem.nsecret,
    )?;
    Ok(SharedSecret::from_bytes(std::mem::take(&mut *okm)))
}

fn check_keypair_curve(suite: Suite, kp: &KeyPair) -> Result<()> {
    if kp.kem_id() != suite.kem_id {
        return Err(Error::BadInput("key pair belongs to a different KEM"));
    }
    Ok(())
}

/// Encap / AuthEncap.
///
/// Generates an ephemeral key pair (or uses `sender_kp` when the
/// caller brings its own) and derives the KEM shared secret against
/// `pk_r`. Returns the encapsulated public value and the secret.
pub(crate) fn encap(
    provider: &dyn CryptoProvider,
    suite: Suite,
    pk_r: &[u8],
    sender_kp: Option<&KeyPair>,
    auth_kp: Option<&KeyPair>,
) -> Result<(Vec<u8>, SharedSecret)> {
    let kem = lookup_kem(suite.kem_id)?;
    if pk_r.len() != kem.npk {
        return Err(Error::BadInput("recipient public key length"));
    }
    let kex = provider.key_exchange(kem.kex)?;

    let generated;
    let (sk_e, enc): (&PrivateKey, Vec<u8>) = match sender_kp {
        Some(kp) => {
            check_keypair_curve(suite, kp)?;
            (kp.private(), kp.public_bytes().to_vec())
        },
        None => {
            generated = kex.generate_keypair()?;
            (&generated.0, generated.1.as_bytes().to_vec())
        },
    };

    // Preallocated for both halves so a later append cannot leave an
    // unzeroised copy behind on reallocation.
    let mut dh = Zeroizing::new(Vec::with_capacity(2 * kem.kex.shared_secret_size()));
    let z = kex.exchange(sk_e, pk_r)?;
    dh.extend_from_slice(z.as_bytes());

    let mut kem_context = Vec::with_capacity(3 * kem.npk);
    kem_context.extend_from_slice(&enc);
    kem_context.extend_from_slice(pk_r);

    if let Some(auth) = auth_kp {
        check_keypair_curve(suite, auth)?;
        let z2 = kex.exchange(auth.private(), pk_r)?;
        dh.extend_from_slice(z2.as_bytes());
        kem_context.extend_from_slice(auth.public_bytes());
    }

    let shared_secret = extract_and_expand(provider, suite, kem, &dh, &kem_context)?;
    Ok((enc, shared_secret))
}

/// Decap / AuthDecap.
///
/// Mirrors [`encap`]: derives the same KEM shared secret from the
/// recipient's private key and the peer's encapsulated value, with
/// `pk_s` verifying sender authentication when present.
pub(crate) fn decap(
    provider: &dyn CryptoProvider,
    suite: Suite,
    enc: &[u8],
    recipient: &KeyPair,
    pk_s: Option<&[u8]>,
) -> Result<SharedSecret> {
    let kem = lookup_kem(suite.kem_id)?;
    if enc.len() != kem.nenc {
        return Err(Error::BadInput("encapsulated key length"));
    }
    check_keypair_curve(suite, recipient)?;
    if let Some(pk) = pk_s {
        if pk.len() != kem.npk {
            return Err(Error::BadInput("sender public key length"));
        }
    }
    let kex = provider.key_exchange(kem.kex)?;

    let mut dh = Zeroizing::new(Vec::with_capacity(2 * kem.kex.shared_secret_size()));
    let z = kex.exchange(recipient.private(), enc)?;
    dh.extend_from_slice(z.as_bytes());

    let mut kem_context = Vec::with_capacity(3 * kem.npk);
    kem_context.extend_from_slice(enc);
    kem_context.extend_from_slice(recipient.public_bytes());

    if let Some(pk) = pk_s {
        let z2 = kex.exchange(recipient.private(), pk)?;
        dh.extend_from_slice(z2.as_bytes());
        kem_context.extend_from_slice(pk);
    }

    extract_and_expand(provider, suite, kem, &dh, &kem_context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use hpke_crypto::CryptoProvider;
    use hpke_crypto_rustcrypto::RustCryptoProvider;

    fn provider() -> RustCryptoProvider {
        RustCryptoProvider::new()
    }

    #[test]
    fn test_encap_decap_agree_for_all_kems() {
        let p = provider();
        for kem_id in [0x0010u16, 0x0011, 0x0012, 0x0020, 0x0021] {
            let suite = Suite::new(kem_id, 0x0001, 0x0001);
            let (pk_r, kp_r) = keys::generate(&p, suite).unwrap();

            let (enc, ss_sender) = encap(&p, suite, &pk_r, None, None).unwrap();
            let ss_recipient = decap(&p, suite, &enc, &kp_r, None).unwrap();

            assert_eq!(ss_sender.as_bytes(), ss_recipient.as_bytes());
            assert_eq!(
                ss_sender.as_bytes().len(),
                lookup_kem(kem_id).unwrap().nsecret
            );
        }
    }

    #[test]
    fn test_auth_encap_binds_sender_key() {
        let p = provider();
        let suite = Suite::P256_SHA256_AES128GCM;
        let (pk_r, kp_r) = keys::generate(&p, suite).unwrap();
        let (pk_s, kp_s) = keys::generate(&p, suite).unwrap();
        let (pk_mallory, _) = keys::generate(&p, suite).unwrap();

        let (enc, ss_sender) = encap(&p, suite, &pk_r, None, Some(&kp_s)).unwrap();

        let good = decap(&p, suite, &enc, &kp_r, Some(&pk_s)).unwrap();
        assert_eq!(ss_sender.as_bytes(), good.as_bytes());

        let wrong = decap(&p, suite, &enc, &kp_r, Some(&pk_mallory)).unwrap();
        assert_ne!(ss_sender.as_bytes(), wrong.as_bytes());
    }

    #[test]
    fn test_encap_rejects_bad_recipient_length() {
        let p = provider();
        let suite = Suite::X25519_SHA256_AES128GCM;
        let result = encap(&p, suite, &[0u8; 31], None, None);
        assert!(matches!(result, Err(Error::BadInput(_))));
    }

    #[test]
    fn test_decap_rejects_bad_enc_length() {
        let p = provider();
        let suite = Suite::X25519_SHA256_AES128GCM;
        let (_, kp_r) = keys::generate(&p, suite).unwrap();
        let result = decap(&p, suite, &[0u8; 33], &kp_r, None);
        assert!(matches!(result, Err(Error::BadInput(_))));
    }

    #[test]
    fn test_keypair_from_other_curve_rejected() {
        let p = provider();
        let x25519 = Suite::X25519_SHA256_AES128GCM;
        let p256 = Suite::P256_SHA256_AES128GCM;
        let (pk_r, _) = keys::generate(&p, p256).unwrap();
        let (_, kp_wrong) = keys::generate(&p, x25519).unwrap();
        let result = encap(&p, p256, &pk_r, Some(&kp_wrong), None);
        assert!(matches!(result, Err(Error::BadInput(_))));
    }

    #[test]
    fn test_two_encaps_produce_distinct_outputs() {
        let p = provider();
        let suite = Suite::X25519_SHA256_AES128GCM;
        let (pk_r, _) = keys::generate(&p, suite).unwrap();
        let (enc1, ss1) = encap(&p, suite, &pk_r, None, None).unwrap();
        let (enc2, ss2) = encap(&p, suite, &pk_r, None, None).unwrap();
        assert_ne!(enc1, enc2);
        assert_ne!(ss1.as_bytes(), ss2.as_bytes());
    }
}
