//! Key pair handles, generation, and private key import.
//!
//! Import accepts three forms, tried in order: a raw scalar of
//! exactly Npriv bytes, PEM, and finally the input wrapped in PKCS#8
//! PEM armour (which recovers bare base64 bodies as found in ECH
//! configuration files). Attempt outcomes are logged at debug level
//! only; the chain runs during configuration load, off the hot path.

use core::fmt;

use hpke_crypto::{CryptoProvider, PrivateKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::pkcs8;
use crate::registry::{check_suite, lookup_kem};
use crate::suite::Suite;

/// An owned private key with its cached encoded public key.
///
/// The private scalar is zeroised when the handle is dropped. Public
/// keys travel as plain byte sequences.
pub struct KeyPair {
    kem_id: u16,
    private: PrivateKey,
    public: Vec<u8>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("kem_id", &self.kem_id)
            .field("private", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

impl KeyPair {
    pub(crate) fn new(kem_id: u16, private: PrivateKey, public: Vec<u8>) -> Self {
        Self {
            kem_id,
            private,
            public,
        }
    }

    /// The KEM this key pair belongs to.
    pub fn kem_id(&self) -> u16 {
        self.kem_id
    }

    /// The encoded public key.
    pub fn public_bytes(&self) -> &[u8] {
        &self.public
    }

    pub(crate) fn private(&self) -> &PrivateKey {
        &self.private
    }
}

/// Generate a key pair for the suite's KEM, keeping the private key
/// inside an opaque handle.
pub(crate) fn generate(
    provider: &dyn CryptoProvider,
    suite: Suite,
) -> Result<(Vec<u8>, KeyPair)> {
    check_suite(suite)?;
    let kem = lookup_kem(suite.kem_id)?;
    let kex = provider.key_exchange(kem.kex)?;
    let (private, public) = kex.generate_keypair()?;
    let public = public.into_bytes();
    Ok((
        public.clone(),
        KeyPair::new(suite.kem_id, private, public),
    ))
}

/// Generate a key pair and hand back the raw private scalar.
pub(crate) fn generate_raw(
    provider: &dyn CryptoProvider,
    suite: Suite,
) -> Result<(Vec<u8>, PrivateKey)> {
    check_suite(suite)?;
    let kem = lookup_kem(suite.kem_id)?;
    let kex = provider.key_exchange(kem.kex)?;
    let (private, public) = kex.generate_keypair()?;
    Ok((public.into_bytes(), private))
}

/// Import a private key, trying raw, PEM, then armour-wrapped PEM.
pub(crate) fn import(
    provider: &dyn CryptoProvider,
    kem_id: u16,
    priv_bytes: &[u8],
    pub_hint: Option<&[u8]>,
) -> Result<KeyPair> {
    let kem = lookup_kem(kem_id)?;
    if priv_bytes.is_empty() {
        return Err(Error::BadInput("empty private key"));
    }
    let kex = provider.key_exchange(kem.kex)?;

    let raw: Zeroizing<Vec<u8>> = if priv_bytes.len() == kem.npriv {
        debug!(kem_id, "private key import: raw scalar");
        Zeroizing::new(priv_bytes.to_vec())
    } else {
        match pkcs8::private_key_from_pem(kem, priv_bytes) {
            Ok(raw) => {
                debug!(kem_id, "private key import: PEM");
                raw
            },
            Err(err) => {
                debug!(kem_id, ?err, "private key import: PEM failed, retrying with armour");
                let wrapped = pkcs8::wrap_unarmoured(priv_bytes);
                match pkcs8::private_key_from_pem(kem, &wrapped) {
                    Ok(raw) => {
                        debug!(kem_id, "private key import: armour-wrapped body");
                        raw
                    },
                    Err(err) => {
                        debug!(kem_id, ?err, "private key import: all attempts failed");
                        return Err(Error::BadKey);
                    },
                }
            },
        }
    };

    let private = kex.import_private(&raw).map_err(|_| Error::BadKey)?;
    let public = match pub_hint {
        Some(p) => {
            if p.len() != kem.npk {
                return Err(Error::BadInput("public key hint length"));
            }
            p.to_vec()
        },
        None => kex.derive_public(&private)?.into_bytes(),
    };
    Ok(KeyPair::new(kem_id, private, public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hpke_crypto::CryptoProvider;
    use hpke_crypto_rustcrypto::RustCryptoProvider;

    fn provider() -> RustCryptoProvider {
        RustCryptoProvider::new()
    }

    #[test]
    fn test_generate_public_matches_handle() {
        let p = provider();
        let (public, kp) = generate(&p, Suite::X25519_SHA256_AES128GCM).unwrap();
        assert_eq!(public, kp.public_bytes());
        assert_eq!(kp.kem_id(), 0x0020);
    }

    #[test]
    fn test_raw_import_roundtrips_keygen() {
        let p = provider();
        for kem_id in [0x0010u16, 0x0011, 0x0012, 0x0020, 0x0021] {
            let suite = Suite::new(kem_id, 0x0001, 0x0001);
            let (public, private) = generate_raw(&p, suite).unwrap();
            let kp = import(&p, kem_id, private.as_bytes(), None).unwrap();
            assert_eq!(kp.public_bytes(), &public[..], "kem 0x{:04x}", kem_id);
        }
    }

    #[test]
    fn test_import_with_pub_hint() {
        let p = provider();
        let (public, private) = generate_raw(&p, Suite::P256_SHA256_AES128GCM).unwrap();
        let kp = import(&p, 0x0010, private.as_bytes(), Some(&public)).unwrap();
        assert_eq!(kp.public_bytes(), &public[..]);

        let bad_hint = vec![0u8; 64];
        let result = import(&p, 0x0010, private.as_bytes(), Some(&bad_hint));
        assert!(matches!(result, Err(Error::BadInput(_))));
    }

    #[test]
    fn test_import_garbage_is_bad_key() {
        let p = provider();
        // Wrong length for a raw scalar and not decodable as PEM.
        let result = import(&p, 0x0020, &[0xAA; 57], None);
        assert_eq!(result.unwrap_err(), Error::BadKey);
    }

    #[test]
    fn test_import_empty_is_bad_input() {
        let p = provider();
        let result = import(&p, 0x0020, &[], None);
        assert!(matches!(result, Err(Error::BadInput(_))));
    }

    #[test]
    fn test_import_unknown_kem() {
        let p = provider();
        let result = import(&p, 0x0099, &[0u8; 32], None);
        assert_eq!(result.unwrap_err(), Error::UnsupportedSuite);
    }

    #[test]
    fn test_debug_redacts_private() {
        let p = provider();
        let (_, kp) = generate(&p, Suite::X25519_SHA256_AES128GCM).unwrap();
        let debug = format!("{:?}", kp);
        assert!(debug.contains("redacted"));
    }
}
