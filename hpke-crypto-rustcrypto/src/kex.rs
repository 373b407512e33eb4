//! Key exchange implementations for the five HPKE curves.
//!
//! NIST curves come from the RustCrypto `p256`/`p384`/`p521` crates;
//! their shared secret is the x-coordinate of the derived point, and
//! public keys travel as uncompressed SEC1 points. The Montgomery
//! curves use `x25519-dalek` and `x448`, whose outputs are the full
//! RFC 7748 values; both reject all-zero (small-subgroup) results.

use hpke_crypto::{
    key_exchange::{KeyExchangeAlgorithm, PrivateKey, PublicKey, SharedSecret},
    Error, KeyExchange, Result,
};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

/// Create a key exchange instance for the specified algorithm.
pub fn create_key_exchange(algorithm: KeyExchangeAlgorithm) -> Result<Box<dyn KeyExchange>> {
    match algorithm {
        KeyExchangeAlgorithm::X25519 => Ok(Box::new(X25519Kex)),
        KeyExchangeAlgorithm::X448 => Ok(Box::new(X448Kex)),
        KeyExchangeAlgorithm::Secp256r1 => Ok(Box::new(EcdhP256)),
        KeyExchangeAlgorithm::Secp384r1 => Ok(Box::new(EcdhP384)),
        KeyExchangeAlgorithm::Secp521r1 => Ok(Box::new(EcdhP521)),
    }
}

fn check_private_len(alg: KeyExchangeAlgorithm, bytes: &[u8]) -> Result<()> {
    if bytes.len() != alg.private_key_size() {
        return Err(Error::InvalidPrivateKey);
    }
    Ok(())
}

/// X25519 Diffie-Hellman (RFC 7748).
#[derive(Debug)]
struct X25519Kex;

impl X25519Kex {
    fn secret(private_key: &PrivateKey) -> Result<x25519_dalek::StaticSecret> {
        let bytes: [u8; 32] = private_key
            .as_bytes()
            .try_into()
            .map_err(|_| Error::InvalidPrivateKey)?;
        Ok(x25519_dalek::StaticSecret::from(bytes))
    }
}

impl KeyExchange for X25519Kex {
    fn generate_keypair(&self) -> Result<(PrivateKey, PublicKey)> {
        let secret = x25519_dalek::StaticSecret::random_from_rng(OsRng);
        let public = x25519_dalek::PublicKey::from(&secret);
        Ok((
            PrivateKey::from_bytes(secret.to_bytes().to_vec()),
            PublicKey::from_bytes(public.as_bytes().to_vec()),
        ))
    }

    fn exchange(&self, private_key: &PrivateKey, peer_public_key: &[u8]) -> Result<SharedSecret> {
        let peer: [u8; 32] = peer_public_key
            .try_into()
            .map_err(|_| Error::InvalidPublicKey)?;
        let shared = Self::secret(private_key)?.diffie_hellman(&x25519_dalek::PublicKey::from(peer));
        // All-zero output means a small-subgroup peer value.
        if !shared.was_contributory() {
            return Err(Error::KeyExchangeFailed);
        }
        Ok(SharedSecret::from_bytes(shared.as_bytes().to_vec()))
    }

    fn derive_public(&self, private_key: &PrivateKey) -> Result<PublicKey> {
        let public = x25519_dalek::PublicKey::from(&Self::secret(private_key)?);
        Ok(PublicKey::from_bytes(public.as_bytes().to_vec()))
    }

    fn import_private(&self, bytes: &[u8]) -> Result<PrivateKey> {
        check_private_len(self.algorithm(), bytes)?;
        Ok(PrivateKey::from_bytes(bytes.to_vec()))
    }

    fn algorithm(&self) -> KeyExchangeAlgorithm {
        KeyExchangeAlgorithm::X25519
    }
}

/// X448 Diffie-Hellman (RFC 7748).
#[derive(Debug)]
struct X448Kex;

impl X448Kex {
    fn secret(private_key: &PrivateKey) -> Result<x448::Secret> {
        x448::Secret::from_bytes(private_key.as_bytes()).ok_or(Error::InvalidPrivateKey)
    }
}

impl KeyExchange for X448Kex {
    fn generate_keypair(&self) -> Result<(PrivateKey, PublicKey)> {
        let secret = x448::Secret::new(&mut rand_core_05::OsRng);
        let public = x448::PublicKey::from(&secret);
        Ok((
            PrivateKey::from_bytes(secret.as_bytes().to_vec()),
            PublicKey::from_bytes(public.as_bytes().to_vec()),
        ))
    }

    fn exchange(&self, private_key: &PrivateKey, peer_public_key: &[u8]) -> Result<SharedSecret> {
        let peer = x448::PublicKey::from_bytes(peer_public_key).ok_or(Error::InvalidPublicKey)?;
        // `x448` yields None for low-order peer values.
        let shared = Self::secret(private_key)?
            .as_diffie_hellman(&peer)
            .ok_or(Error::KeyExchangeFailed)?;
        Ok(SharedSecret::from_bytes(shared.as_bytes().to_vec()))
    }

    fn derive_public(&self, private_key: &PrivateKey) -> Result<PublicKey> {
        let public = x448::PublicKey::from(&Self::secret(private_key)?);
        Ok(PublicKey::from_bytes(public.as_bytes().to_vec()))
    }

    fn import_private(&self, bytes: &[u8]) -> Result<PrivateKey> {
        check_private_len(self.algorithm(), bytes)?;
        Ok(PrivateKey::from_bytes(bytes.to_vec()))
    }

    fn algorithm(&self) -> KeyExchangeAlgorithm {
        KeyExchangeAlgorithm::X448
    }
}

macro_rules! nist_kex {
    ($name:ident, $curve:ident, $alg:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug)]
        struct $name;

        impl KeyExchange for $name {
            fn generate_keypair(&self) -> Result<(PrivateKey, PublicKey)> {
                let secret = $curve::SecretKey::random(&mut OsRng);
                let public = secret.public_key().to_encoded_point(false);
                Ok((
                    PrivateKey::from_bytes(secret.to_bytes().to_vec()),
                    PublicKey::from_bytes(public.as_bytes().to_vec()),
                ))
            }

            fn exchange(
                &self,
                private_key: &PrivateKey,
                peer_public_key: &[u8],
            ) -> Result<SharedSecret> {
                let secret = $curve::SecretKey::from_slice(private_key.as_bytes())
                    .map_err(|_| Error::InvalidPrivateKey)?;
                let peer = $curve::PublicKey::from_sec1_bytes(peer_public_key)
                    .map_err(|_| Error::InvalidPublicKey)?;
                // The x-coordinate of the derived point; the identity
                // cannot occur because scalars are nonzero mod n.
                let shared =
                    $curve::ecdh::diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());
                Ok(SharedSecret::from_bytes(
                    shared.raw_secret_bytes().to_vec(),
                ))
            }

            fn derive_public(&self, private_key: &PrivateKey) -> Result<PublicKey> {
                let secret = $curve::SecretKey::from_slice(private_key.as_bytes())
                    .map_err(|_| Error::InvalidPrivateKey)?;
                let public = secret.public_key().to_encoded_point(false);
                Ok(PublicKey::from_bytes(public.as_bytes().to_vec()))
            }

            fn import_private(&self, bytes: &[u8]) -> Result<PrivateKey> {
                check_private_len(self.algorithm(), bytes)?;
                // Validate the big-endian scalar against the group order.
                $curve::SecretKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
                Ok(PrivateKey::from_bytes(bytes.to_vec()))
            }

            fn algorithm(&self) -> KeyExchangeAlgorithm {
                $alg
            }
        }
    };
}

nist_kex!(
    EcdhP256,
    p256,
    KeyExchangeAlgorithm::Secp256r1,
    "ECDH over P-256 (secp256r1)."
);
nist_kex!(
    EcdhP384,
    p384,
    KeyExchangeAlgorithm::Secp384r1,
    "ECDH over P-384 (secp384r1)."
);
nist_kex!(
    EcdhP521,
    p521,
    KeyExchangeAlgorithm::Secp521r1,
    "ECDH over P-521 (secp521r1)."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_and_exchange_all_curves() {
        for alg in [
            KeyExchangeAlgorithm::X25519,
            KeyExchangeAlgorithm::X448,
            KeyExchangeAlgorithm::Secp256r1,
            KeyExchangeAlgorithm::Secp384r1,
            KeyExchangeAlgorithm::Secp521r1,
        ] {
            let kex = create_key_exchange(alg).unwrap();

            let (alice_private, alice_public) = kex.generate_keypair().unwrap();
            let (bob_private, bob_public) = kex.generate_keypair().unwrap();

            assert_eq!(alice_public.as_bytes().len(), alg.public_key_size());
            assert_eq!(alice_private.as_bytes().len(), alg.private_key_size());

            let alice_shared = kex.exchange(&alice_private, bob_public.as_bytes()).unwrap();
            let bob_shared = kex.exchange(&bob_private, alice_public.as_bytes()).unwrap();

            assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
            assert_eq!(alice_shared.as_bytes().len(), alg.shared_secret_size());
        }
    }

    #[test]
    fn test_derive_public_matches_keypair() {
        for alg in [
            KeyExchangeAlgorithm::X25519,
            KeyExchangeAlgorithm::Secp256r1,
        ] {
            let kex = create_key_exchange(alg).unwrap();
            let (private, public) = kex.generate_keypair().unwrap();
            let derived = kex.derive_public(&private).unwrap();
            assert_eq!(derived.as_bytes(), public.as_bytes());
        }
    }

    #[test]
    fn test_rfc7748_x25519_vector() {
        // RFC 7748 section 6.1
        let kex = create_key_exchange(KeyExchangeAlgorithm::X25519).unwrap();
        let alice_private = kex
            .import_private(&[
                0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d, 0x3c, 0x16, 0xc1, 0x72, 0x51,
                0xb2, 0x66, 0x45, 0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a, 0xb1, 0x77,
                0xfb, 0xa5, 0x1d, 0xb9, 0x2c, 0x2a,
            ])
            .unwrap();
        let bob_public = [
            0xde, 0x9e, 0xdb, 0x7d, 0x7b, 0x7d, 0xc1, 0xb4, 0xd3, 0x5b, 0x61, 0xc2, 0xec, 0xe4,
            0x35, 0x37, 0x3f, 0x83, 0x43, 0xc8, 0x5b, 0x78, 0x67, 0x4d, 0xad, 0xfc, 0x7e, 0x14,
            0x6f, 0x88, 0x2b, 0x4f,
        ];
        let shared = kex.exchange(&alice_private, &bob_public).unwrap();
        assert_eq!(
            shared.as_bytes(),
            &[
                0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1, 0x72, 0x8e, 0x3b, 0xf4, 0x80,
                0x35, 0x0f, 0x25, 0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33, 0x76, 0xf0,
                0x9b, 0x3c, 0x1e, 0x16, 0x17, 0x42,
            ]
        );
    }

    #[test]
    fn test_small_subgroup_peer_rejected() {
        let kex = create_key_exchange(KeyExchangeAlgorithm::X25519).unwrap();
        let (private, _) = kex.generate_keypair().unwrap();
        // The all-zero point is low order; the exchange must not
        // silently yield an all-zero secret.
        let result = kex.exchange(&private, &[0u8; 32]);
        assert!(matches!(result, Err(Error::KeyExchangeFailed)));
    }

    #[test]
    fn test_nist_import_rejects_wrong_length() {
        let kex = create_key_exchange(KeyExchangeAlgorithm::Secp256r1).unwrap();
        assert!(matches!(
            kex.import_private(&[1u8; 31]),
            Err(Error::InvalidPrivateKey)
        ));
    }

    #[test]
    fn test_nist_import_rejects_zero_scalar() {
        let kex = create_key_exchange(KeyExchangeAlgorithm::Secp256r1).unwrap();
        assert!(matches!(
            kex.import_private(&[0u8; 32]),
            Err(Error::InvalidPrivateKey)
        ));
    }

    #[test]
    fn test_nist_public_is_uncompressed_sec1() {
        let kex = create_key_exchange(KeyExchangeAlgorithm::Secp384r1).unwrap();
        let (_, public) = kex.generate_keypair().unwrap();
        assert_eq!(public.as_bytes().len(), 97);
        assert_eq!(public.as_bytes()[0], 0x04);
    }
}
