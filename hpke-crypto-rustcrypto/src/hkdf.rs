//! HKDF implementations using the `hkdf` and `sha2` crates.

use hkdf::Hkdf;
use hpke_crypto::{Error, Kdf, KdfAlgorithm, Result};
use sha2::{Sha256, Sha384, Sha512};

/// Create a KDF instance for the specified algorithm.
pub fn create_kdf(algorithm: KdfAlgorithm) -> Result<Box<dyn Kdf>> {
    match algorithm {
        KdfAlgorithm::HkdfSha256 => Ok(Box::new(HkdfSha256Impl)),
        KdfAlgorithm::HkdfSha384 => Ok(Box::new(HkdfSha384Impl)),
        KdfAlgorithm::HkdfSha512 => Ok(Box::new(HkdfSha512Impl)),
    }
}

macro_rules! hkdf_impl {
    ($name:ident, $hash:ty, $alg:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy)]
        struct $name;

        impl Kdf for $name {
            fn extract(&self, salt: &[u8], ikm: &[u8]) -> Vec<u8> {
                let (prk, _) = Hkdf::<$hash>::extract(Some(salt), ikm);
                prk.to_vec()
            }

            fn expand(&self, prk: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>> {
                let hkdf = Hkdf::<$hash>::from_prk(prk)
                    .map_err(|_| Error::CryptoError("HKDF PRK too short".to_string()))?;
                let mut output = vec![0u8; length];
                hkdf.expand(info, &mut output)
                    .map_err(|_| Error::InvalidLength)?;
                Ok(output)
            }

            fn algorithm(&self) -> KdfAlgorithm {
                $alg
            }
        }
    };
}

hkdf_impl!(
    HkdfSha256Impl,
    Sha256,
    KdfAlgorithm::HkdfSha256,
    "HKDF-SHA256 implementation."
);
hkdf_impl!(
    HkdfSha384Impl,
    Sha384,
    KdfAlgorithm::HkdfSha384,
    "HKDF-SHA384 implementation."
);
hkdf_impl!(
    HkdfSha512Impl,
    Sha512,
    KdfAlgorithm::HkdfSha512,
    "HKDF-SHA512 implementation."
);
