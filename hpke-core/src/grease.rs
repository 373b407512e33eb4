//! GREASE support: random suites and decoy ECH payloads (RFC 8701).
//!
//! Clients that send decoy ECH extensions need values that are
//! indistinguishable from real ones: a plausible suite, a random
//! sender public value of the right length, and a random "ciphertext"
//! of the requested length.

use hpke_crypto::Random;

use crate::error::Result;
use crate::registry::{self, lookup_kem, AEAD_TABLE, KDF_TABLE, KEM_TABLE};
use crate::suite::Suite;

/// Everything a GREASEing client needs for one decoy extension.
#[derive(Debug, Clone)]
pub struct GreaseOutput {
    /// The chosen (or randomly sampled) suite
    pub suite: Suite,
    /// Random bytes of length Npk(kem), standing in for the sender
    /// public value
    pub enc: Vec<u8>,
    /// Random bytes of the requested ciphertext length
    pub ciphertext: Vec<u8>,
}

/// Sample one entry from each algorithm table, one CSPRNG byte per
/// component.
pub(crate) fn random_suite(random: &dyn Random) -> Result<Suite> {
    let mut rval = [0u8; 1];

    random.fill(&mut rval)?;
    let kem = &KEM_TABLE[rval[0] as usize % KEM_TABLE.len()];
    random.fill(&mut rval)?;
    let kdf = &KDF_TABLE[rval[0] as usize % KDF_TABLE.len()];
    random.fill(&mut rval)?;
    let aead = &AEAD_TABLE[rval[0] as usize % AEAD_TABLE.len()];

    Ok(Suite::new(kem.kem_id, kdf.kdf_id, aead.aead_id))
}

/// Produce GREASE values: the suite (preferred or random), a fake
/// sender public value, and a fake ciphertext of `cipher_len` bytes.
pub(crate) fn grease(
    random: &dyn Random,
    suite_in: Option<Suite>,
    cipher_len: usize,
) -> Result<GreaseOutput> {
    let suite = match suite_in {
        Some(s) => {
            registry::check_suite(s)?;
            s
        },
        None => random_suite(random)?,
    };
    let kem = lookup_kem(suite.kem_id)?;

    Ok(GreaseOutput {
        suite,
        enc: random.generate(kem.npk)?,
        ciphertext: random.generate(cipher_len)?,
    })
}
