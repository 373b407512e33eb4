//! OS CSPRNG implementation of the `Random` trait.

use hpke_crypto::{Error, Random, Result};
use rand::{rngs::OsRng, RngCore};

/// Random number generator backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl Random for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|_| Error::RandomGenerationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_produces_nonconstant_output() {
        let rng = OsRandom;
        let a = rng.generate(32).unwrap();
        let b = rng.generate(32).unwrap();
        assert_eq!(a.len(), 32);
        // 2^-256 false-failure probability.
        assert_ne!(a, b);
    }
}
