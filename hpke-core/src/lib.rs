//! # HPKE engine (RFC 9180) for Encrypted ClientHello
//!
//! A single-shot Hybrid Public Key Encryption implementation: an
//! algorithm registry over the IANA codepoints, the labelled HKDF
//! derivations, DHKEM encap/decap with optional sender
//! authentication, the key schedule, and seal/open. On top of those
//! sit the helpers ECH needs: GREASE value production, suite string
//! parsing, and private key import from raw, PEM or unarmoured
//! base64 forms.
//!
//! Cryptographic primitives come from a pluggable
//! [`CryptoProvider`]; `hpke-crypto-rustcrypto` supplies the default
//! backend.
//!
//! ## Example
//!
//! ```rust,ignore
//! use hpke_core::{Hpke, Mode, SealOpts, OpenOpts, Suite};
//! use hpke_crypto_rustcrypto::RustCryptoProvider;
//!
//! let hpke = Hpke::new(RustCryptoProvider::new());
//! let suite = Suite::X25519_SHA256_AES128GCM;
//!
//! let (pk_r, kp_r) = hpke.keygen(suite)?;
//! let sealed = hpke.seal(
//!     Mode::Base, suite, &pk_r, b"info", b"aad", b"hello",
//!     &SealOpts::default(),
//! )?;
//! let plaintext = hpke.open(
//!     Mode::Base, suite, &kp_r, &sealed.enc, b"info", b"aad",
//!     &sealed.ciphertext, &OpenOpts::default(),
//! )?;
//! ```
//!
//! Seal and open are pure functions of their inputs plus OS
//! randomness for ephemeral key generation; no state is shared
//! between calls, so an engine can be used from any number of threads.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod error;
pub mod grease;
mod kem;
mod keys;
mod labels;
mod pkcs8;
pub mod registry;
mod schedule;
mod single_shot;
pub mod suite;

pub use error::{Error, Result};
pub use grease::GreaseOutput;
pub use keys::KeyPair;
pub use registry::{lookup_aead, lookup_kdf, lookup_kem, suite_supported};
pub use single_shot::{OpenOpts, Psk, SealOpts, Sealed};
pub use suite::{expansion, Mode, Suite};

pub use hpke_crypto::{CryptoProvider, PrivateKey};

use core::fmt;

/// The HPKE engine.
///
/// Thin, stateless façade over a [`CryptoProvider`]: every operation
/// is a pure function of its arguments (plus OS randomness where keys
/// or GREASE values are sampled), and all sensitive intermediates are
/// zeroised before the call returns.
pub struct Hpke<P: CryptoProvider> {
    provider: P,
}

impl<P: CryptoProvider> fmt::Debug for Hpke<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hpke").finish_non_exhaustive()
    }
}

impl<P: CryptoProvider> Default for Hpke<P> {
    fn default() -> Self {
        Self::new(P::new())
    }
}

impl<P: CryptoProvider> Hpke<P> {
    /// Create an engine over the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Borrow the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Single-shot encryption.
    ///
    /// Runs Encap (or AuthEncap) against `pk_r`, derives the key
    /// schedule for `mode`, and seals `plaintext` with `aad`. Returns
    /// the encapsulated key and the ciphertext.
    ///
    /// Optional inputs ride in [`SealOpts`]: a PSK for the PSK modes,
    /// the sender's static key pair for the Auth modes, an externally
    /// generated ephemeral key pair, and a sequence number to XOR
    /// into the nonce (absent means plain RFC 9180).
    #[allow(clippy::too_many_arguments)]
    pub fn seal(
        &self,
        mode: Mode,
        suite: Suite,
        pk_r: &[u8],
        info: &[u8],
        aad: &[u8],
        plaintext: &[u8],
        opts: &SealOpts<'_>,
    ) -> Result<Sealed> {
        single_shot::seal(
            &self.provider,
            mode,
            suite,
            pk_r,
            info,
            aad,
            plaintext,
            opts,
        )
    }

    /// Single-shot encryption into caller-provided buffers.
    ///
    /// Like [`seal`](Self::seal) but writes the encapsulated key and
    /// ciphertext into `enc_out` / `ct_out`, returning the number of
    /// bytes written to each. Fails with [`Error::BufferTooSmall`],
    /// before any cryptography runs, if either buffer is too small.
    #[allow(clippy::too_many_arguments)]
    pub fn seal_into(
        &self,
        mode: Mode,
        suite: Suite,
        pk_r: &[u8],
        info: &[u8],
        aad: &[u8],
        plaintext: &[u8],
        opts: &SealOpts<'_>,
        enc_out: &mut [u8],
        ct_out: &mut [u8],
    ) -> Result<(usize, usize)> {
        let nenc = lookup_kem(suite.kem_id)?.nenc;
        if enc_out.len() < nenc {
            return Err(Error::BufferTooSmall { required: nenc });
        }
        let ct_len = expansion(suite, plaintext.len())?;
        if ct_out.len() < ct_len {
            return Err(Error::BufferTooSmall { required: ct_len });
        }
        let sealed = self.seal(mode, suite, pk_r, info, aad, plaintext, opts)?;
        enc_out[..sealed.enc.len()].copy_from_slice(&sealed.enc);
        ct_out[..sealed.ciphertext.len()].copy_from_slice(&sealed.ciphertext);
        Ok((sealed.enc.len(), sealed.ciphertext.len()))
    }

    /// Single-shot decryption.
    ///
    /// Mirror of [`seal`](Self::seal). After argument validation,
    /// every failure (point decode, KEM, schedule, tag mismatch) is
    /// reported as [`Error::OpenFailed`] and no partial plaintext is
    /// exposed.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &self,
        mode: Mode,
        suite: Suite,
        recipient: &KeyPair,
        enc: &[u8],
        info: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        opts: &OpenOpts<'_>,
    ) -> Result<Vec<u8>> {
        single_shot::open(
            &self.provider,
            mode,
            suite,
            recipient,
            enc,
            info,
            aad,
            ciphertext,
            opts,
        )
    }

    /// Single-shot decryption into a caller-provided buffer.
    #[allow(clippy::too_many_arguments)]
    pub fn open_into(
        &self,
        mode: Mode,
        suite: Suite,
        recipient: &KeyPair,
        enc: &[u8],
        info: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        opts: &OpenOpts<'_>,
        pt_out: &mut [u8],
    ) -> Result<usize> {
        let taglen = lookup_aead(suite.aead_id)?.taglen;
        let required = ciphertext.len().saturating_sub(taglen);
        if pt_out.len() < required {
            return Err(Error::BufferTooSmall { required });
        }
        let plaintext = self.open(mode, suite, recipient, enc, info, aad, ciphertext, opts)?;
        pt_out[..plaintext.len()].copy_from_slice(&plaintext);
        Ok(plaintext.len())
    }

    /// Generate a key pair for the suite's KEM.
    ///
    /// Returns the encoded public key and an opaque private handle;
    /// the private scalar never leaves the handle and is zeroised on
    /// drop.
    pub fn keygen(&self, suite: Suite) -> Result<(Vec<u8>, KeyPair)> {
        keys::generate(&self.provider, suite)
    }

    /// Generate a key pair and return the raw private scalar.
    pub fn keygen_raw(&self, suite: Suite) -> Result<(Vec<u8>, PrivateKey)> {
        keys::generate_raw(&self.provider, suite)
    }

    /// Import a private key from raw, PEM, or unarmoured base64 form.
    ///
    /// If `pub_hint` is given it is attached to the handle as the
    /// encoded public key; otherwise the public key is derived.
    pub fn import_priv(
        &self,
        kem_id: u16,
        priv_bytes: &[u8],
        pub_hint: Option<&[u8]>,
    ) -> Result<KeyPair> {
        keys::import(&self.provider, kem_id, priv_bytes, pub_hint)
    }

    /// Uniformly sample a supported suite.
    pub fn random_suite(&self) -> Result<Suite> {
        grease::random_suite(self.provider.random())
    }

    /// Produce GREASE values for a decoy ECH extension.
    ///
    /// Uses `suite_in` when given (it must be supported), otherwise a
    /// random suite. The fake sender public value has length
    /// Npk(kem); the fake ciphertext has length `cipher_len`.
    pub fn grease(&self, suite_in: Option<Suite>, cipher_len: usize) -> Result<GreaseOutput> {
        grease::grease(self.provider.random(), suite_in, cipher_len)
    }
}
