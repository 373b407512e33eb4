//! RFC 9180 Appendix A test vectors.
//!
//! These pin the engine to the literal bytes of A.1 (DHKEM(X25519,
//! HKDF-SHA256), HKDF-SHA256, AES-128-GCM, base mode). The ephemeral
//! key is injected through the external-sender-keypair path, which
//! makes the whole pipeline deterministic: a matching ciphertext
//! means the KEM, the labelled derivations, the key schedule and the
//! AEAD all agree with the RFC bit-for-bit.

use hpke_core::{Hpke, Mode, OpenOpts, SealOpts, Suite};
use hpke_crypto::CryptoProvider;
use hpke_crypto_rustcrypto::RustCryptoProvider;

/// Helper function to decode hex strings (spaces and newlines allowed)
fn hex_decode(hex: &str) -> Vec<u8> {
    let clean = hex.replace(' ', "").replace('\n', "");
    (0..clean.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&clean[i..i + 2], 16).unwrap())
        .collect()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

const SUITE: Suite = Suite::X25519_SHA256_AES128GCM;

// RFC 9180 A.1: DHKEM(X25519, HKDF-SHA256), HKDF-SHA256, AES-128-GCM
const INFO: &str = "4f6465206f6e2061204772656369616e2055726e";
const SK_EM: &str = "52c4a758a802cd8b936eceea314432798d5baf2d7e9235dc084ab1b9cfa2f736";
const PK_EM: &str = "37fda3567bdbd628e88668c3c8d7e97d1d1253b6d4ea6d44c150f741f1bf4431";
const SK_RM: &str = "4612c550263fc8ad58375df3f557aac531d26850903e55a9f23f21d8534e8ac8";
const PK_RM: &str = "3948cfe0ad1ddb695d780e59077195da6c56506b027329794ab02bca80815c4d";

// A.1.1.1, sequence number 0
const PT: &str = "4265617574792069732074727574682c20747275746820626561757479";
const AAD_0: &str = "436f756e742d30";
const CT_0: &str =
    "f938558b5d72f1a23810b4be2ab4f84331acc02fc97babc53a52ae8218a355a96d8770ac83d07bea87e13c512a";

// A.1.1.1, sequence number 1
const AAD_1: &str = "436f756e742d31";
const CT_1: &str =
    "af2d7e9ac9ae7e270f46ba1f975be53c09f8d875bdc8535458c2494e8a6eab251c03d0c22a56b8ca42c2063b84";

fn engine() -> Hpke<RustCryptoProvider> {
    Hpke::new(RustCryptoProvider::new())
}

#[test]
fn test_a1_ephemeral_public_key_derivation() {
    let hpke = engine();
    let kp = hpke
        .import_priv(0x0020, &hex_decode(SK_EM), None)
        .expect("raw X25519 import");
    assert_eq!(
        hex_encode(kp.public_bytes()),
        PK_EM,
        "pkEm must derive from skEm"
    );
}

#[test]
fn test_a1_base_seal_matches_rfc() {
    let hpke = engine();
    let sender_kp = hpke.import_priv(0x0020, &hex_decode(SK_EM), None).unwrap();

    let sealed = hpke
        .seal(
            Mode::Base,
            SUITE,
            &hex_decode(PK_RM),
            &hex_decode(INFO),
            &hex_decode(AAD_0),
            &hex_decode(PT),
            &SealOpts {
                sender_kp: Some(&sender_kp),
                ..Default::default()
            },
        )
        .expect("seal");

    assert_eq!(hex_encode(&sealed.enc), PK_EM, "enc must equal pkEm");
    assert_eq!(
        hex_encode(&sealed.ciphertext),
        CT_0,
        "\nCiphertext mismatch!\nExpected: {}\nGot:      {}\n",
        CT_0,
        hex_encode(&sealed.ciphertext)
    );
}

#[test]
fn test_a1_base_seal_seq_1_matches_rfc() {
    let hpke = engine();
    let sender_kp = hpke.import_priv(0x0020, &hex_decode(SK_EM), None).unwrap();

    let sealed = hpke
        .seal(
            Mode::Base,
            SUITE,
            &hex_decode(PK_RM),
            &hex_decode(INFO),
            &hex_decode(AAD_1),
            &hex_decode(PT),
            &SealOpts {
                sender_kp: Some(&sender_kp),
                seq: Some(&[0x01]),
                ..Default::default()
            },
        )
        .expect("seal");

    assert_eq!(hex_encode(&sealed.ciphertext), CT_1);
}

#[test]
fn test_a1_base_open_matches_rfc() {
    let hpke = engine();
    let recipient = hpke
        .import_priv(0x0020, &hex_decode(SK_RM), Some(&hex_decode(PK_RM)))
        .unwrap();

    let plaintext = hpke
        .open(
            Mode::Base,
            SUITE,
            &recipient,
            &hex_decode(PK_EM),
            &hex_decode(INFO),
            &hex_decode(AAD_0),
            &hex_decode(CT_0),
            &OpenOpts::default(),
        )
        .expect("open");

    assert_eq!(hex_encode(&plaintext), PT);
}

#[test]
fn test_a1_base_open_seq_1_matches_rfc() {
    let hpke = engine();
    let recipient = hpke.import_priv(0x0020, &hex_decode(SK_RM), None).unwrap();
    // The public key hint is optional; derivation must agree with it.
    assert_eq!(hex_encode(recipient.public_bytes()), PK_RM);

    let plaintext = hpke
        .open(
            Mode::Base,
            SUITE,
            &recipient,
            &hex_decode(PK_EM),
            &hex_decode(INFO),
            &hex_decode(AAD_1),
            &hex_decode(CT_1),
            &OpenOpts {
                seq: Some(&[0x01]),
                ..Default::default()
            },
        )
        .expect("open");

    assert_eq!(hex_encode(&plaintext), PT);
}

#[test]
fn test_a1_open_with_wrong_sequence_fails() {
    let hpke = engine();
    let recipient = hpke.import_priv(0x0020, &hex_decode(SK_RM), None).unwrap();

    // CT_0 was sealed with sequence 0; opening as sequence 1 must
    // fail with the opaque decryption error.
    let result = hpke.open(
        Mode::Base,
        SUITE,
        &recipient,
        &hex_decode(PK_EM),
        &hex_decode(INFO),
        &hex_decode(AAD_0),
        &hex_decode(CT_0),
        &OpenOpts {
            seq: Some(&[0x01]),
            ..Default::default()
        },
    );
    assert_eq!(result, Err(hpke_core::Error::OpenFailed));
}

#[test]
fn test_a1_without_seq_is_identical_to_seq_zero() {
    // The sequence XOR is opt-in; absent and all-zero must produce
    // the same bytes, and both must match the RFC.
    let hpke = engine();
    let sender_kp = hpke.import_priv(0x0020, &hex_decode(SK_EM), None).unwrap();

    let explicit_zero = hpke
        .seal(
            Mode::Base,
            SUITE,
            &hex_decode(PK_RM),
            &hex_decode(INFO),
            &hex_decode(AAD_0),
            &hex_decode(PT),
            &SealOpts {
                sender_kp: Some(&sender_kp),
                seq: Some(&[0x00]),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(hex_encode(&explicit_zero.ciphertext), CT_0);
}

#[test]
fn test_provider_reports_hpke_algorithms() {
    // Sanity: the default backend covers the whole registry.
    let provider = RustCryptoProvider::new();
    assert!(provider.random().generate(16).unwrap().len() == 16);
}
