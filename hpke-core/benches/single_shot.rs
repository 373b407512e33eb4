//! Single-shot seal/open benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use hpke_core::{CryptoProvider, Hpke, Mode, OpenOpts, SealOpts, Suite};
use hpke_crypto_rustcrypto::RustCryptoProvider;

fn bench_seal(c: &mut Criterion) {
    let hpke = Hpke::new(RustCryptoProvider::new());
    let plaintext = vec![0u8; 256];

    for suite in [Suite::X25519_SHA256_AES128GCM, Suite::P256_SHA256_AES128GCM] {
        let (pk_r, _) = hpke.keygen(suite).unwrap();
        c.bench_function(&format!("seal/{}", suite), |b| {
            b.iter(|| {
                hpke.seal(
                    Mode::Base,
                    suite,
                    &pk_r,
                    b"bench info",
                    b"bench aad",
                    &plaintext,
                    &SealOpts::default(),
                )
                .unwrap()
            })
        });
    }
}

fn bench_open(c: &mut Criterion) {
    let hpke = Hpke::new(RustCryptoProvider::new());
    let plaintext = vec![0u8; 256];

    for suite in [Suite::X25519_SHA256_AES128GCM, Suite::P256_SHA256_AES128GCM] {
        let (pk_r, kp_r) = hpke.keygen(suite).unwrap();
        let sealed = hpke
            .seal(
                Mode::Base,
                suite,
                &pk_r,
                b"bench info",
                b"bench aad",
                &plaintext,
                &SealOpts::default(),
            )
            .unwrap();
        c.bench_function(&format!("open/{}", suite), |b| {
            b.iter(|| {
                hpke.open(
                    Mode::Base,
                    suite,
                    &kp_r,
                    &sealed.enc,
                    b"bench info",
                    b"bench aad",
                    &sealed.ciphertext,
                    &OpenOpts::default(),
                )
                .unwrap()
            })
        });
    }
}

criterion_group!(benches, bench_seal, bench_open);
criterion_main!(benches);
