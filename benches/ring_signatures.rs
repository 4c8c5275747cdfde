use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lsag_ring::{
    derive_key_image, hash_to_point, transcript_hash, Address, Curve, KeyPair, Parameters,
    PublicKey, Secp256k1, SecureRng, Signature, Signer, Verifier,
};

const RING_SIZES: [usize; 4] = [2, 8, 16, 64];

type Ring = (
    Parameters<Secp256k1>,
    Vec<KeyPair<Secp256k1>>,
    Vec<PublicKey<Secp256k1>>,
);

fn ring(size: usize) -> Ring {
    let params = Parameters::new();
    let mut rng = SecureRng::new();
    let keys: Vec<_> = (0..size)
        .map(|_| KeyPair::generate(&params, &mut rng).unwrap())
        .collect();
    let publics = keys.iter().map(|k| k.public().clone()).collect();
    (params, keys, publics)
}

fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");

    for size in RING_SIZES {
        let (params, keys, publics) = ring(size);
        let signer = Signer::new(params, keys[size / 2].clone());
        let mut rng = SecureRng::new();

        group.bench_with_input(BenchmarkId::new("ring", size), &size, |b, _| {
            b.iter(|| {
                signer
                    .sign(
                        black_box(&mut rng),
                        black_box(42),
                        &Address::ZERO,
                        &publics,
                        size / 2,
                    )
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    for size in RING_SIZES {
        let (params, keys, publics) = ring(size);
        let mut rng = SecureRng::new();
        let signature = Signer::new(params.clone(), keys[0].clone())
            .sign(&mut rng, 42, &Address::ZERO, &publics, 0)
            .unwrap();
        let verifier = Verifier::new(params);

        group.bench_with_input(BenchmarkId::new("ring", size), &size, |b, _| {
            b.iter(|| {
                verifier.verify(
                    black_box(42),
                    &Address::ZERO,
                    &publics,
                    black_box(&signature),
                )
            })
        });
    }

    group.finish();
}

fn bench_signature_decoding(c: &mut Criterion) {
    let (params, keys, publics) = ring(16);
    let mut rng = SecureRng::new();
    let bytes = Signer::new(params, keys[3].clone())
        .sign(&mut rng, 7, &Address::ZERO, &publics, 3)
        .unwrap()
        .to_bytes();

    c.bench_function("signature_decoding_16", |b| {
        b.iter(|| Signature::<Secp256k1>::from_bytes(black_box(&bytes)).unwrap())
    });
}

fn bench_hashing(c: &mut Criterion) {
    let (_, keys, _) = ring(1);
    let g = Secp256k1::point_coordinates(&Secp256k1::generator());

    c.bench_function("transcript_hash", |b| {
        b.iter(|| transcript_hash(black_box(42), &Address::ZERO, black_box(&g), black_box(&g)))
    });
    c.bench_function("hash_to_point", |b| {
        b.iter(|| hash_to_point::<Secp256k1>(black_box(keys[0].public().point())))
    });
    c.bench_function("key_image", |b| {
        b.iter(|| derive_key_image(black_box(keys[0].private()), black_box(keys[0].public())))
    });
}

criterion_group!(
    benches,
    bench_signing,
    bench_verification,
    bench_signature_decoding,
    bench_hashing
);
criterion_main!(benches);
