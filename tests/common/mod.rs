//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use lsag_ring::{KeyPair, Parameters, PrivateKey, PublicKey, Secp256k1, SecureRng, Word};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Library events are shown at debug level through the test writer.
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("lsag_ring=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Generates `size` fresh key pairs.
pub fn key_pairs(params: &Parameters<Secp256k1>, size: usize) -> Vec<KeyPair<Secp256k1>> {
    let mut rng = SecureRng::new();
    (0..size)
        .map(|_| KeyPair::generate(params, &mut rng).expect("Key generation should succeed"))
        .collect()
}

/// Collects the public keys of `keys` in order.
pub fn ring_of(keys: &[KeyPair<Secp256k1>]) -> Vec<PublicKey<Secp256k1>> {
    keys.iter().map(|k| k.public().clone()).collect()
}

/// Key pair with a small private key `d`, for fixed vectors.
pub fn small_key(d: u8) -> KeyPair<Secp256k1> {
    let mut bytes = [0u8; 32];
    bytes[31] = d;
    let private = PrivateKey::from_bytes(&bytes).expect("Small private key should be valid");
    KeyPair::from_private(private).expect("Key pair should build")
}

/// Decodes a 64-digit hex string into a word.
pub fn word(hex_str: &str) -> Word {
    let mut out = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut out).expect("Fixture should be 32 bytes of hex");
    out
}
