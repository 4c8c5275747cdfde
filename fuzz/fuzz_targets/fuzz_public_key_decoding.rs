#![no_main]

use lsag_ring::{PublicKey, Secp256k1};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }

    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    x.copy_from_slice(&data[..32]);
    y.copy_from_slice(&data[32..64]);

    if let Ok(key) = PublicKey::<Secp256k1>::from_coordinates(&x, &y) {
        assert_eq!(key.coordinates(), (x, y));
        let _ = key.address();
    }
});
