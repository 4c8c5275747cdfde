#![no_main]

use lsag_ring::{Address, Parameters, PublicKey, Secp256k1, Signature, Verifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(signature) = Signature::<Secp256k1>::from_bytes(data) else {
        return;
    };
    assert_eq!(signature.to_bytes(), data);

    // A decoded key image is a valid point, so it can stand in for every ring member.
    let (x, y) = signature.key_image().coordinates();
    if let Ok(member) = PublicKey::<Secp256k1>::from_coordinates(&x, &y) {
        let ring = vec![member; signature.ring_size()];
        let _ = Verifier::new(Parameters::new()).verify(0, &Address::ZERO, &ring, &signature);
    }
});
