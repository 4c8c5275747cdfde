/// Keys, key images, challenges and the signature type.
pub mod gadgets;
/// Key image derivation.
pub mod key_image;
/// Ring signing.
pub mod signer;
/// Challenge transcript and point hashing, byte-compatible with the contract.
pub mod transcript;
/// Ring verification.
pub mod verifier;

pub use gadgets::{Challenge, KeyImage, KeyPair, Parameters, PrivateKey, PublicKey, Signature};
pub use key_image::derive_key_image;
pub use signer::{Nonce, Signer};
pub use transcript::{hash_to_point, transcript_hash, Transcript};
pub use verifier::Verifier;

use rand_core::CryptoRngCore;

use crate::primitives::crypto::group::Curve;
use crate::primitives::Address;
use crate::Result;

/// Signs with a bare private key, deriving the public key and key image on the fly.
///
/// Convenience wrapper around [`Signer`] for one-off signatures.
pub fn sign<C: Curve, R: CryptoRngCore>(
    params: &Parameters<C>,
    rng: &mut R,
    session_id: u64,
    candidate: &Address,
    ring: &[PublicKey<C>],
    private: PrivateKey<C>,
    signer_index: usize,
) -> Result<Signature<C>> {
    let key = KeyPair::from_private(private)?;
    Signer::new(params.clone(), key).sign(rng, session_id, candidate, ring, signer_index)
}

/// Verifies a signature without keeping a [`Verifier`] around.
pub fn verify<C: Curve>(
    params: &Parameters<C>,
    session_id: u64,
    candidate: &Address,
    ring: &[PublicKey<C>],
    signature: &Signature<C>,
) -> bool {
    Verifier::new(params.clone()).verify(session_id, candidate, ring, signature)
}
