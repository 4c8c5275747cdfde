use subtle::ConstantTimeEq;
use tracing::{debug, trace};

use super::transcript::{hash_to_point, Transcript};
use super::{Parameters, PublicKey, Signature};
use crate::primitives::crypto::group::Curve;
use crate::primitives::Address;

/// Verifier for LSAG ring signatures.
///
/// Replays the ring from the stored commitment `c0` and accepts when the walk closes back on
/// it. Verification answers yes or no: every malformed input is a plain `false`.
#[derive(Clone, Debug)]
pub struct Verifier<C: Curve> {
    params: Parameters<C>,
}

impl<C: Curve> Verifier<C> {
    /// Creates a new verifier with the given parameters.
    pub fn new(params: Parameters<C>) -> Self {
        Self { params }
    }

    /// Returns the parameters this verifier was built with.
    pub fn params(&self) -> &Parameters<C> {
        &self.params
    }

    /// Verifies `signature` over `(session_id, candidate)` against `ring`.
    ///
    /// Only two challenges are alive at a time: the one being consumed and the one being
    /// produced. The final comparison against `c0` runs in constant time.
    pub fn verify(
        &self,
        session_id: u64,
        candidate: &Address,
        ring: &[PublicKey<C>],
        signature: &Signature<C>,
    ) -> bool {
        let n = ring.len();
        if n == 0 || signature.ring_size() != n {
            debug!(
                ring_size = n,
                responses = signature.ring_size(),
                "signature shape does not match ring"
            );
            return false;
        }

        let image = signature.key_image().point();
        if C::is_identity(image) {
            debug!("key image is the identity");
            return false;
        }

        let transcript = Transcript::new(session_id, *candidate);
        let mut slots = [*signature.c0(); 2];

        for (i, (member, s_i)) in ring.iter().zip(signature.responses()).enumerate() {
            let c_i = slots[i % 2].to_scalar::<C>();
            let point = member.point();

            let l = C::add(&C::mul_base(s_i), &C::mul(point, &c_i));
            let r = C::add(
                &C::mul(&hash_to_point::<C>(point), s_i),
                &C::mul(image, &c_i),
            );
            slots[(i + 1) % 2] = transcript.challenge::<C>(&l, &r);
        }

        let closed: bool = slots[n % 2].ct_eq(signature.c0()).into();
        trace!(curve = self.params.name(), ring_size = n, closed, "ring replayed");
        closed
    }

    /// Decodes a contract-encoded signature and verifies it.
    ///
    /// Undecodable input is rejected like any other invalid signature.
    pub fn verify_bytes(
        &self,
        session_id: u64,
        candidate: &Address,
        ring: &[PublicKey<C>],
        bytes: &[u8],
    ) -> bool {
        match Signature::<C>::from_bytes(bytes) {
            Ok(signature) => self.verify(session_id, candidate, ring, &signature),
            Err(e) => {
                debug!(error = %e, "signature rejected at decoding");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Challenge, KeyPair, Secp256k1, SecureRng, Signer};

    type Fixture = (
        Parameters<Secp256k1>,
        Vec<PublicKey<Secp256k1>>,
        Signature<Secp256k1>,
    );

    fn setup(size: usize, index: usize) -> Fixture {
        let params = Parameters::<Secp256k1>::new();
        let mut rng = SecureRng::new();
        let keys: Vec<_> = (0..size)
            .map(|_| KeyPair::generate(&params, &mut rng).unwrap())
            .collect();
        let ring: Vec<_> = keys.iter().map(|k| k.public().clone()).collect();

        let signer = Signer::new(params.clone(), keys[index].clone());
        let sig = signer
            .sign(&mut rng, 3, &Address::ZERO, &ring, index)
            .unwrap();
        (params, ring, sig)
    }

    #[test]
    fn verifier_accepts_valid_signature() {
        let (params, ring, sig) = setup(5, 4);
        assert!(Verifier::new(params).verify(3, &Address::ZERO, &ring, &sig));
    }

    #[test]
    fn verifier_rejects_empty_ring() {
        let (params, _, sig) = setup(2, 0);
        assert!(!Verifier::new(params).verify(3, &Address::ZERO, &[], &sig));
    }

    #[test]
    fn verifier_rejects_shape_mismatch() {
        let (params, ring, sig) = setup(3, 1);
        let verifier = Verifier::new(params);
        assert!(!verifier.verify(3, &Address::ZERO, &ring[..2], &sig));

        let mut longer = ring.clone();
        longer.push(ring[0].clone());
        assert!(!verifier.verify(3, &Address::ZERO, &longer, &sig));
    }

    #[test]
    fn verifier_rejects_altered_commitment() {
        let (params, ring, sig) = setup(3, 0);
        let mut c0 = *sig.c0().as_bytes();
        c0[0] ^= 0x80;
        let forged = Signature::new(
            sig.key_image().clone(),
            Challenge::new(c0),
            sig.responses().to_vec(),
        );
        assert!(!Verifier::new(params).verify(3, &Address::ZERO, &ring, &forged));
    }

    #[test]
    fn verify_bytes_matches_verify() {
        let (params, ring, sig) = setup(4, 2);
        let verifier = Verifier::new(params);
        let bytes = sig.to_bytes();
        assert!(verifier.verify_bytes(3, &Address::ZERO, &ring, &bytes));
        assert!(!verifier.verify_bytes(3, &Address::ZERO, &ring, &bytes[..bytes.len() - 1]));
        assert!(!verifier.verify_bytes(4, &Address::ZERO, &ring, &bytes));
    }
}
