use rand_core::CryptoRngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::key_image::derive_key_image;
use super::transcript::{hash_to_point, Transcript};
use super::{KeyImage, KeyPair, Parameters, PublicKey, Signature};
use crate::primitives::crypto::group::Curve;
use crate::primitives::Address;
use crate::{Error, Result};

/// Signer for LSAG ring signatures.
///
/// Holds one key pair and its precomputed key image, and produces signatures on behalf of
/// any ring that contains the public key.
///
/// # Security
///
/// - Always use [`SecureRng`](crate::SecureRng) for randomness generation
/// - A fresh nonce is drawn for every signature and zeroized once the ring is closed
/// - Without the `strict-signer` feature, signing with a key that does not sit at the
///   claimed ring index yields a signature that simply fails verification
pub struct Signer<C: Curve> {
    params: Parameters<C>,
    key: KeyPair<C>,
    key_image: KeyImage<C>,
}

impl<C: Curve> Signer<C> {
    /// Creates a new signer for the given key pair.
    ///
    /// The key image is computed once here and reused for every signature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lsag_ring::{KeyPair, Parameters, Secp256k1, SecureRng, Signer};
    ///
    /// let params = Parameters::<Secp256k1>::new();
    /// let mut rng = SecureRng::new();
    /// let key = KeyPair::generate(&params, &mut rng).unwrap();
    ///
    /// let signer = Signer::new(params, key);
    /// ```
    pub fn new(params: Parameters<C>, key: KeyPair<C>) -> Self {
        let key_image = derive_key_image(key.private(), key.public());
        Self {
            params,
            key,
            key_image,
        }
    }

    /// Returns the signer's public key.
    pub fn public_key(&self) -> &PublicKey<C> {
        self.key.public()
    }

    /// Returns the key image every signature of this signer carries.
    pub fn key_image(&self) -> &KeyImage<C> {
        &self.key_image
    }

    /// Signs a choice of `candidate` in session `session_id` on behalf of `ring`.
    ///
    /// `signer_index` is the position of this signer's public key in `ring`. The returned
    /// signature verifies against the same ring in the same order.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyRing`] if `ring` is empty
    /// - [`Error::InvalidIndex`] if `signer_index` is out of range
    /// - [`Error::Entropy`] if the randomness source fails
    pub fn sign<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        session_id: u64,
        candidate: &Address,
        ring: &[PublicKey<C>],
        signer_index: usize,
    ) -> Result<Signature<C>> {
        let n = ring.len();
        if n == 0 {
            return Err(Error::EmptyRing);
        }
        if signer_index >= n {
            return Err(Error::InvalidIndex {
                index: signer_index,
                ring_size: n,
            });
        }

        #[cfg(feature = "strict-signer")]
        if &ring[signer_index] != self.key.public() {
            return Err(Error::SignerMismatch {
                index: signer_index,
            });
        }

        debug!(curve = C::name(), ring_size = n, session_id, "signing");

        let transcript = Transcript::new(session_id, *candidate);
        let image = self.key_image.point();
        let nonce = Nonce::<C>::new(self.params.random_scalar(rng)?);

        let l = C::mul_base(nonce.k());
        let r = C::mul(&hash_to_point::<C>(ring[signer_index].point()), nonce.k());
        let mut c = transcript.challenge::<C>(&l, &r);

        let mut responses: Vec<Option<C::Scalar>> = vec![None; n];
        let mut c0 = None;

        let mut j = (signer_index + 1) % n;
        if j == 0 {
            c0 = Some(c);
        }

        for _ in 1..n {
            let s_j = self.params.random_scalar(rng)?;
            let c_j = c.to_scalar::<C>();
            let member = ring[j].point();

            let l = C::add(&C::mul_base(&s_j), &C::mul(member, &c_j));
            let r = C::add(
                &C::mul(&hash_to_point::<C>(member), &s_j),
                &C::mul(image, &c_j),
            );
            c = transcript.challenge::<C>(&l, &r);
            responses[j] = Some(s_j);

            j = (j + 1) % n;
            if j == 0 {
                c0 = Some(c);
            }
        }

        let cx = C::scalar_mul(&c.to_scalar::<C>(), self.key.private().scalar());
        responses[signer_index] = Some(C::scalar_sub(nonce.k(), &cx));

        let s = responses.into_iter().collect::<Option<Vec<_>>>();
        match (c0, s) {
            (Some(c0), Some(s)) => Ok(Signature::new(self.key_image.clone(), c0, s)),
            _ => Err(Error::InvalidSignature(
                "Ring walk did not visit every member".to_string(),
            )),
        }
    }
}

/// Secret nonce `α` opening the ring at the signer's position.
///
/// Automatically zeroized when dropped.
#[derive(Clone)]
pub struct Nonce<C: Curve> {
    k: C::Scalar,
}

impl<C: Curve> Zeroize for Nonce<C> {
    fn zeroize(&mut self) {
        self.k.zeroize();
    }
}

impl<C: Curve> Drop for Nonce<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: Curve> ZeroizeOnDrop for Nonce<C> {}

impl<C: Curve> Nonce<C> {
    /// Creates a new nonce from a scalar.
    pub fn new(k: C::Scalar) -> Self {
        Self { k }
    }

    /// Returns a reference to the nonce scalar.
    pub fn k(&self) -> &C::Scalar {
        &self.k
    }
}
