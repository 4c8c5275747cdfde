//! Protocol gadgets for LSAG ring signatures.
//!
//! This module contains the data the ring engine works on: curve parameters, keys, key
//! images, challenges and the signature itself together with its contract word encoding.

use core::fmt;
use core::marker::PhantomData;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::primitives::crypto::group::{Curve, Word, WORD_BYTES};
use crate::primitives::crypto::sampler::sample_below;
use crate::primitives::Address;
use crate::{Error, Result};

/// Number of leading words in an encoded signature: `I.x`, `I.y`, `c0`.
const HEADER_WORDS: usize = 3;

/// Immutable curve configuration handed to signers and verifiers.
///
/// Built once and shared read-only; it caches the group order so sampling does not rebuild
/// it per call. Cloning is cheap enough to give every thread its own copy.
#[derive(Clone, Debug)]
pub struct Parameters<C: Curve> {
    order: BigUint,
    _curve: PhantomData<C>,
}

impl<C: Curve> Parameters<C> {
    /// Creates parameters for the curve `C`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lsag_ring::{Parameters, Secp256k1};
    ///
    /// let params = Parameters::<Secp256k1>::new();
    /// assert_eq!(params.name(), "secp256k1");
    /// ```
    pub fn new() -> Self {
        Self {
            order: C::order(),
            _curve: PhantomData,
        }
    }

    /// Returns the curve name.
    pub fn name(&self) -> &'static str {
        C::name()
    }

    /// Returns the group order `n`.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Returns the base point `G`.
    pub fn generator(&self) -> C::Point {
        C::generator()
    }

    /// Samples a uniformly distributed scalar in `[1, n - 1]`.
    pub fn random_scalar<R: CryptoRngCore>(&self, rng: &mut R) -> Result<C::Scalar> {
        sample_below::<C, R>(rng, &self.order)
    }
}

impl<C: Curve> Default for Parameters<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Secret signing scalar `d`.
///
/// Zeroized on drop and never printed.
#[derive(Clone)]
pub struct PrivateKey<C: Curve> {
    d: C::Scalar,
}

impl<C: Curve> Zeroize for PrivateKey<C> {
    fn zeroize(&mut self) {
        self.d.zeroize();
    }
}

impl<C: Curve> Drop for PrivateKey<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<C: Curve> ZeroizeOnDrop for PrivateKey<C> {}

impl<C: Curve> PrivateKey<C> {
    /// Wraps a scalar, rejecting zero.
    pub fn new(d: C::Scalar) -> Result<Self> {
        if C::scalar_is_zero(&d) {
            return Err(Error::InvalidScalar(
                "Private key cannot be zero".to_string(),
            ));
        }
        Ok(Self { d })
    }

    /// Parses a 32-byte big-endian private key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(C::scalar_from_bytes(bytes)?)
    }

    /// Returns the secret scalar.
    pub(crate) fn scalar(&self) -> &C::Scalar {
        &self.d
    }
}

impl<C: Curve> fmt::Debug for PrivateKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Public key `P = d·G` of a ring member.
#[derive(Clone, Debug)]
pub struct PublicKey<C: Curve> {
    point: C::Point,
}

impl<C: Curve> PublicKey<C> {
    /// Builds a public key from affine coordinates, validating the point.
    pub fn from_coordinates(x: &Word, y: &Word) -> Result<Self> {
        let point = C::point_from_coordinates(x, y)?;
        Ok(Self { point })
    }

    /// Returns the affine coordinates as big-endian words.
    pub fn coordinates(&self) -> (Word, Word) {
        C::point_coordinates(&self.point)
    }

    /// Returns the underlying curve point.
    pub fn point(&self) -> &C::Point {
        &self.point
    }

    /// Derives the contract address of this key.
    pub fn address(&self) -> Address {
        let (x, y) = self.coordinates();
        Address::from_coordinates(&x, &y)
    }
}

impl<C: Curve> PartialEq for PublicKey<C> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl<C: Curve> Eq for PublicKey<C> {}

/// A private key together with its public key.
///
/// The public key is always computed from the private key, never supplied separately.
#[derive(Clone, Debug)]
pub struct KeyPair<C: Curve> {
    private: PrivateKey<C>,
    public: PublicKey<C>,
}

impl<C: Curve> KeyPair<C> {
    /// Generates a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Entropy`] if the randomness source fails.
    pub fn generate<R: CryptoRngCore>(params: &Parameters<C>, rng: &mut R) -> Result<Self> {
        let d = params.random_scalar(rng)?;
        Self::from_private(PrivateKey::new(d)?)
    }

    /// Completes a key pair from its private key.
    pub fn from_private(private: PrivateKey<C>) -> Result<Self> {
        let point = C::mul_base(private.scalar());
        Ok(Self {
            private,
            public: PublicKey { point },
        })
    }

    /// Returns the private key.
    pub fn private(&self) -> &PrivateKey<C> {
        &self.private
    }

    /// Returns the public key.
    pub fn public(&self) -> &PublicKey<C> {
        &self.public
    }
}

/// Linkability tag `I = d·Hp(P)`.
///
/// Deterministic in `d`, so every signature made with the same private key carries the
/// same key image.
#[derive(Clone, Debug)]
pub struct KeyImage<C: Curve> {
    point: C::Point,
}

impl<C: Curve> KeyImage<C> {
    pub(crate) fn from_point(point: C::Point) -> Self {
        Self { point }
    }

    /// Builds a key image from affine coordinates, validating the point.
    pub fn from_coordinates(x: &Word, y: &Word) -> Result<Self> {
        let point = C::point_from_coordinates(x, y)?;
        Ok(Self { point })
    }

    /// Returns the affine coordinates as big-endian words.
    pub fn coordinates(&self) -> (Word, Word) {
        C::point_coordinates(&self.point)
    }

    /// Returns the underlying curve point.
    pub fn point(&self) -> &C::Point {
        &self.point
    }

    /// Hex rendering of `x || y`, used to report linked signatures.
    pub fn to_hex(&self) -> String {
        let (x, y) = self.coordinates();
        format!("{}{}", hex::encode(x), hex::encode(y))
    }
}

impl<C: Curve> PartialEq for KeyImage<C> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl<C: Curve> Eq for KeyImage<C> {}

/// A ring challenge: the raw 256-bit transcript digest.
///
/// Kept unreduced because the contract stores and compares the digest itself; it is
/// reduced modulo `n` only when used as a multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Challenge(Word);

impl Challenge {
    /// Wraps a digest.
    pub fn new(digest: Word) -> Self {
        Self(digest)
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &Word {
        &self.0
    }

    /// Reduces the digest to a scalar.
    pub fn to_scalar<C: Curve>(&self) -> C::Scalar {
        C::scalar_from_digest(&self.0)
    }
}

impl ConstantTimeEq for Challenge {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

/// LSAG ring signature `{I, c0, s[0..n-1]}`.
///
/// Only one challenge is stored, the one landing on ring index 0; the verifier regenerates
/// the rest. `s` is ordered like the public key list given to sign and verify.
///
/// # Serialization
///
/// [`Signature::to_bytes`] emits the contract's word layout
/// `I.x | I.y | c0 | s[0] | .. | s[n-1]`, each word 32 bytes big-endian. There is no version
/// prefix because the layout must match what the contract decodes.
#[derive(Clone, Debug)]
pub struct Signature<C: Curve> {
    key_image: KeyImage<C>,
    c0: Challenge,
    s: Vec<C::Scalar>,
}

impl<C: Curve> Signature<C> {
    /// Assembles a signature from its parts.
    ///
    /// This is typically called by [`Signer`](crate::Signer) and not directly by users.
    pub fn new(key_image: KeyImage<C>, c0: Challenge, s: Vec<C::Scalar>) -> Self {
        Self { key_image, c0, s }
    }

    /// Returns the key image.
    pub fn key_image(&self) -> &KeyImage<C> {
        &self.key_image
    }

    /// Returns the stored commitment `c0`.
    pub fn c0(&self) -> &Challenge {
        &self.c0
    }

    /// Returns the response scalars.
    pub fn responses(&self) -> &[C::Scalar] {
        &self.s
    }

    /// Returns the number of responses, which equals the ring size for a well-formed signature.
    pub fn ring_size(&self) -> usize {
        self.s.len()
    }

    /// Serializes to contract words.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (ix, iy) = self.key_image.coordinates();

        let mut out = Vec::with_capacity((HEADER_WORDS + self.s.len()) * WORD_BYTES);
        out.extend_from_slice(&ix);
        out.extend_from_slice(&iy);
        out.extend_from_slice(self.c0.as_bytes());
        for s in &self.s {
            out.extend_from_slice(&C::scalar_to_bytes(s));
        }
        out
    }

    /// Deserializes from contract words.
    ///
    /// # Errors
    ///
    /// Rejects lengths that are not whole words, encodings without a commitment or without
    /// any response, key images off the curve and responses not below the group order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % WORD_BYTES != 0 {
            return Err(Error::InvalidSignature(format!(
                "Length {} is not a multiple of {}",
                bytes.len(),
                WORD_BYTES
            )));
        }

        let words: Vec<Word> = bytes.chunks_exact(WORD_BYTES).map(to_word).collect();
        if words.len() <= HEADER_WORDS {
            return Err(Error::InvalidSignature(format!(
                "Expected at least {} words, got {}",
                HEADER_WORDS + 1,
                words.len()
            )));
        }

        let key_image = KeyImage::from_coordinates(&words[0], &words[1])?;
        let c0 = Challenge::new(words[2]);
        let s = words[HEADER_WORDS..]
            .iter()
            .map(|w| C::scalar_from_bytes(w))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { key_image, c0, s })
    }
}

impl<C: Curve> PartialEq for Signature<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key_image == other.key_image && self.c0 == other.c0 && self.s == other.s
    }
}

impl<C: Curve> Eq for Signature<C> {}

fn to_word(chunk: &[u8]) -> Word {
    let mut word = [0u8; WORD_BYTES];
    word.copy_from_slice(chunk);
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Secp256k1, SecureRng};

    #[test]
    fn key_pair_public_is_generator_multiple() {
        let params = Parameters::<Secp256k1>::new();
        let mut rng = SecureRng::new();
        let pair = KeyPair::generate(&params, &mut rng).unwrap();

        let expected = Secp256k1::mul_base(pair.private().scalar());
        assert_eq!(pair.public().point(), &expected);
    }

    #[test]
    fn zero_private_key_rejected() {
        assert!(PrivateKey::<Secp256k1>::from_bytes(&[0u8; WORD_BYTES]).is_err());
    }

    #[test]
    fn private_key_debug_is_redacted() {
        let mut one = [0u8; WORD_BYTES];
        one[WORD_BYTES - 1] = 1;
        let key = PrivateKey::<Secp256k1>::from_bytes(&one).unwrap();
        assert_eq!(format!("{key:?}"), "PrivateKey(<redacted>)");
    }

    #[test]
    fn address_of_private_key_one() {
        let mut one = [0u8; WORD_BYTES];
        one[WORD_BYTES - 1] = 1;
        let pair = KeyPair::from_private(PrivateKey::<Secp256k1>::from_bytes(&one).unwrap()).unwrap();
        assert_eq!(
            pair.public().address().to_string(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn public_key_coordinates_round_trip() {
        let params = Parameters::<Secp256k1>::new();
        let mut rng = SecureRng::new();
        let pair = KeyPair::generate(&params, &mut rng).unwrap();

        let (x, y) = pair.public().coordinates();
        let decoded = PublicKey::<Secp256k1>::from_coordinates(&x, &y).unwrap();
        assert_eq!(&decoded, pair.public());
    }

    #[test]
    fn challenge_constant_time_equality() {
        let a = Challenge::new([1u8; WORD_BYTES]);
        let b = Challenge::new([1u8; WORD_BYTES]);
        let c = Challenge::new([2u8; WORD_BYTES]);
        assert!(bool::from(a.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&c)));
    }

    #[test]
    fn signature_decoding_rejects_partial_words() {
        let result = Signature::<Secp256k1>::from_bytes(&[0u8; 4 * WORD_BYTES + 1]);
        assert!(matches!(result, Err(Error::InvalidSignature(_))));
    }

    #[test]
    fn signature_decoding_requires_commitment_and_response() {
        let (gx, gy) = Secp256k1::point_coordinates(&Secp256k1::generator());
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&gx);
        bytes.extend_from_slice(&gy);

        // key image only
        assert!(Signature::<Secp256k1>::from_bytes(&bytes).is_err());

        // key image and commitment but no responses
        bytes.extend_from_slice(&[3u8; WORD_BYTES]);
        assert!(Signature::<Secp256k1>::from_bytes(&bytes).is_err());

        bytes.extend_from_slice(&[4u8; WORD_BYTES]);
        let sig = Signature::<Secp256k1>::from_bytes(&bytes).unwrap();
        assert_eq!(sig.ring_size(), 1);
        assert_eq!(sig.c0().as_bytes(), &[3u8; WORD_BYTES]);
        assert_eq!(sig.to_bytes(), bytes);
    }

    #[test]
    fn signature_decoding_rejects_off_curve_key_image() {
        let mut bytes = vec![0u8; 4 * WORD_BYTES];
        bytes[WORD_BYTES - 1] = 1;
        assert!(matches!(
            Signature::<Secp256k1>::from_bytes(&bytes),
            Err(Error::InvalidPoint(_))
        ));
    }

    #[test]
    fn signature_decoding_rejects_non_canonical_response() {
        let (gx, gy) = Secp256k1::point_coordinates(&Secp256k1::generator());
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&gx);
        bytes.extend_from_slice(&gy);
        bytes.extend_from_slice(&[0u8; WORD_BYTES]);
        bytes.extend_from_slice(&[0xff; WORD_BYTES]);
        assert!(matches!(
            Signature::<Secp256k1>::from_bytes(&bytes),
            Err(Error::InvalidScalar(_))
        ));
    }
}
