use core::fmt::Debug;

use num_bigint::BigUint;
use zeroize::Zeroize;

use crate::Result;

/// Width in bytes of every scalar and coordinate word exchanged with the contract verifier.
pub const WORD_BYTES: usize = 32;

/// A 256-bit big-endian word as it appears in the contract ABI.
pub type Word = [u8; WORD_BYTES];

/// Trait for prime-order elliptic curve groups usable by the ring engine.
///
/// The engine consumes the curve only through generator multiplication, arbitrary point
/// multiplication, point addition and order lookup, plus the fixed-width codecs the
/// transcript hash needs. Everything is an associated function so a curve is selected by
/// type parameter rather than by a process-wide default.
pub trait Curve: Clone + Debug + Send + Sync + 'static {
    /// Scalar type for this curve (private keys, nonces, responses).
    ///
    /// Scalars must be zeroizable for security.
    type Scalar: Clone + Debug + Eq + PartialEq + Zeroize + Send + Sync;

    /// Point type for this curve (public keys, key images, ring commitments).
    type Point: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Returns the name of this curve implementation.
    fn name() -> &'static str;

    /// Returns the base point `G`.
    fn generator() -> Self::Point;

    /// Returns the point at infinity.
    fn identity() -> Self::Point;

    /// Returns the group order `n`.
    fn order() -> BigUint;

    /// Computes `s·G`.
    fn mul_base(s: &Self::Scalar) -> Self::Point;

    /// Computes `s·P`.
    fn mul(p: &Self::Point, s: &Self::Scalar) -> Self::Point;

    /// Computes `A + B`.
    fn add(a: &Self::Point, b: &Self::Point) -> Self::Point;

    /// Checks if a point is the identity.
    fn is_identity(p: &Self::Point) -> bool;

    /// Deserializes a canonical 32-byte big-endian scalar, rejecting values `>= n`.
    fn scalar_from_bytes(b: &[u8]) -> Result<Self::Scalar>;

    /// Serializes a scalar as a 32-byte big-endian word.
    fn scalar_to_bytes(s: &Self::Scalar) -> Word;

    /// Interprets a 256-bit digest as an integer and reduces it modulo `n`.
    fn scalar_from_digest(digest: &Word) -> Self::Scalar;

    /// Subtracts two scalars: `a - b mod n`.
    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Multiplies two scalars: `a * b mod n`.
    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Checks if a scalar is zero.
    fn scalar_is_zero(s: &Self::Scalar) -> bool;

    /// Returns the affine coordinates as big-endian words.
    ///
    /// The identity has no affine form and is encoded as `(0, 0)`, which is how the
    /// contract's affine arithmetic represents the point at infinity.
    fn point_coordinates(p: &Self::Point) -> (Word, Word);

    /// Builds a point from affine coordinates, rejecting points off the curve.
    fn point_from_coordinates(x: &Word, y: &Word) -> Result<Self::Point>;
}
