//! secp256k1 elliptic curve group implementation.
//!
//! This is the curve the contract verifier evaluates with its own affine arithmetic, so
//! every coordinate and scalar crosses the boundary as an uncompressed 32-byte big-endian
//! word rather than a SEC1 compressed encoding.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar as K256Scalar, U256};
use num_bigint::BigUint;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::primitives::crypto::group::{Curve, Word, WORD_BYTES};
use crate::{Error, Result};

/// Big-endian encoding of the secp256k1 group order `n`.
const ORDER_BE: Word = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// secp256k1 group implementation.
#[derive(Clone, Debug)]
pub struct Secp256k1;

/// Scalar modulo the secp256k1 group order.
///
/// Scalars are automatically zeroized when dropped.
#[derive(Clone, Debug)]
pub struct Scalar(K256Scalar);

/// Point on secp256k1.
///
/// Points are kept in projective coordinates and only normalised to affine form when
/// hashed or serialized.
#[derive(Clone, Copy, Debug)]
pub struct Point(ProjectivePoint);

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0 = K256Scalar::ZERO;
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_affine() == other.0.to_affine()
    }
}

impl Eq for Point {}

impl Scalar {
    /// Wraps a k256 scalar.
    pub fn new(value: K256Scalar) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner k256 scalar.
    pub fn inner(&self) -> &K256Scalar {
        &self.0
    }
}

impl Point {
    /// Wraps a k256 projective point.
    pub fn new(value: ProjectivePoint) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner projective point.
    pub fn inner(&self) -> &ProjectivePoint {
        &self.0
    }
}

impl Curve for Secp256k1 {
    type Scalar = Scalar;
    type Point = Point;

    fn name() -> &'static str {
        "secp256k1"
    }

    fn generator() -> Self::Point {
        Point(ProjectivePoint::GENERATOR)
    }

    fn identity() -> Self::Point {
        Point(ProjectivePoint::IDENTITY)
    }

    fn order() -> BigUint {
        BigUint::from_bytes_be(&ORDER_BE)
    }

    fn mul_base(s: &Self::Scalar) -> Self::Point {
        Point(ProjectivePoint::GENERATOR * s.0)
    }

    fn mul(p: &Self::Point, s: &Self::Scalar) -> Self::Point {
        Point(p.0 * s.0)
    }

    fn add(a: &Self::Point, b: &Self::Point) -> Self::Point {
        Point(a.0 + b.0)
    }

    fn is_identity(p: &Self::Point) -> bool {
        p.0 == ProjectivePoint::IDENTITY
    }

    fn scalar_from_bytes(b: &[u8]) -> Result<Self::Scalar> {
        if b.len() != WORD_BYTES {
            return Err(Error::InvalidScalar(format!(
                "Expected {} bytes, got {}",
                WORD_BYTES,
                b.len()
            )));
        }

        let repr = FieldBytes::clone_from_slice(b);
        Option::<K256Scalar>::from(K256Scalar::from_repr(repr))
            .map(Scalar)
            .ok_or_else(|| {
                Error::InvalidScalar("Bytes exceed the secp256k1 group order".to_string())
            })
    }

    fn scalar_to_bytes(s: &Self::Scalar) -> Word {
        s.0.to_bytes().into()
    }

    fn scalar_from_digest(digest: &Word) -> Self::Scalar {
        let bytes = FieldBytes::from(*digest);
        Scalar(<K256Scalar as Reduce<U256>>::reduce_bytes(&bytes))
    }

    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 - b.0)
    }

    fn scalar_mul(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 * b.0)
    }

    fn scalar_is_zero(s: &Self::Scalar) -> bool {
        s.0.is_zero().into()
    }

    fn point_coordinates(p: &Self::Point) -> (Word, Word) {
        let encoded = p.0.to_affine().to_encoded_point(false);
        match (encoded.x(), encoded.y()) {
            (Some(x), Some(y)) => ((*x).into(), (*y).into()),
            _ => ([0u8; WORD_BYTES], [0u8; WORD_BYTES]),
        }
    }

    fn point_from_coordinates(x: &Word, y: &Word) -> Result<Self::Point> {
        let encoded = EncodedPoint::from_affine_coordinates(
            &FieldBytes::from(*x),
            &FieldBytes::from(*y),
            false,
        );

        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .map(|affine| Point(ProjectivePoint::from(affine)))
            .ok_or_else(|| {
                Error::InvalidPoint("Coordinates do not lie on secp256k1".to_string())
            })
    }
}
