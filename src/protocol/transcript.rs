use crate::primitives::crypto::group::{Curve, Word, WORD_BYTES};
use crate::primitives::{keccak256, AbiHasher, Address};

use super::Challenge;

/// Computes one ring challenge from its raw words.
///
/// The preimage is six 32-byte words, 192 bytes in total:
/// `session_id | candidate | L.x | L.y | R.x | R.y`. The session id and the address are
/// left-padded, exactly as the contract's `abi.encode` lays them out.
pub fn transcript_hash(
    session_id: u64,
    candidate: &Address,
    l: &(Word, Word),
    r: &(Word, Word),
) -> Word {
    AbiHasher::new()
        .uint64(session_id)
        .address(candidate)
        .uint256(&l.0)
        .uint256(&l.1)
        .uint256(&r.0)
        .uint256(&r.1)
        .finalize()
}

/// Hashes a point's coordinates: `keccak256(x || y)`.
pub fn hash_coordinates(x: &Word, y: &Word) -> Word {
    let mut preimage = [0u8; 2 * WORD_BYTES];
    preimage[..WORD_BYTES].copy_from_slice(x);
    preimage[WORD_BYTES..].copy_from_slice(y);
    keccak256(&preimage)
}

/// Maps a point to a point with no known discrete-log relation to it.
///
/// `Hp(P) = (keccak256(P.x || P.y) mod n)·G`. This is a scalar multiple of the generator, the
/// construction the contract evaluates; it is not a hash-to-curve in the RFC 9380 sense.
pub fn hash_to_point<C: Curve>(point: &C::Point) -> C::Point {
    let (x, y) = C::point_coordinates(point);
    let scalar = C::scalar_from_digest(&hash_coordinates(&x, &y));
    C::mul_base(&scalar)
}

/// Challenge generator bound to one session and one candidate.
///
/// Every challenge of a signature shares the same context, only the `L` and `R` points
/// change as the ring is walked.
#[derive(Clone, Copy, Debug)]
pub struct Transcript {
    session_id: u64,
    candidate: Address,
}

impl Transcript {
    /// Creates a transcript for the given context.
    pub fn new(session_id: u64, candidate: Address) -> Self {
        Self {
            session_id,
            candidate,
        }
    }

    /// Returns the session id.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Returns the candidate address.
    pub fn candidate(&self) -> &Address {
        &self.candidate
    }

    /// Hashes the context with `L` and `R`.
    pub fn challenge<C: Curve>(&self, l: &C::Point, r: &C::Point) -> Challenge {
        Challenge::new(transcript_hash(
            self.session_id,
            &self.candidate,
            &C::point_coordinates(l),
            &C::point_coordinates(r),
        ))
    }
}
