//! Linkable spontaneous anonymous group (LSAG) ring signatures over secp256k1.
//!
//! A member of a ring of public keys signs a `(session_id, candidate)` pair so that anyone can
//! check the signature came from some ring member without learning which one. Every signature
//! carries a key image, `I = d·Hp(P)`, that is identical for all signatures made with the same
//! private key, which lets a tally reject double votes.
//!
//! Signatures are byte-compatible with an on-chain verifier: the transcript hash, the point
//! hash `Hp` and the signature words follow the contract's `abi.encode` layout.
//!
//! # Example
//!
//! ```rust
//! use lsag_ring::{Address, KeyPair, Parameters, Secp256k1, SecureRng, Signer, Verifier};
//!
//! let params = Parameters::<Secp256k1>::new();
//! let mut rng = SecureRng::new();
//!
//! let keys: Vec<_> = (0..3)
//!     .map(|_| KeyPair::generate(&params, &mut rng).unwrap())
//!     .collect();
//! let ring: Vec<_> = keys.iter().map(|k| k.public().clone()).collect();
//!
//! let signer = Signer::new(params.clone(), keys[1].clone());
//! let signature = signer.sign(&mut rng, 42, &Address::ZERO, &ring, 1).unwrap();
//!
//! let verifier = Verifier::new(params);
//! assert!(verifier.verify(42, &Address::ZERO, &ring, &signature));
//! ```

#![warn(missing_docs)]

/// Election configuration loading.
pub mod config;
/// Anonymous voting on top of the ring engine.
pub mod election;
/// Error types.
pub mod error;
/// Curve arithmetic, randomness and ABI encoding.
pub mod primitives;
/// The LSAG ring engine.
pub mod protocol;
/// Argument formatting for the contract verifier.
pub mod solidity;

pub use config::ElectionConfig;
pub use election::{Ballot, Election, Tally};
pub use error::Error;
pub use primitives::{
    keccak256, random_scalar, AbiHasher, Address, Curve, Secp256k1, SecureRng, Word,
};
pub use protocol::{
    derive_key_image, hash_to_point, sign, transcript_hash, verify, Challenge, KeyImage, KeyPair,
    Parameters, PrivateKey, PublicKey, Signature, Signer, Transcript, Verifier,
};

/// Result type for LSAG operations.
pub type Result<T> = std::result::Result<T, Error>;
