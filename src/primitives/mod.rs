//! Cryptographic building blocks consumed by the ring engine.
//!
//! - **crypto**: the curve capability trait, secure randomness and scalar sampling
//! - **groups**: concrete curve implementations (secp256k1)
//! - **abi**: fixed-width word encoding, Keccak-256 and contract addresses

/// Fixed-width ABI encoding, Keccak-256 and addresses.
pub mod abi;
/// Curve trait, randomness and scalar sampling.
pub mod crypto;
/// Curve implementations.
pub mod groups;

pub use abi::{keccak256, AbiHasher, Address};
pub use crypto::{random_scalar, Curve, SecureRng, Word};
pub use groups::Secp256k1;
