/// secp256k1, the curve evaluated by the contract verifier.
pub mod secp256k1;

pub use secp256k1::Secp256k1;
