/// Curve capability trait.
pub mod group;
/// Cryptographically secure random number generation.
pub mod rng;
/// Uniform non-zero scalar sampling.
pub mod sampler;

pub use group::{Curve, Word, WORD_BYTES};
pub use rng::SecureRng;
pub use sampler::random_scalar;
