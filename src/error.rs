//! Error types for LSAG ring signatures

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A ring must contain at least one public key.
    #[error("Ring must contain at least one public key")]
    EmptyRing,

    /// The signer position does not address a ring member.
    #[error("Signer index {index} out of range for ring of size {ring_size}")]
    InvalidIndex {
        /// Requested signer position.
        index: usize,
        /// Number of public keys in the ring.
        ring_size: usize,
    },

    /// A scalar value is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A curve point is invalid or not on the curve.
    #[error("Invalid curve point: {0}")]
    InvalidPoint(String),

    /// Encoded signature bytes are malformed.
    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),

    /// The randomness source could not supply the requested bytes.
    #[error("Entropy source failure: {0}")]
    Entropy(String),

    /// The private key does not correspond to the public key at the signer position.
    #[cfg(feature = "strict-signer")]
    #[error("Private key does not match ring member {index}")]
    SignerMismatch {
        /// Requested signer position.
        index: usize,
    },

    /// A ballot failed ring signature verification.
    #[error("Invalid ballot: {0}")]
    InvalidBallot(String),

    /// A key image was already spent in this election.
    #[error("Double vote detected for key image {0}")]
    DoubleVote(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
