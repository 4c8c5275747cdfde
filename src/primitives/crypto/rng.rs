//! Operating-system randomness for signing and key generation.

use rand_core::{CryptoRng, OsRng, RngCore};

/// Cryptographically secure random number generator backed by the operating system.
///
/// `OsRng` holds no state, so a `SecureRng` may be created per thread or per call without
/// any synchronisation. Failures of the underlying source are reported through
/// [`RngCore::try_fill_bytes`], which the scalar sampler turns into
/// [`Error::Entropy`](crate::Error::Entropy) instead of panicking.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new handle to the operating system's randomness source.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_requested_length() {
        let mut rng = SecureRng::new();
        let mut buf = [0u8; 40];
        rng.try_fill_bytes(&mut buf).unwrap();
        assert!(buf.iter().any(|b| *b != 0));
    }

    #[test]
    fn successive_draws_differ() {
        let mut rng = SecureRng::new();
        assert_ne!(rng.next_u64(), rng.next_u64());
    }
}
