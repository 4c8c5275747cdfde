//! Uniform scalar sampling.
//!
//! Draws `ceil(bits(n) / 8) + 8` random bytes, reduces them modulo `n - 1` and adds one, so
//! the result lies in `[1, n - 1]`. The eight surplus bytes keep the reduction bias below
//! `2^-64`.

use num_bigint::BigUint;
use rand_core::{CryptoRngCore, RngCore};
use zeroize::Zeroize;

use super::group::{Curve, WORD_BYTES};
use crate::{Error, Result};

/// Surplus random bytes drawn beyond the byte length of the group order.
const EXTRA_ENTROPY_BYTES: usize = 8;

/// Samples a uniformly distributed non-zero scalar in `[1, n - 1]`.
///
/// # Errors
///
/// Returns [`Error::Entropy`] if the randomness source cannot fill the buffer. The caller
/// decides whether to retry; no weaker fallback is ever used.
pub fn random_scalar<C: Curve, R: CryptoRngCore>(rng: &mut R) -> Result<C::Scalar> {
    sample_below::<C, R>(rng, &C::order())
}

/// Samples with an explicitly supplied group order.
///
/// [`Parameters`](crate::Parameters) caches the order and calls this directly.
pub(crate) fn sample_below<C: Curve, R: CryptoRngCore>(
    rng: &mut R,
    order: &BigUint,
) -> Result<C::Scalar> {
    let byte_len = (order.bits() as usize).div_ceil(8) + EXTRA_ENTROPY_BYTES;
    let mut buf = vec![0u8; byte_len];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| Error::Entropy(e.to_string()))?;

    let n_minus_one = order - 1u32;
    let k = BigUint::from_bytes_be(&buf) % &n_minus_one + 1u32;
    buf.zeroize();

    C::scalar_from_bytes(&to_word(&k)?)
}

/// Left-pads an integer below `2^256` into a big-endian word.
pub(crate) fn to_word(value: &BigUint) -> Result<[u8; WORD_BYTES]> {
    let raw = value.to_bytes_be();
    if raw.len() > WORD_BYTES {
        return Err(Error::InvalidScalar(format!(
            "Integer needs {} bytes, word holds {}",
            raw.len(),
            WORD_BYTES
        )));
    }

    let mut word = [0u8; WORD_BYTES];
    word[WORD_BYTES - raw.len()..].copy_from_slice(&raw);
    Ok(word)
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU32;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_core::{CryptoRng, RngCore};

    use super::*;
    use crate::{Secp256k1, SecureRng};

    struct ExhaustedRng;

    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
            let code = NonZeroU32::new(rand_core::Error::CUSTOM_START)
                .unwrap_or_else(|| unreachable!("CUSTOM_START is non-zero"));
            Err(rand_core::Error::from(code))
        }
    }

    impl CryptoRng for ExhaustedRng {}

    #[test]
    fn sampled_scalar_is_non_zero() {
        let mut rng = SecureRng::new();
        for _ in 0..32 {
            let s = random_scalar::<Secp256k1, _>(&mut rng).unwrap();
            assert!(!Secp256k1::scalar_is_zero(&s));
        }
    }

    #[test]
    fn small_order_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let order = BigUint::from(5u32);
        for _ in 0..64 {
            let s = sample_below::<Secp256k1, _>(&mut rng, &order).unwrap();
            let bytes = Secp256k1::scalar_to_bytes(&s);
            let value = BigUint::from_bytes_be(&bytes);
            assert!(value >= BigUint::from(1u32) && value <= BigUint::from(4u32));
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = random_scalar::<Secp256k1, _>(&mut StdRng::seed_from_u64(42)).unwrap();
        let b = random_scalar::<Secp256k1, _>(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn entropy_failure_is_reported() {
        let result = random_scalar::<Secp256k1, _>(&mut ExhaustedRng);
        assert!(matches!(result, Err(Error::Entropy(_))));
    }

    #[test]
    fn word_padding() {
        let word = to_word(&BigUint::from(0x2au32)).unwrap();
        assert_eq!(word[31], 0x2a);
        assert!(word[..31].iter().all(|b| *b == 0));

        let too_wide = BigUint::from_bytes_be(&[1u8; 33]);
        assert!(to_word(&too_wide).is_err());
    }
}
