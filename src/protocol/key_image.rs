use super::transcript::hash_to_point;
use super::{KeyImage, PrivateKey, PublicKey};
use crate::primitives::crypto::group::Curve;

/// Derives the key image `I = d·Hp(P)`.
///
/// Deterministic: the same key pair always yields the same image, which is what lets a tally
/// link two signatures made by one key without learning which ring member made them.
pub fn derive_key_image<C: Curve>(private: &PrivateKey<C>, public: &PublicKey<C>) -> KeyImage<C> {
    let hp = hash_to_point::<C>(public.point());
    KeyImage::from_point(C::mul(&hp, private.scalar()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::crypto::group::{Word, WORD_BYTES};
    use crate::{KeyPair, Parameters, Secp256k1, SecureRng};

    fn word(hex_str: &str) -> Word {
        let mut out = [0u8; WORD_BYTES];
        hex::decode_to_slice(hex_str, &mut out).unwrap();
        out
    }

    fn small_key(d: u8) -> KeyPair<Secp256k1> {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 1] = d;
        KeyPair::from_private(PrivateKey::from_bytes(&bytes).unwrap()).unwrap()
    }

    #[test]
    fn key_image_of_known_key() {
        let pair = small_key(2);
        let image = derive_key_image(pair.private(), pair.public());
        let (x, y) = image.coordinates();
        assert_eq!(
            x,
            word("88638a90dd217eb8ac7ac3cba00b47f58e940c81dc42525bbb75700d6c550fb0")
        );
        assert_eq!(
            y,
            word("adedfa1cb8e741b3853dd5a8c76f84be5b6da5396cef4637d5123bf27d0bd187")
        );
    }

    #[test]
    fn key_image_is_deterministic() {
        let params = Parameters::<Secp256k1>::new();
        let mut rng = SecureRng::new();
        let pair = KeyPair::generate(&params, &mut rng).unwrap();

        let a = derive_key_image(pair.private(), pair.public());
        let b = derive_key_image(pair.private(), pair.public());
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_keys_have_distinct_images() {
        let a = small_key(2);
        let b = small_key(3);
        assert_ne!(
            derive_key_image(a.private(), a.public()),
            derive_key_image(b.private(), b.public())
        );
    }
}
