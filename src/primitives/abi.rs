//! Fixed-width ABI encoding and Keccak-256, byte-compatible with the contract verifier.
//!
//! Every value is widened to one 32-byte big-endian word: a `uint64` is left-padded, a
//! 20-byte address is left-padded, a `uint256` is copied as is.

use core::fmt;
use core::str::FromStr;

use sha3::{Digest, Keccak256};

use super::crypto::group::{Word, WORD_BYTES};
use crate::{Error, Result};

/// Length of a contract address in bytes.
pub const ADDRESS_BYTES: usize = 20;

/// Computes the Keccak-256 digest (the pre-standard padding used by the EVM, not SHA3-256).
pub fn keccak256(data: &[u8]) -> Word {
    Keccak256::digest(data).into()
}

/// Encodes a `uint64` as a left-padded big-endian word.
pub fn encode_u64(value: u64) -> Word {
    let mut word = [0u8; WORD_BYTES];
    word[WORD_BYTES - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes an address as a left-padded word.
pub fn encode_address(address: &Address) -> Word {
    let mut word = [0u8; WORD_BYTES];
    word[WORD_BYTES - ADDRESS_BYTES..].copy_from_slice(address.as_bytes());
    word
}

/// Concatenates words and hashes them, as `keccak256(abi.encode(..))` does on chain.
#[derive(Clone, Default)]
pub struct AbiHasher(Keccak256);

impl AbiHasher {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self(Keccak256::new())
    }

    /// Appends a `uint64` word.
    pub fn uint64(mut self, value: u64) -> Self {
        self.0.update(encode_u64(value));
        self
    }

    /// Appends an address word.
    pub fn address(mut self, address: &Address) -> Self {
        self.0.update(encode_address(address));
        self
    }

    /// Appends a `uint256` word.
    pub fn uint256(mut self, word: &Word) -> Self {
        self.0.update(word);
        self
    }

    /// Returns the 32-byte digest.
    pub fn finalize(self) -> Word {
        self.0.finalize().into()
    }
}

/// A 20-byte recipient identifier (candidate address).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_BYTES]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; ADDRESS_BYTES]);

    /// Wraps raw address bytes.
    pub fn new(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }

    /// Derives the address of a public key: the last 20 bytes of `keccak256(x || y)`.
    pub fn from_coordinates(x: &Word, y: &Word) -> Self {
        let mut preimage = [0u8; 2 * WORD_BYTES];
        preimage[..WORD_BYTES].copy_from_slice(x);
        preimage[WORD_BYTES..].copy_from_slice(y);

        let digest = keccak256(&preimage);
        let mut bytes = [0u8; ADDRESS_BYTES];
        bytes.copy_from_slice(&digest[WORD_BYTES - ADDRESS_BYTES..]);
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    /// Returns a copy with one bit inverted.
    pub fn with_bit_flipped(&self, bit: usize) -> Self {
        let mut bytes = self.0;
        bytes[bit / 8] ^= 1 << (bit % 8);
        Self(bytes)
    }

    /// Renders the EIP-55 mixed-case checksum form.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + 2 * ADDRESS_BYTES);
        out.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            let nibble = (digest[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if ch.is_ascii_alphabetic() && nibble >= 8 {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; ADDRESS_BYTES];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| Error::Config(format!("Invalid address {s}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }
}
