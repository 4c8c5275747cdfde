//! Argument lists for the voting contract.
//!
//! The contract takes integers as quoted decimal strings and arrays in brackets, the form a
//! call is pasted into a JS console or Remix. Each helper below renders the arguments of one
//! entry point.

use core::fmt;

use num_bigint::BigUint;

use crate::primitives::crypto::group::{Curve, Word};
use crate::primitives::Address;
use crate::protocol::{PublicKey, Signature};

/// Comma-separated contract arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgList {
    args: Vec<String>,
}

impl ArgList {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a `uint64` argument.
    pub fn uint64(mut self, value: u64) -> Self {
        self.args.push(quote(&value.to_string()));
        self
    }

    /// Appends an `address` argument in checksum form.
    pub fn address(mut self, address: &Address) -> Self {
        self.args.push(quote(&address.to_checksum()));
        self
    }

    /// Appends a `uint256` argument as a decimal string.
    pub fn uint256(mut self, word: &Word) -> Self {
        self.args.push(quote(&decimal(word)));
        self
    }

    /// Appends an `address[]` argument.
    pub fn address_array<'a>(mut self, addresses: impl IntoIterator<Item = &'a Address>) -> Self {
        let items: Vec<String> = addresses
            .into_iter()
            .map(|a| quote(&a.to_checksum()))
            .collect();
        self.args.push(bracket(&items));
        self
    }

    /// Appends a `uint256[]` argument.
    pub fn uint256_array(mut self, words: impl IntoIterator<Item = Word>) -> Self {
        let items: Vec<String> = words.into_iter().map(|w| quote(&decimal(&w))).collect();
        self.args.push(bracket(&items));
        self
    }

    /// Appends an unquoted literal such as `true` or a bare count.
    pub fn raw(mut self, literal: impl Into<String>) -> Self {
        self.args.push(literal.into());
        self
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` if no argument has been added.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(","))
    }
}

/// Arguments for `createVote(id, candidates)`.
pub fn create_vote_args(id: u64, candidates: &[Address]) -> ArgList {
    ArgList::new().uint64(id).address_array(candidates)
}

/// Arguments for `addVotersToVote(id, xs, ys, threshold, ready)`.
///
/// Voter keys are split into an array of x coordinates and an array of y coordinates.
pub fn add_voters_args<C: Curve>(
    id: u64,
    voters: &[PublicKey<C>],
    threshold: usize,
    ready: bool,
) -> ArgList {
    let coordinates: Vec<(Word, Word)> = voters.iter().map(PublicKey::coordinates).collect();
    ArgList::new()
        .uint64(id)
        .uint256_array(coordinates.iter().map(|(x, _)| *x))
        .uint256_array(coordinates.iter().map(|(_, y)| *y))
        .raw(threshold.to_string())
        .raw(ready.to_string())
}

/// Arguments for the anonymous vote call: `(id, candidate, Ix, Iy, c0, s[])`.
pub fn anonymous_vote_args<C: Curve>(
    id: u64,
    candidate: &Address,
    signature: &Signature<C>,
) -> ArgList {
    let (ix, iy) = signature.key_image().coordinates();
    ArgList::new()
        .uint64(id)
        .address(candidate)
        .uint256(&ix)
        .uint256(&iy)
        .uint256(signature.c0().as_bytes())
        .uint256_array(signature.responses().iter().map(C::scalar_to_bytes))
}

fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

fn bracket(items: &[String]) -> String {
    format!("[{}]", items.join(","))
}

fn decimal(word: &Word) -> String {
    BigUint::from_bytes_be(word).to_str_radix(10)
}
