//! Anonymous voting on top of the ring engine.
//!
//! Voters form the ring; a ballot is a ring signature over `(session_id, candidate)`. The
//! tally never learns which voter cast a ballot, but a second ballot from the same voter
//! carries the same key image and is refused.

use std::collections::{BTreeMap, HashSet};

use rand_core::{CryptoRngCore, RngCore};
use tracing::{debug, info};

use crate::config::ElectionConfig;
use crate::primitives::crypto::group::{Curve, Word};
use crate::primitives::Address;
use crate::protocol::{KeyPair, Parameters, PublicKey, Signature, Signer, Verifier};
use crate::{Error, Result};

/// A generated election: session id, candidate addresses and voter keys.
///
/// Candidates are identified by the address of a freshly generated public key; their private
/// keys are discarded.
#[derive(Clone, Debug)]
pub struct Election<C: Curve> {
    params: Parameters<C>,
    session_id: u64,
    candidates: Vec<Address>,
    voters: Vec<KeyPair<C>>,
    ring: Vec<PublicKey<C>>,
}

impl<C: Curve> Election<C> {
    /// Generates an election with a random session id and fresh keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when either count is zero and [`Error::Entropy`] if the
    /// randomness source fails.
    pub fn generate<R: CryptoRngCore>(
        params: Parameters<C>,
        rng: &mut R,
        candidates: usize,
        voters: usize,
    ) -> Result<Self> {
        if candidates == 0 {
            return Err(Error::Config(
                "An election needs at least one candidate".to_string(),
            ));
        }
        if voters == 0 {
            return Err(Error::Config(
                "An election needs at least one voter".to_string(),
            ));
        }

        let mut id = [0u8; 8];
        rng.try_fill_bytes(&mut id)
            .map_err(|e| Error::Entropy(e.to_string()))?;

        let candidates = (0..candidates)
            .map(|_| KeyPair::generate(&params, &mut *rng).map(|k| k.public().address()))
            .collect::<Result<Vec<_>>>()?;
        let voters = (0..voters)
            .map(|_| KeyPair::generate(&params, &mut *rng))
            .collect::<Result<Vec<_>>>()?;
        let ring = voters.iter().map(|v| v.public().clone()).collect();

        Ok(Self {
            params,
            session_id: u64::from_be_bytes(id),
            candidates,
            voters,
            ring,
        })
    }

    /// Generates an election sized by `config`, keeping its session id when one is set.
    pub fn from_config<R: CryptoRngCore>(
        params: Parameters<C>,
        rng: &mut R,
        config: &ElectionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let election = Self::generate(params, rng, config.candidates, config.voters)?;
        Ok(match config.session_id {
            Some(id) => election.with_session_id(id),
            None => election,
        })
    }

    /// Replaces the session id.
    pub fn with_session_id(mut self, session_id: u64) -> Self {
        self.session_id = session_id;
        self
    }

    /// Returns the session id every ballot is bound to.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Returns the candidate addresses.
    pub fn candidates(&self) -> &[Address] {
        &self.candidates
    }

    /// Returns the voter ring.
    pub fn ring(&self) -> &[PublicKey<C>] {
        &self.ring
    }

    /// Casts a ballot for `candidate_index` on behalf of `voter_index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] for an unknown voter or candidate.
    pub fn cast<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        voter_index: usize,
        candidate_index: usize,
    ) -> Result<Ballot<C>> {
        let voter = self.voters.get(voter_index).ok_or(Error::InvalidIndex {
            index: voter_index,
            ring_size: self.voters.len(),
        })?;
        let candidate = *self
            .candidates
            .get(candidate_index)
            .ok_or(Error::InvalidIndex {
                index: candidate_index,
                ring_size: self.candidates.len(),
            })?;

        let signer = Signer::new(self.params.clone(), voter.clone());
        let signature = signer.sign(rng, self.session_id, &candidate, &self.ring, voter_index)?;

        Ok(Ballot {
            session_id: self.session_id,
            candidate,
            signature,
        })
    }

    /// Opens an empty tally for this election.
    pub fn tally(&self) -> Tally<C> {
        Tally::new(
            self.params.clone(),
            self.session_id,
            self.ring.clone(),
            self.candidates.clone(),
        )
    }
}

/// A signed vote.
#[derive(Clone, Debug)]
pub struct Ballot<C: Curve> {
    session_id: u64,
    candidate: Address,
    signature: Signature<C>,
}

impl<C: Curve> Ballot<C> {
    /// Assembles a ballot, e.g. from a decoded contract call.
    pub fn new(session_id: u64, candidate: Address, signature: Signature<C>) -> Self {
        Self {
            session_id,
            candidate,
            signature,
        }
    }

    /// Returns the session id.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Returns the chosen candidate.
    pub fn candidate(&self) -> &Address {
        &self.candidate
    }

    /// Returns the ring signature.
    pub fn signature(&self) -> &Signature<C> {
        &self.signature
    }
}

/// Running count of verified ballots.
#[derive(Debug)]
pub struct Tally<C: Curve> {
    verifier: Verifier<C>,
    session_id: u64,
    ring: Vec<PublicKey<C>>,
    counts: BTreeMap<Address, usize>,
    candidates: Vec<Address>,
    spent: HashSet<(Word, Word)>,
}

impl<C: Curve> Tally<C> {
    /// Creates an empty tally for one session.
    pub fn new(
        params: Parameters<C>,
        session_id: u64,
        ring: Vec<PublicKey<C>>,
        candidates: Vec<Address>,
    ) -> Self {
        let counts = candidates.iter().map(|c| (*c, 0)).collect();
        Self {
            verifier: Verifier::new(params),
            session_id,
            ring,
            counts,
            candidates,
            spent: HashSet::new(),
        }
    }

    /// Verifies and counts a ballot.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBallot`] for a foreign session, an unknown candidate or a signature
    ///   that does not verify against the voter ring
    /// - [`Error::DoubleVote`] if the ballot's key image was already counted
    pub fn record(&mut self, ballot: &Ballot<C>) -> Result<()> {
        if ballot.session_id != self.session_id {
            return Err(Error::InvalidBallot(format!(
                "Ballot is for session {}, tally is for {}",
                ballot.session_id, self.session_id
            )));
        }
        if !self.counts.contains_key(&ballot.candidate) {
            return Err(Error::InvalidBallot(format!(
                "Unknown candidate {}",
                ballot.candidate
            )));
        }
        if !self.verifier.verify(
            self.session_id,
            &ballot.candidate,
            &self.ring,
            &ballot.signature,
        ) {
            return Err(Error::InvalidBallot(
                "Ring signature does not verify".to_string(),
            ));
        }

        let image = ballot.signature.key_image();
        if !self.spent.insert(image.coordinates()) {
            info!("rejected ballot with spent key image");
            return Err(Error::DoubleVote(image.to_hex()));
        }

        if let Some(count) = self.counts.get_mut(&ballot.candidate) {
            *count += 1;
        }
        debug!(candidate = %ballot.candidate, total = self.spent.len(), "ballot counted");
        Ok(())
    }

    /// Returns the votes per candidate, in candidate order.
    pub fn counts(&self) -> Vec<(Address, usize)> {
        self.candidates
            .iter()
            .map(|c| (*c, self.counts.get(c).copied().unwrap_or(0)))
            .collect()
    }

    /// Returns the number of ballots counted.
    pub fn total(&self) -> usize {
        self.spent.len()
    }
}
