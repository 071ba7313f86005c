//! The rejection sampling search that turns a seed into a private key.
//!
//! For each counter from [`FIRST_COUNTER`] the search hashes the seed and the
//! counter into a candidate blinding scalar and commits to the account's
//! Schnorr public key and PRF key with it. The first counter whose candidate
//! is a valid scalar and whose commitment is small enough to be a decryption
//! key wins.
//!
//! The deployed derivation reverses the `sk_sig` buffer in place each time it
//! computes the Schnorr public key. The secret it feeds to the key generation
//! therefore alternates between the little-endian and big-endian readings of
//! the `sk_sig` digest. Keys only match the network's if that alternation is
//! reproduced, so [`Search`] counts the candidates it has evaluated and picks
//! the reading from the parity of the count.
use crate::{
    Error,
    parameters::Parameters,
    private_key::PrivateKey,
};
use blake2::{Blake2s256, Digest};
use edwardsfun::{Fr, Point, ruint::aliases::U256};

/// The first counter the search tries.
pub const FIRST_COUNTER: u16 = 2;
/// The last counter the search tries.
pub const LAST_COUNTER: u16 = u16::MAX;

/// Bits of the decryption key from this position up must be zero.
const DECRYPTION_KEY_HIGH_BIT: usize = 249;

/// `Blake2s256(seed ‖ 0^32)`
pub fn signature_secret(seed: &[u8; 32]) -> [u8; 32] {
    keyed_hash(seed, [0u8; 32])
}

/// `Blake2s256(seed ‖ 1 ‖ 0^31)`
pub fn prf_secret(seed: &[u8; 32]) -> [u8; 32] {
    let mut domain = [0u8; 32];
    domain[0] = 1;
    keyed_hash(seed, domain)
}

/// The candidate blinding scalar for `counter`: the hash of the seed and the
/// counter read as a little-endian integer. `None` if it is not less than the
/// group order.
pub fn candidate(seed: &[u8; 32], counter: u16) -> Option<Fr> {
    let mut domain = [0u8; 32];
    domain[..2].copy_from_slice(&counter.to_le_bytes());
    Fr::from_bytes_le(keyed_hash(seed, domain))
}

fn keyed_hash(seed: &[u8; 32], domain: [u8; 32]) -> [u8; 32] {
    let mut hash = Blake2s256::new();
    hash.update(seed);
    hash.update(domain);
    hash.finalize().into()
}

/// Why a counter was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The candidate is not less than the group order.
    CandidateOutOfRange,
    /// The commitment, read as a big-endian integer, is not less than the
    /// group order.
    CommitmentOutOfRange,
    /// The commitment has a bit set at position 249 or above.
    CommitmentHighBits,
}

/// Checks a commitment can serve as a decryption key.
///
/// The 32 little-endian bytes must be less than the group order when read as
/// a big-endian integer and bits 249 to 255 must be clear.
pub fn check_commitment(commitment: &[u8; 32]) -> Result<(), Rejection> {
    if Fr::from_bytes_be(*commitment).is_none() {
        return Err(Rejection::CommitmentOutOfRange);
    }
    let mut high_bits = commitment
        .iter()
        .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
        .skip(DECRYPTION_KEY_HIGH_BIT);
    if high_bits.any(|bit| bit) {
        return Err(Rejection::CommitmentHighBits);
    }
    Ok(())
}

/// Where a [`Search`] is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// More counters remain.
    Searching,
    /// A counter was accepted.
    Found(PrivateKey),
    /// Every counter was rejected. Terminal for the seed.
    Exhausted,
}

/// The secrets the search needs at an accepted counter.
#[derive(Clone)]
struct Accepted {
    private_key: PrivateKey,
    decryption_key: [u8; 32],
}

enum Progress {
    Searching,
    Found(Accepted),
    Exhausted,
}

/// The account derivation search for one seed, one counter per
/// [`step`](Search::step).
///
/// Each step costs at most a hash, some curve additions and a field
/// inversion, so a caller can stop between steps to honour a deadline.
/// Abandoning a search leaves nothing behind.
///
/// ```no_run
/// # fn main() -> Result<(), aleo_account::Error> {
/// use aleo_account::{Parameters, Search, SearchState};
/// let params = Parameters::load_dir("params")?;
/// let mut search = Search::new([42u8; 32], &params);
/// let private_key = loop {
///     match search.step()? {
///         SearchState::Searching => continue,
///         SearchState::Found(private_key) => break private_key,
///         SearchState::Exhausted => return Err(aleo_account::Error::ExhaustedSearch),
///     }
/// };
/// # Ok(()) }
/// ```
pub struct Search<'a> {
    params: &'a Parameters,
    seed: [u8; 32],
    sk_sig: [u8; 32],
    sk_prf: [u8; 32],
    /// The next counter to try. One past [`LAST_COUNTER`] when exhausted.
    counter: u32,
    /// How many candidates have reached the commitment stage.
    evaluated: u32,
    /// Pedersen hashes of the commitment input for the two readings of
    /// `sk_sig`, computed on first use.
    hashes: [Option<Point>; 2],
    accepted: Option<Accepted>,
}

impl<'a> Search<'a> {
    /// Starts a search for `seed`.
    pub fn new(seed: [u8; 32], params: &'a Parameters) -> Self {
        Self::starting_at(seed, params, FIRST_COUNTER.into(), 0)
    }

    fn starting_at(seed: [u8; 32], params: &'a Parameters, counter: u32, evaluated: u32) -> Self {
        Self {
            params,
            seed,
            sk_sig: signature_secret(&seed),
            sk_prf: prf_secret(&seed),
            counter,
            evaluated,
            hashes: [None, None],
            accepted: None,
        }
    }

    /// The counter the next [`step`](Self::step) will try.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// How many candidates have had their commitment checked so far.
    pub fn evaluated(&self) -> u32 {
        self.evaluated
    }

    /// The decryption key of the accepted counter once the search has found
    /// one.
    pub fn decryption_key(&self) -> Option<&[u8; 32]> {
        self.accepted.as_ref().map(|accepted| &accepted.decryption_key)
    }

    /// Tries one counter.
    ///
    /// Once the search is [`Found`](SearchState::Found) or
    /// [`Exhausted`](SearchState::Exhausted) every further step returns the
    /// same state.
    pub fn step(&mut self) -> Result<SearchState, Error> {
        Ok(match self.advance()? {
            Progress::Searching => SearchState::Searching,
            Progress::Found(accepted) => SearchState::Found(accepted.private_key),
            Progress::Exhausted => SearchState::Exhausted,
        })
    }

    /// Steps until the search finishes.
    pub fn run(mut self) -> Result<(PrivateKey, [u8; 32]), Error> {
        tracing::debug!(counter = self.counter, "starting account search");
        loop {
            match self.advance()? {
                Progress::Searching => continue,
                Progress::Found(accepted) => {
                    return Ok((accepted.private_key, accepted.decryption_key));
                }
                Progress::Exhausted => return Err(Error::ExhaustedSearch),
            }
        }
    }

    fn advance(&mut self) -> Result<Progress, Error> {
        if let Some(accepted) = &self.accepted {
            return Ok(Progress::Found(accepted.clone()));
        }
        if self.counter > u32::from(LAST_COUNTER) {
            return Ok(Progress::Exhausted);
        }
        // in range thanks to the check above
        let counter = self.counter as u16;

        match self.try_counter(counter)? {
            Ok(decryption_key) => {
                let private_key = PrivateKey::from_parts(self.seed, counter, self.sk_sig, self.sk_prf);
                tracing::debug!(counter, evaluated = self.evaluated, "account search found a key");
                let accepted = Accepted {
                    private_key,
                    decryption_key,
                };
                self.accepted = Some(accepted.clone());
                Ok(Progress::Found(accepted))
            }
            Err(rejection) => {
                tracing::trace!(counter, ?rejection, "rejected account candidate");
                self.counter += 1;
                if self.counter > u32::from(LAST_COUNTER) {
                    tracing::warn!(evaluated = self.evaluated, "account search exhausted every counter");
                    return Ok(Progress::Exhausted);
                }
                Ok(Progress::Searching)
            }
        }
    }

    fn try_counter(&mut self, counter: u16) -> Result<Result<[u8; 32], Rejection>, Error> {
        let Some(candidate) = candidate(&self.seed, counter) else {
            return Ok(Err(Rejection::CandidateOutOfRange));
        };
        let commitment = self.commit(&candidate)?;
        Ok(check_commitment(&commitment).map(|()| commitment))
    }

    /// Counts one more evaluated candidate and commits to it.
    fn commit(&mut self, candidate: &Fr) -> Result<[u8; 32], Error> {
        self.evaluated += 1;
        let hash = self.commitment_hash()?;
        Ok(self.params.commitment.commit_to_hash(&hash, candidate)?)
    }

    /// The Pedersen hash of `pk_sig.x ‖ pk_sig.y ‖ sk_prf` for the reading of
    /// `sk_sig` the current candidate uses.
    fn commitment_hash(&mut self) -> Result<Point, Error> {
        // odd evaluations read the digest little-endian, even ones big-endian
        let reading = ((self.evaluated + 1) % 2) as usize;
        if let Some(hash) = self.hashes[reading] {
            return Ok(hash);
        }
        let secret = match reading {
            0 => U256::from_le_bytes::<32>(self.sk_sig),
            _ => U256::from_be_bytes::<32>(self.sk_sig),
        };
        let pk_sig = self.params.signature.public_key(&secret)?;

        let mut input = [0u8; 96];
        input[..32].copy_from_slice(&pk_sig.x().to_bytes_le());
        input[32..64].copy_from_slice(&pk_sig.y().to_bytes_le());
        input[64..].copy_from_slice(&self.sk_prf);

        let hash = self.params.commitment.hash(&input)?;
        self.hashes[reading] = Some(hash);
        Ok(hash)
    }
}

/// Recomputes the decryption key of an already found private key.
///
/// The search state at `counter` is rebuilt by counting the candidates below
/// it that would have reached the commitment stage. Fails with
/// [`InvalidInput::RejectedCounter`](crate::InvalidInput::RejectedCounter) if
/// the counter is not accepted.
pub fn decryption_key(private_key: &PrivateKey, params: &Parameters) -> Result<[u8; 32], Error> {
    let seed = private_key.seed();
    let counter = private_key.counter();
    let evaluated = (FIRST_COUNTER..counter)
        .filter(|c| candidate(seed, *c).is_some())
        .count() as u32;

    let mut search = Search::starting_at(*seed, params, counter.into(), evaluated);
    match search.try_counter(counter)? {
        Ok(decryption_key) => Ok(decryption_key),
        Err(rejection) => {
            tracing::debug!(counter, ?rejection, "private key counter is not accepted");
            Err(crate::InvalidInput::RejectedCounter(counter).into())
        }
    }
}
