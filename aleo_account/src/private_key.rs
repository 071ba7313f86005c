use crate::{
    Error, EncodingError, InvalidInput, Parameters, ViewKey,
    derivation::{self, FIRST_COUNTER, Search},
};
use core::{fmt, str::FromStr};
use rand_core::{CryptoRng, RngCore};

/// Bytes in front of the counter and seed in the text form. They make every
/// key start with `APrivateKey1`.
pub const PRIVATE_KEY_PREFIX: [u8; 9] = [127, 134, 189, 116, 210, 221, 210, 137, 144];
const ENCODED_LEN: usize = PRIVATE_KEY_PREFIX.len() + 2 + 32;

/// Draws a fresh 32-byte seed.
pub fn new_seed<R: RngCore + CryptoRng>(rng: &mut R) -> [u8; 32] {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    seed
}

/// An account private key: the seed and the counter the derivation search
/// accepted, along with the two secrets hashed out of the seed.
///
/// Only the seed and counter are encoded. The secrets are recomputed when a
/// key is parsed.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    seed: [u8; 32],
    counter: u16,
    sk_sig: [u8; 32],
    sk_prf: [u8; 32],
}

impl PrivateKey {
    /// Derives the private key for `seed`.
    ///
    /// # Errors
    ///
    /// [`Error::ExhaustedSearch`] if no counter is accepted. That is final for
    /// this seed: pick another one.
    pub fn from_seed(seed: [u8; 32], params: &Parameters) -> Result<Self, Error> {
        Search::new(seed, params)
            .run()
            .map(|(private_key, _)| private_key)
    }

    /// Like [`from_seed`](Self::from_seed) for a seed of unchecked length.
    pub fn from_seed_slice(seed: &[u8], params: &Parameters) -> Result<Self, Error> {
        let seed: [u8; 32] = seed
            .try_into()
            .map_err(|_| InvalidInput::SeedLength(seed.len()))?;
        Self::from_seed(seed, params)
    }

    /// Derives a private key from a random seed. Seeds whose search is
    /// exhausted are thrown away and another is drawn.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R, params: &Parameters) -> Result<Self, Error> {
        loop {
            match Self::from_seed(new_seed(rng), params) {
                Err(Error::ExhaustedSearch) => {
                    tracing::warn!("seed has no acceptable counter, drawing another");
                }
                result => return result,
            }
        }
    }

    /// Rebuilds a private key from its encoded parts. The counter is not
    /// checked against the parameters; deriving the [`ViewKey`] does that.
    pub fn from_seed_and_counter(seed: [u8; 32], counter: u16) -> Result<Self, EncodingError> {
        if counter < FIRST_COUNTER {
            return Err(EncodingError::InvalidCounter(counter));
        }
        Ok(Self::from_parts(
            seed,
            counter,
            derivation::signature_secret(&seed),
            derivation::prf_secret(&seed),
        ))
    }

    pub(crate) fn from_parts(seed: [u8; 32], counter: u16, sk_sig: [u8; 32], sk_prf: [u8; 32]) -> Self {
        Self {
            seed,
            counter,
            sk_sig,
            sk_prf,
        }
    }

    /// The seed.
    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }

    /// The accepted counter.
    pub fn counter(&self) -> u16 {
        self.counter
    }

    /// The signature secret digest.
    pub fn sk_sig(&self) -> &[u8; 32] {
        &self.sk_sig
    }

    /// The PRF secret digest.
    pub fn sk_prf(&self) -> &[u8; 32] {
        &self.sk_prf
    }

    /// Derives the view key.
    pub fn to_view_key(&self, params: &Parameters) -> Result<ViewKey, Error> {
        ViewKey::from_private_key(self, params)
    }

    /// `prefix ‖ counter (little-endian) ‖ seed`
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[..9].copy_from_slice(&PRIVATE_KEY_PREFIX);
        bytes[9..11].copy_from_slice(&self.counter.to_le_bytes());
        bytes[11..].copy_from_slice(&self.seed);
        bytes
    }

    /// Inverse of [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.len() != ENCODED_LEN {
            return Err(EncodingError::InvalidLength {
                expected: ENCODED_LEN,
                found: bytes.len(),
            });
        }
        let (prefix, rest) = bytes.split_at(PRIVATE_KEY_PREFIX.len());
        if prefix != &PRIVATE_KEY_PREFIX[..] {
            return Err(EncodingError::InvalidPrefix);
        }
        let counter = u16::from_le_bytes([rest[0], rest[1]]);
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&rest[2..]);
        Self::from_seed_and_counter(seed, counter)
    }
}

impl fmt::Display for PrivateKey {
    /// Base58 of [`to_bytes`](PrivateKey::to_bytes) with no checksum.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&bs58::encode(self.to_bytes()).into_string())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl FromStr for PrivateKey {
    type Err = EncodingError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(encoded).into_vec()?;
        Self::from_bytes(&bytes)
    }
}

crate::impl_serde_via_string!(PrivateKey);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{TEST_PARAMETERS, derivation::test::DERIVED};
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn text_roundtrip() {
        let (_, private_key, _) = &*DERIVED;
        let encoded = private_key.to_string();
        assert!(encoded.starts_with("APrivateKey1"));
        let decoded = encoded.parse::<PrivateKey>().unwrap();
        assert_eq!(&decoded, private_key);
        assert_eq!(decoded.sk_sig(), private_key.sk_sig());
        assert_eq!(decoded.sk_prf(), private_key.sk_prf());
    }

    #[test]
    fn extreme_counters_roundtrip() {
        for counter in [FIRST_COUNTER, 0x0100, u16::MAX] {
            let private_key = PrivateKey::from_seed_and_counter([0xab; 32], counter).unwrap();
            let decoded: PrivateKey = private_key.to_string().parse().unwrap();
            assert_eq!(decoded.counter(), counter);
            assert_eq!(decoded.seed(), &[0xab; 32]);
        }
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            "".parse::<PrivateKey>(),
            Err(EncodingError::InvalidLength { found: 0, .. })
        ));
        assert!(matches!(
            "APrivateKey1xpBtAQmv5sHH".parse::<PrivateKey>(),
            Err(EncodingError::InvalidLength { .. })
        ));
        assert!(matches!(
            "0OIl".parse::<PrivateKey>(),
            Err(EncodingError::Base58(_))
        ));

        let mut wrong_prefix = PrivateKey::from_seed_and_counter([1; 32], 5)
            .unwrap()
            .to_bytes();
        wrong_prefix[0] ^= 1;
        let encoded = bs58::encode(wrong_prefix).into_string();
        assert!(matches!(
            encoded.parse::<PrivateKey>(),
            Err(EncodingError::InvalidPrefix)
        ));
    }

    #[test]
    fn counter_below_search_range_is_rejected() {
        let mut bytes = PrivateKey::from_seed_and_counter([1; 32], 2).unwrap().to_bytes();
        bytes[9] = 1;
        assert!(matches!(
            PrivateKey::from_bytes(&bytes),
            Err(EncodingError::InvalidCounter(1))
        ));
    }

    #[test]
    fn seed_length_is_checked() {
        assert!(matches!(
            PrivateKey::from_seed_slice(&[0u8; 31], &TEST_PARAMETERS),
            Err(Error::InvalidInput(InvalidInput::SeedLength(31)))
        ));
    }

    #[test]
    fn random_keys_are_accepted() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let private_key = PrivateKey::new(&mut rng, &TEST_PARAMETERS).unwrap();
        let again = PrivateKey::from_seed(*private_key.seed(), &TEST_PARAMETERS).unwrap();
        assert_eq!(private_key, again);
    }

    #[test]
    fn debug_hides_secrets() {
        let (_, private_key, _) = &*DERIVED;
        let debug = format!("{:?}", private_key);
        assert!(debug.contains("counter"));
        assert!(!debug.contains("seed"));
    }
}
