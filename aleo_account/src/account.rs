use crate::{Address, Error, Parameters, PrivateKey, ViewKey, derivation::Search, private_key::new_seed};
use rand_core::{CryptoRng, RngCore};

/// A private key together with the view key and address derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    private_key: PrivateKey,
    view_key: ViewKey,
    address: Address,
}

impl Account {
    /// Derives the account for `seed`.
    ///
    /// # Errors
    ///
    /// [`Error::ExhaustedSearch`] if the seed has no acceptable counter.
    pub fn from_seed(seed: [u8; 32], params: &Parameters) -> Result<Self, Error> {
        let (private_key, decryption_key) = Search::new(seed, params).run()?;
        Self::from_parts(private_key, ViewKey::from_decryption_key(decryption_key), params)
    }

    /// Derives the view key and address of an existing private key.
    pub fn from_private_key(private_key: PrivateKey, params: &Parameters) -> Result<Self, Error> {
        let view_key = private_key.to_view_key(params)?;
        Self::from_parts(private_key, view_key, params)
    }

    /// An account for a random seed. Seeds with no acceptable counter are
    /// skipped.
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

    fn from_parts(private_key: PrivateKey, view_key: ViewKey, params: &Parameters) -> Result<Self, Error> {
        let address = view_key.to_address(params)?;
        tracing::debug!(counter = private_key.counter(), %address, "derived account");
        Ok(Self {
            private_key,
            view_key,
            address,
        })
    }

    /// The private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// The view key.
    pub fn view_key(&self) -> &ViewKey {
        &self.view_key
    }

    /// The address.
    pub fn address(&self) -> &Address {
        &self.address
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{InvalidInput, TEST_PARAMETERS, derivation::test::DERIVED};
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    #[test]
    fn seed_and_private_key_agree() {
        let (seed, private_key, _) = &*DERIVED;
        let from_seed = Account::from_seed(*seed, &TEST_PARAMETERS).unwrap();
        let from_private_key =
            Account::from_private_key(private_key.clone(), &TEST_PARAMETERS).unwrap();
        assert_eq!(from_seed, from_private_key);
        assert_eq!(from_seed.private_key(), private_key);
    }

    #[test]
    fn parsed_private_key_gives_the_same_account() {
        let (seed, _, _) = &*DERIVED;
        let account = Account::from_seed(*seed, &TEST_PARAMETERS).unwrap();
        let parsed: PrivateKey = account.private_key().to_string().parse().unwrap();
        let again = Account::from_private_key(parsed, &TEST_PARAMETERS).unwrap();
        assert_eq!(again.view_key(), account.view_key());
        assert_eq!(again.address(), account.address());
    }

    #[test]
    fn wrong_counter_is_rejected() {
        let (_, private_key, _) = &*DERIVED;
        let wrong = PrivateKey::from_seed_and_counter(*private_key.seed(), private_key.counter() + 1)
            .unwrap();
        assert!(matches!(
            Account::from_private_key(wrong, &TEST_PARAMETERS),
            Err(Error::InvalidInput(InvalidInput::RejectedCounter(_)))
        ));
    }

    #[test]
    fn random_accounts_are_distinct() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let first = Account::new(&mut rng, &TEST_PARAMETERS).unwrap();
        let second = Account::new(&mut rng, &TEST_PARAMETERS).unwrap();
        assert_ne!(first.address(), second.address());
    }
}
