//! Drives the [`ProvingBackend`] seam with an in-memory backend that keeps
//! records in the clear.
use aleo_account::{
    Account, Address, Parameters, PrivateKey, ProvingBackend, Record, ViewKey,
    edwardsfun::hex, record::PAYLOAD_SIZE, test_parameters::insecure_parameters,
};
use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};
use std::{cell::RefCell, collections::HashMap, fmt};

#[derive(Debug, PartialEq)]
enum BackendError {
    UnknownRecord,
    NotOwner,
    InsufficientValue,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for BackendError {}

struct InMemoryBackend<'a> {
    params: &'a Parameters,
    records: RefCell<HashMap<usize, Record>>,
}

impl<'a> InMemoryBackend<'a> {
    fn new(params: &'a Parameters) -> Self {
        Self {
            params,
            records: RefCell::new(HashMap::new()),
        }
    }
}

impl ProvingBackend for InMemoryBackend<'_> {
    type RecordHandle = usize;
    type Error = BackendError;

    fn create_record(
        &self,
        owner: &Address,
        value: i64,
        payload: &[u8; PAYLOAD_SIZE],
        randomness: &[u8],
    ) -> Result<usize, BackendError> {
        let mut records = self.records.borrow_mut();
        let handle = records.len();
        records.insert(
            handle,
            Record::new(
                *owner,
                value,
                payload.to_vec(),
                "in-memory".into(),
                handle.to_string(),
                hex::encode(randomness),
            ),
        );
        Ok(handle)
    }

    fn record(&self, handle: &usize) -> Result<Record, BackendError> {
        self.records
            .borrow()
            .get(handle)
            .cloned()
            .ok_or(BackendError::UnknownRecord)
    }

    fn encrypt(&self, handle: &usize) -> Result<String, BackendError> {
        let record = self.record(handle)?;
        Ok(format!("{}:{}", record.owner(), handle))
    }

    fn decrypt(&self, ciphertext: &str, view_key: &ViewKey) -> Result<Record, BackendError> {
        let (owner, handle) = ciphertext
            .split_once(':')
            .ok_or(BackendError::UnknownRecord)?;
        let address = view_key
            .to_address(self.params)
            .map_err(|_| BackendError::NotOwner)?;
        if address.to_string() != owner {
            return Err(BackendError::NotOwner);
        }
        let handle = handle.parse().map_err(|_| BackendError::UnknownRecord)?;
        self.record(&handle)
    }

    fn craft_transfer_transaction(
        &self,
        private_key: &PrivateKey,
        recipient: &Address,
        input: &Record,
        proofs: [&[u8]; 2],
        amount: i64,
        fee: i64,
    ) -> Result<Vec<u8>, BackendError> {
        let sender = Account::from_private_key(private_key.clone(), self.params)
            .map_err(|_| BackendError::NotOwner)?;
        if sender.address() != input.owner() {
            return Err(BackendError::NotOwner);
        }
        if input.value() < amount + fee {
            return Err(BackendError::InsufficientValue);
        }
        let mut transaction = recipient.to_bytes().to_vec();
        transaction.extend_from_slice(&amount.to_le_bytes());
        transaction.extend_from_slice(&fee.to_le_bytes());
        for proof in proofs {
            transaction.extend_from_slice(proof);
        }
        Ok(transaction)
    }
}

const NO_PROOFS: [&[u8]; 2] = [&[], &[]];

#[test]
fn create_encrypt_decrypt_spend() {
    let params = insecure_parameters().unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let alice = Account::new(&mut rng, &params).unwrap();
    let bob = Account::new(&mut rng, &params).unwrap();
    let backend = InMemoryBackend::new(&params);

    let handle = backend
        .create_record(alice.address(), 100, &[0u8; PAYLOAD_SIZE], &[1, 2, 3])
        .unwrap();
    let ciphertext = backend.encrypt(&handle).unwrap();

    let record = backend.decrypt(&ciphertext, alice.view_key()).unwrap();
    assert_eq!(record.owner(), alice.address());
    assert_eq!(record.value(), 100);
    assert_eq!(record.payload().len(), PAYLOAD_SIZE);
    assert_eq!(record.commitment_randomness(), "010203");
    assert_eq!(
        backend.decrypt(&ciphertext, bob.view_key()),
        Err(BackendError::NotOwner)
    );

    let transaction = backend
        .craft_transfer_transaction(alice.private_key(), bob.address(), &record, [&b"a"[..], &b"b"[..]], 90, 10)
        .unwrap();
    assert_eq!(&transaction[..32], &bob.address().to_bytes()[..]);
    assert_eq!(
        backend.craft_transfer_transaction(bob.private_key(), alice.address(), &record, NO_PROOFS, 1, 0),
        Err(BackendError::NotOwner)
    );
    assert_eq!(
        backend.craft_transfer_transaction(alice.private_key(), bob.address(), &record, NO_PROOFS, 95, 10),
        Err(BackendError::InsufficientValue)
    );
}
