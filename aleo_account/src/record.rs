//! Records and the proving backend that creates and spends them.
//!
//! Record encryption and transaction proving live outside this crate. The
//! [`ProvingBackend`] trait is the interface to whatever implements them; the
//! keys derived here are what it consumes.
use crate::{Address, PrivateKey, ViewKey};
use core::fmt;

/// Size of a record payload in bytes.
pub const PAYLOAD_SIZE: usize = 128;

/// A record: an amount owned by an address, with the data a backend needs to
/// spend it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    owner: Address,
    value: i64,
    payload: Vec<u8>,
    program_id: String,
    serial_number_nonce: String,
    commitment_randomness: String,
}

impl Record {
    /// Assembles a record from its fields.
    pub fn new(
        owner: Address,
        value: i64,
        payload: Vec<u8>,
        program_id: String,
        serial_number_nonce: String,
        commitment_randomness: String,
    ) -> Self {
        Self {
            owner,
            value,
            payload,
            program_id,
            serial_number_nonce,
            commitment_randomness,
        }
    }

    /// The owner.
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// The amount.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The program the record belongs to.
    pub fn program_id(&self) -> &str {
        &self.program_id
    }

    /// The serial number nonce as encoded by the backend.
    pub fn serial_number_nonce(&self) -> &str {
        &self.serial_number_nonce
    }

    /// The commitment randomness as encoded by the backend.
    pub fn commitment_randomness(&self) -> &str {
        &self.commitment_randomness
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "owner: {}", self.owner)?;
        writeln!(f, "value: {}", self.value)?;
        writeln!(f, "payload: {}", edwardsfun::hex::encode(&self.payload))?;
        writeln!(f, "program_id: {}", self.program_id)?;
        write!(f, "commitment_randomness: {}", self.commitment_randomness)
    }
}

/// Creates, encrypts and spends records on behalf of an account.
pub trait ProvingBackend {
    /// The backend's own representation of a record it created.
    type RecordHandle;
    /// What goes wrong inside the backend.
    type Error: std::error::Error;

    /// Creates a record owned by `owner` holding `value`.
    fn create_record(
        &self,
        owner: &Address,
        value: i64,
        payload: &[u8; PAYLOAD_SIZE],
        randomness: &[u8],
    ) -> Result<Self::RecordHandle, Self::Error>;

    /// Reads the fields of a record the backend created.
    fn record(&self, handle: &Self::RecordHandle) -> Result<Record, Self::Error>;

    /// Encrypts a record to its owner.
    fn encrypt(&self, handle: &Self::RecordHandle) -> Result<String, Self::Error>;

    /// Decrypts a record with the owner's view key.
    fn decrypt(&self, ciphertext: &str, view_key: &ViewKey) -> Result<Record, Self::Error>;

    /// Builds a transaction spending `input` that sends `amount` to
    /// `recipient` and pays `fee`.
    fn craft_transfer_transaction(
        &self,
        private_key: &PrivateKey,
        recipient: &Address,
        input: &Record,
        proofs: [&[u8]; 2],
        amount: i64,
        fee: i64,
    ) -> Result<Vec<u8>, Self::Error>;
}
