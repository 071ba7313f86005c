//! Aleo account key derivation.
//!
//! A 32-byte seed is turned into a [`PrivateKey`] by searching for a counter
//! whose Pedersen commitment to the account's Schnorr public key can serve as
//! a decryption key. The [`ViewKey`] holds that decryption key and the
//! [`Address`] is the encryption key derived from it.
//!
//! Every derivation needs the public [`Parameters`], loaded once from their
//! binary files:
//!
//! ```no_run
//! # fn main() -> Result<(), aleo_account::Error> {
//! use aleo_account::{Account, Parameters};
//! let params = Parameters::load_dir("params")?;
//! let account = Account::from_seed([42u8; 32], &params)?;
//! println!("{}", account.private_key());
//! println!("{}", account.view_key());
//! println!("{}", account.address());
//! # Ok(()) }
//! ```
//!
//! Keys are bit-for-bit compatible with the ones the network derives,
//! including its handling of the signature secret's byte order (see
//! [`derivation`]).
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod account;
mod address;
pub mod derivation;
mod encryption;
mod error;
pub mod parameters;
mod pedersen;
mod private_key;
pub mod record;
mod schnorr;
#[doc(hidden)]
pub mod test_parameters;
mod view_key;

pub use account::Account;
pub use address::{ADDRESS_HRP, Address};
pub use derivation::{Search, SearchState};
pub use edwardsfun;
pub use encryption::EncryptionParameters;
pub use error::{EncodingError, Error, InvalidInput, ParameterError};
pub use parameters::Parameters;
pub use pedersen::{CommitmentParameters, PedersenWindow};
pub use private_key::{PRIVATE_KEY_PREFIX, PrivateKey, new_seed};
pub use record::{ProvingBackend, Record};
pub use schnorr::{GENERATOR_POWERS, SignatureParameters};
pub use view_key::{VIEW_KEY_PREFIX, ViewKey};

#[cfg(test)]
lazy_static::lazy_static! {
    pub(crate) static ref TEST_PARAMETERS: Parameters = test_parameters::insecure_parameters().unwrap();
}
