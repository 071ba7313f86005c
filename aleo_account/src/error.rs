use edwardsfun::CurveError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can go wrong deriving or decoding account keys.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller passed something malformed.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    /// A curve operation failed.
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),
    /// No counter in `2..=65535` produced an acceptable key for the seed.
    /// Deriving from the same seed again will fail again.
    #[error("no acceptable counter exists for this seed")]
    ExhaustedSearch,
    /// A text encoding of key material could not be decoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Malformed input to a derivation or a malformed parameter table.
#[derive(Debug, Error)]
pub enum InvalidInput {
    /// A seed of the wrong length.
    #[error("seed must be 32 bytes but was {0} bytes")]
    SeedLength(usize),
    /// Pedersen input longer than the hash can absorb.
    #[error("pedersen input of {length} bytes exceeds the capacity of {capacity} bytes")]
    PedersenInputTooLong {
        /// Length of the input.
        length: usize,
        /// Number of bytes the windows can absorb.
        capacity: usize,
    },
    /// A private key whose counter does not pass the acceptance test.
    #[error("counter {0} is not the accepted counter for this seed")]
    RejectedCounter(u16),
    /// The public parameter tables are unusable.
    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),
}

/// Problems found while loading or validating parameter tables.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// Fewer Pedersen windows than the window configuration requires.
    #[error("expected {expected} pedersen windows but found {found}")]
    TooFewWindows {
        /// Required number of windows.
        expected: usize,
        /// Number present.
        found: usize,
    },
    /// A Pedersen window with fewer bases than the window size.
    #[error("pedersen window {window} needs {expected} bases but has {found}")]
    WindowTooShort {
        /// Index of the window.
        window: usize,
        /// Required number of bases.
        expected: usize,
        /// Number present.
        found: usize,
    },
    /// Not enough random bases to cover every bit of the blinding scalar.
    #[error("expected at least {expected} random bases but found {found}")]
    TooFewRandomBases {
        /// Required number of random bases.
        expected: usize,
        /// Number present.
        found: usize,
    },
    /// A generator power table shorter than 256 entries.
    #[error("{table} needs {expected} generator powers but has {found}")]
    TooFewGeneratorPowers {
        /// Which table.
        table: &'static str,
        /// Required number of powers.
        expected: usize,
        /// Number present.
        found: usize,
    },
    /// A point in a table is not a valid curve point.
    #[error("point {index} of the {table} table is invalid: {source}")]
    InvalidPoint {
        /// Which table.
        table: &'static str,
        /// Position of the point in the table.
        index: usize,
        /// Why the point was rejected.
        source: CurveError,
    },
    /// The file ended before the table did.
    #[error("{table} parameters ended early")]
    Truncated {
        /// Which table.
        table: &'static str,
    },
    /// Reading a table failed for a reason other than running out of bytes.
    #[error("could not read {table} parameters: {source}")]
    Read {
        /// Which table.
        table: &'static str,
        /// The underlying error.
        source: io::Error,
    },
    /// The parameter file could not be opened.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

/// Failure to decode the text form of a key or address.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// Not valid base58.
    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),
    /// Not a valid bech32m string.
    #[error("invalid bech32m: {0}")]
    Bech32(#[from] bech32::primitives::decode::CheckedHrpstringError),
    /// The decoded bytes have the wrong length.
    #[error("expected {expected} decoded bytes but found {found}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Decoded length.
        found: usize,
    },
    /// The decoded bytes do not start with the expected prefix.
    #[error("invalid prefix")]
    InvalidPrefix,
    /// The bech32m human readable part is not `aleo`.
    #[error("invalid human readable part {0:?}")]
    InvalidHrp(String),
    /// A private key counter below the first counter the search tries.
    #[error("counter {0} is outside of the search range")]
    InvalidCounter(u16),
}
