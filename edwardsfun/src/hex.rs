//! Hex encoding and decoding for the byte encodings of curve types.
#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};
use thiserror::Error;

/// Error representing a failed conversion from hex into the bytes for the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexError {
    /// The string was not a valid hex string.
    #[error("invalid hex string")]
    InvalidHex,
    /// The string was not the right length for the target type.
    #[error("hex string had an invalid length")]
    InvalidLength,
    /// The bytes did not encode a valid value for the target type.
    #[error("hex value did not encode the expected type")]
    InvalidEncoding,
}

fn hex_val(c: u8) -> Result<u8, HexError> {
    match c {
        b'A'..=b'F' => Ok(c - b'A' + 10),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'0'..=b'9' => Ok(c - b'0'),
        _ => Err(HexError::InvalidHex),
    }
}

#[cfg(feature = "alloc")]
/// Encode some bytes as a lowercase hex String.
///
/// # Examples
/// ```
/// use edwardsfun::{hex, Fq};
/// assert_eq!(hex::encode(&Fq::from_u64(3021).to_bytes_le()[..2]), "cd0b");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    use core::fmt::Write;
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // writing to a String can't fail
        let _ = write!(hex, "{:02x}", byte);
    }
    hex
}

#[cfg(feature = "alloc")]
/// Decode some hex into a `Vec<u8>`.
pub fn decode(hex: &str) -> Result<Vec<u8>, HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidHex);
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| Ok((hex_val(pair[0])? << 4) | hex_val(pair[1])?))
        .collect()
}

/// Decode some hex into a fixed length array.
///
/// # Examples
/// ```
/// use edwardsfun::{hex, G};
/// let g_bytes: [u8; 32] = hex::decode_array(&G.to_string()).unwrap();
/// assert_eq!(g_bytes, G.to_bytes());
/// ```
pub fn decode_array<const N: usize>(hex: &str) -> Result<[u8; N], HexError> {
    if hex.len() % 2 != 0 {
        return Err(HexError::InvalidHex);
    }
    if hex.len() != N * 2 {
        return Err(HexError::InvalidLength);
    }
    let mut bytes = [0u8; N];
    for (pair, byte) in hex.as_bytes().chunks(2).zip(bytes.iter_mut()) {
        *byte = (hex_val(pair[0])? << 4) | hex_val(pair[1])?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_array_errors() {
        assert_eq!(decode_array::<2>("abc"), Err(HexError::InvalidHex));
        assert_eq!(decode_array::<2>("abcdef"), Err(HexError::InvalidLength));
        assert_eq!(decode_array::<2>("zzzz"), Err(HexError::InvalidHex));
        assert_eq!(decode_array::<2>("ABcd"), Ok([0xab, 0xcd]));
    }

    #[test]
    fn encode_decode() {
        let bytes = [0u8, 1, 0xfe, 0xff];
        assert_eq!(encode(&bytes), "0001feff");
        assert_eq!(decode("0001feff").unwrap(), bytes.to_vec());
    }
}
