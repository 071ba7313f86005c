use crate::{Address, EncodingError, Error, Parameters, PrivateKey, derivation};
use core::{fmt, str::FromStr};

/// Bytes in front of the decryption key in the text form. They make every
/// key start with `AViewKey1`.
pub const VIEW_KEY_PREFIX: [u8; 7] = [14, 138, 223, 204, 247, 224, 122];
const ENCODED_LEN: usize = VIEW_KEY_PREFIX.len() + 32;

/// An account view key. It holds the decryption key: the accepted commitment
/// of the derivation search, as 32 little-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKey {
    decryption_key: [u8; 32],
}

impl ViewKey {
    /// Derives the view key of `private_key`.
    ///
    /// # Errors
    ///
    /// [`InvalidInput::RejectedCounter`](crate::InvalidInput::RejectedCounter)
    /// if the private key's counter is not the one the search accepts.
    pub fn from_private_key(private_key: &PrivateKey, params: &Parameters) -> Result<Self, Error> {
        derivation::decryption_key(private_key, params).map(Self::from_decryption_key)
    }

    /// Wraps a decryption key.
    pub fn from_decryption_key(decryption_key: [u8; 32]) -> Self {
        Self { decryption_key }
    }

    /// The decryption key.
    pub fn decryption_key(&self) -> &[u8; 32] {
        &self.decryption_key
    }

    /// Derives the address.
    pub fn to_address(&self, params: &Parameters) -> Result<Address, Error> {
        Address::from_view_key(self, params)
    }

    /// `prefix ‖ decryption key`
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[..VIEW_KEY_PREFIX.len()].copy_from_slice(&VIEW_KEY_PREFIX);
        bytes[VIEW_KEY_PREFIX.len()..].copy_from_slice(&self.decryption_key);
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
        let (prefix, key) = bytes.split_at(VIEW_KEY_PREFIX.len());
        if prefix != &VIEW_KEY_PREFIX[..] {
            return Err(EncodingError::InvalidPrefix);
        }
        let mut decryption_key = [0u8; 32];
        decryption_key.copy_from_slice(key);
        Ok(Self { decryption_key })
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&bs58::encode(self.to_bytes()).into_string())
    }
}

impl fmt::Debug for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ViewKey(..)")
    }
}

impl FromStr for ViewKey {
    type Err = EncodingError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(encoded).into_vec()?;
        Self::from_bytes(&bytes)
    }
}

crate::impl_serde_via_string!(ViewKey);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{TEST_PARAMETERS, derivation::test::DERIVED};

    #[test]
    fn derived_from_the_accepted_commitment() {
        let (_, private_key, decryption_key) = &*DERIVED;
        let view_key = private_key.to_view_key(&TEST_PARAMETERS).unwrap();
        assert_eq!(view_key.decryption_key(), decryption_key);
    }

    #[test]
    fn text_roundtrip() {
        let view_key = ViewKey::from_decryption_key([0x5a; 32]);
        let encoded = view_key.to_string();
        assert!(encoded.starts_with("AViewKey1"));
        assert_eq!(encoded.parse::<ViewKey>().unwrap(), view_key);
    }

    #[test]
    fn malformed_text_is_rejected() {
        assert!(matches!(
            "".parse::<ViewKey>(),
            Err(EncodingError::InvalidLength { found: 0, .. })
        ));
        let mut bytes = ViewKey::from_decryption_key([1; 32]).to_bytes();
        bytes[6] = 0;
        assert!(matches!(
            bs58::encode(bytes).into_string().parse::<ViewKey>(),
            Err(EncodingError::InvalidPrefix)
        ));
        // a private key is not a view key
        let private_key = PrivateKey::from_seed_and_counter([1; 32], 2).unwrap();
        assert!(matches!(
            private_key.to_string().parse::<ViewKey>(),
            Err(EncodingError::InvalidLength { .. })
        ));
    }
}
