use crate::{EncodingError, Error, Parameters, ViewKey};
use bech32::{Bech32m, ByteIterExt, Fe32IterExt, Hrp, primitives::decode::CheckedHrpstring};
use core::{fmt, str::FromStr};

/// The human readable part of every address.
pub const ADDRESS_HRP: Hrp = Hrp::parse_unchecked("aleo");

/// An account address: the affine `x` coordinate of the account's encryption
/// key as 32 little-endian bytes. Its text form is bech32m with the `aleo`
/// prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    encryption_key: [u8; 32],
}

impl Address {
    /// Derives the address belonging to `view_key`.
    pub fn from_view_key(view_key: &ViewKey, params: &Parameters) -> Result<Self, Error> {
        let encryption_key = params.encryption.public_key(view_key.decryption_key())?;
        Ok(Self {
            encryption_key: encryption_key.x().to_bytes_le(),
        })
    }

    /// Wraps the bytes of an encryption key.
    pub fn from_bytes(encryption_key: [u8; 32]) -> Self {
        Self { encryption_key }
    }

    /// The encryption key bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.encryption_key
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.encryption_key
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars = self
            .encryption_key
            .iter()
            .copied()
            .bytes_to_fes()
            .with_checksum::<Bech32m>(&ADDRESS_HRP)
            .chars();
        for c in chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = EncodingError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        let checked = CheckedHrpstring::new::<Bech32m>(encoded)?;
        if checked.hrp() != ADDRESS_HRP {
            return Err(EncodingError::InvalidHrp(checked.hrp().to_string()));
        }
        let bytes = checked.byte_iter().collect::<Vec<u8>>();
        let encryption_key = <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
            EncodingError::InvalidLength {
                expected: 32,
                found: bytes.len(),
            }
        })?;
        Ok(Self { encryption_key })
    }
}

crate::impl_serde_via_string!(Address);

#[cfg(test)]
mod test {
    use super::*;
    use crate::{TEST_PARAMETERS, derivation::test::DERIVED};

    const ADDRESS: &str = "aleo1d5hg2z3ma00382pngntdp68e74zv54jdxy249qhaujhks9c72yrs33ddah";

    #[test]
    fn known_address_roundtrip() {
        let address = ADDRESS.parse::<Address>().unwrap();
        assert_eq!(address.to_string(), ADDRESS);
        assert_eq!(ADDRESS.len(), 63);
    }

    #[test]
    fn upper_case_is_accepted() {
        let address = ADDRESS.to_uppercase().parse::<Address>().unwrap();
        assert_eq!(address.to_string(), ADDRESS);
    }

    #[test]
    fn derived_from_the_decryption_key() {
        let (_, private_key, decryption_key) = &*DERIVED;
        let view_key = private_key.to_view_key(&TEST_PARAMETERS).unwrap();
        let address = view_key.to_address(&TEST_PARAMETERS).unwrap();
        let expected = TEST_PARAMETERS
            .encryption
            .public_key(decryption_key)
            .unwrap()
            .x()
            .to_bytes_le();
        assert_eq!(address.to_bytes(), expected);
        assert!(address.to_string().starts_with("aleo1"));
        assert_eq!(address.to_string().len(), 63);
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        assert!(matches!("".parse::<Address>(), Err(EncodingError::Bech32(_))));
        assert!(matches!(
            "aleo1d5hg2z3ma00382pngntdp68e74zv54jdxy249qhaujhks9c72yrs33ddaa".parse::<Address>(),
            Err(EncodingError::Bech32(_))
        ));

        let other_hrp = Hrp::parse("algo").unwrap();
        let encoded: String = [7u8; 32]
            .iter()
            .copied()
            .bytes_to_fes()
            .with_checksum::<Bech32m>(&other_hrp)
            .chars()
            .collect();
        assert!(matches!(
            encoded.parse::<Address>(),
            Err(EncodingError::InvalidHrp(hrp)) if hrp == "algo"
        ));

        let short: String = [7u8; 20]
            .iter()
            .copied()
            .bytes_to_fes()
            .with_checksum::<Bech32m>(&ADDRESS_HRP)
            .chars()
            .collect();
        assert!(matches!(
            short.parse::<Address>(),
            Err(EncodingError::InvalidLength {
                expected: 32,
                found: 20
            })
        ));
    }
}
