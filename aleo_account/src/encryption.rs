//! The account encryption key: the address is derived from it.
use crate::{
    error::{InvalidInput, ParameterError},
    schnorr::GENERATOR_POWERS,
};
use edwardsfun::{AffinePoint, CurveError, Point};

/// Generator powers `2^i·G` for the account encryption scheme.
#[derive(Debug, Clone)]
pub struct EncryptionParameters {
    generator_powers: Vec<Point>,
}

impl EncryptionParameters {
    /// Checks there is a power for every bit of a decryption key.
    pub fn new(generator_powers: Vec<Point>) -> Result<Self, InvalidInput> {
        if generator_powers.len() < GENERATOR_POWERS {
            return Err(ParameterError::TooFewGeneratorPowers {
                table: "encryption",
                expected: GENERATOR_POWERS,
                found: generator_powers.len(),
            }
            .into());
        }
        Ok(Self { generator_powers })
    }

    /// The generator power table.
    pub fn generator_powers(&self) -> &[Point] {
        &self.generator_powers
    }

    /// `Σ 2^i·G` over the little-endian bits of `decryption_key`.
    pub fn public_key(&self, decryption_key: &[u8; 32]) -> Result<AffinePoint, CurveError> {
        let bits = decryption_key
            .iter()
            .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1));
        self.generator_powers
            .iter()
            .zip(bits)
            .filter(|(_, bit)| *bit)
            .map(|(power, _)| power)
            .sum::<Point>()
            .normalize()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TEST_PARAMETERS;
    use edwardsfun::Fr;

    #[test]
    fn public_key_is_multiplication() {
        let params = &TEST_PARAMETERS.encryption;
        let key = Fr::from_u64(0xdead_beef);
        let expected = (params.generator_powers()[0] * key).normalize().unwrap();
        assert_eq!(params.public_key(&key.to_bytes_le()).unwrap(), expected);
    }

    #[test]
    fn rejects_short_table() {
        let short = TEST_PARAMETERS.encryption.generator_powers()[..100].to_vec();
        assert!(EncryptionParameters::new(short).is_err());
    }
}
