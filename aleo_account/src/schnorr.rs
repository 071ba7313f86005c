//! Fixed-base Schnorr public key generation for the account signature key.
use crate::error::{InvalidInput, ParameterError};
use edwardsfun::{AffinePoint, CurveError, Point, ruint::aliases::U256};

/// Number of entries in a generator power table.
pub const GENERATOR_POWERS: usize = 256;

/// The public Schnorr parameters: the table `2^i·G` for `i` in `0..256` and
/// the signature salt.
#[derive(Debug, Clone)]
pub struct SignatureParameters {
    generator_powers: Vec<AffinePoint>,
    salt: [u8; 32],
}

impl SignatureParameters {
    /// Checks there is a power for every bit of a 256-bit secret.
    pub fn new(generator_powers: Vec<AffinePoint>, salt: [u8; 32]) -> Result<Self, InvalidInput> {
        if generator_powers.len() < GENERATOR_POWERS {
            return Err(ParameterError::TooFewGeneratorPowers {
                table: "signature",
                expected: GENERATOR_POWERS,
                found: generator_powers.len(),
            }
            .into());
        }
        Ok(Self {
            generator_powers,
            salt,
        })
    }

    /// The generator power table.
    pub fn generator_powers(&self) -> &[AffinePoint] {
        &self.generator_powers
    }

    /// The signature salt.
    pub fn salt(&self) -> &[u8; 32] {
        &self.salt
    }

    /// Computes `secret·G` as `Σ 2^i·G` over the set bits of `secret`.
    ///
    /// Only additions are performed; the doublings live in the table. The
    /// secret is not reduced modulo the group order.
    pub fn public_key(&self, secret: &U256) -> Result<AffinePoint, CurveError> {
        self.generator_powers
            .iter()
            .take(GENERATOR_POWERS)
            .enumerate()
            .filter(|(i, _)| secret.bit(*i))
            .map(|(_, power)| power.to_point())
            .sum::<Point>()
            .normalize()
    }
}
