//! Parameters for tests and benchmarks.
//!
//! The bases are built from short chains of doublings and additions of the
//! generator, so their discrete logarithms are easy to find. Never use them
//! for real keys.
use crate::{
    Error,
    encryption::EncryptionParameters,
    parameters::Parameters,
    pedersen::{CommitmentParameters, PedersenWindow},
    schnorr::{GENERATOR_POWERS, SignatureParameters},
};
use edwardsfun::{Fr, Point};

fn chain(start: Point, step: Point, len: usize) -> Vec<Point> {
    core::iter::successors(Some(start), |prev| Some(prev.double() + step))
        .take(len)
        .collect()
}

fn powers(base: Point) -> Vec<Point> {
    core::iter::successors(Some(base), |prev| Some(prev.double()))
        .take(GENERATOR_POWERS)
        .collect()
}

/// Generates a full set of insecure parameters with the account window
/// configuration.
pub fn insecure_parameters() -> Result<Parameters, Error> {
    let g = Point::generator();
    let window = PedersenWindow::ACCOUNT_COMMITMENT;

    let bases = (0..window.num_windows)
        .map(|i| {
            let start = g * Fr::from_u64(1_000 + i as u64);
            chain(start, g, window.window_size)
        })
        .collect();
    let random_bases = chain(g * Fr::from_u64(77), g.double(), GENERATOR_POWERS);

    let signature_powers = powers(g * Fr::from_u64(5))
        .iter()
        .map(|power| power.normalize())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Parameters {
        signature: SignatureParameters::new(signature_powers, [7u8; 32])?,
        commitment: CommitmentParameters::new(window, bases, random_bases)?,
        encryption: EncryptionParameters::new(powers(g * Fr::from_u64(9)))?,
    })
}
