//! Windowed Pedersen hash and commitment over fixed bases.
use crate::error::{InvalidInput, ParameterError};
use edwardsfun::{CurveError, Fr, Point};

/// The shape of a Pedersen hash: `num_windows` windows of `window_size` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PedersenWindow {
    /// Number of input bits each window absorbs.
    pub window_size: usize,
    /// Number of windows.
    pub num_windows: usize,
}

impl PedersenWindow {
    /// The window configuration of the account commitment.
    pub const ACCOUNT_COMMITMENT: PedersenWindow = PedersenWindow {
        window_size: 192,
        num_windows: 8,
    };

    /// The number of input bytes the hash absorbs.
    ///
    /// ```
    /// use aleo_account::PedersenWindow;
    /// assert_eq!(PedersenWindow::ACCOUNT_COMMITMENT.capacity_bytes(), 192);
    /// ```
    pub fn capacity_bytes(&self) -> usize {
        self.window_size * self.num_windows / 8
    }
}

/// Bases for the account commitment.
///
/// `bases[i][j]` is added to window `i` when bit `j` of that window's chunk of
/// the input is set. `random_bases[i]` is added when bit `i` of the blinding
/// scalar is set.
#[derive(Debug, Clone)]
pub struct CommitmentParameters {
    window: PedersenWindow,
    bases: Vec<Vec<Point>>,
    random_bases: Vec<Point>,
}

impl CommitmentParameters {
    /// Checks the tables are large enough for `window` and for every bit of a
    /// [`Fr`].
    pub fn new(
        window: PedersenWindow,
        bases: Vec<Vec<Point>>,
        random_bases: Vec<Point>,
    ) -> Result<Self, InvalidInput> {
        if bases.len() < window.num_windows {
            return Err(ParameterError::TooFewWindows {
                expected: window.num_windows,
                found: bases.len(),
            }
            .into());
        }
        if let Some((i, short)) = bases
            .iter()
            .enumerate()
            .find(|(_, window_bases)| window_bases.len() < window.window_size)
        {
            return Err(ParameterError::WindowTooShort {
                window: i,
                expected: window.window_size,
                found: short.len(),
            }
            .into());
        }
        let scalar_bits = Fr::MODULUS_BITS;
        if random_bases.len() < scalar_bits {
            return Err(ParameterError::TooFewRandomBases {
                expected: scalar_bits,
                found: random_bases.len(),
            }
            .into());
        }

        Ok(Self {
            window,
            bases,
            random_bases,
        })
    }

    /// The window configuration.
    pub fn window(&self) -> PedersenWindow {
        self.window
    }

    /// The per-window bases.
    pub fn bases(&self) -> &[Vec<Point>] {
        &self.bases
    }

    /// The bases of the blinding term.
    pub fn random_bases(&self) -> &[Point] {
        &self.random_bases
    }

    /// Hashes `input` to a curve point.
    ///
    /// The input is zero padded to [`capacity_bytes`], expanded to bits
    /// (least significant bit of each byte first) and cut into one chunk per
    /// window. The result is not normalized; its extended coordinates are
    /// exactly those the network's derivation produces.
    ///
    /// # Errors
    ///
    /// Inputs longer than [`capacity_bytes`] are rejected rather than
    /// truncated.
    ///
    /// [`capacity_bytes`]: PedersenWindow::capacity_bytes
    pub fn hash(&self, input: &[u8]) -> Result<Point, InvalidInput> {
        let capacity = self.window.capacity_bytes();
        if input.len() > capacity {
            return Err(InvalidInput::PedersenInputTooLong {
                length: input.len(),
                capacity,
            });
        }

        let mut bits = input
            .iter()
            .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1))
            .chain(core::iter::repeat(false));

        let windows = self.bases.iter().take(self.window.num_windows).map(|bases| {
            bases
                .iter()
                .take(self.window.window_size)
                .zip(bits.by_ref())
                .filter(|(_, bit)| *bit)
                .map(|(base, _)| base)
                .sum::<Point>()
        });

        Ok(windows.sum())
    }

    /// The blinding term `Σ random_bases[i]` over the set bits of
    /// `randomness`.
    pub fn blinding(&self, randomness: &Fr) -> Point {
        self.random_bases
            .iter()
            .zip(randomness.bits_le())
            .filter(|(_, bit)| *bit)
            .map(|(base, _)| base)
            .sum()
    }

    /// Commits to a precomputed [`hash`](Self::hash). This lets a caller
    /// commit to the same input under many blinding scalars without hashing
    /// it again.
    ///
    /// Returns the little-endian bytes of the affine `x` coordinate.
    pub fn commit_to_hash(&self, hash: &Point, randomness: &Fr) -> Result<[u8; 32], CurveError> {
        let commitment = *hash + self.blinding(randomness);
        Ok(commitment.normalize()?.x().to_bytes_le())
    }

    /// Commits to `input` with the blinding scalar `randomness`.
    pub fn commit(&self, input: &[u8], randomness: &Fr) -> Result<[u8; 32], crate::Error> {
        let hash = self.hash(input)?;
        Ok(self.commit_to_hash(&hash, randomness)?)
    }
}
