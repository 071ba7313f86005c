//! Loading the public account parameters from their binary files.
//!
//! All integers are little-endian. A coordinate is a 32-byte little-endian
//! base field element.
//!
//! | file | layout |
//! |---|---|
//! | `account_signature.params` | `u32` count, `count × (x, y)`, 32-byte salt |
//! | `account_commitment.params` | `u32` windows, per window a `u32` length and `length × (x, y, t, z)`, then a `u32` count and `count × (x, y, t, z)` random bases |
//! | `account_encryption.params` | `u32` count, `count × (x, y, t, z)` |
//!
//! Every point is checked when it is read so a [`Parameters`] value only ever
//! holds valid tables.
use crate::{
    encryption::EncryptionParameters,
    error::{InvalidInput, ParameterError},
    pedersen::{CommitmentParameters, PedersenWindow},
    schnorr::SignatureParameters,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use edwardsfun::{AffinePoint, Fq, Point};
use std::{
    io,
    path::{Path, PathBuf},
};

/// File name of the signature parameters.
pub const SIGNATURE_PARAMETERS_FILE: &str = "account_signature.params";
/// File name of the commitment parameters.
pub const COMMITMENT_PARAMETERS_FILE: &str = "account_commitment.params";
/// File name of the encryption parameters.
pub const ENCRYPTION_PARAMETERS_FILE: &str = "account_encryption.params";
/// Environment variable naming a directory holding the three parameter files.
pub const PARAMETERS_DIR_ENV: &str = "ALEO_PARAMS_DIR";

/// Upper bound on how many entries we allocate for up front. Counts come from
/// the file so a corrupt count must not cause a huge allocation.
const MAX_PREALLOCATION: usize = 1 << 12;

/// Everything account derivation needs. Load it once and share it by
/// reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Parameters {
    /// Schnorr generator powers and salt.
    pub signature: SignatureParameters,
    /// Pedersen bases for the account commitment.
    pub commitment: CommitmentParameters,
    /// Generator powers for the account encryption key.
    pub encryption: EncryptionParameters,
}

impl Parameters {
    /// Loads the three parameter files from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, InvalidInput> {
        let dir = dir.as_ref();
        tracing::info!(dir = %dir.display(), "loading account parameters");

        let signature = load_file(dir.join(SIGNATURE_PARAMETERS_FILE), |bytes| {
            read_signature_parameters(bytes)
        })?;
        let commitment = load_file(dir.join(COMMITMENT_PARAMETERS_FILE), |bytes| {
            read_commitment_parameters(bytes)
        })?;
        let encryption = load_file(dir.join(ENCRYPTION_PARAMETERS_FILE), |bytes| {
            read_encryption_parameters(bytes)
        })?;

        Ok(Self {
            signature,
            commitment,
            encryption,
        })
    }

    /// Loads the parameters from the directory named by
    /// [`PARAMETERS_DIR_ENV`]. Returns `Ok(None)` when it isn't set.
    pub fn load_from_env() -> Result<Option<Self>, InvalidInput> {
        match std::env::var_os(PARAMETERS_DIR_ENV) {
            Some(dir) => Self::load_dir(dir).map(Some),
            None => Ok(None),
        }
    }

    /// Writes the three parameter files into `dir`.
    pub fn write_dir(&self, dir: impl AsRef<Path>) -> io::Result<()> {
        let dir = dir.as_ref();
        let mut buf = vec![];
        write_signature_parameters(&self.signature, &mut buf)?;
        std::fs::write(dir.join(SIGNATURE_PARAMETERS_FILE), &buf)?;

        buf.clear();
        write_commitment_parameters(&self.commitment, &mut buf)?;
        std::fs::write(dir.join(COMMITMENT_PARAMETERS_FILE), &buf)?;

        buf.clear();
        write_encryption_parameters(&self.encryption, &mut buf)?;
        std::fs::write(dir.join(ENCRYPTION_PARAMETERS_FILE), &buf)
    }
}

fn load_file<T>(
    path: PathBuf,
    read: impl FnOnce(&mut &[u8]) -> Result<T, InvalidInput>,
) -> Result<T, InvalidInput> {
    let bytes = std::fs::read(&path).map_err(|source| ParameterError::Io {
        path: path.clone(),
        source,
    })?;
    let mut remaining = &bytes[..];
    let params = read(&mut remaining)?;
    if !remaining.is_empty() {
        tracing::debug!(
            path = %path.display(),
            trailing = remaining.len(),
            "ignoring trailing bytes after parameters"
        );
    }
    tracing::debug!(path = %path.display(), size = bytes.len(), "loaded parameter file");
    Ok(params)
}

/// Extends [`io::Read`] with the primitives of the parameter files.
trait ReadParametersExt: io::Read {
    fn read_count(&mut self, table: &'static str) -> Result<usize, ParameterError> {
        let count = self
            .read_u32::<LittleEndian>()
            .map_err(|e| read_error(table, e))?;
        Ok(count as usize)
    }

    fn read_coordinate(&mut self, table: &'static str, index: usize) -> Result<Fq, ParameterError> {
        let mut bytes = [0u8; 32];
        self.read_exact(&mut bytes)
            .map_err(|e| read_error(table, e))?;
        Fq::from_bytes_le(bytes).ok_or(ParameterError::InvalidPoint {
            table,
            index,
            source: edwardsfun::CurveError::NonCanonicalEncoding,
        })
    }

    /// Reads `(x, y, t, z)` keeping the coordinates as they are.
    fn read_extended_point(
        &mut self,
        table: &'static str,
        index: usize,
    ) -> Result<Point, ParameterError> {
        let x = self.read_coordinate(table, index)?;
        let y = self.read_coordinate(table, index)?;
        let t = self.read_coordinate(table, index)?;
        let z = self.read_coordinate(table, index)?;
        Point::from_extended_coordinates(x, y, z, t)
            .map_err(|source| ParameterError::InvalidPoint { table, index, source })
    }

    fn read_affine_point(
        &mut self,
        table: &'static str,
        index: usize,
    ) -> Result<AffinePoint, ParameterError> {
        let x = self.read_coordinate(table, index)?;
        let y = self.read_coordinate(table, index)?;
        AffinePoint::new(x, y).map_err(|source| ParameterError::InvalidPoint { table, index, source })
    }

    fn read_extended_points(
        &mut self,
        table: &'static str,
        count: usize,
    ) -> Result<Vec<Point>, ParameterError> {
        let mut points = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for index in 0..count {
            points.push(self.read_extended_point(table, index)?);
        }
        Ok(points)
    }
}

impl<R: io::Read + ?Sized> ReadParametersExt for R {}

fn read_error(table: &'static str, source: io::Error) -> ParameterError {
    if source.kind() == io::ErrorKind::UnexpectedEof {
        ParameterError::Truncated { table }
    } else {
        ParameterError::Read { table, source }
    }
}

/// Reads the signature parameters.
pub fn read_signature_parameters<R: io::Read>(
    reader: &mut R,
) -> Result<SignatureParameters, InvalidInput> {
    const TABLE: &str = "signature";
    let count = reader.read_count(TABLE)?;
    let mut generator_powers = Vec::with_capacity(count.min(MAX_PREALLOCATION));
    for index in 0..count {
        generator_powers.push(reader.read_affine_point(TABLE, index)?);
    }
    let mut salt = [0u8; 32];
    reader
        .read_exact(&mut salt)
        .map_err(|e| read_error(TABLE, e))?;
    tracing::debug!(generator_powers = count, "read signature parameters");
    SignatureParameters::new(generator_powers, salt)
}

/// Reads the commitment parameters for the
/// [account window](PedersenWindow::ACCOUNT_COMMITMENT).
pub fn read_commitment_parameters<R: io::Read>(
    reader: &mut R,
) -> Result<CommitmentParameters, InvalidInput> {
    const TABLE: &str = "commitment";
    let num_windows = reader.read_count(TABLE)?;
    let mut bases = Vec::with_capacity(num_windows.min(MAX_PREALLOCATION));
    for _ in 0..num_windows {
        let length = reader.read_count(TABLE)?;
        bases.push(reader.read_extended_points(TABLE, length)?);
    }
    let random_count = reader.read_count(TABLE)?;
    let random_bases = reader.read_extended_points("commitment random base", random_count)?;
    tracing::debug!(num_windows, random_bases = random_count, "read commitment parameters");
    CommitmentParameters::new(PedersenWindow::ACCOUNT_COMMITMENT, bases, random_bases)
}

/// Reads the encryption parameters.
pub fn read_encryption_parameters<R: io::Read>(
    reader: &mut R,
) -> Result<EncryptionParameters, InvalidInput> {
    const TABLE: &str = "encryption";
    let count = reader.read_count(TABLE)?;
    let generator_powers = reader.read_extended_points(TABLE, count)?;
    tracing::debug!(generator_powers = count, "read encryption parameters");
    EncryptionParameters::new(generator_powers)
}

fn write_extended_point<W: io::Write>(point: &Point, writer: &mut W) -> io::Result<()> {
    for coordinate in [point.x(), point.y(), point.t(), point.z()] {
        writer.write_all(&coordinate.to_bytes_le())?;
    }
    Ok(())
}

fn write_count<W: io::Write>(count: usize, writer: &mut W) -> io::Result<()> {
    let count = u32::try_from(count)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "table too large"))?;
    writer.write_u32::<LittleEndian>(count)
}

/// Writes the signature parameters in the format [`read_signature_parameters`]
/// reads.
pub fn write_signature_parameters<W: io::Write>(
    params: &SignatureParameters,
    writer: &mut W,
) -> io::Result<()> {
    write_count(params.generator_powers().len(), writer)?;
    for power in params.generator_powers() {
        writer.write_all(&power.x().to_bytes_le())?;
        writer.write_all(&power.y().to_bytes_le())?;
    }
    writer.write_all(params.salt())
}

/// Writes the commitment parameters in the format
/// [`read_commitment_parameters`] reads.
pub fn write_commitment_parameters<W: io::Write>(
    params: &CommitmentParameters,
    writer: &mut W,
) -> io::Result<()> {
    write_count(params.bases().len(), writer)?;
    for window in params.bases() {
        write_count(window.len(), writer)?;
        for base in window {
            write_extended_point(base, writer)?;
        }
    }
    write_count(params.random_bases().len(), writer)?;
    for base in params.random_bases() {
        write_extended_point(base, writer)?;
    }
    Ok(())
}

/// Writes the encryption parameters in the format
/// [`read_encryption_parameters`] reads.
pub fn write_encryption_parameters<W: io::Write>(
    params: &EncryptionParameters,
    writer: &mut W,
) -> io::Result<()> {
    write_count(params.generator_powers().len(), writer)?;
    for power in params.generator_powers() {
        write_extended_point(power, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TEST_PARAMETERS;

    #[test]
    fn commitment_roundtrip_keeps_extended_coordinates() {
        let mut buf = vec![];
        write_commitment_parameters(&TEST_PARAMETERS.commitment, &mut buf).unwrap();
        let read = read_commitment_parameters(&mut &buf[..]).unwrap();
        let original = TEST_PARAMETERS.commitment.bases()[2][17];
        let loaded = read.bases()[2][17];
        assert_eq!(
            (loaded.x(), loaded.y(), loaded.z(), loaded.t()),
            (original.x(), original.y(), original.z(), original.t())
        );
        assert_eq!(read.random_bases().len(), TEST_PARAMETERS.commitment.random_bases().len());
    }

    #[test]
    fn signature_roundtrip() {
        let mut buf = vec![];
        write_signature_parameters(&TEST_PARAMETERS.signature, &mut buf).unwrap();
        assert_eq!(buf.len(), 4 + 256 * 64 + 32);
        let read = read_signature_parameters(&mut &buf[..]).unwrap();
        assert_eq!(read.generator_powers(), TEST_PARAMETERS.signature.generator_powers());
        assert_eq!(read.salt(), TEST_PARAMETERS.signature.salt());
    }

    #[test]
    fn truncated_file_is_rejected() {
        let mut buf = vec![];
        write_encryption_parameters(&TEST_PARAMETERS.encryption, &mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        assert!(matches!(
            read_encryption_parameters(&mut &buf[..]),
            Err(InvalidInput::Parameters(ParameterError::Truncated { table: "encryption" }))
        ));
        assert!(matches!(
            read_signature_parameters(&mut &[1u8, 0][..]),
            Err(InvalidInput::Parameters(ParameterError::Truncated { .. }))
        ));
    }

    #[test]
    fn inconsistent_point_is_rejected() {
        let mut buf = vec![];
        write_encryption_parameters(&TEST_PARAMETERS.encryption, &mut buf).unwrap();
        // flip a bit of the t coordinate of the second point
        buf[4 + 128 + 64] ^= 1;
        assert!(matches!(
            read_encryption_parameters(&mut &buf[..]),
            Err(InvalidInput::Parameters(ParameterError::InvalidPoint {
                table: "encryption",
                index: 1,
                ..
            }))
        ));
    }

    #[test]
    fn unreduced_coordinate_is_rejected() {
        let mut buf = vec![];
        write_signature_parameters(&TEST_PARAMETERS.signature, &mut buf).unwrap();
        buf[4..36].copy_from_slice(&[0xff; 32]);
        assert!(matches!(
            read_signature_parameters(&mut &buf[..]),
            Err(InvalidInput::Parameters(ParameterError::InvalidPoint {
                index: 0,
                source: edwardsfun::CurveError::NonCanonicalEncoding,
                ..
            }))
        ));
    }

    #[test]
    fn load_dir_reads_what_write_dir_wrote() {
        let dir = std::env::temp_dir().join(format!("aleo_account_params_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        TEST_PARAMETERS.write_dir(&dir).unwrap();
        let loaded = Parameters::load_dir(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(
            loaded.signature.generator_powers(),
            TEST_PARAMETERS.signature.generator_powers()
        );
        assert_eq!(loaded.commitment.bases(), TEST_PARAMETERS.commitment.bases());
        assert_eq!(
            loaded.encryption.generator_powers(),
            TEST_PARAMETERS.encryption.generator_powers()
        );
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let result = Parameters::load_dir("/nonexistent/aleo/params");
        assert!(matches!(
            result,
            Err(InvalidInput::Parameters(ParameterError::Io { .. }))
        ));
    }
}
