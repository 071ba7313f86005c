//! Prime field arithmetic for the two moduli of the curve.
//!
//! [`Fq`] is the base field the curve coordinates live in (the scalar field of
//! BLS12-377) and [`Fr`] is the field of integers modulo the prime order of the
//! curve's main subgroup.
use crate::error::FieldParseError;
use core::{
    fmt,
    marker::PhantomData,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};
use rand_core::RngCore;
use ruint::{aliases::U256, uint};

/// A prime modulus and the constants needed to take square roots modulo it.
pub trait FieldModulus: 'static {
    /// The prime.
    const MODULUS: U256;
    /// Number of bits needed to write down `MODULUS`.
    const MODULUS_BITS: usize;
    /// The largest `s` such that `2^s` divides `MODULUS - 1`.
    const TWO_ADICITY: usize;
    /// A quadratic non-residue modulo `MODULUS`.
    const NON_RESIDUE: U256;
    /// A human readable name.
    const NAME: &'static str;
}

/// Marker for the base field of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseField;

/// Marker for the scalar field of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarField;

impl FieldModulus for BaseField {
    const MODULUS: U256 = uint!(
        8444461749428370424248824938781546531375899335154063827935233455917409239041_U256
    );
    const MODULUS_BITS: usize = 253;
    const TWO_ADICITY: usize = 47;
    const NON_RESIDUE: U256 = uint!(11_U256);
    const NAME: &'static str = "base field element";
}

impl FieldModulus for ScalarField {
    const MODULUS: U256 =
        uint!(0x04AAD957A68B2955982D1347970DEC005293A3AFC43C8AFEB95AEE9AC33FD9FF_U256);
    const MODULUS_BITS: usize = 251;
    const TWO_ADICITY: usize = 1;
    const NON_RESIDUE: U256 = uint!(5_U256);
    const NAME: &'static str = "scalar";
}

/// An element of the base field. Curve coordinates are made of these.
pub type Fq = FieldElement<BaseField>;
/// An integer modulo the order of the curve's main subgroup.
pub type Fr = FieldElement<ScalarField>;

/// An integer modulo `M::MODULUS`.
///
/// The inner value is always fully reduced so two equal elements always have
/// the same byte encoding. All operations return new values.
pub struct FieldElement<M>(U256, PhantomData<M>);

impl<M> Clone for FieldElement<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for FieldElement<M> {}

impl<M> PartialEq for FieldElement<M> {
    fn eq(&self, rhs: &Self) -> bool {
        self.0 == rhs.0
    }
}

impl<M> Eq for FieldElement<M> {}

impl<M> core::hash::Hash for FieldElement<M> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<M> Default for FieldElement<M> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<M> FieldElement<M> {
    /// The additive identity.
    pub const ZERO: Self = Self(U256::ZERO, PhantomData);
    /// The multiplicative identity.
    pub const ONE: Self = Self(U256::from_limbs([1, 0, 0, 0]), PhantomData);

    /// Wraps an integer the caller knows to be reduced.
    pub(crate) const fn from_uint_unchecked(value: U256) -> Self {
        Self(value, PhantomData)
    }

    /// The element as a plain integer in `[0, MODULUS)`.
    pub fn to_uint(&self) -> U256 {
        self.0
    }

    /// Whether this is [`ZERO`](Self::ZERO).
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Little-endian 32-byte encoding. This is the wire format.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        self.0.to_le_bytes::<32>()
    }

    /// Big-endian 32-byte encoding.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    /// Iterates over all 256 bits of the little-endian encoding, least
    /// significant bit first.
    pub fn bits_le(&self) -> impl Iterator<Item = bool> + '_ {
        (0..256).map(move |i| self.0.bit(i))
    }
}

impl<M: FieldModulus> FieldElement<M> {
    /// Bit length of the modulus. Every element fits in this many bits.
    pub const MODULUS_BITS: usize = M::MODULUS_BITS;

    /// Converts an integer into a field element. Returns `None` if it is not
    /// less than the modulus.
    pub fn from_uint(value: U256) -> Option<Self> {
        if value < M::MODULUS {
            Some(Self(value, PhantomData))
        } else {
            None
        }
    }

    /// Converts an integer into a field element by reducing it.
    pub fn from_uint_mod_order(value: U256) -> Self {
        Self(value.reduce_mod(M::MODULUS), PhantomData)
    }

    /// Converts a `u64` into a field element.
    ///
    /// # Example
    /// ```
    /// use edwardsfun::Fq;
    /// assert_eq!(Fq::from_u64(1), Fq::ONE);
    /// ```
    pub fn from_u64(value: u64) -> Self {
        Self::from_uint_mod_order(U256::from(value))
    }

    /// Decodes 32 little-endian bytes. Returns `None` for non-canonical
    /// encodings (values not less than the modulus).
    ///
    /// # Example
    /// ```
    /// use edwardsfun::Fr;
    /// assert_eq!(Fr::from_bytes_le([0xff; 32]), None);
    /// assert_eq!(Fr::from_bytes_le(Fr::ONE.to_bytes_le()), Some(Fr::ONE));
    /// ```
    pub fn from_bytes_le(bytes: [u8; 32]) -> Option<Self> {
        Self::from_uint(U256::from_le_bytes::<32>(bytes))
    }

    /// Decodes 32 big-endian bytes. Returns `None` for non-canonical
    /// encodings.
    pub fn from_bytes_be(bytes: [u8; 32]) -> Option<Self> {
        Self::from_uint(U256::from_be_bytes::<32>(bytes))
    }

    /// Decodes 32 little-endian bytes reducing the result modulo the prime.
    pub fn from_bytes_le_mod_order(bytes: [u8; 32]) -> Self {
        Self::from_uint_mod_order(U256::from_le_bytes::<32>(bytes))
    }

    /// Like [`from_bytes_le`](Self::from_bytes_le) but for a slice which must
    /// be 32 bytes long.
    pub fn from_slice_le(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Self::from_bytes_le(bytes)
    }

    /// Samples a uniformly distributed element.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            // rejection sampling over the bit length of the modulus
            let candidate = U256::from_le_bytes::<32>(bytes) >> (256 - M::MODULUS_BITS);
            if let Some(element) = Self::from_uint(candidate) {
                return element;
            }
        }
    }

    /// `2 * self`
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// `self * self`
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Raises `self` to the power `exp`.
    pub fn pow(&self, exp: U256) -> Self {
        Self(self.0.pow_mod(exp, M::MODULUS), PhantomData)
    }

    /// The multiplicative inverse. Returns `None` for zero.
    ///
    /// # Example
    /// ```
    /// use edwardsfun::Fq;
    /// let three = Fq::from_u64(3);
    /// assert_eq!(three * three.invert().unwrap(), Fq::ONE);
    /// assert_eq!(Fq::ZERO.invert(), None);
    /// ```
    pub fn invert(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        self.0
            .inv_mod(M::MODULUS)
            .map(|inverse| Self(inverse, PhantomData))
    }

    /// Whether the element is a square. Zero counts as one.
    pub fn is_square(&self) -> bool {
        self.is_zero() || self.pow(Self::half_modulus()) == Self::ONE
    }

    /// A square root of the element, if one exists, computed with
    /// Tonelli-Shanks. Which of the two roots is returned is unspecified.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::ZERO);
        }
        if !self.is_square() {
            return None;
        }
        let q = (M::MODULUS - U256::from(1u64)) >> M::TWO_ADICITY;
        let mut m = M::TWO_ADICITY;
        let mut c = Self(M::NON_RESIDUE, PhantomData).pow(q);
        let mut t = self.pow(q);
        let mut root = self.pow((q + U256::from(1u64)) >> 1);

        while t != Self::ONE {
            let mut i = 0;
            let mut t_pow = t;
            while t_pow != Self::ONE {
                t_pow = t_pow.square();
                i += 1;
                if i == m {
                    return None;
                }
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.square();
            }
            root = root * b;
            c = b.square();
            t = t * c;
            m = i;
        }

        Some(root)
    }

    /// Whether the element is greater than `(MODULUS - 1) / 2`. This is the
    /// "sign" of the element used by compressed point encodings.
    pub fn is_larger_half(&self) -> bool {
        self.0 > Self::half_modulus()
    }

    fn half_modulus() -> U256 {
        (M::MODULUS - U256::from(1u64)) >> 1
    }
}

/// Reverses a 32-byte array. Hash digests are read in the opposite byte order
/// to the wire encoding and this is where that crossing happens.
///
/// # Example
/// ```
/// use edwardsfun::{Fr, field::byte_reversed};
/// let one_be = Fr::ONE.to_bytes_be();
/// assert_eq!(byte_reversed(one_be), Fr::ONE.to_bytes_le());
/// ```
pub fn byte_reversed(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes.reverse();
    bytes
}

impl<M: FieldModulus> Add for FieldElement<M> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.add_mod(rhs.0, M::MODULUS), PhantomData)
    }
}

impl<M: FieldModulus> Sub for FieldElement<M> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0, PhantomData)
        } else {
            Self(M::MODULUS - (rhs.0 - self.0), PhantomData)
        }
    }
}

impl<M: FieldModulus> Mul for FieldElement<M> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0.mul_mod(rhs.0, M::MODULUS), PhantomData)
    }
}

impl<M: FieldModulus> Neg for FieldElement<M> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl<M: FieldModulus> AddAssign for FieldElement<M> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl<M: FieldModulus> SubAssign for FieldElement<M> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs
    }
}

impl<M: FieldModulus> MulAssign for FieldElement<M> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl<M> fmt::Display for FieldElement<M> {
    /// Displays the element in decimal.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<M: FieldModulus> fmt::Debug for FieldElement<M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", M::NAME, self.0)
    }
}

impl<M: FieldModulus> FromStr for FieldElement<M> {
    type Err = FieldParseError;

    /// Parses a decimal integer less than the modulus.
    ///
    /// # Example
    /// ```
    /// use edwardsfun::{Fq, FieldParseError};
    /// assert_eq!("3021".parse::<Fq>(), Ok(Fq::from_u64(3021)));
    /// assert_eq!("-1".parse::<Fq>(), Err(FieldParseError::InvalidDigit));
    /// ```
    fn from_str(decimal: &str) -> Result<Self, Self::Err> {
        if decimal.is_empty() || !decimal.bytes().all(|c| c.is_ascii_digit()) {
            return Err(FieldParseError::InvalidDigit);
        }
        let value =
            U256::from_str_radix(decimal, 10).map_err(|_| FieldParseError::OutOfRange)?;
        Self::from_uint(value).ok_or(FieldParseError::OutOfRange)
    }
}
