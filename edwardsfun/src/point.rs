use crate::{
    CurveError, Fq, Fr,
    curve::{CurveParams, EDWARDS_BLS12_377},
};
use core::ops::{Add, AddAssign, Mul, Neg, Sub};
use rand_core::RngCore;

const CURVE: &CurveParams = &EDWARDS_BLS12_377;

/// A point on the curve in extended coordinates `(X : Y : Z : T)`.
///
/// The affine point is `(X/Z, Y/Z)` and `T = X·Y/Z`. Group operations never
/// invert a field element so the same affine point can have many extended
/// representations. Equality compares the affine points they represent.
///
/// To get bytes out of a `Point` you must [`normalize`] it into an
/// [`AffinePoint`] first.
///
/// [`normalize`]: Point::normalize
#[derive(Clone, Copy)]
pub struct Point {
    x: Fq,
    y: Fq,
    z: Fq,
    t: Fq,
}

impl Point {
    /// The neutral element `(0 : 1 : 1 : 0)`.
    pub const IDENTITY: Self = Point {
        x: Fq::ZERO,
        y: Fq::ONE,
        z: Fq::ONE,
        t: Fq::ZERO,
    };

    /// The generator of the main subgroup.
    pub fn generator() -> Self {
        crate::G.to_point()
    }

    /// Builds a point from extended coordinates, checking that they describe a
    /// curve point. The coordinates are kept exactly as given.
    ///
    /// # Example
    /// ```
    /// use edwardsfun::{CurveError, Fq, Point};
    /// let identity = Point::from_extended_coordinates(Fq::ZERO, Fq::ONE, Fq::ONE, Fq::ZERO).unwrap();
    /// assert!(identity.is_identity());
    /// assert_eq!(
    ///     Point::from_extended_coordinates(Fq::ZERO, Fq::ONE, Fq::ZERO, Fq::ZERO),
    ///     Err(CurveError::InconsistentExtendedCoordinates)
    /// );
    /// ```
    pub fn from_extended_coordinates(x: Fq, y: Fq, z: Fq, t: Fq) -> Result<Self, CurveError> {
        if z.is_zero() || x * y != z * t {
            return Err(CurveError::InconsistentExtendedCoordinates);
        }
        // a·X² + Y² = Z² + d·T² is the curve equation scaled by Z² once T = XY/Z
        if CURVE.a * x.square() + y.square() != z.square() + CURVE.d * t.square() {
            return Err(CurveError::NotOnCurve);
        }
        Ok(Point { x, y, z, t })
    }

    /// Samples a uniformly random multiple of the generator.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        Self::generator() * Fr::random(rng)
    }

    /// The `X` coordinate.
    pub fn x(&self) -> Fq {
        self.x
    }

    /// The `Y` coordinate.
    pub fn y(&self) -> Fq {
        self.y
    }

    /// The `Z` coordinate.
    pub fn z(&self) -> Fq {
        self.z
    }

    /// The `T` coordinate.
    pub fn t(&self) -> Fq {
        self.t
    }

    /// Whether this is the neutral element.
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == self.z
    }

    fn is_consistent(&self) -> bool {
        !self.z.is_zero() && self.x * self.y == self.z * self.t
    }

    /// Adds two points with the unified extended-coordinate formula. It is
    /// valid for every pair of inputs including doubling and the identity.
    pub fn add(&self, other: &Point) -> Point {
        let a = self.x * other.x;
        let b = self.y * other.y;
        let c = CURVE.d * self.t * other.t;
        let d = self.z * other.z;
        let e = (self.x + self.y) * (other.x + other.y) - a - b;
        let f = d - c;
        let g = d + c;
        let h = b - CURVE.a * a;

        let sum = Point {
            x: e * f,
            y: g * h,
            t: e * h,
            z: f * g,
        };
        debug_assert!(sum.is_consistent(), "X·Y = Z·T violated by addition");
        sum
    }

    /// Doubles the point.
    pub fn double(&self) -> Point {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().double();
        let d = CURVE.a * a;
        let e = (self.x + self.y).square() - a - b;
        let g = d + b;
        let f = g - c;
        let h = d - b;

        let doubled = Point {
            x: e * f,
            y: g * h,
            t: e * h,
            z: f * g,
        };
        debug_assert!(doubled.is_consistent(), "X·Y = Z·T violated by doubling");
        doubled
    }

    /// Multiplies the point by a scalar with double-and-add, from the most
    /// significant bit down.
    pub fn mul(&self, scalar: &Fr) -> Point {
        let bits = scalar.to_uint();
        let mut acc = Point::IDENTITY;
        for i in (0..bits.bit_len()).rev() {
            acc = acc.double();
            if bits.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// Converts to affine coordinates `(X/Z, Y/Z)`.
    ///
    /// # Errors
    ///
    /// [`CurveError::InverseOfZero`] if `Z` is zero, which cannot happen for a
    /// point built through this library.
    pub fn normalize(&self) -> Result<AffinePoint, CurveError> {
        let z_inv = self.z.invert().ok_or(CurveError::InverseOfZero)?;
        Ok(AffinePoint {
            x: self.x * z_inv,
            y: self.y * z_inv,
        })
    }
}

impl PartialEq for Point {
    fn eq(&self, rhs: &Point) -> bool {
        self.x * rhs.z == rhs.x * self.z && self.y * rhs.z == rhs.y * self.z
    }
}

impl Eq for Point {}

impl core::fmt::Debug for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Point(X: {}, Y: {}, Z: {}, T: {})",
            self.x, self.y, self.z, self.t
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Point::IDENTITY
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::add(&self, &rhs)
    }
}

impl<'a> Add<&'a Point> for Point {
    type Output = Point;

    fn add(self, rhs: &'a Point) -> Point {
        Point::add(&self, rhs)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = Point::add(self, &rhs)
    }
}

impl<'a> AddAssign<&'a Point> for Point {
    fn add_assign(&mut self, rhs: &'a Point) {
        *self = Point::add(self, rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::add(&self, &-rhs)
    }
}

impl Mul<Fr> for Point {
    type Output = Point;

    fn mul(self, scalar: Fr) -> Point {
        Point::mul(&self, &scalar)
    }
}

impl core::iter::Sum for Point {
    fn sum<I: Iterator<Item = Point>>(iter: I) -> Point {
        iter.fold(Point::IDENTITY, |acc, point| acc.add(&point))
    }
}

impl<'a> core::iter::Sum<&'a Point> for Point {
    fn sum<I: Iterator<Item = &'a Point>>(iter: I) -> Point {
        iter.fold(Point::IDENTITY, |acc, point| acc.add(point))
    }
}

impl From<AffinePoint> for Point {
    fn from(affine: AffinePoint) -> Point {
        affine.to_point()
    }
}

/// A curve point in affine coordinates.
///
/// This is the only point type with a byte encoding. The encoding is 32 bytes:
/// the little-endian `y` coordinate with the top bit of the last byte set when
/// `x` is in the larger half of the field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    x: Fq,
    y: Fq,
}

impl AffinePoint {
    /// Creates a point from affine coordinates, checking the curve equation.
    pub fn new(x: Fq, y: Fq) -> Result<Self, CurveError> {
        if CURVE.is_on_curve(x, y) {
            Ok(AffinePoint { x, y })
        } else {
            Err(CurveError::NotOnCurve)
        }
    }

    pub(crate) const fn from_coordinates_unchecked(x: Fq, y: Fq) -> Self {
        AffinePoint { x, y }
    }

    /// The `x` coordinate.
    pub fn x(&self) -> Fq {
        self.x
    }

    /// The `y` coordinate.
    pub fn y(&self) -> Fq {
        self.y
    }

    /// Lifts the point into extended coordinates with `Z = 1`.
    pub fn to_point(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
            z: Fq::ONE,
            t: self.x * self.y,
        }
    }

    /// Recovers the point with the given `y` coordinate. `greatest` selects
    /// the `x` in the larger half of the field.
    pub fn from_y_coordinate(y: Fq, greatest: bool) -> Result<Self, CurveError> {
        // x² = (1 - y²) / (a - d·y²)
        let y2 = y.square();
        let numerator = Fq::ONE - y2;
        let denominator = CURVE.a - CURVE.d * y2;
        let denominator_inv = denominator.invert().ok_or(CurveError::NotOnCurve)?;
        let x = (numerator * denominator_inv)
            .sqrt()
            .ok_or(CurveError::NotOnCurve)?;

        if x.is_zero() && greatest {
            return Err(CurveError::NonCanonicalEncoding);
        }
        let x = if x.is_larger_half() == greatest { x } else { -x };
        Ok(AffinePoint { x, y })
    }

    /// Encodes the point in 32 bytes.
    ///
    /// # Example
    /// ```
    /// use edwardsfun::{AffinePoint, G};
    /// let bytes = G.to_bytes();
    /// assert_eq!(AffinePoint::from_bytes(bytes), Ok(*G));
    /// ```
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = self.y.to_bytes_le();
        if self.x.is_larger_half() {
            bytes[31] |= 0x80;
        }
        bytes
    }

    /// Decodes a point from its 32-byte encoding.
    ///
    /// # Errors
    ///
    /// - [`CurveError::NonCanonicalEncoding`] if `y` is not reduced or the
    ///   sign bit is set for `x = 0`.
    /// - [`CurveError::NotOnCurve`] if no point has the encoded `y`.
    pub fn from_bytes(mut bytes: [u8; 32]) -> Result<Self, CurveError> {
        let greatest = bytes[31] & 0x80 != 0;
        bytes[31] &= 0x7f;
        let y = Fq::from_bytes_le(bytes).ok_or(CurveError::NonCanonicalEncoding)?;
        Self::from_y_coordinate(y, greatest)
    }

    /// Like [`from_bytes`](Self::from_bytes) for a slice that must be 32
    /// bytes long.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CurveError> {
        let bytes: [u8; 32] = slice
            .try_into()
            .map_err(|_| CurveError::NonCanonicalEncoding)?;
        Self::from_bytes(bytes)
    }
}

crate::impl_display_debug_serialize! {
    fn to_bytes(point: &AffinePoint) -> [u8;32] {
        point.to_bytes()
    }
}

crate::impl_fromstr_deserialize! {
    name => "edwards-bls12-377 point",
    fn from_bytes(bytes: [u8;32]) -> Option<AffinePoint> {
        AffinePoint::from_bytes(bytes).ok()
    }
}
