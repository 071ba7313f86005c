//! A mid-level library for the twisted Edwards curve defined over the scalar
//! field of BLS12-377.
//!
//! Points are kept in extended coordinates ([`Point`]) while doing arithmetic
//! and must be normalized into an [`AffinePoint`] before they can be encoded.
//!
//! ```
//! use edwardsfun::{Fr, Point, G};
//! let x = Fr::from_u64(42);
//! let X = G.to_point() * x;
//! let Y = G.to_point() * (x + Fr::ONE);
//! assert_eq!(X + G.to_point(), Y);
//! assert_eq!(X.normalize().unwrap().to_bytes().len(), 32);
//! ```
#![no_std]
#![allow(non_snake_case)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(all(feature = "std", feature = "alloc"))]
extern crate alloc;

pub mod curve;
mod error;
pub mod field;
pub mod hex;
mod macros;
mod point;

pub use error::{CurveError, FieldParseError};
pub use field::{FieldElement, Fq, Fr};
pub use point::{AffinePoint, Point};
pub use rand_core;
pub use ruint;

#[cfg(feature = "serde")]
pub extern crate serde;

#[cfg(feature = "proptest")]
#[cfg_attr(docsrs, doc(cfg(feature = "proptest")))]
pub mod proptest;

/// The generator of the main subgroup of the curve.
///
/// ```
/// use edwardsfun::{curve::EDWARDS_BLS12_377, G};
/// assert_eq!((G.x(), G.y()), EDWARDS_BLS12_377.generator);
/// ```
pub static G: &AffinePoint = &AffinePoint::from_coordinates_unchecked(
    curve::EDWARDS_BLS12_377.generator.0,
    curve::EDWARDS_BLS12_377.generator.1,
);
