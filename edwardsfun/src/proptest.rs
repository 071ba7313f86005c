//! Strategies and [`Arbitrary`] implementations for property-based testing
//! with [`proptest`].
//!
//! [`Arbitrary`]: proptest::arbitrary::Arbitrary
//! [`proptest`]: https://github.com/altsysrq/proptest
use crate::{
    AffinePoint, Fr, Point,
    field::{FieldElement, FieldModulus},
};
use ::proptest::prelude::*;

/// Generate a random element of the field `M`.
pub fn field_element<M: FieldModulus>() -> impl Strategy<Value = FieldElement<M>> {
    any::<[u8; 32]>().prop_map(FieldElement::from_bytes_le_mod_order)
}

prop_compose! {
    /// Generate a random, non-zero `Fr`.
    pub fn non_zero_scalar()(
        scalar in field_element::<crate::field::ScalarField>()
            .prop_filter("Value cannot be zero", |scalar| !scalar.is_zero()),
    ) -> Fr {
        scalar
    }
}

prop_compose! {
    /// Generate a random multiple of the generator in extended coordinates.
    pub fn point()(
        scalar in field_element::<crate::field::ScalarField>(),
    ) -> Point {
        Point::generator() * scalar
    }
}

impl<M: FieldModulus> Arbitrary for FieldElement<M> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            // insert some pathological cases
            1 => Just(FieldElement::ZERO),
            1 => Just(FieldElement::ONE),
            1 => Just(-FieldElement::<M>::ONE),
            27 => field_element::<M>(),
        ]
        .boxed()
    }
}

impl Arbitrary for Point {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(Point::IDENTITY),
            19 => point(),
        ]
        .boxed()
    }
}

impl Arbitrary for AffinePoint {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        point()
            .prop_filter_map("normalizes", |point| point.normalize().ok())
            .boxed()
    }
}
