//! The fixed parameters of the curve `a·x² + y² = 1 + d·x²·y²`.
use crate::{Fq, field::FieldModulus, field::ScalarField};
use ruint::{aliases::U256, uint};

/// Constants describing a twisted Edwards curve.
///
/// Instances are compile time constants. Nothing in the library ever modifies
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    /// Name of the curve.
    pub name: &'static str,
    /// The `a` coefficient.
    pub a: Fq,
    /// The `d` coefficient.
    pub d: Fq,
    /// The ratio of the curve order to the order of the main subgroup.
    pub cofactor: u64,
    /// Order of the main subgroup.
    pub subgroup_order: U256,
    /// Affine `(x, y)` of a generator of the main subgroup.
    pub generator: (Fq, Fq),
}

/// The twisted Edwards curve defined over the scalar field of BLS12-377
/// (`a = -1`, `d = 3021`).
pub const EDWARDS_BLS12_377: CurveParams = CurveParams {
    name: "edwards-bls12-377",
    a: Fq::from_uint_unchecked(uint!(
        8444461749428370424248824938781546531375899335154063827935233455917409239040_U256
    )),
    d: Fq::from_uint_unchecked(uint!(3021_U256)),
    cofactor: 4,
    subgroup_order: ScalarField::MODULUS,
    generator: (
        Fq::from_uint_unchecked(uint!(
            4497879464030519973909970603271755437257548612157028181994697785683032656389_U256
        )),
        Fq::from_uint_unchecked(uint!(
            4357141146396347889246900916607623952598927460421559113092863576544024487809_U256
        )),
    ),
};

impl CurveParams {
    /// Evaluates the affine curve equation at `(x, y)`.
    pub fn is_on_curve(&self, x: Fq, y: Fq) -> bool {
        let x2 = x.square();
        let y2 = y.square();
        self.a * x2 + y2 == Fq::ONE + self.d * x2 * y2
    }
}
