//! Hurwitz zeta values and the per-height table shared by all characters.

use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::Precision;
use num_complex::Complex64;

use crate::group::DirichletGroup;

/// Bits carried by the `f64` mantissa; requests above this are capped.
pub const BACKEND_MANTISSA_BITS: u32 = 53;

/// Largest Euler-Maclaurin correction order supported by [`BERNOULLI_EVEN`].
pub const MAX_CORRECTIONS: usize = 20;

/// `B_2, B_4, ..., B_40`.
const BERNOULLI_EVEN: [f64; MAX_CORRECTIONS] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
    -3617.0 / 510.0,
    43867.0 / 798.0,
    -174611.0 / 330.0,
    854513.0 / 138.0,
    -236364091.0 / 2730.0,
    8553103.0 / 6.0,
    -23749461029.0 / 870.0,
    8615841276005.0 / 14322.0,
    -7709321041217.0 / 510.0,
    2577687858367.0 / 6.0,
    -26315271553053477373.0 / 1919190.0,
    2929993913841559.0 / 6.0,
    -261082718496449122051.0 / 13530.0,
];

/// Truncation parameters for one Euler-Maclaurin evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EulerMaclaurin {
    /// Number of terms summed directly.
    pub terms: usize,
    /// Number of Bernoulli correction terms.
    pub corrections: usize,
}

impl EulerMaclaurin {
    /// Chooses truncation parameters for `s` at the requested precision.
    ///
    /// With the tail starting at `x >= |s| + 2M` each correction shrinks by at
    /// least `1 / (2 pi)^2`, so `M` grows linearly with the effective bits.
    pub fn for_point(s: Complex64, precision: Precision) -> Self {
        let bits = precision.bits().min(BACKEND_MANTISSA_BITS) as f64;
        let corrections = ((bits * 0.19).ceil() as usize + 2).clamp(2, MAX_CORRECTIONS);
        let terms = s.norm().ceil() as usize + 2 * corrections + 1;
        Self { terms, corrections }
    }
}

/// `x^(-s)` for real `x > 0`.
pub(crate) fn pow_neg(x: f64, s: Complex64) -> Complex64 {
    let log_x = x.ln();
    Complex64::from_polar((-s.re * log_x).exp(), -s.im * log_x)
}

/// Evaluates the Hurwitz zeta function `zeta(s, a)` for `a > 0`, `s != 1`.
pub fn hurwitz_zeta(
    s: Complex64,
    a: f64,
    plan: &EulerMaclaurin,
) -> Result<Complex64, LscanError> {
    if !(a.is_finite() && a > 0.0) {
        return Err(LscanError::Evaluation(
            ErrorInfo::new("hurwitz_shift_invalid", "hurwitz shift must be positive")
                .with_context("a", a),
        ));
    }
    if s.re == 1.0 && s.im == 0.0 {
        return Err(LscanError::Evaluation(
            ErrorInfo::new("hurwitz_pole", "zeta(s, a) has a pole at s = 1")
                .with_hint("evaluate off the pole or use the limit formula"),
        ));
    }

    let mut sum = (0..plan.terms)
        .map(|n| pow_neg(n as f64 + a, s))
        .fold(Complex64::new(0.0, 0.0), |acc, term| acc + term);

    let x = plan.terms as f64 + a;
    let x_neg_s = pow_neg(x, s);
    sum += x_neg_s * x / (s - 1.0);
    sum += x_neg_s * 0.5;

    let inv_x2 = 1.0 / (x * x);
    let mut rising = s;
    let mut power = x_neg_s / x;
    let mut factorial = 1.0;
    for (k, bernoulli) in BERNOULLI_EVEN.iter().take(plan.corrections).enumerate() {
        let two_k = 2.0 * (k + 1) as f64;
        factorial *= (two_k - 1.0) * two_k;
        sum += rising * power * (bernoulli / factorial);
        rising *= (s + (two_k - 1.0)) * (s + two_k);
        power *= inv_x2;
    }

    if !(sum.re.is_finite() && sum.im.is_finite()) {
        return Err(LscanError::Evaluation(
            ErrorInfo::new("hurwitz_non_finite", "hurwitz zeta evaluated to a non-finite value")
                .with_context("s", s)
                .with_context("a", a),
        ));
    }
    Ok(sum)
}

/// Per-height table of `zeta(s, a/q)` over the units `a` of a group.
///
/// The table depends on `s` and `q` but not on the character, so it is built
/// once per height and consumed by every character extraction. It owns all of
/// its storage and is released when dropped at the end of the height step.
#[derive(Debug)]
pub struct HurwitzTable {
    s: Complex64,
    modulus: u64,
    scale: Complex64,
    values: Vec<Complex64>,
}

impl HurwitzTable {
    /// Builds the table for `s` over the units of `group`.
    pub fn build(
        s: Complex64,
        group: &DirichletGroup,
        precision: Precision,
    ) -> Result<Self, LscanError> {
        let plan = EulerMaclaurin::for_point(s, precision);
        let q = group.modulus();
        let values = group
            .units()
            .iter()
            .map(|&a| hurwitz_zeta(s, a as f64 / q as f64, &plan))
            .collect::<Result<Vec<_>, _>>()?;
        log::trace!(
            "hurwitz table built: q={q} t={} terms={} corrections={}",
            s.im,
            plan.terms,
            plan.corrections
        );
        Ok(Self {
            s,
            modulus: q,
            scale: pow_neg(q as f64, s),
            values,
        })
    }

    /// Evaluation point the table was built for.
    pub fn point(&self) -> Complex64 {
        self.s
    }

    /// Modulus the table was built for.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// `q^(-s)`.
    pub fn scale(&self) -> Complex64 {
        self.scale
    }

    /// `zeta(s, a/q)` aligned with [`DirichletGroup::units`].
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn precision(bits: u32) -> Precision {
        Precision::new(bits).unwrap()
    }

    #[test]
    fn zeta_two_matches_basel() {
        let s = Complex64::new(2.0, 0.0);
        let plan = EulerMaclaurin::for_point(s, precision(64));
        let value = hurwitz_zeta(s, 1.0, &plan).unwrap();
        assert!((value.re - PI * PI / 6.0).abs() < 1e-13);
        assert!(value.im.abs() < 1e-15);
    }

    #[test]
    fn zeta_half_matches_known_value() {
        let s = Complex64::new(0.5, 0.0);
        let plan = EulerMaclaurin::for_point(s, precision(64));
        let value = hurwitz_zeta(s, 1.0, &plan).unwrap();
        assert!((value.re + 1.460_354_508_809_586_8).abs() < 1e-12);
    }

    #[test]
    fn pole_is_rejected() {
        let s = Complex64::new(1.0, 0.0);
        let plan = EulerMaclaurin::for_point(s, precision(64));
        let err = hurwitz_zeta(s, 1.0, &plan).unwrap_err();
        assert_eq!(err.info().code, "hurwitz_pole");
    }

    #[test]
    fn plan_grows_with_height_and_precision() {
        let low = EulerMaclaurin::for_point(Complex64::new(0.5, 10.0), precision(16));
        let high = EulerMaclaurin::for_point(Complex64::new(0.5, 10.0), precision(53));
        let tall = EulerMaclaurin::for_point(Complex64::new(0.5, 1000.0), precision(53));
        assert!(low.corrections < high.corrections);
        assert!(high.terms < tall.terms);
        assert_eq!(
            EulerMaclaurin::for_point(Complex64::new(0.5, 10.0), precision(512)),
            high
        );
    }
}
