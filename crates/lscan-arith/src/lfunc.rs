//! Dirichlet L-values built from Hurwitz zeta values.
//!
//! `L(s, chi) = q^(-s) * sum_{a coprime to q} chi(a) * zeta(s, a/q)`.

use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::Precision;
use num_complex::Complex64;

use crate::group::{DirichletCharacter, DirichletGroup};
use crate::hurwitz::{hurwitz_zeta, pow_neg, EulerMaclaurin, HurwitzTable};

/// Evaluates `L(s, chi)` for a single character.
///
/// Hurwitz values are streamed into the character sum and never stored, so
/// the call holds no state beyond its locals.
pub fn l_function(
    s: Complex64,
    chi: &DirichletCharacter<'_>,
    precision: Precision,
) -> Result<Complex64, LscanError> {
    let group = chi.group();
    let q = group.modulus() as f64;
    let plan = EulerMaclaurin::for_point(s, precision);
    let mut sum = Complex64::new(0.0, 0.0);
    for (slot, &a) in group.units().iter().enumerate() {
        let weight = chi.value_at_unit(slot);
        sum += weight * hurwitz_zeta(s, a as f64 / q, &plan)?;
    }
    let value = sum * pow_neg(q, s);
    ensure_finite(value, s, chi.index())
}

/// Extracts `L(s, chi)` for every character of `group` from a prebuilt table.
///
/// The result is ordered by ascending character index.
pub fn l_vec_hurwitz(
    table: &HurwitzTable,
    group: &DirichletGroup,
) -> Result<Vec<Complex64>, LscanError> {
    if table.modulus() != group.modulus() {
        return Err(LscanError::Evaluation(
            ErrorInfo::new("table_group_mismatch", "hurwitz table built for another modulus")
                .with_context("table_modulus", table.modulus())
                .with_context("group_modulus", group.modulus()),
        ));
    }
    group
        .characters()
        .map(|chi| {
            let sum = table
                .values()
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (slot, zeta)| {
                    acc + chi.value_at_unit(slot) * zeta
                });
            ensure_finite(sum * table.scale(), table.point(), chi.index())
        })
        .collect()
}

fn ensure_finite(value: Complex64, s: Complex64, index: u64) -> Result<Complex64, LscanError> {
    if value.re.is_finite() && value.im.is_finite() {
        Ok(value)
    } else {
        Err(LscanError::Evaluation(
            ErrorInfo::new("l_value_non_finite", "L-function evaluated to a non-finite value")
                .with_context("s", s)
                .with_context("character_index", index),
        ))
    }
}
