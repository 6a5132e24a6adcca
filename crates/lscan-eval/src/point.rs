use lscan_arith::{l_function, point, Complex64};
use lscan_core::{ComplexResult, LscanError, Precision, CRITICAL_LINE};

use crate::group::CharacterGroup;

/// Evaluates `L(1/2 + it, chi)` for one character of modulus `q`.
pub fn evaluate_point(
    t: f64,
    modulus: u64,
    character_index: u64,
    precision: Precision,
) -> Result<ComplexResult, LscanError> {
    let group = CharacterGroup::new(modulus)?;
    evaluate_point_in(&group, t, character_index, precision)
}

/// Like [`evaluate_point`] but reuses an existing group handle.
pub fn evaluate_point_in(
    group: &CharacterGroup,
    t: f64,
    character_index: u64,
    precision: Precision,
) -> Result<ComplexResult, LscanError> {
    let value = evaluate_at_in(group, point(CRITICAL_LINE, t), character_index, precision)?;
    Ok(ComplexResult {
        real: value.re,
        imag: value.im,
        t,
    })
}

/// Evaluates `L(s, chi)` at an arbitrary complex point.
pub fn evaluate_at_in(
    group: &CharacterGroup,
    s: Complex64,
    character_index: u64,
    precision: Precision,
) -> Result<Complex64, LscanError> {
    let chi = group.character(character_index)?;
    l_function(s, &chi, precision)
}
