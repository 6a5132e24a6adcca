use lscan_arith::{l_vec_hurwitz, point, HurwitzTable};
use lscan_core::{ComplexResult, LscanError, Precision, CRITICAL_LINE};

use crate::group::CharacterGroup;

/// Evaluates `L(1/2 + it, chi)` for every character of modulus `q`.
///
/// Results are ordered by ascending character index.
pub fn evaluate_all_characters(
    t: f64,
    modulus: u64,
    precision: Precision,
) -> Result<Vec<ComplexResult>, LscanError> {
    let group = CharacterGroup::new(modulus)?;
    evaluate_all_characters_in(&group, t, precision)
}

/// Like [`evaluate_all_characters`] but reuses an existing group handle.
///
/// The Hurwitz table lives only inside this call; it is dropped before the
/// results are returned, on the error path included.
pub fn evaluate_all_characters_in(
    group: &CharacterGroup,
    t: f64,
    precision: Precision,
) -> Result<Vec<ComplexResult>, LscanError> {
    let table = HurwitzTable::build(point(CRITICAL_LINE, t), group.backend(), precision)?;
    let values = l_vec_hurwitz(&table, group.backend())?;
    Ok(values
        .into_iter()
        .map(|value| ComplexResult {
            real: value.re,
            imag: value.im,
            t,
        })
        .collect())
}
