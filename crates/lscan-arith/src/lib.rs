#![deny(missing_docs)]
#![doc = "Evaluation backend for lscan: Dirichlet character groups, Hurwitz zeta tables and L-values under a working precision."]

/// Character groups and character handles.
pub mod group;
/// Hurwitz zeta evaluation and the per-height table.
pub mod hurwitz;
/// Single and vectorized L-function evaluation.
pub mod lfunc;

pub use group::{CyclicComponent, DirichletCharacter, DirichletGroup};
pub use hurwitz::{hurwitz_zeta, EulerMaclaurin, HurwitzTable, BACKEND_MANTISSA_BITS};
pub use lfunc::{l_function, l_vec_hurwitz};
pub use num_complex::Complex64;

/// Builds the evaluation point `re + i t`.
pub fn point(re: f64, t: f64) -> Complex64 {
    Complex64::new(re, t)
}
