#![deny(missing_docs)]
#![doc = "Evaluation engines for Dirichlet L-functions on the critical line."]

/// Batch evaluation of every character at one height.
pub mod batch;
pub mod clt;
/// Work-stealing executor used by the scan and sampling engines.
pub mod dispatch;
pub mod grid;
/// Shared character-group handle.
pub mod group;
/// Selberg normalization.
pub mod normalize;
/// Single-character evaluation.
pub mod point;

pub use batch::{evaluate_all_characters, evaluate_all_characters_in};
pub use clt::{sample_clt, sample_clt_in, SampleWindow};
pub use dispatch::Dispatcher;
pub use grid::{
    scan_character, scan_grid, scan_grid_parallel, scan_grid_parallel_in, GridSpec,
    GRID_END_TOLERANCE, MAX_GRID_HEIGHTS,
};
pub use group::CharacterGroup;
pub use normalize::{normalize, selberg_sigma, Sigma, SIGMA_FLOOR};
pub use point::{evaluate_at_in, evaluate_point, evaluate_point_in};
