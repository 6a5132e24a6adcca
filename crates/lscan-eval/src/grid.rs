//! Fixed-step scans of `log|L(1/2 + it, chi)|` over a height interval.

use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::{ComplexResult, LogMagnitudeSample, Precision};
use serde::{Deserialize, Serialize};

use crate::batch::evaluate_all_characters_in;
use crate::dispatch::Dispatcher;
use crate::group::CharacterGroup;
use crate::point::evaluate_point_in;

/// Slack allowed past `t_end` when deciding whether the last height is included.
pub const GRID_END_TOLERANCE: f64 = 1e-9;

/// Largest number of heights a grid may hold.
pub const MAX_GRID_HEIGHTS: usize = u32::MAX as usize;

/// Height interval sampled at a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// First height.
    pub t_start: f64,
    /// Last height, inclusive up to [`GRID_END_TOLERANCE`].
    pub t_end: f64,
    /// Distance between consecutive heights.
    pub t_step: f64,
}

impl GridSpec {
    /// Builds and validates a grid.
    pub fn new(t_start: f64, t_end: f64, t_step: f64) -> Result<Self, LscanError> {
        let spec = Self {
            t_start,
            t_end,
            t_step,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Grid with `points` equal intervals over `[t_start, t_end]`.
    pub fn with_points(t_start: f64, t_end: f64, points: usize) -> Result<Self, LscanError> {
        if points == 0 {
            return Err(LscanError::InvalidRange(
                ErrorInfo::new("grid_points_zero", "grid needs at least one interval")
                    .with_context("t_start", t_start)
                    .with_context("t_end", t_end),
            ));
        }
        let step = (t_end - t_start) / points as f64;
        Self::new(t_start, t_end, step)
    }

    /// Rejects non-finite bounds, a non-positive step, reversed intervals
    /// and steps too small for the grid to be enumerated.
    pub fn validate(&self) -> Result<(), LscanError> {
        if !self.t_start.is_finite() || !self.t_end.is_finite() {
            return Err(self.range_error("grid_bounds_non_finite", "grid bounds must be finite"));
        }
        if !(self.t_step.is_finite() && self.t_step > 0.0) {
            return Err(self.range_error("grid_step_invalid", "grid step must be positive"));
        }
        if self.t_end < self.t_start {
            return Err(self.range_error("grid_reversed", "t_end must not precede t_start"));
        }
        let estimate = (self.span() / self.t_step).floor() + 1.0;
        if !(estimate.is_finite() && estimate <= MAX_GRID_HEIGHTS as f64) {
            return Err(LscanError::InvalidRange(
                self.range_info("grid_too_dense", "grid step is too small for the interval")
                    .with_hint(format!("at most {MAX_GRID_HEIGHTS} heights per grid")),
            ));
        }
        Ok(())
    }

    fn range_info(&self, code: &str, message: &str) -> ErrorInfo {
        ErrorInfo::new(code, message)
            .with_context("t_start", self.t_start)
            .with_context("t_end", self.t_end)
            .with_context("t_step", self.t_step)
    }

    fn range_error(&self, code: &str, message: &str) -> LscanError {
        LscanError::InvalidRange(self.range_info(code, message))
    }

    /// Heights `t_start + k * t_step` up to `t_end` plus tolerance.
    ///
    /// Heights are computed from the index rather than by accumulation, so
    /// long grids do not drift.
    pub fn heights(&self) -> Vec<f64> {
        (0..self.len()).map(|k| self.height(k)).collect()
    }

    /// Height at index `k`.
    pub fn height(&self, k: usize) -> f64 {
        self.t_start + k as f64 * self.t_step
    }

    fn span(&self) -> f64 {
        self.t_end + GRID_END_TOLERANCE - self.t_start
    }

    /// Number of heights in the grid, never more than [`MAX_GRID_HEIGHTS`].
    pub fn len(&self) -> usize {
        let limit = self.t_end + GRID_END_TOLERANCE;
        if self.t_start.is_nan() || limit.is_nan() || self.t_start > limit {
            return 0;
        }
        let estimate = (self.span() / self.t_step).floor();
        let mut count = if estimate.is_finite() && estimate >= 0.0 {
            (estimate as usize).min(MAX_GRID_HEIGHTS - 1) + 1
        } else {
            MAX_GRID_HEIGHTS
        };
        while count > 1 && self.height(count - 1) > limit {
            count -= 1;
        }
        while count < MAX_GRID_HEIGHTS && self.height(count) <= limit {
            count += 1;
        }
        count
    }

    /// True when the grid holds no heights.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scans every character of modulus `q` over `grid`, one height at a time.
///
/// Samples are ordered by height, then by character index.
pub fn scan_grid(
    modulus: u64,
    grid: &GridSpec,
    precision: Precision,
) -> Result<Vec<LogMagnitudeSample>, LscanError> {
    grid.validate()?;
    let group = CharacterGroup::new(modulus)?;
    log::info!(
        "scanning q={modulus} over {} height(s) sequentially",
        grid.len()
    );
    let mut samples = Vec::with_capacity(grid.len() * group.size() as usize);
    for t in grid.heights() {
        samples.extend(scan_height(&group, t, precision)?);
    }
    Ok(samples)
}

/// Same output as [`scan_grid`], with heights spread across `dispatcher`.
pub fn scan_grid_parallel(
    modulus: u64,
    grid: &GridSpec,
    precision: Precision,
    dispatcher: &Dispatcher,
) -> Result<Vec<LogMagnitudeSample>, LscanError> {
    let group = CharacterGroup::new(modulus)?;
    scan_grid_parallel_in(&group, grid, precision, dispatcher)
}

/// [`scan_grid_parallel`] over a group the caller already holds.
pub fn scan_grid_parallel_in(
    group: &CharacterGroup,
    grid: &GridSpec,
    precision: Precision,
    dispatcher: &Dispatcher,
) -> Result<Vec<LogMagnitudeSample>, LscanError> {
    grid.validate()?;
    let modulus = group.modulus();
    let len = grid.len();
    log::info!(
        "scanning q={modulus} over {len} height(s) on {} worker(s)",
        dispatcher.threads()
    );
    let per_height =
        dispatcher.run_indexed(len, |k| scan_height(group, grid.height(k), precision))?;
    let samples: Vec<LogMagnitudeSample> = per_height.into_iter().flatten().collect();
    log::info!("scan of q={modulus} finished with {} sample(s)", samples.len());
    Ok(samples)
}

/// Evaluates a single character at every height of `grid`.
///
/// Returns raw L-values in height order; callers derive log-magnitudes
/// when they need them.
pub fn scan_character(
    modulus: u64,
    character_index: u64,
    grid: &GridSpec,
    precision: Precision,
    dispatcher: &Dispatcher,
) -> Result<Vec<ComplexResult>, LscanError> {
    grid.validate()?;
    let group = CharacterGroup::shared(modulus)?;
    let index = group.validate_index(character_index)?;
    log::info!(
        "scanning character {index} of q={modulus} over {} height(s)",
        grid.len()
    );
    dispatcher.run_indexed(grid.len(), |k| {
        evaluate_point_in(&group, grid.height(k), index, precision)
    })
}

fn scan_height(
    group: &CharacterGroup,
    t: f64,
    precision: Precision,
) -> Result<Vec<LogMagnitudeSample>, LscanError> {
    let values = evaluate_all_characters_in(group, t, precision)?;
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(index, value)| LogMagnitudeSample {
            t,
            character_index: index as u64,
            log_magnitude: value.log_magnitude(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_kept_within_tolerance() {
        let grid = GridSpec::new(0.0, 1.0, 0.1).unwrap();
        let heights = grid.heights();
        assert_eq!(heights.len(), 11);
        assert!((heights[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_interval_has_one_height() {
        let grid = GridSpec::new(5.0, 5.0, 1.0).unwrap();
        assert_eq!(grid.heights(), vec![5.0]);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        for (start, end, step) in [(0.0, 1.0, 0.0), (0.0, 1.0, -0.5), (2.0, 1.0, 0.1)] {
            let err = GridSpec::new(start, end, step).unwrap_err();
            assert_eq!(err.family(), "InvalidRange");
        }
        assert!(GridSpec::new(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn vanishing_step_is_rejected_not_counted() {
        let err = GridSpec::new(0.0, 30.0, 1e-300).unwrap_err();
        assert_eq!(err.family(), "InvalidRange");
        assert_eq!(err.info().code, "grid_too_dense");

        let unchecked = GridSpec {
            t_start: 0.0,
            t_end: 30.0,
            t_step: 1e-300,
        };
        assert_eq!(unchecked.len(), MAX_GRID_HEIGHTS);
    }

    #[test]
    fn dense_but_enumerable_grid_is_accepted() {
        let grid = GridSpec::new(0.0, 30.0, 1e-6).unwrap();
        assert_eq!(grid.len(), 30_000_001);
    }

    #[test]
    fn point_count_grid_includes_both_ends() {
        let grid = GridSpec::with_points(0.0, 30.0, 100).unwrap();
        assert_eq!(grid.len(), 101);
    }
}
