//! Monte-Carlo sampling of normalized `log |L(1/2 + it, chi)|` for
//! Selberg's central limit theorem.
//!
//! Every draw is an independent unit of work with its own generator derived
//! from the master seed and the draw index. A run is therefore reproducible
//! for a fixed seed regardless of the worker count, and two runs with
//! different seeds draw different heights.

use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::{CharacterSelection, NormalizedSample, Precision, RngHandle};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::batch::evaluate_all_characters_in;
use crate::dispatch::Dispatcher;
use crate::group::CharacterGroup;
use crate::normalize::normalize;
use crate::point::evaluate_point_in;

/// Height window and draw count for one sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// Lower bound of the uniform height distribution (inclusive).
    pub t_start: f64,
    /// Upper bound of the uniform height distribution (exclusive).
    pub t_end: f64,
    /// Number of heights drawn.
    pub sample_count: usize,
}

impl SampleWindow {
    /// Builds and validates a window.
    pub fn new(t_start: f64, t_end: f64, sample_count: usize) -> Result<Self, LscanError> {
        let window = Self {
            t_start,
            t_end,
            sample_count,
        };
        window.validate()?;
        Ok(window)
    }

    /// Window `[height, 2 * height)` used by the all-character sampler.
    pub fn doubling(height: f64, sample_count: usize) -> Result<Self, LscanError> {
        Self::new(height, 2.0 * height, sample_count)
    }

    /// Requires finite bounds with `t_start < t_end`.
    pub fn validate(&self) -> Result<(), LscanError> {
        if self.t_start.is_finite() && self.t_end.is_finite() && self.t_start < self.t_end {
            Ok(())
        } else {
            Err(LscanError::InvalidRange(
                ErrorInfo::new(
                    "sample_window_invalid",
                    "sampling window needs finite bounds with t_start < t_end",
                )
                .with_context("t_start", self.t_start)
                .with_context("t_end", self.t_end),
            ))
        }
    }

    fn draw(&self, rng: &mut RngHandle) -> f64 {
        rng.gen_range(self.t_start..self.t_end)
    }
}

/// Draws `window.sample_count` heights and returns normalized log-magnitudes.
///
/// With [`CharacterSelection::Single`] there is one sample per draw. With
/// [`CharacterSelection::All`] each draw yields one sample per character,
/// ordered draw-major and character-minor. Nothing is aggregated here.
pub fn sample_clt(
    modulus: u64,
    selection: CharacterSelection,
    window: &SampleWindow,
    precision: Precision,
    seed: u64,
    dispatcher: &Dispatcher,
) -> Result<Vec<NormalizedSample>, LscanError> {
    window.validate()?;
    let group = CharacterGroup::new(modulus)?;
    sample_clt_in(&group, selection, window, precision, seed, dispatcher)
}

/// [`sample_clt`] over a group the caller already holds.
pub fn sample_clt_in(
    group: &CharacterGroup,
    selection: CharacterSelection,
    window: &SampleWindow,
    precision: Precision,
    seed: u64,
    dispatcher: &Dispatcher,
) -> Result<Vec<NormalizedSample>, LscanError> {
    window.validate()?;
    let modulus = group.modulus();
    if let CharacterSelection::Single(index) = selection {
        group.validate_index(index)?;
    }
    log::info!(
        "sampling q={modulus} {:?}: {} draw(s) in [{}, {}) with seed {seed}",
        selection,
        window.sample_count,
        window.t_start,
        window.t_end
    );

    let per_draw = dispatcher.run_seeded(window.sample_count, seed, |_, mut rng| {
        let t = window.draw(&mut rng);
        match selection {
            CharacterSelection::Single(index) => {
                let value = evaluate_point_in(group, t, index, precision)?;
                Ok(vec![normalize(&value, index)])
            }
            CharacterSelection::All => {
                let values = evaluate_all_characters_in(group, t, precision)?;
                Ok(values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| normalize(value, index as u64))
                    .collect())
            }
        }
    })?;

    let samples: Vec<NormalizedSample> = per_draw.into_iter().flatten().collect();
    let clamped = samples.iter().filter(|s| s.sigma_clamped).count();
    if clamped > 0 {
        log::warn!("sigma clamped to 1.0 for {clamped} sample(s); window reaches t <= e");
    }
    log::info!("sampling finished with {} sample(s)", samples.len());
    Ok(samples)
}
