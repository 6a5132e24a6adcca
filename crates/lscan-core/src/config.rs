//! Engine configuration collected in one place instead of per-call literals.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LscanError};
use crate::types::Precision;

/// YAML-configurable parameters passed into every engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Precision (bits) for single-point queries.
    #[serde(default = "default_working_precision")]
    pub working_precision: u32,
    /// Precision (bits) for wide grid scans.
    #[serde(default = "default_scan_precision")]
    pub scan_precision: u32,
    /// Precision (bits) for Monte-Carlo draws.
    #[serde(default = "default_sample_precision")]
    pub sample_precision: u32,
    /// Number of Monte-Carlo draws when the request does not name one.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Explicit grid step; derived from `grid_points` when absent.
    #[serde(default)]
    pub grid_step: Option<f64>,
    /// Target number of grid points used to derive the step.
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    /// Worker threads in the dispatch pool (0 selects one per core).
    #[serde(default)]
    pub threads: usize,
    /// Master seed for Monte-Carlo runs. Drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Lowest log-magnitude handed to renderers; smaller values are clamped.
    #[serde(default = "default_display_floor")]
    pub display_floor: f64,
    /// Request size caps enforced before any evaluation starts.
    #[serde(default)]
    pub limits: RequestLimits,
}

fn default_working_precision() -> u32 {
    128
}

fn default_scan_precision() -> u32 {
    64
}

fn default_sample_precision() -> u32 {
    64
}

fn default_sample_count() -> usize {
    5000
}

fn default_grid_points() -> usize {
    500
}

fn default_display_floor() -> f64 {
    -10.0
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            working_precision: default_working_precision(),
            scan_precision: default_scan_precision(),
            sample_precision: default_sample_precision(),
            sample_count: default_sample_count(),
            grid_step: None,
            grid_points: default_grid_points(),
            threads: 0,
            seed: None,
            display_floor: default_display_floor(),
            limits: RequestLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Checks the configuration for values that would make every call fail.
    pub fn validate(&self) -> Result<(), LscanError> {
        self.working_precision()?;
        self.scan_precision()?;
        self.sample_precision()?;
        if self.grid_points == 0 {
            return Err(config_error("grid_points_zero", "grid_points must be positive"));
        }
        if let Some(step) = self.grid_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(LscanError::Config(
                    ErrorInfo::new("grid_step_invalid", "grid_step must be positive")
                        .with_context("grid_step", step),
                ));
            }
        }
        if !(self.limits.max_height.is_finite() && self.limits.max_height > 0.0) {
            return Err(LscanError::Config(
                ErrorInfo::new("max_height_invalid", "max_height must be positive")
                    .with_context("max_height", self.limits.max_height),
            ));
        }
        if !self.display_floor.is_finite() {
            return Err(config_error("display_floor_invalid", "display_floor must be finite"));
        }
        Ok(())
    }

    /// Precision used for single-point queries.
    pub fn working_precision(&self) -> Result<Precision, LscanError> {
        Precision::new(self.working_precision)
    }

    /// Precision used for grid scans.
    pub fn scan_precision(&self) -> Result<Precision, LscanError> {
        Precision::new(self.scan_precision)
    }

    /// Precision used for Monte-Carlo draws.
    pub fn sample_precision(&self) -> Result<Precision, LscanError> {
        Precision::new(self.sample_precision)
    }
}

/// Capacity caps owned by the caller; the engine itself never cancels work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLimits {
    /// Largest accepted Monte-Carlo sample count.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    /// Largest accepted number of grid heights.
    #[serde(default = "default_max_grid_points")]
    pub max_grid_points: usize,
    /// Largest accepted modulus.
    #[serde(default = "default_max_modulus")]
    pub max_modulus: u64,
    /// Largest accepted `|t|`; evaluation cost grows linearly with height.
    #[serde(default = "default_max_height")]
    pub max_height: f64,
}

fn default_max_samples() -> usize {
    100_000
}

fn default_max_grid_points() -> usize {
    20_000
}

fn default_max_modulus() -> u64 {
    10_000
}

fn default_max_height() -> f64 {
    1.0e6
}

impl Default for RequestLimits {
    fn default() -> Self {
        Self {
            max_samples: default_max_samples(),
            max_grid_points: default_max_grid_points(),
            max_modulus: default_max_modulus(),
            max_height: default_max_height(),
        }
    }
}

fn config_error(code: &str, message: &str) -> LscanError {
    LscanError::Config(ErrorInfo::new(code, message))
}
