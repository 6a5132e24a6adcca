//! Typed request parameters with their documented defaults.
//!
//! Every request can be read from a flat query map (`key=value` pairs as
//! received over HTTP) or deserialized from JSON/YAML. Character numbers are
//! 1-based on this surface and mapped to internal indices with
//! [`internal_index`].

use std::collections::BTreeMap;
use std::str::FromStr;

use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::{EngineConfig, RequestLimits};
use serde::{Deserialize, Serialize};

/// Maps a 1-based character number to a zero-based index; `0` maps to `0`.
pub fn internal_index(one_based: u64) -> u64 {
    one_based.saturating_sub(1)
}

/// Flat `key -> value` request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    /// Collects pairs; later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Parses a raw query string such as `q=7&start=0&end=30`.
    pub fn parse(query: &str) -> Self {
        Self::from_pairs(
            query
                .trim_start_matches('?')
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| match pair.split_once('=') {
                    Some((key, value)) => (key.to_string(), value.to_string()),
                    None => (pair.to_string(), String::new()),
                }),
        )
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parsed value for `key`, or `None` when absent.
    pub fn parse_opt<T: FromStr>(&self, key: &str) -> Result<Option<T>, LscanError>
    where
        T::Err: ToString,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|err: T::Err| {
                LscanError::Serde(
                    ErrorInfo::new("query_param_invalid", err.to_string())
                        .with_context("param", key)
                        .with_context("value", raw),
                )
            }),
        }
    }

    /// Parsed value for `key`, or `default` when absent.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, LscanError>
    where
        T::Err: ToString,
    {
        Ok(self.parse_opt(key)?.unwrap_or(default))
    }
}

/// Point evaluation at an arbitrary `s = r + i t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcRequest {
    /// Real part of `s`.
    #[serde(default = "default_calc_real")]
    pub r: f64,
    /// Imaginary part of `s`.
    #[serde(default = "default_calc_imag")]
    pub i: f64,
    /// Modulus.
    #[serde(default = "default_single_modulus")]
    pub q: u64,
    /// 1-based character number.
    #[serde(default = "default_character", rename = "char")]
    pub character: u64,
}

/// Single-character scan with `steps` equal intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Modulus.
    #[serde(default = "default_single_modulus")]
    pub q: u64,
    /// First height.
    #[serde(default = "default_scan_start")]
    pub start: f64,
    /// Last height.
    #[serde(default = "default_scan_end")]
    pub end: f64,
    /// Number of intervals; the scan returns `steps + 1` points.
    #[serde(default = "default_scan_steps")]
    pub steps: usize,
    /// 1-based character number.
    #[serde(default = "default_character", rename = "char")]
    pub character: u64,
}

/// All-character scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanAllRequest {
    /// Modulus.
    #[serde(default = "default_group_modulus")]
    pub q: u64,
    /// First height.
    #[serde(default = "default_scan_start")]
    pub start: f64,
    /// Last height.
    #[serde(default = "default_scan_end")]
    pub end: f64,
    /// Explicit step; wins over `points` and the configured step.
    #[serde(default)]
    pub step: Option<f64>,
    /// Number of intervals used when no step is given; wins over the configured step.
    #[serde(default)]
    pub points: Option<usize>,
}

/// Single-character Monte-Carlo run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CltRequest {
    /// Modulus.
    #[serde(default = "default_single_modulus")]
    pub q: u64,
    /// 1-based character number.
    #[serde(default = "default_character", rename = "char")]
    pub character: u64,
    /// Lower bound of the height window.
    #[serde(default = "default_clt_height")]
    pub start: f64,
    /// Upper bound of the height window.
    #[serde(default = "default_clt_end")]
    pub end: f64,
    /// Number of draws; the configured count when absent.
    #[serde(default)]
    pub samples: Option<usize>,
    /// Master seed; the configured seed or OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// All-character Monte-Carlo run over `[T, 2T)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CltAllRequest {
    /// Modulus.
    #[serde(default = "default_group_modulus")]
    pub q: u64,
    /// Number of draws; the configured count when absent.
    #[serde(default)]
    pub samples: Option<usize>,
    /// Window start `T`.
    #[serde(default = "default_clt_height", rename = "T")]
    pub height: f64,
    /// Master seed; the configured seed or OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Attach per-character moments and histograms.
    #[serde(default)]
    pub summary: bool,
}

fn default_calc_real() -> f64 {
    0.5
}

fn default_calc_imag() -> f64 {
    14.1347
}

fn default_single_modulus() -> u64 {
    1
}

fn default_group_modulus() -> u64 {
    7
}

fn default_character() -> u64 {
    1
}

fn default_scan_start() -> f64 {
    0.0
}

fn default_scan_end() -> f64 {
    30.0
}

fn default_scan_steps() -> usize {
    100
}

fn default_clt_height() -> f64 {
    1000.0
}

fn default_clt_end() -> f64 {
    2000.0
}

impl Default for CalcRequest {
    fn default() -> Self {
        Self {
            r: default_calc_real(),
            i: default_calc_imag(),
            q: default_single_modulus(),
            character: default_character(),
        }
    }
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            q: default_single_modulus(),
            start: default_scan_start(),
            end: default_scan_end(),
            steps: default_scan_steps(),
            character: default_character(),
        }
    }
}

impl Default for ScanAllRequest {
    fn default() -> Self {
        Self {
            q: default_group_modulus(),
            start: default_scan_start(),
            end: default_scan_end(),
            step: None,
            points: None,
        }
    }
}

impl Default for CltRequest {
    fn default() -> Self {
        Self {
            q: default_single_modulus(),
            character: default_character(),
            start: default_clt_height(),
            end: default_clt_end(),
            samples: None,
            seed: None,
        }
    }
}

impl Default for CltAllRequest {
    fn default() -> Self {
        Self {
            q: default_group_modulus(),
            samples: None,
            height: default_clt_height(),
            seed: None,
            summary: false,
        }
    }
}

impl CalcRequest {
    /// Reads the request from query parameters.
    pub fn from_query(params: &QueryParams) -> Result<Self, LscanError> {
        let d = Self::default();
        Ok(Self {
            r: params.parse_or("r", d.r)?,
            i: params.parse_or("i", d.i)?,
            q: params.parse_or("q", d.q)?,
            character: params.parse_or("char", d.character)?,
        })
    }
}

impl ScanRequest {
    /// Reads the request from query parameters.
    pub fn from_query(params: &QueryParams) -> Result<Self, LscanError> {
        let d = Self::default();
        Ok(Self {
            q: params.parse_or("q", d.q)?,
            start: params.parse_or("start", d.start)?,
            end: params.parse_or("end", d.end)?,
            steps: params.parse_or("steps", d.steps)?,
            character: params.parse_or("char", d.character)?,
        })
    }
}

impl ScanAllRequest {
    /// Reads the request from query parameters.
    pub fn from_query(params: &QueryParams) -> Result<Self, LscanError> {
        let d = Self::default();
        Ok(Self {
            q: params.parse_or("q", d.q)?,
            start: params.parse_or("start", d.start)?,
            end: params.parse_or("end", d.end)?,
            step: params.parse_opt("step")?,
            points: params.parse_opt("points")?,
        })
    }

    /// Step to use: the request's `step`, then its `points`, then the
    /// configured step, then the configured point count.
    pub fn resolve_step(&self, config: &EngineConfig) -> Result<f64, LscanError> {
        if let Some(step) = self.step {
            return Ok(step);
        }
        let points = match (self.points, config.grid_step) {
            (Some(points), _) => points,
            (None, Some(step)) => return Ok(step),
            (None, None) => config.grid_points,
        };
        if points == 0 {
            return Err(LscanError::InvalidRange(
                ErrorInfo::new("grid_points_zero", "points must be positive")
                    .with_context("points", points),
            ));
        }
        Ok((self.end - self.start) / points as f64)
    }
}

impl CltRequest {
    /// Reads the request from query parameters.
    pub fn from_query(params: &QueryParams) -> Result<Self, LscanError> {
        let d = Self::default();
        Ok(Self {
            q: params.parse_or("q", d.q)?,
            character: params.parse_or("char", d.character)?,
            start: params.parse_or("start", d.start)?,
            end: params.parse_or("end", d.end)?,
            samples: params.parse_opt("samples")?,
            seed: params.parse_opt("seed")?,
        })
    }
}

impl CltAllRequest {
    /// Reads the request from query parameters.
    pub fn from_query(params: &QueryParams) -> Result<Self, LscanError> {
        let d = Self::default();
        Ok(Self {
            q: params.parse_or("q", d.q)?,
            samples: params.parse_opt("samples")?,
            height: params.parse_or("T", d.height)?,
            seed: params.parse_opt("seed")?,
            summary: params.parse_or("summary", d.summary)?,
        })
    }
}

/// Rejects a modulus above the configured cap.
pub fn check_modulus(limits: &RequestLimits, modulus: u64) -> Result<(), LscanError> {
    if modulus > limits.max_modulus {
        return Err(LscanError::InvalidModulus(
            ErrorInfo::new("modulus_over_limit", "modulus exceeds the configured limit")
                .with_context("modulus", modulus)
                .with_context("max_modulus", limits.max_modulus),
        ));
    }
    Ok(())
}

/// Rejects a draw count above the configured cap.
pub fn check_samples(limits: &RequestLimits, samples: usize) -> Result<(), LscanError> {
    if samples > limits.max_samples {
        return Err(LscanError::InvalidRange(
            ErrorInfo::new("samples_over_limit", "sample count exceeds the configured limit")
                .with_context("samples", samples)
                .with_context("max_samples", limits.max_samples),
        ));
    }
    Ok(())
}

/// Rejects a grid with more heights than the configured cap.
pub fn check_grid_points(limits: &RequestLimits, points: usize) -> Result<(), LscanError> {
    if points > limits.max_grid_points {
        return Err(LscanError::InvalidRange(
            ErrorInfo::new("grid_over_limit", "grid has more heights than the configured limit")
                .with_context("points", points)
                .with_context("max_grid_points", limits.max_grid_points),
        ));
    }
    Ok(())
}

/// Rejects a non-finite height or one whose magnitude exceeds the configured cap.
pub fn check_height(limits: &RequestLimits, t: f64) -> Result<(), LscanError> {
    if !(t.is_finite() && t.abs() <= limits.max_height) {
        return Err(LscanError::InvalidRange(
            ErrorInfo::new("height_over_limit", "height exceeds the configured limit")
                .with_context("t", t)
                .with_context("max_height", limits.max_height),
        ));
    }
    Ok(())
}
