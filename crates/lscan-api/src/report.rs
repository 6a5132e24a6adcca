use std::collections::BTreeMap;

use chrono::Utc;
use lscan_arith::BACKEND_MANTISSA_BITS;
use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::{RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::stat::DatasetSummary;

/// Schema version of the response payloads produced by this crate.
pub const RESPONSE_SCHEMA: SchemaVersion = SchemaVersion::new(1, 1, 0);

/// Result of an arbitrary-point evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResponse {
    /// `L(s, chi)` rendered as `"a + bi"` with 15 significant digits.
    pub result: String,
    /// Modulus.
    pub modulus: u64,
    /// 1-based character number.
    pub character: u64,
    /// Real part of `s`.
    pub s_real: f64,
    /// Imaginary part of `s`.
    pub s_imag: f64,
}

/// One point of a single-character scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanPoint {
    /// Height.
    pub t: f64,
    /// Real part of `L(1/2 + it, chi)`.
    pub real: f64,
    /// Imaginary part of `L(1/2 + it, chi)`.
    pub imag: f64,
}

/// Per-character value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// 1-based character number.
    pub label: u64,
    /// Values, aligned with the shared axis when there is one.
    pub data: Vec<f64>,
}

/// All-character scan shaped for line charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanAllResponse {
    /// Shared height axis.
    pub t: Vec<f64>,
    /// One series per character, clamped to the display floor.
    pub datasets: Vec<Dataset>,
}

/// One normalized draw of a single-character run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CltPoint {
    /// Height drawn.
    pub t: f64,
    /// Normalized log-magnitude; `None` for an exact zero.
    pub value: Option<f64>,
}

/// All-character run shaped for histograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CltAllResponse {
    /// One series per character with exact zeros removed.
    pub datasets: Vec<Dataset>,
    /// Optional per-character summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<DatasetSummary>>,
}

/// Payload plus the provenance needed to reproduce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// Response payload.
    pub payload: T,
    /// How the payload was produced.
    pub provenance: RunProvenance,
}

impl<T: Serialize> Outcome<T> {
    /// Wraps the payload with its provenance and digest.
    pub fn into_envelope(self) -> Result<Envelope<T>, LscanError> {
        let digest = stable_hash_string(&self.payload)?;
        Ok(Envelope {
            provenance: self.provenance,
            digest,
            payload: self.payload,
        })
    }
}

/// Self-describing response written by batch tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// How the payload was produced.
    pub provenance: RunProvenance,
    /// SHA-256 of the canonical JSON payload.
    pub digest: String,
    /// Response payload.
    pub payload: T,
}

/// Error body returned instead of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error family name.
    pub family: String,
    /// Code, message, context and hint.
    #[serde(flatten)]
    pub info: ErrorInfo,
}

/// `{ "error": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorBody,
}

impl From<&LscanError> for ErrorResponse {
    fn from(err: &LscanError) -> Self {
        Self {
            error: ErrorBody {
                family: err.family().to_string(),
                info: err.info().clone(),
            },
        }
    }
}

/// Provenance stamped with the current time and crate versions.
///
/// `precision_bits` is the requested precision; the recorded effective
/// precision is capped at what the backend carries.
pub fn provenance(modulus: u64, precision_bits: u32, seed: Option<u64>) -> RunProvenance {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(
        "lscan-api".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    RunProvenance {
        schema_version: RESPONSE_SCHEMA,
        modulus,
        precision_bits,
        effective_precision_bits: precision_bits.min(BACKEND_MANTISSA_BITS),
        seed,
        created_at: Utc::now().to_rfc3339(),
        tool_versions,
    }
}

/// Formats `re + im i` the way the calculator endpoint reports it.
pub fn format_complex(re: f64, im: f64) -> String {
    format!(
        "{} + {}i",
        format_significant(re, 15),
        format_significant(im, 15)
    )
}

/// Formats `value` with `digits` significant digits.
///
/// Plain notation is used for moderate exponents, scientific otherwise.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if (-5..15).contains(&exponent) {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        format!("{value:.decimals$}")
    } else {
        format!("{value:.prec$e}", prec = digits - 1)
    }
}
