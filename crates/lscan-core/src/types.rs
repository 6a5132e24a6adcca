use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LscanError};

/// Working precision in bits handed to the evaluation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Precision(u32);

impl Precision {
    /// Creates a precision descriptor, rejecting zero bits.
    pub fn new(bits: u32) -> Result<Self, LscanError> {
        if bits == 0 {
            return Err(LscanError::Config(
                ErrorInfo::new("precision_zero", "working precision must be positive")
                    .with_hint("use at least 53 bits for double accuracy"),
            ));
        }
        Ok(Self(bits))
    }

    /// Returns the requested number of bits.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Precision {
    type Error = LscanError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Precision::new(bits)
    }
}

impl From<Precision> for u32 {
    fn from(value: Precision) -> Self {
        value.0
    }
}

/// Raw value of `L(s, chi)` at a point on the critical line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexResult {
    /// Real part of the L-value.
    pub real: f64,
    /// Imaginary part of the L-value.
    pub imag: f64,
    /// Height `t` of the evaluation point `1/2 + it`.
    pub t: f64,
}

impl ComplexResult {
    /// Returns `|L(s, chi)|`.
    pub fn magnitude(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    /// Returns `log |L(s, chi)|` with exact zeros mapped to [`LogMagnitude::NegInfinity`].
    pub fn log_magnitude(&self) -> LogMagnitude {
        LogMagnitude::from_magnitude(self.magnitude())
    }
}

/// `log |L|` as a tagged value so exact zeros stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum LogMagnitude {
    /// Logarithm of a strictly positive magnitude.
    Finite(f64),
    /// The magnitude was exactly zero.
    NegInfinity,
}

impl LogMagnitude {
    /// Maps a magnitude to its logarithm.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude == 0.0 {
            LogMagnitude::NegInfinity
        } else {
            LogMagnitude::Finite(magnitude.ln())
        }
    }

    /// Returns the finite value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            LogMagnitude::Finite(value) => Some(*value),
            LogMagnitude::NegInfinity => None,
        }
    }

    /// Returns the value as an IEEE float, with `-inf` for exact zeros.
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::NEG_INFINITY)
    }

    /// Whether this value records an exact zero of the L-function.
    pub fn is_zero_magnitude(&self) -> bool {
        matches!(self, LogMagnitude::NegInfinity)
    }

    /// Divides a finite value by `divisor`; exact zeros stay exact zeros.
    pub fn scaled(self, divisor: f64) -> Self {
        match self {
            LogMagnitude::Finite(value) => LogMagnitude::Finite(value / divisor),
            LogMagnitude::NegInfinity => LogMagnitude::NegInfinity,
        }
    }
}

/// One grid point: `(t, character, log |L(1/2 + it, chi)|)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogMagnitudeSample {
    /// Height of the evaluation point.
    pub t: f64,
    /// Zero-based character index.
    pub character_index: u64,
    /// Log-magnitude of the L-value.
    pub log_magnitude: LogMagnitude,
}

/// One Monte-Carlo draw normalized by the Selberg factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    /// Height drawn uniformly from the sampling window.
    pub t: f64,
    /// Zero-based character index.
    pub character_index: u64,
    /// Raw `log |L(1/2 + it, chi)|`.
    pub raw: LogMagnitude,
    /// `raw / sigma`.
    pub normalized: LogMagnitude,
    /// Normalization factor that was applied.
    pub sigma: f64,
    /// True when `sqrt(0.5 log log t)` was degenerate and `sigma` was clamped to 1.0.
    pub sigma_clamped: bool,
}

/// Characters requested from the sampling engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterSelection {
    /// A single zero-based character index.
    Single(u64),
    /// Every character of the group.
    All,
}
