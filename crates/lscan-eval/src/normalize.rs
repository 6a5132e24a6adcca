use lscan_core::{ComplexResult, LogMagnitude, NormalizedSample};

/// Smallest normalization factor accepted before falling back to 1.0.
pub const SIGMA_FLOOR: f64 = 1e-9;

/// Selberg normalization factor at one height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigma {
    /// Factor applied to `log |L|`.
    pub value: f64,
    /// True when `sqrt(0.5 log log t)` was unusable and `value` is 1.0.
    pub clamped: bool,
}

/// `sqrt(0.5 * ln ln t)`, clamped to 1.0 when `t <= e` or the result is tiny.
pub fn selberg_sigma(t: f64) -> Sigma {
    let raw = (0.5 * t.ln().ln()).sqrt();
    if raw.is_finite() && raw >= SIGMA_FLOOR {
        Sigma {
            value: raw,
            clamped: false,
        }
    } else {
        Sigma {
            value: 1.0,
            clamped: true,
        }
    }
}

/// Builds the normalized sample for one evaluated draw.
pub fn normalize(value: &ComplexResult, character_index: u64) -> NormalizedSample {
    let raw: LogMagnitude = value.log_magnitude();
    let sigma = selberg_sigma(value.t);
    NormalizedSample {
        t: value.t,
        character_index,
        raw,
        normalized: raw.scaled(sigma.value),
        sigma: sigma.value,
        sigma_clamped: sigma.clamped,
    }
}
