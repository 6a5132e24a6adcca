//! Provenance and schema descriptors attached to every response payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every serialized dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Schema of the enclosing payload.
    pub schema_version: SchemaVersion,
    /// Modulus of the character group that was evaluated.
    pub modulus: u64,
    /// Working precision in bits handed to the evaluator.
    pub precision_bits: u32,
    /// Bits the arithmetic backend actually carried; never above `precision_bits`.
    #[serde(default)]
    pub effective_precision_bits: u32,
    /// Master seed for Monte-Carlo runs (`None` for deterministic scans).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// ISO-8601 timestamp recording when the dataset was generated.
    pub created_at: String,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
