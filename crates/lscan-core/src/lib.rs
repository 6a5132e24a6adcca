#![deny(missing_docs)]
#![doc = "Core types, errors and configuration shared by the lscan crates."]

pub mod config;
pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use config::{EngineConfig, RequestLimits};
pub use errors::{ErrorInfo, LscanError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, entropy_seed, RngHandle};
pub use types::{
    CharacterSelection, ComplexResult, LogMagnitude, LogMagnitudeSample, NormalizedSample,
    Precision,
};

/// Real part of every evaluation point handled by the engine.
pub const CRITICAL_LINE: f64 = 0.5;
