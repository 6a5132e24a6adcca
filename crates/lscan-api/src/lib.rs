#![deny(missing_docs)]
#![doc = "Request contract for the lscan engines: typed requests, handlers and response envelopes."]

/// Canonical hashing helpers.
pub mod hash;
/// Response payloads, envelopes and error bodies.
pub mod report;
pub mod requests;
/// Canonical JSON and YAML helpers.
pub mod serde;
/// Route handlers.
pub mod service;
/// Histogram and moment summaries.
pub mod stat;

pub use hash::{sha256_hex, stable_hash_string};
pub use report::{
    format_complex, format_significant, CalcResponse, CltAllResponse, CltPoint, Dataset, Envelope,
    ErrorBody, ErrorResponse, Outcome, ScanAllResponse, ScanPoint, RESPONSE_SCHEMA,
};
pub use requests::{
    internal_index, CalcRequest, CltAllRequest, CltRequest, QueryParams, ScanAllRequest,
    ScanRequest,
};
pub use self::serde::{from_json_slice, load_config, to_canonical_json_bytes};
pub use service::{Service, ROUTES};
pub use stat::{histogram, moments, DatasetSummary, Histogram, Moments, Quantiles};
