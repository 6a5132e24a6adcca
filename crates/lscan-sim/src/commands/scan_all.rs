use std::error::Error;
use std::path::Path;

use clap::Args;
use lscan_api::{ScanAllRequest, Service};

use crate::emit;

#[derive(Args, Debug)]
pub struct ScanAllArgs {
    /// Modulus of the character group.
    #[arg(long, default_value_t = 7)]
    pub q: u64,
    /// First height.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,
    /// Last height.
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    pub end: f64,
    /// Explicit height step.
    #[arg(long, conflicts_with = "points")]
    pub step: Option<f64>,
    /// Number of intervals when no step is given.
    #[arg(long)]
    pub points: Option<usize>,
}

pub fn run(
    args: &ScanAllArgs,
    service: &Service,
    out: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let request = ScanAllRequest {
        q: args.q,
        start: args.start,
        end: args.end,
        step: args.step,
        points: args.points,
    };
    emit(service.scan_all(&request)?, out)
}
