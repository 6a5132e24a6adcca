use std::error::Error;
use std::path::Path;

use clap::Args;
use lscan_api::{CltAllRequest, Service};

use crate::emit;

#[derive(Args, Debug)]
pub struct CltAllArgs {
    /// Modulus of the character group.
    #[arg(long, default_value_t = 7)]
    pub q: u64,
    /// Number of draws; taken from the configuration when omitted.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Window start T; heights are drawn from [T, 2T).
    #[arg(long = "height", short = 'T', default_value_t = 1000.0)]
    pub height: f64,
    /// Master seed; taken from the configuration or OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Attach per-character moments and histograms.
    #[arg(long)]
    pub summary: bool,
}

pub fn run(args: &CltAllArgs, service: &Service, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let request = CltAllRequest {
        q: args.q,
        samples: args.samples,
        height: args.height,
        seed: args.seed,
        summary: args.summary,
    };
    emit(service.clt_all(&request)?, out)
}
