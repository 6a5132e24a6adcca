use std::error::Error;
use std::path::Path;

use clap::Args;
use lscan_api::{ScanRequest, Service};

use crate::emit;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Modulus of the character group.
    #[arg(long, default_value_t = 1)]
    pub q: u64,
    /// First height.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,
    /// Last height.
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    pub end: f64,
    /// Number of intervals; steps + 1 heights are evaluated.
    #[arg(long, default_value_t = 100)]
    pub steps: usize,
    /// 1-based character number.
    #[arg(long = "char", default_value_t = 1)]
    pub character: u64,
}

pub fn run(args: &ScanArgs, service: &Service, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let request = ScanRequest {
        q: args.q,
        start: args.start,
        end: args.end,
        steps: args.steps,
        character: args.character,
    };
    emit(service.scan(&request)?, out)
}
