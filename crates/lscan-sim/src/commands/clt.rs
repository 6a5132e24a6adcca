use std::error::Error;
use std::path::Path;

use clap::Args;
use lscan_api::{CltRequest, Service};

use crate::emit;

#[derive(Args, Debug)]
pub struct CltArgs {
    /// Modulus of the character group.
    #[arg(long, default_value_t = 1)]
    pub q: u64,
    /// 1-based character number.
    #[arg(long = "char", default_value_t = 1)]
    pub character: u64,
    /// Lower bound of the height window.
    #[arg(long, default_value_t = 1000.0)]
    pub start: f64,
    /// Upper bound of the height window.
    #[arg(long, default_value_t = 2000.0)]
    pub end: f64,
    /// Number of draws; taken from the configuration when omitted.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Master seed; taken from the configuration or OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: &CltArgs, service: &Service, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let request = CltRequest {
        q: args.q,
        character: args.character,
        start: args.start,
        end: args.end,
        samples: args.samples,
        seed: args.seed,
    };
    emit(service.clt(&request)?, out)
}
