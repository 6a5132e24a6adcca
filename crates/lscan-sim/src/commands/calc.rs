use std::error::Error;
use std::path::Path;

use clap::Args;
use lscan_api::{CalcRequest, Service};

use crate::emit;

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Real part of s.
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub r: f64,
    /// Imaginary part of s.
    #[arg(long, default_value_t = 14.1347, allow_negative_numbers = true)]
    pub i: f64,
    /// Modulus of the character group.
    #[arg(long, default_value_t = 1)]
    pub q: u64,
    /// 1-based character number.
    #[arg(long = "char", default_value_t = 1)]
    pub character: u64,
}

pub fn run(args: &CalcArgs, service: &Service, out: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let request = CalcRequest {
        r: args.r,
        i: args.i,
        q: args.q,
        character: args.character,
    };
    emit(service.calc(&request)?, out)
}
