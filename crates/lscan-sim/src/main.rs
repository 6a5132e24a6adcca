use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use commands::{
    calc::{self, CalcArgs},
    clt::{self, CltArgs},
    clt_all::{self, CltAllArgs},
    scan::{self, ScanArgs},
    scan_all::{self, ScanAllArgs},
};
use lscan_api::{load_config, to_canonical_json_bytes, Outcome, Service};
use lscan_core::EngineConfig;
use serde::Serialize;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "lscan-sim", about = "Dirichlet L-function scanner and CLT sampler")]
struct Cli {
    /// YAML engine configuration; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Worker threads, overriding the configuration (0 = one per core).
    #[arg(long, global = true)]
    threads: Option<usize>,
    /// Write the response envelope to this file instead of stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate L(s, chi) at an arbitrary complex point.
    Calc(CalcArgs),
    /// Scan one character along the critical line.
    Scan(ScanArgs),
    /// Scan every character of a modulus along the critical line.
    ScanAll(ScanAllArgs),
    /// Sample normalized log|L| for one character.
    Clt(CltArgs),
    /// Sample normalized log|L| for every character over [T, 2T).
    CltAll(CltAllArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let service = build_service(cli.config.as_deref(), cli.threads)?;
    let out = cli.out.as_deref();
    match cli.command {
        Command::Calc(args) => calc::run(&args, &service, out),
        Command::Scan(args) => scan::run(&args, &service, out),
        Command::ScanAll(args) => scan_all::run(&args, &service, out),
        Command::Clt(args) => clt::run(&args, &service, out),
        Command::CltAll(args) => clt_all::run(&args, &service, out),
    }
}

fn build_service(config: Option<&Path>, threads: Option<usize>) -> Result<Service, Box<dyn Error>> {
    let mut config = match config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    if let Some(threads) = threads {
        config.threads = threads;
    }
    Ok(Service::new(config)?)
}

pub(crate) fn emit<T: Serialize>(
    outcome: Outcome<T>,
    out: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let envelope = outcome.into_envelope()?;
    let mut bytes = to_canonical_json_bytes(&envelope)?;
    bytes.push(b'\n');
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, bytes)?;
            log::info!("wrote {} (digest {})", path.display(), envelope.digest);
        }
        None => print!("{}", String::from_utf8_lossy(&bytes)),
    }
    Ok(())
}
