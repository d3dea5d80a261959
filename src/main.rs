mod cli;
mod config;
mod convert;
mod geopotential_cmd;
mod interp_cmd;
mod load;
mod logging;
mod smooth_cmd;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure the worker thread pool")?;
    }
    match cli.command {
        Command::Smooth(args) => smooth_cmd::run(args),
        Command::Interp(args) => interp_cmd::run(args),
        Command::Geopotential(args) => geopotential_cmd::run(args),
    }
}
