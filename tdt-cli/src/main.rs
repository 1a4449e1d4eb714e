//! tdt CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use tdt_cli::{observability, Cli, Commands, SeedCommand};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed(args) => {
            let verbose = args.verbose;
            observability::init(verbose);
            SeedCommand::new(args.into(), verbose).execute()?;
        }
    }

    Ok(())
}
