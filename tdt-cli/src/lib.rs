//! tdt CLI library
//!
//! Command tree and presenters for the `tdt` binary.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod observability;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tdt::seed::SeedRequest;
use tdt::GitIdentity;

pub use commands::SeedCommand;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "tdt")]
#[command(version)]
#[command(about = "Taxonomy development tools", long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// `tdt` subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seed a new taxonomy repository
    Seed(SeedArgs),
}

/// Options of `tdt seed`.
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Project configuration file
    #[arg(short = 'C', long, value_name = "PATH", value_parser = existing_path)]
    pub config: Option<PathBuf>,

    /// Remove the output directory before writing
    #[arg(short = 'c', long, overrides_with = "no_clean")]
    pub clean: bool,

    /// Keep an existing output directory (default)
    #[arg(long = "no-clean", overrides_with = "clean")]
    pub no_clean: bool,

    /// Output directory [default: target/<repo>]
    #[arg(short = 'D', long, value_name = "PATH")]
    pub outdir: Option<PathBuf>,

    /// Taxonomy title
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// GitHub user or organization
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write the files but skip all git commands
    #[arg(short = 'g', long)]
    pub skipgit: bool,

    /// Override the git author and committer name
    #[arg(short = 'n', long, value_name = "NAME")]
    pub gitname: Option<String>,

    /// Override the git author and committer email
    #[arg(short = 'e', long, value_name = "EMAIL")]
    pub gitemail: Option<String>,

    /// Repository name
    #[arg(value_name = "REPO")]
    pub repo: Vec<String>,
}

impl From<SeedArgs> for SeedRequest {
    fn from(args: SeedArgs) -> Self {
        Self {
            config: args.config,
            repos: args.repo,
            title: args.title,
            user: args.user,
            outdir: args.outdir,
            clean: args.clean,
            skip_git: args.skipgit,
            identity: GitIdentity {
                name: args.gitname,
                email: args.gitemail,
            },
        }
    }
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{value}' does not exist"))
    }
}
