//! Taxonomy project seeding
//!
//! Turns a (possibly partial) taxonomy project configuration into a populated
//! repository directory: curation tables, README, PURL configuration, build
//! scripts, and optionally a first git commit.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`ConfigResolver`] merges the configuration file, command-line overrides
//!    and built-in defaults into a [`ProjectDescriptor`].
//! 2. [`ArtifactPlanner`] derives the ordered list of [`ArtifactSpec`]s.
//! 3. [`ArtifactWriter`] materialises the plan and returns a [`Manifest`].
//! 4. [`RepositoryInitializer`] optionally runs `git init` and the first commit.
//!
//! [`seed::seed`] runs all four stages.
//!
//! # Example
//!
//! ```rust,no_run
//! use tdt::config::{ConfigResolver, Overrides};
//!
//! # fn main() -> tdt::Result<()> {
//! let overrides = Overrides {
//!     title: Some("Mouse MTG".to_string()),
//!     org: Some("brain-bican".to_string()),
//!     repo: Some("mouse-mtg-taxonomy".to_string()),
//! };
//! let project = ConfigResolver::resolve(None, &overrides)?;
//! assert_eq!(project.id, "mouse-mtg-taxonomy");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod plan;
pub mod project;
pub mod seed;
pub mod template;
pub mod vcs;
pub mod writer;

pub use config::{ConfigResolver, Overrides, ToolSettings};
pub use error::{Result, SeedError};
pub use plan::{ArtifactPlanner, ArtifactSource, ArtifactSpec};
pub use project::ProjectDescriptor;
pub use template::{TemplateEnv, TemplateRenderer};
pub use vcs::{GitCli, GitIdentity, RepositoryInitializer, VersionControl};
pub use writer::{ArtifactWriter, Manifest};
