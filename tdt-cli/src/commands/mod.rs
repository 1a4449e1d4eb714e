//! CLI command implementations

pub mod seed;

pub use seed::SeedCommand;
