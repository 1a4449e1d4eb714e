//! Error types for the seeding pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for seeding operations.
pub type Result<T> = std::result::Result<T, SeedError>;

/// Errors that can occur while seeding a taxonomy project.
///
/// Every error is fatal to the current run. Partially written output is left
/// on disk; re-running with `clean` is the recovery path.
#[derive(Debug, Error)]
pub enum SeedError {
    /// More than one positional repository name was supplied.
    #[error("max one repo; current={0:?}")]
    TooManyArguments(Vec<String>),

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// Offending configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not a valid project document.
    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        /// Offending configuration file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Tool settings could not be loaded.
    #[error("invalid tool settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// A template could not be read, parsed or rendered.
    #[error("failed to render template {path}: {source}")]
    Template {
        /// Offending template.
        path: PathBuf,
        /// Underlying template engine error.
        #[source]
        source: minijinja::Error,
    },

    /// A filesystem operation failed while generating output.
    #[error("failed to write {path}: {source}")]
    ArtifactWrite {
        /// Path that could not be created, read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The project descriptor could not be serialized.
    #[error("failed to serialize project: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A version-control command could not be run or exited non-zero.
    #[error("Failed: {command} ({detail})")]
    VersionControl {
        /// Command line that failed.
        command: String,
        /// Exit status or spawn error.
        detail: String,
    },
}

impl SeedError {
    /// Wrap an I/O error with the path it concerns.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArtifactWrite {
            path: path.into(),
            source,
        }
    }

    /// Whether this error stems from bad command-line input.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::TooManyArguments(_))
    }
}

impl From<figment::Error> for SeedError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}
