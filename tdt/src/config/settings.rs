//! Tool settings
//!
//! Settings that describe the tool installation rather than a project.
//! They are loaded with clear precedence:
//!
//! 1. Environment variables (highest priority, `TDT_` prefix)
//! 2. `./tdt.toml` (optional)
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # tdt.toml
//! workspace = "/tools"
//! output_root = "target"
//! template_dir = "/tools/templates"
//! commit_message = "first release"
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Local settings file read from the working directory.
pub const SETTINGS_FILE: &str = "tdt.toml";

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "TDT_";

/// Installation-level settings for the seeding pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Root of the bundled resources (`Makefile`, `scripts/`, `resources/`).
    pub workspace: PathBuf,

    /// Parent of the default output directory `{output_root}/{repo}`.
    pub output_root: PathBuf,

    /// Optional directory of `*.jinja2` project templates.
    pub template_dir: Option<PathBuf>,

    /// Message of the initial commit.
    pub commit_message: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("/tools"),
            output_root: PathBuf::from("target"),
            template_dir: None,
            commit_message: "first release".to_string(),
        }
    }
}

impl ToolSettings {
    /// Load settings from `./tdt.toml` and `TDT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source contains a value of the wrong type.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Load settings from the given TOML file and `TDT_*` environment variables.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source contains a value of the wrong type.
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = Self::figment(path)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
    }

    /// Default output directory for a repository name.
    ///
    /// An empty `repo` yields `{output_root}/` itself.
    #[must_use]
    pub fn default_outdir(&self, repo: &str) -> PathBuf {
        self.output_root.join(repo)
    }
}
