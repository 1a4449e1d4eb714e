//! Configuration resolution
//!
//! A project is resolved from three sources with clear precedence:
//!
//! 1. Command-line overrides (`title`, `org`, `repo`; highest priority when non-empty)
//! 2. The YAML configuration file, if one was supplied
//! 3. Built-in defaults (fallback)
//!
//! After merging, an empty `id` falls back to `repo`.
//!
//! Tool-level settings (resource locations, output root) live in [`settings`].

pub mod settings;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SeedError};
use crate::project::ProjectDescriptor;

pub use settings::ToolSettings;

/// Command-line values that take precedence over the configuration file.
///
/// `None` and empty strings both mean "not overridden".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Overrides [`ProjectDescriptor::title`].
    pub title: Option<String>,
    /// Overrides [`ProjectDescriptor::github_org`].
    pub org: Option<String>,
    /// Overrides [`ProjectDescriptor::repo`].
    pub repo: Option<String>,
}

impl Overrides {
    fn apply(&self, project: &mut ProjectDescriptor) {
        if let Some(title) = non_empty(self.title.as_deref()) {
            project.title = title.to_string();
        }
        if let Some(org) = non_empty(self.org.as_deref()) {
            project.github_org = org.to_string();
        }
        if let Some(repo) = non_empty(self.repo.as_deref()) {
            project.repo = repo.to_string();
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Reduce the positional repository arguments to at most one name.
///
/// # Errors
///
/// Returns [`SeedError::TooManyArguments`] if more than one name was given.
pub fn single_repo(mut repos: Vec<String>) -> Result<Option<String>> {
    match repos.len() {
        0 => Ok(None),
        1 => Ok(repos.pop()),
        _ => Err(SeedError::TooManyArguments(repos)),
    }
}

/// Builds the canonical [`ProjectDescriptor`] for one run.
pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolve a project from an optional configuration file and overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read
    /// - The configuration file is not a valid project document
    pub fn resolve(config_file: Option<&Path>, overrides: &Overrides) -> Result<ProjectDescriptor> {
        let project = match config_file {
            Some(path) => Self::load_file(path)?,
            None => ProjectDescriptor::default(),
        };
        Ok(Self::finish(project, overrides))
    }

    /// Resolve a project from an in-memory configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid project document.
    pub fn resolve_str(
        document: &str,
        origin: &Path,
        overrides: &Overrides,
    ) -> Result<ProjectDescriptor> {
        let project = ProjectDescriptor::from_yaml(document).map_err(|source| {
            SeedError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::finish(project, overrides))
    }

    fn load_file(path: &Path) -> Result<ProjectDescriptor> {
        debug!("Loading project config from {}", path.display());
        let document = fs::read_to_string(path).map_err(|source| SeedError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        ProjectDescriptor::from_yaml(&document).map_err(|source| SeedError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    // The id fallback must see the overridden repo.
    fn finish(mut project: ProjectDescriptor, overrides: &Overrides) -> ProjectDescriptor {
        overrides.apply(&mut project);
        if project.id.is_empty() {
            project.id.clone_from(&project.repo);
        }
        project
    }
}
