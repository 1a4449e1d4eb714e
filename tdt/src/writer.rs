//! Artifact writing
//!
//! Executes a [`Plan`] against the filesystem and records every file written
//! in a [`Manifest`]. There is no rollback: if a write fails, whatever was
//! already written stays on disk and the run must be repeated with `clean`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SeedError};
use crate::plan::{ArtifactSource, ArtifactSpec, Plan};
use crate::project::ProjectDescriptor;
use crate::template::TemplateRenderer;

/// File name of the README written into planned directories.
pub const FOLDER_README: &str = "README.md";

/// Ordered record of the files written by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    root: PathBuf,
    entries: Vec<PathBuf>,
}

impl Manifest {
    fn new(root: PathBuf) -> Self {
        Self {
            root,
            entries: Vec::new(),
        }
    }

    /// Record `relative`; returns `false` if it was already listed.
    fn push(&mut self, relative: PathBuf) -> bool {
        if self.entries.contains(&relative) {
            return false;
        }
        self.entries.push(relative);
        true
    }

    /// Absolute output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Written files relative to the output directory, in write order.
    #[must_use]
    pub fn relative_paths(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Written files as absolute paths, in write order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.entries.iter().map(|entry| self.root.join(entry))
    }

    /// Number of files written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Prepare the output directory for a run.
///
/// With `clean`, an existing directory is removed first. Without it, existing
/// files are kept and only planned files are overwritten.
///
/// # Errors
///
/// Returns an error if the directory cannot be removed or created.
pub fn prepare_output_dir(out_dir: &Path, clean: bool) -> Result<()> {
    if out_dir.exists() {
        if clean {
            info!("Removing existing output directory {}", out_dir.display());
            fs::remove_dir_all(out_dir).map_err(|source| SeedError::write(out_dir, source))?;
        } else {
            warn!(
                "Output directory {} already exists; unrelated files are kept",
                out_dir.display()
            );
        }
    }

    fs::create_dir_all(out_dir).map_err(|source| SeedError::write(out_dir, source))
}

/// Writes planned artifacts for one project.
pub struct ArtifactWriter<'a> {
    project: &'a ProjectDescriptor,
    renderer: &'a TemplateRenderer,
}

impl<'a> ArtifactWriter<'a> {
    /// Create a writer for `project`.
    #[must_use]
    pub const fn new(project: &'a ProjectDescriptor, renderer: &'a TemplateRenderer) -> Self {
        Self { project, renderer }
    }

    /// Write every artifact of `plan` in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource is missing, a template fails to render,
    /// or a file cannot be written. Files written before the failure remain.
    pub fn write(&self, plan: &Plan) -> Result<Manifest> {
        fs::create_dir_all(&plan.out_dir)
            .map_err(|source| SeedError::write(&plan.out_dir, source))?;
        let root = std::path::absolute(&plan.out_dir)
            .map_err(|source| SeedError::write(&plan.out_dir, source))?;

        let mut manifest = Manifest::new(root);
        for spec in &plan.artifacts {
            if let Some(written) = self.write_one(&manifest.root, spec)? {
                if !manifest.push(written) {
                    warn!("{} was written more than once", spec.target.display());
                }
            }
        }

        Ok(manifest)
    }

    fn write_one(&self, root: &Path, spec: &ArtifactSpec) -> Result<Option<PathBuf>> {
        let target = root.join(&spec.target);

        match &spec.source {
            ArtifactSource::Directory { readme } => {
                fs::create_dir_all(&target).map_err(|source| SeedError::write(&target, source))?;
                let Some(readme) = readme else {
                    debug!("Created directory {}", target.display());
                    return Ok(None);
                };
                let readme_path = target.join(FOLDER_README);
                fs::write(&readme_path, readme)
                    .map_err(|source| SeedError::write(&readme_path, source))?;
                Ok(Some(spec.target.join(FOLDER_README)))
            }
            ArtifactSource::Copy { source } => {
                if is_same_file(source, &target) {
                    debug!("{} is already in place", target.display());
                    return Ok(Some(spec.target.clone()));
                }
                ensure_parent(&target)?;
                // fs::copy keeps the executable bit of run.sh
                fs::copy(source, &target).map_err(|err| {
                    let path = if source.is_file() { &target } else { source };
                    SeedError::write(path, err)
                })?;
                Ok(Some(spec.target.clone()))
            }
            _ => {
                let bytes = self.content(spec)?.unwrap_or_default();
                ensure_parent(&target)?;
                fs::write(&target, bytes).map_err(|source| SeedError::write(&target, source))?;
                Ok(Some(spec.target.clone()))
            }
        }
    }

    /// Bytes an artifact would be written with; `None` for directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read or a template fails
    /// to render.
    pub fn content(&self, spec: &ArtifactSpec) -> Result<Option<Vec<u8>>> {
        let bytes = match &spec.source {
            ArtifactSource::Directory { .. } => return Ok(None),
            ArtifactSource::Literal(text) => text.clone().into_bytes(),
            ArtifactSource::Copy { source } => {
                fs::read(source).map_err(|err| SeedError::write(source, err))?
            }
            ArtifactSource::Substitute {
                source,
                token,
                value,
            } => fs::read_to_string(source)
                .map_err(|err| SeedError::write(source, err))?
                .replace(token.as_str(), value)
                .into_bytes(),
            ArtifactSource::Render { template } => {
                self.renderer.render(template, self.project)?.into_bytes()
            }
        };
        Ok(Some(bytes))
    }
}

/// Copying a file onto itself truncates it.
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(source), Ok(target)) => source == target,
        _ => false,
    }
}

fn ensure_parent(target: &Path) -> Result<()> {
    match target.parent() {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|source| SeedError::write(parent, source))
        }
        None => Ok(()),
    }
}
