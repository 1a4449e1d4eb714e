//! The seed pipeline
//!
//! Resolves the project, plans its artifacts, writes them and optionally
//! initializes git, strictly in that order.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{single_repo, ConfigResolver, Overrides, ToolSettings};
use crate::error::Result;
use crate::plan::{ArtifactPlanner, ResourceLayout};
use crate::project::ProjectDescriptor;
use crate::template::TemplateRenderer;
use crate::vcs::{GitCli, GitIdentity, RepositoryInitializer, VersionControl};
use crate::writer::{prepare_output_dir, ArtifactWriter, Manifest};

/// Inputs of one seed run, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SeedRequest {
    /// Project configuration file.
    pub config: Option<PathBuf>,
    /// Positional repository names; at most one is accepted.
    pub repos: Vec<String>,
    /// Title override.
    pub title: Option<String>,
    /// GitHub org override.
    pub user: Option<String>,
    /// Output directory; defaults to `{output_root}/{repo}`.
    pub outdir: Option<PathBuf>,
    /// Remove an existing output directory first.
    pub clean: bool,
    /// Do not run any git command.
    pub skip_git: bool,
    /// Commit identity overrides.
    pub identity: GitIdentity,
}

/// Result of a successful seed run.
#[derive(Debug, Clone)]
pub struct SeedOutcome {
    /// The resolved project.
    pub project: ProjectDescriptor,
    /// Output directory as requested or derived.
    pub out_dir: PathBuf,
    /// Files written, in order.
    pub manifest: Manifest,
    /// Whether the git protocol ran.
    pub git_initialized: bool,
}

/// Seed a project using `git` from `PATH` unless `skip_git` is set.
///
/// # Errors
///
/// Returns the first error of any stage; see [`SeedError`](crate::SeedError).
pub fn seed(request: &SeedRequest, settings: &ToolSettings) -> Result<SeedOutcome> {
    let vcs = (!request.skip_git).then(|| GitCli::new(request.identity.clone()));
    seed_with(request, settings, &TemplateRenderer::default(), vcs)
}

/// Seed a project with an explicit renderer and version-control backend.
///
/// `vcs = None` skips version control entirely.
///
/// # Errors
///
/// Returns the first error of any stage; see [`SeedError`](crate::SeedError).
pub fn seed_with<V: VersionControl>(
    request: &SeedRequest,
    settings: &ToolSettings,
    renderer: &TemplateRenderer,
    vcs: Option<V>,
) -> Result<SeedOutcome> {
    let repo = single_repo(request.repos.clone())?;
    let overrides = Overrides {
        title: request.title.clone(),
        org: request.user.clone(),
        repo,
    };
    let project = ConfigResolver::resolve(request.config.as_deref(), &overrides)?;
    if project.repo.is_empty() {
        warn!("No repo name given; generated paths will contain an empty segment");
    }

    let out_dir = request
        .outdir
        .clone()
        .unwrap_or_else(|| settings.default_outdir(&project.repo));

    let layout = ResourceLayout::new(&settings.workspace);
    let missing = layout.missing();
    if !missing.is_empty() {
        warn!(
            "{} resources missing under {}: {:?}",
            missing.len(),
            layout.root().display(),
            missing
        );
    }

    let plan = ArtifactPlanner::from_settings(settings)
        .with_config_source(request.config.clone())
        .plan(&project, &out_dir)?;

    prepare_output_dir(&out_dir, request.clean)?;
    let manifest = ArtifactWriter::new(&project, renderer).write(&plan)?;

    info!("Created files:");
    for path in manifest.paths() {
        info!("  File: {}", path.display());
    }

    let git_initialized = match vcs {
        Some(vcs) => {
            RepositoryInitializer::new(vcs, settings.commit_message.clone())
                .initialize(&manifest, &project)?;
            true
        }
        None => false,
    };

    Ok(SeedOutcome {
        project,
        out_dir,
        manifest,
        git_initialized,
    })
}
