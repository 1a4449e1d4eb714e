//! Version-control initialization
//!
//! After every artifact is written, the output directory can be turned into a
//! git repository with a fixed two-step protocol:
//!
//! 1. `git init` + `git add <manifest paths>`
//! 2. `git branch -M <main branch>` + `git commit -m <message>`
//!
//! Any non-zero exit aborts the run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::error::{Result, SeedError};
use crate::project::ProjectDescriptor;
use crate::writer::Manifest;

/// Identity overrides for the commits made by the seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitIdentity {
    /// Sets `GIT_AUTHOR_NAME` and `GIT_COMMITTER_NAME`.
    pub name: Option<String>,
    /// Sets `GIT_AUTHOR_EMAIL` and `GIT_COMMITTER_EMAIL`.
    pub email: Option<String>,
}

impl GitIdentity {
    /// Environment variables to set on git processes.
    #[must_use]
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = Vec::new();
        if let Some(name) = &self.name {
            vars.push(("GIT_AUTHOR_NAME", name.clone()));
            vars.push(("GIT_COMMITTER_NAME", name.clone()));
        }
        if let Some(email) = &self.email {
            vars.push(("GIT_AUTHOR_EMAIL", email.clone()));
            vars.push(("GIT_COMMITTER_EMAIL", email.clone()));
        }
        vars
    }
}

/// The two version-control steps of a seed run.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Create a repository in `dir` and stage exactly `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if either command fails.
    fn init_and_stage(&self, dir: &Path, paths: &[PathBuf]) -> Result<()>;

    /// Rename the current branch to `branch` and make a single commit.
    ///
    /// # Errors
    ///
    /// Returns an error if either command fails.
    fn rename_branch_and_commit(&self, dir: &Path, branch: &str, message: &str) -> Result<()>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    identity: GitIdentity,
}

impl GitCli {
    /// Use `git` from `PATH` with the given identity overrides.
    #[must_use]
    pub fn new(identity: GitIdentity) -> Self {
        Self {
            program: OsString::from("git"),
            identity,
        }
    }

    /// Use a specific git executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    fn run<I, S>(&self, dir: &Path, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let command = describe(&self.program, &args);
        info!("RUNNING: {command} (in {})", dir.display());

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(dir)
            .envs(self.identity.env_vars())
            .output()
            .map_err(|err| SeedError::VersionControl {
                command: command.clone(),
                detail: err.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            info!("OUT: {}", stdout.trim_end());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("{}", stderr.trim_end());
        }

        if !output.status.success() {
            return Err(SeedError::VersionControl {
                command,
                detail: output.status.to_string(),
            });
        }

        Ok(())
    }
}

impl VersionControl for GitCli {
    fn init_and_stage(&self, dir: &Path, paths: &[PathBuf]) -> Result<()> {
        self.run(dir, ["init"])?;
        let staged = paths.iter().map(|p| Path::new(".").join(p).into_os_string());
        self.run(dir, std::iter::once(OsString::from("add")).chain(staged))
    }

    fn rename_branch_and_commit(&self, dir: &Path, branch: &str, message: &str) -> Result<()> {
        self.run(dir, ["branch", "-M", branch])?;
        self.run(dir, ["commit", "-m", message])
    }
}

fn describe(program: &OsString, args: &[OsString]) -> String {
    std::iter::once(program)
        .chain(args)
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs the version-control protocol once, after all artifacts are written.
pub struct RepositoryInitializer<V> {
    vcs: V,
    commit_message: String,
}

impl<V: VersionControl> RepositoryInitializer<V> {
    /// Create an initializer committing with `commit_message`.
    pub fn new(vcs: V, commit_message: impl Into<String>) -> Self {
        Self {
            vcs,
            commit_message: commit_message.into(),
        }
    }

    /// Initialize the repository in the manifest's root and commit its files.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::VersionControl`] if any step fails. The second
    /// step is not attempted when the first fails.
    pub fn initialize(&self, manifest: &Manifest, project: &ProjectDescriptor) -> Result<()> {
        self.vcs
            .init_and_stage(manifest.root(), manifest.relative_paths())?;
        self.vcs.rename_branch_and_commit(
            manifest.root(),
            &project.git_main_branch,
            &self.commit_message,
        )
    }
}
