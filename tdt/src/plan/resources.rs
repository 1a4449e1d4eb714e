//! Bundled resource locations

use std::path::{Path, PathBuf};

/// Resource files the planner copies or substitutes.
pub const RESOURCE_FILES: &[&str] = &[
    "table.tsv",
    "column.tsv",
    "datatype.tsv",
    "prefix.tsv",
    "import.tsv",
    "import_config.tsv",
    "taxonomy_config.tsv",
];

/// Layout of the resource workspace (`/tools` in the container image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    root: PathBuf,
}

impl ResourceLayout {
    /// Create a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `scripts/run.sh`
    #[must_use]
    pub fn run_script(&self) -> PathBuf {
        self.root.join("scripts").join("run.sh")
    }

    /// `Makefile`
    #[must_use]
    pub fn makefile(&self) -> PathBuf {
        self.root.join("Makefile")
    }

    /// `ontodev.Makefile`
    #[must_use]
    pub fn ontodev_makefile(&self) -> PathBuf {
        self.root.join("ontodev.Makefile")
    }

    /// A file under `resources/`.
    #[must_use]
    pub fn resource(&self, name: &str) -> PathBuf {
        self.root.join("resources").join(name)
    }

    /// Every resource path, in planning order. Missing entries are reported
    /// by [`ResourceLayout::missing`].
    #[must_use]
    pub fn all(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.run_script(), self.makefile(), self.ontodev_makefile()];
        paths.extend(RESOURCE_FILES.iter().map(|name| self.resource(name)));
        paths
    }

    /// Resource paths that do not exist.
    #[must_use]
    pub fn missing(&self) -> Vec<PathBuf> {
        self.all().into_iter().filter(|p| !p.is_file()).collect()
    }
}
