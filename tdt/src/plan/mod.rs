//! Artifact planning
//!
//! [`ArtifactPlanner::plan`] turns a resolved project into the ordered list of
//! artifacts a seed run produces. For a project with id `X` the order is:
//!
//! 1. `project.yaml` (only with `export_project_yaml`)
//! 2. `X_project_config.yaml`
//! 3. `input_data/`
//! 4. `curation_tables/` (with README)
//! 5. `purl/` (with README)
//! 6. `purl/X.yml`
//! 7. `README.md`
//! 8. `X.json`
//! 9. `run.sh`
//! 10. `Makefile`, `ontodev.Makefile`
//! 11. `curation_tables/{table,column,datatype,prefix,import,import_config,X_config}.tsv`
//!
//! followed by any project templates. Planning reads nothing but the template
//! directory listing, so the same inputs always give the same plan.

pub mod content;
pub mod resources;

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::ToolSettings;
use crate::error::{Result, SeedError};
use crate::project::ProjectDescriptor;

pub use resources::ResourceLayout;

/// Suffix marking a file in the template directory as a template.
pub const TEMPLATE_SUFFIX: &str = ".jinja2";

/// Token replaced by the project id in curation table templates.
pub const TAXONOMY_ID_TOKEN: &str = "{taxonomy_id}";

/// Where the content of an artifact comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Render a template file against the project.
    Render {
        /// Template to render.
        template: PathBuf,
    },
    /// Copy a file byte for byte.
    Copy {
        /// File to copy.
        source: PathBuf,
    },
    /// Copy a text file, replacing every occurrence of `token` with `value`.
    Substitute {
        /// Text file to read.
        source: PathBuf,
        /// Literal text to find.
        token: String,
        /// Replacement text.
        value: String,
    },
    /// Write literal text.
    Literal(String),
    /// Create a directory, optionally with a `README.md` inside.
    Directory {
        /// README content.
        readme: Option<String>,
    },
}

/// One filesystem entry to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Path relative to the output directory.
    pub target: PathBuf,
    /// Content source.
    pub source: ArtifactSource,
}

impl ArtifactSpec {
    fn new(target: impl Into<PathBuf>, source: ArtifactSource) -> Self {
        Self {
            target: target.into(),
            source,
        }
    }

    fn literal(target: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self::new(target, ArtifactSource::Literal(text.into()))
    }

    fn copy(target: impl Into<PathBuf>, source: PathBuf) -> Self {
        Self::new(target, ArtifactSource::Copy { source })
    }

    fn directory(target: impl Into<PathBuf>, readme: Option<String>) -> Self {
        Self::new(target, ArtifactSource::Directory { readme })
    }
}

/// An ordered plan bound to its output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Output directory every target is relative to.
    pub out_dir: PathBuf,
    /// Artifacts in production order.
    pub artifacts: Vec<ArtifactSpec>,
}

impl Plan {
    /// Relative targets in order.
    pub fn targets(&self) -> impl Iterator<Item = &Path> {
        self.artifacts.iter().map(|a| a.target.as_path())
    }
}

/// Computes the artifacts of a seed run.
#[derive(Debug, Clone)]
pub struct ArtifactPlanner {
    resources: ResourceLayout,
    config_source: Option<PathBuf>,
    template_dir: Option<PathBuf>,
}

impl ArtifactPlanner {
    /// Create a planner reading bundled resources from `workspace`.
    #[must_use]
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            resources: ResourceLayout::new(workspace),
            config_source: None,
            template_dir: None,
        }
    }

    /// Create a planner from tool settings.
    #[must_use]
    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self::new(&settings.workspace).with_template_dir(settings.template_dir.clone())
    }

    /// Echo this configuration file verbatim instead of serializing the project.
    #[must_use]
    pub fn with_config_source(mut self, config_source: Option<PathBuf>) -> Self {
        self.config_source = config_source;
        self
    }

    /// Render every `*.jinja2` file below `template_dir` into the project.
    #[must_use]
    pub fn with_template_dir(mut self, template_dir: Option<PathBuf>) -> Self {
        self.template_dir = template_dir;
        self
    }

    /// Plan the artifacts for `project` under `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The project cannot be serialized
    /// - The template directory cannot be listed
    pub fn plan(&self, project: &ProjectDescriptor, out_dir: &Path) -> Result<Plan> {
        let id = project.id.as_str();
        let mut artifacts = Vec::new();

        if project.export_project_yaml {
            artifacts.push(ArtifactSpec::literal("project.yaml", project.to_yaml()?));
        }

        let config_echo = format!("{id}_project_config.yaml");
        artifacts.push(match &self.config_source {
            Some(source) => ArtifactSpec::copy(config_echo, source.clone()),
            None => ArtifactSpec::literal(config_echo, project.to_yaml()?),
        });

        artifacts.push(ArtifactSpec::directory("input_data", None));
        artifacts.push(ArtifactSpec::directory(
            "curation_tables",
            Some(content::folder_readme(
                content::CURATION_TABLES_TITLE,
                content::CURATION_TABLES_BODY,
            )),
        ));
        artifacts.push(ArtifactSpec::directory(
            "purl",
            Some(content::folder_readme(content::PURL_TITLE, content::PURL_BODY)),
        ));
        artifacts.push(ArtifactSpec::literal(
            format!("purl/{id}.yml"),
            content::purl_config(project),
        ));
        artifacts.push(ArtifactSpec::literal("README.md", content::readme(project)));
        artifacts.push(ArtifactSpec::literal(format!("{id}.json"), content::empty_taxonomy()));

        artifacts.push(ArtifactSpec::copy("run.sh", self.resources.run_script()));
        artifacts.push(ArtifactSpec::copy("Makefile", self.resources.makefile()));
        artifacts.push(ArtifactSpec::copy(
            "ontodev.Makefile",
            self.resources.ontodev_makefile(),
        ));

        artifacts.extend(self.curation_tables(id));

        if let Some(template_dir) = &self.template_dir {
            artifacts.extend(Self::project_templates(template_dir)?);
        }

        debug!(
            "Planned {} artifacts under {}",
            artifacts.len(),
            out_dir.display()
        );

        Ok(Plan {
            out_dir: out_dir.to_path_buf(),
            artifacts,
        })
    }

    fn curation_tables(&self, id: &str) -> Vec<ArtifactSpec> {
        let substituted = ["table.tsv", "column.tsv"].map(|name| {
            ArtifactSpec::new(
                format!("curation_tables/{name}"),
                ArtifactSource::Substitute {
                    source: self.resources.resource(name),
                    token: TAXONOMY_ID_TOKEN.to_string(),
                    value: id.to_string(),
                },
            )
        });

        let copied = ["datatype.tsv", "prefix.tsv", "import.tsv", "import_config.tsv"].map(
            |name| {
                ArtifactSpec::copy(
                    format!("curation_tables/{name}"),
                    self.resources.resource(name),
                )
            },
        );

        let renamed = ArtifactSpec::copy(
            format!("curation_tables/{id}_config.tsv"),
            self.resources.resource("taxonomy_config.tsv"),
        );

        substituted
            .into_iter()
            .chain(copied)
            .chain(std::iter::once(renamed))
            .collect()
    }

    fn project_templates(template_dir: &Path) -> Result<Vec<ArtifactSpec>> {
        let mut artifacts = Vec::new();

        for entry in WalkDir::new(template_dir).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map_or_else(|| template_dir.to_path_buf(), Path::to_path_buf);
                SeedError::write(path, std::io::Error::other(err.to_string()))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(template_dir) else {
                continue;
            };
            let Some(target) = relative
                .to_str()
                .and_then(|name| name.strip_suffix(TEMPLATE_SUFFIX))
            else {
                continue;
            };

            artifacts.push(ArtifactSpec::new(
                target,
                ArtifactSource::Render {
                    template: entry.path().to_path_buf(),
                },
            ));
        }

        Ok(artifacts)
    }
}
