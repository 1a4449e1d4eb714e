//! Taxonomy project descriptor
//!
//! [`ProjectDescriptor`] is the canonical, fully resolved configuration of a
//! taxonomy project. It is built once by the
//! [`ConfigResolver`](crate::config::ConfigResolver) and then only read.
//!
//! # Example Configuration
//!
//! ```yaml
//! id: CCN0001
//! title: Mouse MTG
//! repo: mouse-mtg-taxonomy
//! github_org: brain-bican
//! author: https://orcid.org/0000-0000-0000-0000
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Default value of [`ProjectDescriptor::git_main_branch`].
pub const DEFAULT_MAIN_BRANCH: &str = "main";

/// Default value of [`ProjectDescriptor::license`].
pub const DEFAULT_LICENSE: &str = "https://creativecommons.org/licenses/unspecified";

/// Default value of [`ProjectDescriptor::description`].
pub const DEFAULT_DESCRIPTION: &str = "None";

/// Configuration for a taxonomy project repository.
///
/// Keys of the YAML configuration map 1:1 onto these fields. Absent keys take
/// the defaults below and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDescriptor {
    /// Id for this taxonomy (e.g. `CCN0001`). Falls back to `repo` when empty.
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,

    /// Concise descriptive text about this taxonomy.
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,

    /// Git user name, needed for generating releases.
    #[serde(deserialize_with = "null_as_empty")]
    pub git_user: String,

    /// Name of the repo without the org, e.g. `mouse-mtg-taxonomy`.
    #[serde(deserialize_with = "null_as_empty")]
    pub repo: String,

    /// GitHub org or user name the repo will live under.
    #[serde(deserialize_with = "null_as_empty")]
    pub github_org: String,

    /// Main branch of the repo.
    #[serde(deserialize_with = "null_as_empty")]
    pub git_main_branch: String,

    /// License IRI the taxonomy is supplied under.
    #[serde(deserialize_with = "null_as_empty")]
    pub license: String,

    /// Also write a full `project.yaml` including every default.
    pub export_project_yaml: bool,

    /// Short description of the taxonomy.
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,

    /// Single contact for the taxonomy (ORCID or GitHub handle).
    pub author: Option<String>,

    /// Taxonomy creators. Informational only.
    pub creators: Option<Vec<String>>,

    /// Citation or permanent data identifier for the taxonomy.
    pub citation: Option<String>,
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            git_user: String::new(),
            repo: String::new(),
            github_org: String::new(),
            git_main_branch: DEFAULT_MAIN_BRANCH.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            export_project_yaml: false,
            description: DEFAULT_DESCRIPTION.to_string(),
            author: None,
            creators: None,
            citation: None,
        }
    }
}

impl ProjectDescriptor {
    /// Parse a project from a YAML document.
    ///
    /// A document with no content resolves to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML or a field has the
    /// wrong type.
    pub fn from_yaml(document: &str) -> serde_yaml::Result<Self> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(document)
    }

    /// Serialize the project as a plain YAML mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Text used as the README body: the description, or the title when the
    /// description is empty.
    #[must_use]
    pub fn readme_body(&self) -> &str {
        if self.description.is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}

/// Treat an explicit YAML `null` as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
