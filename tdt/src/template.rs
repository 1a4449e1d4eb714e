//! Template rendering
//!
//! Templates are Jinja2-compatible and rendered with minijinja against a
//! context with exactly two bindings:
//!
//! - `project`: the [`ProjectDescriptor`]
//! - `env.ODK_VERSION`: only when `ODK_VERSION` is set
//!
//! Undefined attribute paths are errors rather than empty strings.

use std::fs;
use std::path::Path;

use minijinja::{context, AutoEscape, Environment, UndefinedBehavior};

use crate::error::{Result, SeedError};
use crate::project::ProjectDescriptor;

/// Environment variable exposed to templates as `env.ODK_VERSION`.
pub const ODK_VERSION_VAR: &str = "ODK_VERSION";

/// Environment values visible to templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateEnv {
    /// Value of `ODK_VERSION`, if set.
    pub odk_version: Option<String>,
}

impl TemplateEnv {
    /// Capture the template environment from the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            odk_version: std::env::var(ODK_VERSION_VAR).ok(),
        }
    }
}

/// Renders template files against a project.
pub struct TemplateRenderer {
    jinja: Environment<'static>,
    vars: TemplateEnv,
}

impl TemplateRenderer {
    /// Create a renderer for the given template environment.
    #[must_use]
    pub fn new(vars: TemplateEnv) -> Self {
        let mut jinja = Environment::new();

        // Generated files are not HTML
        jinja.set_auto_escape_callback(|_| AutoEscape::None);
        jinja.set_undefined_behavior(UndefinedBehavior::Strict);

        Self { jinja, vars }
    }

    /// Render the template at `template_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The template cannot be read
    /// - The template has invalid syntax or references an undefined attribute
    pub fn render(&self, template_path: &Path, project: &ProjectDescriptor) -> Result<String> {
        let source = fs::read_to_string(template_path)
            .map_err(|source| SeedError::write(template_path, source))?;
        self.render_str(&source, template_path, project)
    }

    /// Render template source already in memory. `origin` names it in errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the template has invalid syntax or references an
    /// undefined attribute.
    pub fn render_str(
        &self,
        source: &str,
        origin: &Path,
        project: &ProjectDescriptor,
    ) -> Result<String> {
        let rendered = match &self.vars.odk_version {
            Some(version) => self.jinja.render_str(
                source,
                context! {
                    project => project,
                    env => context! { ODK_VERSION => version },
                },
            ),
            None => self.jinja.render_str(source, context! { project => project }),
        };

        rendered.map_err(|source| SeedError::Template {
            path: origin.to_path_buf(),
            source,
        })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(TemplateEnv::from_process())
    }
}
