//! Generated file contents
//!
//! Text artifacts derived purely from the project descriptor.

use crate::project::ProjectDescriptor;

/// Base of the BICAN permanent URLs.
pub const PURL_BASE: &str = "http://purl.bican.org/taxonomy";

/// Title of the `curation_tables/` README.
pub const CURATION_TABLES_TITLE: &str = "Curation Tables";

/// Body of the `curation_tables/` README.
pub const CURATION_TABLES_BODY: &str = "CCN2 taxonomy curation tables.";

/// Title of the `purl/` README.
pub const PURL_TITLE: &str = "PURL Configuration";

/// Body of the `purl/` README.
pub const PURL_BODY: &str = "BICAN Permanent URLs sample configuration file. \
Please make a pull request to place this file in [BICAN PURLs taxonomy configuration folder]\
(https://github.com/hkir-dev/purl.bican.org/tree/main/config/taxonomy).";

/// README written inside a generated directory.
#[must_use]
pub fn folder_readme(title: &str, body: &str) -> String {
    format!("# {title}\n\n{body}")
}

/// Top-level `README.md`.
#[must_use]
pub fn readme(project: &ProjectDescriptor) -> String {
    format!(
        "# {}({})\n\n{}.",
        project.title,
        project.id,
        project.readme_body()
    )
}

/// Placeholder taxonomy document, an empty JSON object.
#[must_use]
pub fn empty_taxonomy() -> String {
    serde_json::Value::Object(serde_json::Map::new()).to_string()
}

/// Raw GitHub URL of the published `{id}.json`.
#[must_use]
pub fn raw_output_url(project: &ProjectDescriptor) -> String {
    format!(
        "https://raw.githubusercontent.com/{org}/{repo}/main/{id}.json",
        org = project.github_org,
        repo = project.repo,
        id = project.id
    )
}

/// PURL redirect configuration `purl/{id}.yml`.
///
/// Line order is fixed, comment and blank lines included.
#[must_use]
pub fn purl_config(project: &ProjectDescriptor) -> String {
    let id = &project.id;
    let org = &project.github_org;
    let repo = &project.repo;
    let raw_url = raw_output_url(project);

    let lines = [
        format!("# PURL configuration for {PURL_BASE}/{id}"),
        String::new(),
        format!("idspace: {id}"),
        format!("base_url: /taxonomy/{id}"),
        String::new(),
        "products:".to_string(),
        format!("- {id}.json: {raw_url}"),
        String::new(),
        format!("base_redirect: https://github.com/{org}/{repo}"),
        String::new(),
        "entries:".to_string(),
        String::new(),
        format!("# {PURL_BASE}/{id}/{id}.json"),
        format!("- exact: /{id}.json"),
        format!("  replacement: {raw_url}"),
    ];

    lines.iter().fold(String::new(), |mut out, line| {
        out.push_str(line);
        out.push('\n');
        out
    })
}
