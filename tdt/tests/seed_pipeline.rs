//! Integration tests for the seed pipeline

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tdt::seed::{seed_with, SeedRequest};
use tdt::{
    ConfigResolver, GitCli, GitIdentity, Overrides, ProjectDescriptor, SeedError, TemplateEnv,
    TemplateRenderer, ToolSettings,
};
use tempfile::TempDir;

fn tools_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../tools")
}

fn settings(output_root: &Path) -> ToolSettings {
    ToolSettings {
        workspace: tools_dir(),
        output_root: output_root.to_path_buf(),
        ..ToolSettings::default()
    }
}

fn renderer() -> TemplateRenderer {
    TemplateRenderer::new(TemplateEnv::default())
}

fn mouse_request() -> SeedRequest {
    SeedRequest {
        repos: vec!["mouse-mtg-taxonomy".to_string()],
        title: Some("Mouse MTG".to_string()),
        user: Some("brain-bican".to_string()),
        skip_git: true,
        ..SeedRequest::default()
    }
}

fn seed_without_git(
    request: &SeedRequest,
    settings: &ToolSettings,
) -> tdt::Result<tdt::seed::SeedOutcome> {
    seed_with::<GitCli>(request, settings, &renderer(), None)
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// No config file, overrides only
#[test]
fn test_seed_from_overrides() {
    let temp = TempDir::new().unwrap();
    let outcome = seed_without_git(&mouse_request(), &settings(temp.path())).unwrap();

    let out_dir = temp.path().join("mouse-mtg-taxonomy");
    assert_eq!(outcome.out_dir, out_dir);
    assert!(!outcome.git_initialized);

    let readme = fs::read_to_string(out_dir.join("README.md")).unwrap();
    assert_eq!(readme.lines().next(), Some("# Mouse MTG(mouse-mtg-taxonomy)"));
    assert_eq!(readme, "# Mouse MTG(mouse-mtg-taxonomy)\n\nNone.");

    let purl = fs::read_to_string(out_dir.join("purl/mouse-mtg-taxonomy.yml")).unwrap();
    assert!(purl.contains("\nidspace: mouse-mtg-taxonomy\n"));
    assert!(purl.contains("base_redirect: https://github.com/brain-bican/mouse-mtg-taxonomy\n"));

    assert_eq!(
        fs::read_to_string(out_dir.join("mouse-mtg-taxonomy.json")).unwrap(),
        "{}"
    );
    assert!(out_dir.join("input_data").is_dir());
    assert!(!out_dir.join("input_data/README.md").exists());
}

/// Manifest lists files in production order
#[test]
fn test_manifest_order() {
    let temp = TempDir::new().unwrap();
    let outcome = seed_without_git(&mouse_request(), &settings(temp.path())).unwrap();

    let listed: Vec<String> = outcome
        .manifest
        .relative_paths()
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        listed,
        vec![
            "mouse-mtg-taxonomy_project_config.yaml",
            "curation_tables/README.md",
            "purl/README.md",
            "purl/mouse-mtg-taxonomy.yml",
            "README.md",
            "mouse-mtg-taxonomy.json",
            "run.sh",
            "Makefile",
            "ontodev.Makefile",
            "curation_tables/table.tsv",
            "curation_tables/column.tsv",
            "curation_tables/datatype.tsv",
            "curation_tables/prefix.tsv",
            "curation_tables/import.tsv",
            "curation_tables/import_config.tsv",
            "curation_tables/mouse-mtg-taxonomy_config.tsv",
        ]
    );
    assert!(outcome.manifest.paths().all(|p| p.is_absolute() && p.is_file()));
}

/// Config file with an id but no repo
#[test]
fn test_seed_with_id_and_empty_repo() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("ccn0001.yaml");
    fs::write(&config, "id: CCN0001\ntitle: Human MTG\n").unwrap();

    let output_root = temp.path().join("target");
    let request = SeedRequest {
        config: Some(config.clone()),
        skip_git: true,
        ..SeedRequest::default()
    };
    let outcome = seed_without_git(&request, &settings(&output_root)).unwrap();

    assert_eq!(outcome.project.repo, "");
    assert_eq!(outcome.project.id, "CCN0001");
    assert_eq!(outcome.out_dir, output_root.join(""));

    // Config echo is a verbatim copy of the input
    assert_eq!(
        fs::read(output_root.join("CCN0001_project_config.yaml")).unwrap(),
        fs::read(&config).unwrap()
    );
    let purl = fs::read_to_string(output_root.join("purl/CCN0001.yml")).unwrap();
    assert!(purl.contains("base_redirect: https://github.com//\n"));
}

/// `{taxonomy_id}` substitution in curation tables
#[test]
fn test_curation_table_substitution() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("ccn0002.yaml");
    fs::write(&config, "id: CCN0002\nrepo: human-mtg-taxonomy\n").unwrap();

    let request = SeedRequest {
        config: Some(config),
        skip_git: true,
        ..SeedRequest::default()
    };
    let outcome = seed_without_git(&request, &settings(temp.path())).unwrap();

    let resource = fs::read_to_string(tools_dir().join("resources/table.tsv")).unwrap();
    assert_eq!(resource.matches("{taxonomy_id}").count(), 3);

    let table = fs::read_to_string(outcome.out_dir.join("curation_tables/table.tsv")).unwrap();
    assert!(!table.contains("{taxonomy_id}"));
    assert_eq!(table, resource.replace("{taxonomy_id}", "CCN0002"));

    assert_eq!(
        fs::read(outcome.out_dir.join("curation_tables/CCN0002_config.tsv")).unwrap(),
        fs::read(tools_dir().join("resources/taxonomy_config.tsv")).unwrap()
    );
    assert_eq!(
        fs::read(outcome.out_dir.join("curation_tables/prefix.tsv")).unwrap(),
        fs::read(tools_dir().join("resources/prefix.tsv")).unwrap()
    );
}

/// `clean` removes existing output; without it unrelated files survive
#[test]
fn test_clean_and_merge() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("mouse-mtg-taxonomy");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("notes.txt"), "keep me").unwrap();
    fs::write(out_dir.join("README.md"), "stale").unwrap();

    seed_without_git(&mouse_request(), &settings(temp.path())).unwrap();
    assert_eq!(fs::read_to_string(out_dir.join("notes.txt")).unwrap(), "keep me");
    assert_ne!(fs::read_to_string(out_dir.join("README.md")).unwrap(), "stale");

    let request = SeedRequest {
        clean: true,
        ..mouse_request()
    };
    seed_without_git(&request, &settings(temp.path())).unwrap();
    assert!(!out_dir.join("notes.txt").exists());
    assert!(out_dir.join("README.md").exists());
}

/// The serialized config echo resolves back to the same project
#[test]
fn test_config_echo_round_trip() {
    let temp = TempDir::new().unwrap();
    let request = SeedRequest {
        repos: vec!["ccn-round-trip".to_string()],
        title: Some("Round trip".to_string()),
        user: Some("hkir-dev".to_string()),
        skip_git: true,
        ..SeedRequest::default()
    };
    let outcome = seed_without_git(&request, &settings(temp.path())).unwrap();

    let echo = outcome.out_dir.join("ccn-round-trip_project_config.yaml");
    let resolved = ConfigResolver::resolve(Some(&echo), &Overrides::default()).unwrap();
    assert_eq!(resolved, outcome.project);
}

/// Re-seeding from the config echo leaves the echo intact
#[test]
fn test_reseed_from_config_echo() {
    let temp = TempDir::new().unwrap();
    let first = seed_without_git(&mouse_request(), &settings(temp.path())).unwrap();
    let echo = first.out_dir.join("mouse-mtg-taxonomy_project_config.yaml");
    let before = fs::read(&echo).unwrap();
    assert!(!before.is_empty());

    let request = SeedRequest {
        config: Some(echo.clone()),
        ..mouse_request()
    };
    let second = seed_without_git(&request, &settings(temp.path())).unwrap();

    assert_eq!(fs::read(&echo).unwrap(), before);
    assert_eq!(second.project, first.project);
    assert_eq!(
        second.manifest.relative_paths(),
        first.manifest.relative_paths()
    );
}

/// `export_project_yaml` writes a full project.yaml first
#[test]
fn test_export_project_yaml() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("export.yaml");
    fs::write(
        &config,
        "id: CCN0003\nrepo: export-taxonomy\nexport_project_yaml: true\ncreators:\n  - hkir-dev\n",
    )
    .unwrap();

    let request = SeedRequest {
        config: Some(config),
        skip_git: true,
        ..SeedRequest::default()
    };
    let outcome = seed_without_git(&request, &settings(temp.path())).unwrap();

    assert_eq!(
        outcome.manifest.relative_paths()[0],
        PathBuf::from("project.yaml")
    );
    let exported = fs::read_to_string(outcome.out_dir.join("project.yaml")).unwrap();
    let project = ProjectDescriptor::from_yaml(&exported).unwrap();
    assert_eq!(project, outcome.project);
    assert_eq!(project.creators, Some(vec!["hkir-dev".to_string()]));
}

/// Two positional repo names are a usage error and nothing is written
#[test]
fn test_too_many_repos() {
    let temp = TempDir::new().unwrap();
    let request = SeedRequest {
        repos: vec!["one".to_string(), "two".to_string()],
        ..mouse_request()
    };
    let err = seed_without_git(&request, &settings(temp.path())).unwrap_err();

    assert!(err.is_usage());
    assert!(!temp.path().join("one").exists());
    assert!(!temp.path().join("mouse-mtg-taxonomy").exists());
}

/// Malformed config is reported before any output is produced
#[test]
fn test_malformed_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.yaml");
    fs::write(&config, "id: [CCN0001\n").unwrap();

    let request = SeedRequest {
        config: Some(config),
        ..mouse_request()
    };
    let err = seed_without_git(&request, &settings(temp.path())).unwrap_err();
    assert!(matches!(err, SeedError::ConfigParse { .. }));
    assert!(!temp.path().join("mouse-mtg-taxonomy").exists());
}

/// Missing resources abort the run and leave partial output
#[test]
fn test_missing_resources() {
    let temp = TempDir::new().unwrap();
    let settings = ToolSettings {
        workspace: temp.path().join("no-tools"),
        output_root: temp.path().to_path_buf(),
        ..ToolSettings::default()
    };
    let err = seed_without_git(&mouse_request(), &settings).unwrap_err();

    match err {
        SeedError::ArtifactWrite { path, .. } => {
            assert_eq!(path, temp.path().join("no-tools/scripts/run.sh"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(temp.path().join("mouse-mtg-taxonomy/README.md").exists());
}

/// Repeated runs produce identical files
#[test]
fn test_regeneration_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = seed_without_git(&mouse_request(), &settings(first.path())).unwrap();
    let b = seed_without_git(&mouse_request(), &settings(second.path())).unwrap();

    assert_eq!(a.manifest.relative_paths(), b.manifest.relative_paths());
    for relative in a.manifest.relative_paths() {
        assert_eq!(
            fs::read(a.out_dir.join(relative)).unwrap(),
            fs::read(b.out_dir.join(relative)).unwrap(),
            "content differs: {}",
            relative.display()
        );
    }
}

/// Project templates are rendered with the ODK_VERSION binding
#[test]
fn test_project_templates() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    fs::create_dir_all(templates.join("docs")).unwrap();
    fs::write(
        templates.join("docs/index.md.jinja2"),
        "# {{ project.title }}\nBuilt with ODK {{ env.ODK_VERSION }}",
    )
    .unwrap();

    let settings = ToolSettings {
        template_dir: Some(templates),
        ..settings(&temp.path().join("target"))
    };
    let renderer = TemplateRenderer::new(TemplateEnv {
        odk_version: Some("v1.4.1".to_string()),
    });
    let outcome = seed_with::<GitCli>(&mouse_request(), &settings, &renderer, None).unwrap();

    assert_eq!(
        outcome.manifest.relative_paths().last(),
        Some(&PathBuf::from("docs/index.md"))
    );
    assert_eq!(
        fs::read_to_string(outcome.out_dir.join("docs/index.md")).unwrap(),
        "# Mouse MTG\nBuilt with ODK v1.4.1"
    );
}

#[cfg(unix)]
#[test]
fn test_run_script_stays_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let outcome = seed_without_git(&mouse_request(), &settings(temp.path())).unwrap();
    let mode = fs::metadata(outcome.out_dir.join("run.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_ne!(mode & 0o111, 0);
}

/// Full run including git; skipped when git is not installed
#[test]
fn test_seed_with_git() {
    if !git_available() {
        eprintln!("git not installed; skipping");
        return;
    }

    let temp = TempDir::new().unwrap();
    let request = SeedRequest {
        skip_git: false,
        identity: GitIdentity {
            name: Some("Taxonomy Tester".to_string()),
            email: Some("tester@example.org".to_string()),
        },
        ..mouse_request()
    };
    let vcs = GitCli::new(request.identity.clone());
    let outcome = seed_with(&request, &settings(temp.path()), &renderer(), Some(vcs)).unwrap();
    assert!(outcome.git_initialized);

    let log = Command::new("git")
        .args(["log", "--format=%s|%an|%ae"])
        .current_dir(&outcome.out_dir)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&log.stdout).trim(),
        "first release|Taxonomy Tester|tester@example.org"
    );

    let branch = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .current_dir(&outcome.out_dir)
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&branch.stdout).trim(), "main");

    let tracked = Command::new("git")
        .args(["ls-files"])
        .current_dir(&outcome.out_dir)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&tracked.stdout).lines().count(),
        outcome.manifest.len()
    );
}
