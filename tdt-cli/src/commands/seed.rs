//! Repository seeding command

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tdt::seed::{SeedOutcome, SeedRequest};
use tdt::ToolSettings;

/// Printed instead of the next steps when git was skipped.
pub const SKIPGIT_MESSAGE: &str =
    "Repository files have been successfully copied, but no git commands have been run.";

/// Seed a taxonomy repository
pub struct SeedCommand {
    request: SeedRequest,
    show_progress: bool,
}

impl SeedCommand {
    /// Create a new command instance
    ///
    /// The spinner is hidden when `verbose` is non-zero so it does not
    /// interleave with log lines.
    #[must_use]
    pub const fn new(request: SeedRequest, verbose: u8) -> Self {
        Self {
            request,
            show_progress: verbose == 0,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the tool settings cannot be loaded or any seed
    /// stage fails.
    pub fn execute(&self) -> Result<()> {
        let settings = ToolSettings::load().context("Failed to load tool settings")?;

        let spinner = if self.show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Seeding repository...");

        let result = tdt::seed::seed(&self.request, &settings);
        spinner.finish_and_clear();
        let outcome = result.context("Failed to seed repository")?;

        print_manifest(&outcome);
        if outcome.git_initialized {
            print_next_steps(&outcome);
        } else {
            println!("{}", style(SKIPGIT_MESSAGE).yellow());
        }

        Ok(())
    }
}

fn print_manifest(outcome: &SeedOutcome) {
    println!(
        "{} {}",
        style("Created files in").green().bold(),
        style(outcome.out_dir.display()).cyan().bold()
    );
    for path in outcome.manifest.relative_paths() {
        println!("  {} {}", style("✓").green(), path.display());
    }
    println!();
}

fn print_next_steps(outcome: &SeedOutcome) {
    let project = &outcome.project;
    let outdir = outcome.out_dir.display();

    println!("{}", style("NEXT STEPS:").bold());
    println!(
        "  {} Examine {outdir} and check it meets your expectations. If not blow it away and start again",
        style("0.").cyan()
    );
    println!(
        "  {} Go to: {}",
        style("1.").cyan(),
        style("https://github.com/new").cyan().underlined()
    );
    println!(
        "  {} The owner MUST be {}. The Repository name MUST be {}",
        style("2.").cyan(),
        style(&project.github_org).bold(),
        style(&project.repo).bold()
    );
    println!(
        "  {} Do not initialize with a README (you already have one)",
        style("3.").cyan()
    );
    println!("  {} Click Create", style("4.").cyan());
    println!(
        "  {} Push the existing repository from the command line, e.g.:",
        style("5.").cyan()
    );
    for command in push_commands(outcome) {
        println!("     {} {}", style("$").dim(), style(command).cyan());
    }
    println!();
    println!(
        "{}",
        style("BE BOLD: you can always delete your repo and start again").green().bold()
    );
}

/// Shell commands that publish the seeded repository.
#[must_use]
pub fn push_commands(outcome: &SeedOutcome) -> Vec<String> {
    let project = &outcome.project;
    let branch = &project.git_main_branch;
    vec![
        format!("cd {}", outcome.out_dir.display()),
        format!(
            "git remote add origin https://github.com/{}/{}.git",
            project.github_org, project.repo
        ),
        format!("git branch -M {branch}"),
        format!("git push -u origin {branch}"),
    ]
}
