//! Terminal front end for the installer subcommands

use super::reporter::TerminalReporter;
use crate::create::{CreatedProject, ProjectCreator};
use crate::error::CreateError;
use crate::product::ProductConfig;
use crate::project::{Database, ProjectRequest};
use crate::runtime::SystemRunner;
use crate::templates::{Template, TemplateRepository};
use crate::versions::{VersionIndex, VersionQueryError};
use anyhow::{Context, Result};
use colored::Colorize;

/// Arguments for the `new` command
#[derive(Debug, Clone)]
pub struct NewArgs {
    pub name: String,

    /// Template name as typed; unknown names fall back to the default template
    pub template: String,

    pub python: String,
    pub database: Database,
    pub git: bool,
    pub force: bool,
}

/// Create a project in the current directory
///
/// A [`CreateError`] is reported here before being returned, so callers
/// should not print it again.
pub async fn run_new<C: ProductConfig>(config: &C, args: NewArgs) -> Result<()> {
    cliclack::intro(format!("{} Installer", config.display_name()))?;

    let (template, fell_back) = Template::resolve(&args.template);
    if fell_back {
        cliclack::log::warning(format!(
            "Unknown template '{}', using '{}'",
            args.template, template
        ))?;
    }

    let repository = TemplateRepository::from_config(config)?;
    let base_dir = std::env::current_dir().context("Failed to determine current directory")?;

    let request = ProjectRequest {
        name: args.name,
        template,
        python_version: args.python,
        database: args.database,
        init_git: args.git,
        force: args.force,
    };

    let reporter = TerminalReporter;
    let creator = ProjectCreator::new(SystemRunner, &reporter, repository, base_dir);

    match creator.create(&request).await {
        Ok(created) => print_next_steps(config, &created),
        Err(e) => {
            report_failure(&e)?;
            Err(e.into())
        }
    }
}

fn report_failure(error: &CreateError) -> Result<()> {
    cliclack::log::error(error.to_string())?;
    for line in error.guidance() {
        cliclack::log::remark(line)?;
    }
    cliclack::outro_cancel("Project was not created")?;
    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, created: &CreatedProject) -> Result<()> {
    cliclack::log::info(format!(
        "Created {} files from branch '{}' in {}",
        created.files,
        created.branch,
        created.directory.display()
    ))?;

    if created.has_warnings() {
        cliclack::log::warning(format!(
            "Finished with {} warning(s); see above",
            created.warnings.len()
        ))?;
    }

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in config.next_steps(created.name.as_str()).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  {}", format!("Visit: {}", config.dev_server_url()).dimmed());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

/// Print the template catalog
pub fn list_templates<C: ProductConfig>(config: &C) {
    println!();
    println!(
        "{}",
        format!("Available {} Templates", config.display_name())
            .cyan()
            .bold()
    );
    println!();
    println!(
        "  {} {}",
        format!("{:<15}", "Template").magenta().bold(),
        "Description".magenta().bold()
    );

    for template in Template::ALL {
        println!(
            "  {} {}",
            format!("{:<15}", template.name()).cyan(),
            template.description()
        );
    }

    println!();
    println!(
        "{}",
        format!("Usage: {} new my-project --template=api", config.name()).dimmed()
    );
    println!("{}", format!("Docs: {}", config.docs_url()).dimmed());
    println!();
}

/// Print recent framework releases; query failures are reported, not returned
pub async fn list_versions<C: ProductConfig>(config: &C) -> Result<()> {
    let index = VersionIndex::from_config(config)?;

    println!();
    println!(
        "{}",
        format!("Available {} Framework Versions", config.display_name())
            .cyan()
            .bold()
    );
    println!();

    let package = match index.fetch().await {
        Ok(package) => package,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            if matches!(e, VersionQueryError::Status { .. }) {
                eprintln!(
                    "{} the framework package may not be published yet",
                    "Note:".yellow()
                );
            }
            return Ok(());
        }
    };

    let releases = package.latest_releases();
    if releases.is_empty() {
        println!("{}", "No published versions found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {} {}",
        format!("{:<15}", "Version").magenta().bold(),
        "Release Date".magenta().bold()
    );
    for release in &releases {
        println!(
            "  {} {}",
            format!("{:<15}", release.version).cyan(),
            release.released
        );
    }

    if let Some(latest) = package.latest_version() {
        println!();
        println!("{}", format!("Latest version: {}", latest).dimmed());
    }
    println!();

    Ok(())
}
