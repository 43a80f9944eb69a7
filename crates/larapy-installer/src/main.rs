//! Larapy installer - create new Larapy projects from the application templates

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use larapy_core::tui::{self, NewArgs};
use larapy_core::{CreateError, Database, ProductConfig};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Larapy product configuration
#[derive(Clone)]
pub struct LarapyConfig;

impl ProductConfig for LarapyConfig {
    fn name(&self) -> &'static str {
        "larapy"
    }

    fn display_name(&self) -> &'static str {
        "Larapy"
    }

    fn default_template_url(&self) -> &'static str {
        "https://github.com/larapy-lab/larapy"
    }

    fn template_url_env(&self) -> &'static str {
        "LARAPY_TEMPLATE_URL"
    }

    fn default_index_url(&self) -> &'static str {
        "https://pypi.org/pypi/larapy-framework/json"
    }

    fn index_url_env(&self) -> &'static str {
        "LARAPY_INDEX_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/larapy-lab/larapy"
    }

    fn next_steps(&self, project_name: &str) -> Vec<String> {
        vec![
            format!("cd {}", project_name),
            "python artisan migrate".to_string(),
            "python artisan serve".to_string(),
        ]
    }

    fn dev_server_url(&self) -> &'static str {
        "http://localhost:8000"
    }
}

#[derive(Parser, Debug)]
#[command(name = "larapy")]
#[command(about = "Larapy Framework Installer - Create new Larapy projects with ease")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Larapy project
    ///
    /// Examples: `larapy new my-project`, `larapy new my-api --template=api`,
    /// `larapy new my-app --template=full --git`
    New(CliNewArgs),
    /// List available project templates
    Templates,
    /// List available Larapy framework versions
    Versions,
    /// Show installer version
    Version,
}

#[derive(Parser, Debug)]
pub struct CliNewArgs {
    /// Project name
    pub name: String,

    /// Project template (default, api, minimal, full)
    #[arg(short, long, default_value = "default")]
    pub template: String,

    /// Python version to use
    #[arg(short, long, default_value = "3.11")]
    pub python: String,

    /// Database type
    #[arg(short, long, value_enum, default_value_t = Database::Sqlite)]
    pub database: Database,

    /// Initialize git repository
    #[arg(short, long)]
    pub git: bool,

    /// Force overwrite existing directory
    #[arg(short, long)]
    pub force: bool,
}

impl From<CliNewArgs> for NewArgs {
    fn from(args: CliNewArgs) -> Self {
        NewArgs {
            name: args.name,
            template: args.template,
            python: args.python,
            database: args.database,
            git: args.git,
            force: args.force,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = LarapyConfig;

    let result = match args.command {
        Command::New(new_args) => tui::run_new(&config, new_args.into()).await,
        Command::Templates => {
            tui::list_templates(&config);
            Ok(())
        }
        Command::Versions => tui::list_versions(&config).await,
        Command::Version => {
            println!("{} Installer v{}", config.display_name(), CLI_VERSION);
            Ok(())
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        // Creation failures were already rendered by the front end
        if e.downcast_ref::<CreateError>().is_none() {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
        std::process::exit(1);
    }

    Ok(())
}
