//! Rizzo CSS CLI - scaffold projects with the Rizzo design system

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rizzo_core::catalog::{self, Framework, Mode, Theme};
use rizzo_core::runtime::PackageManager;
use rizzo_core::tui::{AddArgs, NewArgs};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "rizzo-css")]
#[command(about = "Scaffold projects with the Rizzo CSS design system")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    New(CliNewArgs),
    /// Add components to an existing project
    Add(CliAddArgs),
    /// List the components each framework ships
    List(ListArgs),
    /// Open the design system documentation
    Docs,
    /// Build framework zips from a bundle directory (for development use)
    #[command(hide = true)]
    BuildBundle(BuildBundleArgs),
}

#[derive(Parser, Debug)]
pub struct CliNewArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Framework target (html, svelte, astro)
    #[arg(short, long)]
    pub framework: Option<Framework>,

    /// Template mode (full, minimal, manual)
    #[arg(short, long)]
    pub template: Option<Mode>,

    /// Initial theme (default, default-dark, default-light)
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Components to include (comma-separated; implies the manual template)
    #[arg(short, long, value_delimiter = ',')]
    pub components: Option<Vec<String>>,

    /// Local directory to use for the asset bundle instead of fetching (for development use)
    #[arg(long = "bundle-dir")]
    pub bundle_dir: Option<PathBuf>,

    /// Package manager for the install step (pnpm, bun, yarn, npm)
    #[arg(long = "package-manager")]
    pub package_manager: Option<PackageManager>,

    /// Skip installing dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliNewArgs> for NewArgs {
    fn from(args: CliNewArgs) -> Self {
        NewArgs {
            directory: args.directory,
            framework: args.framework,
            template: args.template,
            theme: args.theme,
            components: args.components,
            bundle_dir: args.bundle_dir,
            package_manager: args.package_manager,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliAddArgs {
    /// Components to add; leave empty to pick interactively
    pub components: Vec<String>,

    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to use for the asset bundle instead of fetching (for development use)
    #[arg(long = "bundle-dir")]
    pub bundle_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliAddArgs> for AddArgs {
    fn from(args: CliAddArgs) -> Self {
        AddArgs {
            components: args.components,
            directory: args.directory,
            bundle_dir: args.bundle_dir,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list one framework's catalog
    #[arg(short, long)]
    pub framework: Option<Framework>,
}

#[derive(Parser, Debug)]
pub struct BuildBundleArgs {
    /// Directory containing the bundle sources
    #[arg(long = "bundle-dir")]
    pub bundle_dir: Option<PathBuf>,
}

fn list_components(args: &ListArgs) {
    let frameworks: Vec<Framework> = match args.framework {
        Some(framework) => vec![framework],
        None => Framework::ALL.to_vec(),
    };

    for framework in frameworks {
        println!("{}", framework.display_name().cyan().bold());
        for name in catalog::components(framework) {
            let deps = catalog::dependencies_of(framework, name);
            if deps.is_empty() {
                println!("  {}", name);
            } else {
                println!(
                    "  {} {}",
                    name,
                    format!("(requires {})", deps.join(", ")).dimmed()
                );
            }
        }
        println!();
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

    match args.command {
        Some(Command::New(new_args)) => {
            let result = rizzo_core::run_new(new_args.into(), CLI_VERSION).await;
            let _ = console::Term::stderr().show_cursor();
            result
        }
        Some(Command::Add(add_args)) => {
            let result = rizzo_core::run_add(add_args.into(), CLI_VERSION).await;
            let _ = console::Term::stderr().show_cursor();
            result
        }
        Some(Command::List(list_args)) => {
            list_components(&list_args);
            Ok(())
        }
        Some(Command::Docs) => {
            println!("Opening {} in your browser...", rizzo_core::DOCS_URL);
            open::that(rizzo_core::DOCS_URL)?;
            Ok(())
        }
        Some(Command::BuildBundle(build_args)) => {
            rizzo_core::bundle::build_bundle(&build_args.bundle_dir).await
        }
        None => {
            // No subcommand: default to the interactive new-project flow
            let result = rizzo_core::run_new(NewArgs::default(), CLI_VERSION).await;
            let _ = console::Term::stderr().show_cursor();
            result
        }
    }
}
