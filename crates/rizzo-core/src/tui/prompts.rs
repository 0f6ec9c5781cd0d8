//! Charm-style CLI prompts using cliclack

use crate::bundle::{copier, fetcher::BundleFetcher, version, FrameworkManifest};
use crate::catalog::{Framework, Mode, Theme};
use crate::expand;
use crate::plan::{self, ScaffoldManifest};
use crate::project::ProjectMarker;
use crate::runtime::{self, PackageManager};
use crate::select::Prompter;
use anyhow::Result;
use std::path::PathBuf;

/// Arguments for the `new` command
#[derive(Debug, Clone, Default)]
pub struct NewArgs {
    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Framework target
    pub framework: Option<Framework>,

    /// Template mode (full, minimal, manual)
    pub template: Option<Mode>,

    /// Initial theme
    pub theme: Option<Theme>,

    /// Explicit component selection (implies manual mode)
    pub components: Option<Vec<String>>,

    /// Local directory to use for the asset bundle instead of fetching
    pub bundle_dir: Option<PathBuf>,

    /// Package manager to install dependencies with
    pub package_manager: Option<PackageManager>,

    /// Skip the dependency install step
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Arguments for the `add` command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Components to add; empty means pick interactively
    pub components: Vec<String>,

    /// Project directory (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Local directory to use for the asset bundle instead of fetching
    pub bundle_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Terminal-backed [`Prompter`] for interactive runs
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn select(&mut self, prompt: &str, options: &[&str]) -> Result<usize> {
        let mut select = cliclack::select(prompt);
        for (idx, option) in options.iter().enumerate() {
            select = select.item(idx, *option, "");
        }
        Ok(select.interact()?)
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        options: &[&'static str],
        preselected: &[&'static str],
    ) -> Result<Vec<&'static str>> {
        let mut multi = cliclack::multiselect(prompt);
        for option in options {
            multi = multi.item(*option, *option, "");
        }
        let selected = multi
            .initial_values(preselected.to_vec())
            .required(false)
            .interact()?;
        Ok(selected)
    }
}

/// Scaffold a new project with interactive prompts
pub async fn run_new(args: NewArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("Rizzo CSS")?;

    // Step 1: Set up the bundle fetcher
    let mut fetcher = setup_fetcher(&args.bundle_dir)?;

    // Step 2: Resolve the framework target
    let framework = resolve_framework(&args)?;

    // Step 3: Load the framework's bundle manifest
    let manifest = load_framework_manifest(&mut fetcher, framework, cli_version).await?;

    // Step 4: Resolve the project directory
    let project_dir = select_directory(args.directory.as_deref(), args.yes)?;

    // Step 5: Resolve mode, theme, and any explicit component selection
    let (mode, requested) = resolve_selection(framework, &args)?;
    let theme = resolve_theme(&args)?;

    // Step 6: Plan the scaffold (expansion happens here)
    let plan = plan::plan_scaffold(
        framework,
        mode,
        requested.as_deref(),
        theme,
        &project_dir,
        &mut CliclackPrompter,
    )?;

    if let Some(line) = plan::report_added_dependencies(&plan.expansion(), framework) {
        cliclack::log::info(line)?;
    }

    // Step 7: Copy the planned files
    create_project(&mut fetcher, &plan, &manifest).await?;

    // Step 8: Install dependencies for the component frameworks
    let (package_manager, installed) = handle_install(&args, framework, &project_dir).await?;

    // Step 9: Show next steps
    print_next_steps(framework, &project_dir, package_manager, installed)?;

    Ok(())
}

/// Add components to an existing project
pub async fn run_add(args: AddArgs, cli_version: &str) -> Result<()> {
    // Non-interactive mode cannot open the component picker
    if args.yes && args.components.is_empty() {
        anyhow::bail!(
            "No components named. --yes skips the picker, so pass them directly, \
             e.g. `rizzo-css add --yes navbar toast`."
        );
    }

    cliclack::intro("Rizzo CSS")?;

    let project_dir = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let mut marker = ProjectMarker::load(&project_dir).await?;
    let framework = marker.framework;
    cliclack::log::info(format!(
        "{} project in {}",
        framework.display_name(),
        project_dir.display()
    ))?;

    let mut fetcher = setup_fetcher(&args.bundle_dir)?;
    let manifest = load_framework_manifest(&mut fetcher, framework, cli_version).await?;

    // Resolve the component request: positional names are validated, each
    // invalid one reported and dropped; no names means pick interactively.
    let requested = if args.components.is_empty() {
        let installed: Vec<String> = marker.components.clone();
        let available: Vec<&'static str> = crate::catalog::components(framework)
            .iter()
            .copied()
            .filter(|name| !installed.iter().any(|c| c == name))
            .collect();
        if available.is_empty() {
            cliclack::outro("Every component is already installed.")?;
            return Ok(());
        }
        CliclackPrompter.multi_select("Select components to add", &available, &[])?
    } else {
        let (valid, rejected) = expand::validate_components(framework, &args.components);
        for name in &rejected {
            cliclack::log::warning(format!(
                "Unknown component '{}' for {} (dropped)",
                name,
                framework.display_name()
            ))?;
        }
        if valid.is_empty() {
            anyhow::bail!("No valid components in the request.");
        }
        valid
    };

    if requested.is_empty() {
        cliclack::outro("Nothing selected.")?;
        return Ok(());
    }

    // The add flow always expands, including for the plain HTML target
    let expansion = expand::expand_with_dependencies(framework, &requested);
    if let Some(line) = plan::report_added_dependencies(&expansion, framework) {
        cliclack::log::info(line)?;
    }

    let to_install = marker.missing(&expansion.final_components);
    if to_install.is_empty() {
        cliclack::outro("Everything requested is already installed.")?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Adding components...");
    let replacements = [("theme", marker.theme.as_str().to_string())];
    let copied = copier::copy_components(
        &mut fetcher,
        framework,
        &manifest,
        &project_dir,
        &to_install,
        &replacements,
        false,
    )
    .await?;
    spinner.stop(format!(
        "Added {} ({} files)",
        to_install.join(", "),
        copied.len()
    ));

    marker.record_components(&to_install);
    marker.save(&project_dir).await?;

    cliclack::outro("Done!")?;

    Ok(())
}

fn setup_fetcher(bundle_dir: &Option<PathBuf>) -> Result<BundleFetcher> {
    let fetcher = match bundle_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local bundle from {}", path.display()))?;
            BundleFetcher::from_local(path.clone())
        }
        None => BundleFetcher::from_env()?,
    };

    Ok(fetcher)
}

fn resolve_framework(args: &NewArgs) -> Result<Framework> {
    if let Some(framework) = args.framework {
        cliclack::log::info(format!("Framework: {}", framework.display_name()))?;
        return Ok(framework);
    }

    if args.yes {
        // Non-interactive default
        return Ok(Framework::Html);
    }

    let selected: Framework = cliclack::select("Which framework are you targeting?")
        .item(Framework::Html, "Plain HTML", "standalone markup fragments")
        .item(Framework::Svelte, "Svelte", "SvelteKit-ready components")
        .item(Framework::Astro, "Astro", "Astro components")
        .interact()?;

    Ok(selected)
}

async fn load_framework_manifest(
    fetcher: &mut BundleFetcher,
    framework: Framework,
    cli_version: &str,
) -> Result<FrameworkManifest> {
    let spinner = cliclack::spinner();
    spinner.start("Loading asset bundle...");

    let root_manifest = fetcher.fetch_root_manifest().await?;
    if !root_manifest
        .frameworks
        .iter()
        .any(|f| f == framework.as_str())
    {
        spinner.stop("Failed to load asset bundle");
        let available = root_manifest.frameworks.join(", ");
        anyhow::bail!(
            "This bundle does not ship '{}' assets. Available: {}",
            framework.as_str(),
            available
        );
    }

    let manifest = fetcher.fetch_framework_manifest(framework.as_str()).await?;
    spinner.stop(format!("{} - {}", manifest.name, manifest.description));

    if let Some(warning) = version::check_compatibility(cli_version, &manifest.version) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    Ok(manifest)
}

fn select_directory(directory: Option<&std::path::Path>, yes: bool) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = if let Some(dir) = directory {
        let p = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != std::path::Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                let confirm = if yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

/// Resolve (mode, explicit components). An explicit `--components` list
/// implies manual mode; invalid names are each reported and dropped.
fn resolve_selection(
    framework: Framework,
    args: &NewArgs,
) -> Result<(Mode, Option<Vec<&'static str>>)> {
    if let Some(names) = &args.components {
        let (valid, rejected) = expand::validate_components(framework, names);
        for name in &rejected {
            cliclack::log::warning(format!(
                "Unknown component '{}' for {} (dropped)",
                name,
                framework.display_name()
            ))?;
        }
        if valid.is_empty() {
            anyhow::bail!("No valid components in the request.");
        }
        return Ok((Mode::Manual, Some(valid)));
    }

    if let Some(mode) = args.template {
        return Ok((mode, None));
    }

    if args.yes {
        return Ok((Mode::Full, None));
    }

    let mode: Mode = cliclack::select("Which template?")
        .item(Mode::Full, "Full", "every component")
        .item(Mode::Minimal, "Minimal", "the recommended subset")
        .item(Mode::Manual, "Manual", "pick components yourself")
        .interact()?;

    Ok((mode, None))
}

fn resolve_theme(args: &NewArgs) -> Result<Theme> {
    if let Some(theme) = args.theme {
        return Ok(theme);
    }

    if args.yes {
        return Ok(Theme::Default);
    }

    let theme: Theme = cliclack::select("Initial theme")
        .item(Theme::Default, "Default", "follows the system preference")
        .item(Theme::DefaultDark, "Default dark", "")
        .item(Theme::DefaultLight, "Default light", "")
        .interact()?;

    Ok(theme)
}

async fn create_project(
    fetcher: &mut BundleFetcher,
    plan: &ScaffoldManifest,
    manifest: &FrameworkManifest,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let project_name = plan
        .target_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "rizzo-app".to_string());
    let replacements = [
        ("project_name", project_name),
        ("theme", plan.theme.as_str().to_string()),
    ];

    let copied = copier::copy_components(
        fetcher,
        plan.framework,
        manifest,
        &plan.target_dir,
        &plan.components,
        &replacements,
        true,
    )
    .await?;

    ProjectMarker::new(plan.framework, plan.theme, &plan.components)
        .save(&plan.target_dir)
        .await?;

    spinner.stop(format!(
        "Created {} files in {}",
        copied.len() + 1,
        plan.target_dir.display()
    ));

    Ok(())
}

/// Returns the package manager in play and whether dependencies actually
/// got installed, so the next-steps list can fill the gap.
async fn handle_install(
    args: &NewArgs,
    framework: Framework,
    project_dir: &std::path::Path,
) -> Result<(Option<PackageManager>, bool)> {
    if !framework.uses_package_manager() || args.skip_install {
        return Ok((args.package_manager, false));
    }

    let pm = match args.package_manager {
        Some(pm) => pm,
        None => match runtime::detect_package_manager() {
            Some(pm) => pm,
            None => {
                cliclack::log::warning(
                    "No package manager found (tried pnpm, bun, yarn, npm); skipping install",
                )?;
                return Ok((None, false));
            }
        },
    };

    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm(format!("Install dependencies with {}?", pm))
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        return Ok((Some(pm), false));
    }

    cliclack::log::info(format!("Running {}", pm.install_command()))?;
    match runtime::install_dependencies(pm, project_dir).await {
        Ok(()) => {
            cliclack::log::success("Dependencies installed")?;
            Ok((Some(pm), true))
        }
        Err(e) => {
            cliclack::log::error(format!("{}", e))?;
            Ok((Some(pm), false))
        }
    }
}

fn print_next_steps(
    framework: Framework,
    project_dir: &std::path::Path,
    package_manager: Option<PackageManager>,
    installed: bool,
) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }

    match framework {
        Framework::Html => {
            steps.push("Open index.html in your browser".to_string());
        }
        Framework::Svelte | Framework::Astro => {
            let pm = package_manager.unwrap_or(PackageManager::Npm);
            if !installed {
                steps.push(pm.install_command());
            }
            steps.push(pm.run_dev_command());
        }
    }

    steps.push(format!("Docs: {}", crate::DOCS_URL));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy styling!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_yes_without_names_fails_fast() {
        let args = AddArgs {
            yes: true,
            ..AddArgs::default()
        };
        let err = run_add(args, "0.4.0").await.unwrap_err();
        assert!(err.to_string().contains("No components named"));
    }

    #[tokio::test]
    async fn test_add_yes_with_names_gets_past_the_picker_guard() {
        // Fails later (no project marker in the directory), not on the guard
        let args = AddArgs {
            components: vec!["navbar".to_string()],
            directory: Some(PathBuf::from("/nonexistent/rizzo-project")),
            yes: true,
            ..AddArgs::default()
        };
        let err = run_add(args, "0.4.0").await.unwrap_err();
        assert!(!err.to_string().contains("No components named"));
    }
}
