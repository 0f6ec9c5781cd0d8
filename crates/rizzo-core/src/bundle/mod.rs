//! Asset bundle fetching, parsing, and copying
//!
//! This module provides:
//! - Bundle manifest types (RootManifest, FrameworkManifest)
//! - Bundle fetching from remote URLs or local checkouts
//! - Component file copying with token substitution
//! - Version compatibility checking

pub mod copier;
pub mod fetcher;
pub mod manifest;
pub mod version;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

pub use copier::copy_components;
pub use fetcher::{BundleFetcher, BundleSource};
pub use manifest::{FrameworkManifest, RootManifest, SharedFile};
pub use version::check_compatibility;

/// Build distributable zip files for every framework in a bundle directory
pub async fn build_bundle(bundle_dir: &Option<PathBuf>) -> Result<()> {
    let dir = bundle_dir.clone().unwrap_or_else(|| PathBuf::from("bundle"));

    if !dir.exists() {
        anyhow::bail!("Bundle directory not found: {}", dir.display());
    }

    let manifest_path = dir.join("bundle.yaml");
    if !manifest_path.exists() {
        anyhow::bail!("Root bundle.yaml not found in {}", dir.display());
    }

    let manifest_content = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let root_manifest: manifest::RootManifest =
        serde_yaml::from_str(&manifest_content).context("Failed to parse root bundle.yaml")?;

    println!(
        "{}",
        format!("Building {} framework bundles...", root_manifest.frameworks.len())
            .cyan()
            .bold()
    );
    println!();

    let mut built = 0;
    for framework_name in &root_manifest.frameworks {
        let framework_path = dir.join(framework_name);
        if !framework_path.exists() {
            eprintln!(
                "{} Framework directory not found: {}",
                "Warning:".yellow(),
                framework_path.display()
            );
            continue;
        }

        print!("  {} {}...", "->".blue(), framework_name);

        match fetcher::BundleFetcher::build_local_zip(
            &dir,
            framework_name,
            &root_manifest.shared_files,
        ) {
            Ok(zip_bytes) => {
                let zip_path = dir.join(format!("{}.zip", framework_name));
                std::fs::write(&zip_path, &zip_bytes)
                    .with_context(|| format!("Failed to write {}", zip_path.display()))?;
                println!(" {} ({} bytes)", "done".green(), zip_bytes.len());
                built += 1;
            }
            Err(e) => {
                println!(" {}", "failed".red());
                eprintln!("    Error: {}", e);
            }
        }
    }

    println!();
    println!(
        "{} {} framework bundle(s) in {}",
        "Built".green().bold(),
        built,
        dir.display()
    );

    Ok(())
}
