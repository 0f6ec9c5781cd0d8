//! Asset bundle manifest types and parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A file from the bundle root shared by every framework (licenses, token
/// sheets), with optional renaming on the way in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedFile {
    /// Source path relative to the bundle root
    pub source: String,

    /// Destination path in the project (defaults to source if not specified)
    #[serde(default)]
    pub dest: Option<String>,
}

impl SharedFile {
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

/// Root bundle manifest (`bundle.yaml`)
/// Lists the framework directories the bundle carries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// Bundle release version (semver)
    pub version: String,

    /// Framework directory names available in this bundle
    pub frameworks: Vec<String>,

    /// Files from the bundle root to include in every scaffold
    #[serde(default)]
    pub shared_files: Vec<SharedFile>,
}

/// Per-framework manifest (`<framework>/bundle.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkManifest {
    /// Display name of the framework target
    pub name: String,

    /// Description shown in the framework picker
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Files copied into every project regardless of component selection
    /// (reset stylesheet, design tokens, theme files)
    #[serde(default)]
    pub base: Vec<String>,

    /// Component slug -> files that materialize it. BTreeMap keeps the copy
    /// order deterministic.
    #[serde(default)]
    pub components: BTreeMap<String, Vec<String>>,
}

impl FrameworkManifest {
    /// Every file needed for the given component slugs: base files first,
    /// then per-component files in selection order, deduplicated. Slugs the
    /// bundle does not carry are skipped; the planner validated names
    /// already, so a miss means the bundle predates the catalog entry.
    pub fn files_for(&self, slugs: &[&str]) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        for file in &self.base {
            if !files.contains(file) {
                files.push(file.clone());
            }
        }
        for slug in slugs {
            if let Some(component_files) = self.components.get(*slug) {
                for file in component_files {
                    if !files.contains(file) {
                        files.push(file.clone());
                    }
                }
            }
        }
        files
    }

    /// Slugs requested but absent from this bundle
    pub fn missing_slugs<'a>(&self, slugs: &[&'a str]) -> Vec<&'a str> {
        slugs
            .iter()
            .filter(|slug| !self.components.contains_key(**slug))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manifest() -> FrameworkManifest {
        serde_yaml::from_str(
            r#"
name: Svelte
description: Components for Svelte and SvelteKit apps
version: 0.4.0
base:
  - css/rizzo.css
  - css/themes/default.css
components:
  button:
    - components/Button.svelte
    - css/components/button.css
  navbar:
    - components/Navbar.svelte
    - css/components/navbar.css
    - css/components/button.css
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_files_for_includes_base_then_components() {
        let manifest = test_manifest();
        let files = manifest.files_for(&["button"]);
        assert_eq!(
            files,
            vec![
                "css/rizzo.css",
                "css/themes/default.css",
                "components/Button.svelte",
                "css/components/button.css",
            ]
        );
    }

    #[test]
    fn test_files_for_deduplicates_shared_stylesheets() {
        let manifest = test_manifest();
        let files = manifest.files_for(&["button", "navbar"]);
        let button_css = files
            .iter()
            .filter(|f| f.as_str() == "css/components/button.css")
            .count();
        assert_eq!(button_css, 1);
    }

    #[test]
    fn test_files_for_skips_unknown_slugs() {
        let manifest = test_manifest();
        let files = manifest.files_for(&["carousel"]);
        assert_eq!(files.len(), manifest.base.len());
        assert_eq!(manifest.missing_slugs(&["button", "carousel"]), vec!["carousel"]);
    }

    #[test]
    fn test_root_manifest_parses_with_defaults() {
        let root: RootManifest = serde_yaml::from_str(
            r#"
version: 0.4.0
frameworks: [html, svelte, astro]
"#,
        )
        .unwrap();
        assert_eq!(root.frameworks.len(), 3);
        assert!(root.shared_files.is_empty());
    }
}
