//! Static component catalog and dependency tables
//!
//! The catalog is fixed per release: which components each framework target
//! ships, which other components a component requires, the curated subset
//! used by the minimal template, and the name-to-slug table for the plain
//! HTML target. All of it is immutable constant data; nothing here performs
//! I/O or mutates state after process start.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scaffolding destination for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Html,
    Svelte,
    Astro,
}

impl Framework {
    pub const ALL: &'static [Framework] = &[Framework::Html, Framework::Svelte, Framework::Astro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Html => "html",
            Framework::Svelte => "svelte",
            Framework::Astro => "astro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Html => "Plain HTML",
            Framework::Svelte => "Svelte",
            Framework::Astro => "Astro",
        }
    }

    /// Directory (relative to the project root) where stylesheets land
    pub fn css_dir(&self) -> &'static str {
        match self {
            Framework::Html => "css",
            Framework::Svelte => "src/lib/styles",
            Framework::Astro => "src/styles",
        }
    }

    /// Directory (relative to the project root) where components land
    pub fn component_dir(&self) -> &'static str {
        match self {
            Framework::Html => "components",
            Framework::Svelte => "src/lib/components",
            Framework::Astro => "src/components",
        }
    }

    /// Whether projects for this target carry a package.json
    pub fn uses_package_manager(&self) -> bool {
        !matches!(self, Framework::Html)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "plain" | "plain-html" => Ok(Framework::Html),
            "svelte" => Ok(Framework::Svelte),
            "astro" => Ok(Framework::Astro),
            _ => Err(format!(
                "unknown framework '{}' (expected one of: html, svelte, astro)",
                s
            )),
        }
    }
}

/// How the base component set is chosen before dependency expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Everything the framework ships
    Full,
    /// The curated recommended subset
    Minimal,
    /// User-picked via the interactive selector
    Manual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Minimal => "minimal",
            Mode::Manual => "manual",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Mode::Full),
            "minimal" => Ok(Mode::Minimal),
            "manual" => Ok(Mode::Manual),
            _ => Err(format!(
                "unknown template '{}' (expected one of: full, minimal, manual)",
                s
            )),
        }
    }
}

/// Initial theme written into the scaffolded project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Default,
    DefaultDark,
    DefaultLight,
}

impl Theme {
    pub const ALL: &'static [Theme] = &[Theme::Default, Theme::DefaultDark, Theme::DefaultLight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::DefaultDark => "default-dark",
            Theme::DefaultLight => "default-light",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Default => "Default (follows system)",
            Theme::DefaultDark => "Default dark",
            Theme::DefaultLight => "Default light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Theme::Default),
            "default-dark" | "dark" => Ok(Theme::DefaultDark),
            "default-light" | "light" => Ok(Theme::DefaultLight),
            _ => Err(format!(
                "unknown theme '{}' (expected one of: default, default-dark, default-light)",
                s
            )),
        }
    }
}

/// Configuration-level defects in the static tables. These indicate a bug in
/// the catalog data, never a user mistake, so they propagate as hard errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dependency cycle in the {framework} component table involving: {names}")]
    CycleDetected { framework: Framework, names: String },

    #[error("'{name}' has a dependency entry but {framework} does not ship it")]
    UnknownParent {
        framework: Framework,
        name: &'static str,
    },

    #[error("'{dependency}' is listed as a dependency of '{parent}' but {framework} does not ship it")]
    DanglingDependency {
        framework: Framework,
        parent: &'static str,
        dependency: &'static str,
    },

    #[error("'{parent}' lists '{dependency}' as a dependency more than once ({framework})")]
    DuplicateDependency {
        framework: Framework,
        parent: &'static str,
        dependency: &'static str,
    },
}

const SVELTE_COMPONENTS: &[&str] = &[
    "accordion",
    "alert",
    "avatar",
    "badge",
    "breadcrumbs",
    "button",
    "card",
    "checkbox",
    "dialog",
    "dropdown",
    "footer",
    "input",
    "loader",
    "navbar",
    "pagination",
    "progress",
    "radio",
    "search",
    "select",
    "settings",
    "sidebar",
    "skeleton",
    "slider",
    "switch",
    "table",
    "tabs",
    "theme-switcher",
    "toast",
    "tooltip",
];

// The range slider depends on a client-side controller that has not been
// ported to Astro yet.
const ASTRO_COMPONENTS: &[&str] = &[
    "accordion",
    "alert",
    "avatar",
    "badge",
    "breadcrumbs",
    "button",
    "card",
    "checkbox",
    "dialog",
    "dropdown",
    "footer",
    "input",
    "loader",
    "navbar",
    "pagination",
    "progress",
    "radio",
    "search",
    "select",
    "settings",
    "sidebar",
    "skeleton",
    "switch",
    "table",
    "tabs",
    "theme-switcher",
    "toast",
    "tooltip",
];

// Toast and tooltip need script hooks the standalone markup fragments
// cannot provide, so the plain HTML target does not ship them.
const HTML_COMPONENTS: &[&str] = &[
    "accordion",
    "alert",
    "avatar",
    "badge",
    "breadcrumbs",
    "button",
    "card",
    "checkbox",
    "dialog",
    "dropdown",
    "footer",
    "input",
    "loader",
    "navbar",
    "pagination",
    "progress",
    "radio",
    "search",
    "select",
    "settings",
    "sidebar",
    "skeleton",
    "slider",
    "switch",
    "table",
    "tabs",
    "theme-switcher",
];

/// Immediate (non-transitive) requirements per component, Svelte target
const SVELTE_DEPS: &[(&str, &[&str])] = &[
    ("dialog", &["button"]),
    ("dropdown", &["button"]),
    ("navbar", &["search", "settings"]),
    ("pagination", &["button"]),
    ("settings", &["theme-switcher"]),
    ("sidebar", &["settings"]),
    ("toast", &["alert"]),
];

/// Immediate (non-transitive) requirements per component, Astro target
const ASTRO_DEPS: &[(&str, &[&str])] = &[
    ("dialog", &["button"]),
    ("dropdown", &["button"]),
    ("navbar", &["search", "settings"]),
    ("pagination", &["button"]),
    ("settings", &["theme-switcher"]),
    ("sidebar", &["settings"]),
    ("toast", &["alert"]),
];

/// The HTML fragments are standalone, so only the composite ones carry
/// requirements. Used by the `add` flow; the full scaffold ships everything.
const HTML_DEPS: &[(&str, &[&str])] = &[
    ("navbar", &["search", "settings"]),
    ("settings", &["theme-switcher"]),
    ("sidebar", &["settings"]),
];

/// Curated subset used by the minimal template and as the manual picker's
/// preselection. Covers every interactive behavior the design system has.
const RECOMMENDED: &[&str] = &[
    "alert",
    "button",
    "card",
    "input",
    "navbar",
    "search",
    "settings",
    "theme-switcher",
    "toast",
];

/// Name-to-slug exceptions for the plain HTML target. The markup fragments
/// predate the component naming scheme; anything not listed here uses its
/// component name as the slug.
const HTML_SLUGS: &[(&str, &str)] = &[
    ("breadcrumbs", "breadcrumb"),
    ("navbar", "site-nav"),
    ("theme-switcher", "theme-toggle"),
];

/// Full component catalog for a framework
pub fn components(framework: Framework) -> &'static [&'static str] {
    match framework {
        Framework::Html => HTML_COMPONENTS,
        Framework::Svelte => SVELTE_COMPONENTS,
        Framework::Astro => ASTRO_COMPONENTS,
    }
}

fn deps_table(framework: Framework) -> &'static [(&'static str, &'static [&'static str])] {
    match framework {
        Framework::Html => HTML_DEPS,
        Framework::Svelte => SVELTE_DEPS,
        Framework::Astro => ASTRO_DEPS,
    }
}

/// Immediate dependencies of a component. Unknown names yield an empty
/// slice; validation of names happens separately at the input boundary.
pub fn dependencies_of(framework: Framework, name: &str) -> &'static [&'static str] {
    deps_table(framework)
        .iter()
        .find(|(component, _)| *component == name)
        .map(|(_, deps)| *deps)
        .unwrap_or(&[])
}

/// Recommended subset intersected with what the framework actually ships
pub fn recommended(framework: Framework) -> Vec<&'static str> {
    let catalog = components(framework);
    RECOMMENDED
        .iter()
        .filter(|name| catalog.contains(name))
        .copied()
        .collect()
}

/// Resolve a user-supplied name to its canonical catalog entry
pub fn canonical(framework: Framework, input: &str) -> Option<&'static str> {
    let normalized = input.trim().to_lowercase();
    components(framework)
        .iter()
        .find(|name| **name == normalized)
        .copied()
}

/// File slug for a component in the plain HTML bundle
pub fn html_slug(name: &str) -> &str {
    HTML_SLUGS
        .iter()
        .find(|(component, _)| *component == name)
        .map(|(_, slug)| *slug)
        .unwrap_or(name)
}

/// Check the dependency table for dangling or duplicated entries
pub fn verify_table(framework: Framework) -> Result<(), CatalogError> {
    let catalog = components(framework);
    for &(parent, deps) in deps_table(framework) {
        if !catalog.contains(&parent) {
            return Err(CatalogError::UnknownParent { framework, name: parent });
        }
        for (i, &dep) in deps.iter().enumerate() {
            if !catalog.contains(&dep) {
                return Err(CatalogError::DanglingDependency {
                    framework,
                    parent,
                    dependency: dep,
                });
            }
            if deps[..i].contains(&dep) {
                return Err(CatalogError::DuplicateDependency {
                    framework,
                    parent,
                    dependency: dep,
                });
            }
        }
    }
    Ok(())
}

/// Check that the dependency graph has no cycles (Kahn's algorithm). Cycles
/// are a defect in the static data; the expander relies on this holding.
pub fn verify_acyclic(framework: Framework) -> Result<(), CatalogError> {
    let catalog = components(framework);
    let mut in_degree: Vec<usize> = vec![0; catalog.len()];
    let index_of = |name: &str| catalog.iter().position(|c| *c == name);

    for &(_, deps) in deps_table(framework) {
        for &dep in deps {
            if let Some(i) = index_of(dep) {
                in_degree[i] += 1;
            }
        }
    }

    let mut queue: Vec<usize> = (0..catalog.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut visited = 0;

    while let Some(i) = queue.pop() {
        visited += 1;
        for &dep in dependencies_of(framework, catalog[i]) {
            if let Some(j) = index_of(dep) {
                in_degree[j] -= 1;
                if in_degree[j] == 0 {
                    queue.push(j);
                }
            }
        }
    }

    if visited == catalog.len() {
        Ok(())
    } else {
        let stuck: Vec<&str> = catalog
            .iter()
            .enumerate()
            .filter(|(i, _)| in_degree[*i] > 0)
            .map(|(_, name)| *name)
            .collect();
        Err(CatalogError::CycleDetected {
            framework,
            names: stuck.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_no_dangling_or_duplicate_entries() {
        for framework in Framework::ALL {
            verify_table(*framework).unwrap();
        }
    }

    #[test]
    fn test_tables_are_acyclic() {
        for framework in Framework::ALL {
            verify_acyclic(*framework).unwrap();
        }
    }

    #[test]
    fn test_catalogs_are_sorted_and_unique() {
        for framework in Framework::ALL {
            let catalog = components(*framework);
            let mut sorted = catalog.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(catalog, sorted.as_slice(), "{} catalog", framework);
        }
    }

    #[test]
    fn test_recommended_intersects_with_catalog() {
        // toast is recommended but the HTML target does not ship it
        let html = recommended(Framework::Html);
        assert!(!html.contains(&"toast"));
        assert!(html.contains(&"navbar"));

        let svelte = recommended(Framework::Svelte);
        assert_eq!(svelte.len(), RECOMMENDED.len());
    }

    #[test]
    fn test_dependencies_of_unknown_name_is_empty() {
        assert!(dependencies_of(Framework::Svelte, "does-not-exist").is_empty());
        assert!(dependencies_of(Framework::Svelte, "button").is_empty());
    }

    #[test]
    fn test_dependencies_of_known_component() {
        assert_eq!(
            dependencies_of(Framework::Svelte, "navbar"),
            &["search", "settings"]
        );
        assert_eq!(
            dependencies_of(Framework::Html, "settings"),
            &["theme-switcher"]
        );
    }

    #[test]
    fn test_canonical_is_case_insensitive() {
        assert_eq!(canonical(Framework::Svelte, "Navbar"), Some("navbar"));
        assert_eq!(canonical(Framework::Svelte, " BUTTON "), Some("button"));
        assert_eq!(canonical(Framework::Svelte, "carousel"), None);
        // toast exists for Svelte but not for the HTML target
        assert_eq!(canonical(Framework::Html, "toast"), None);
    }

    #[test]
    fn test_html_slug_exceptions_and_fallback() {
        assert_eq!(html_slug("navbar"), "site-nav");
        assert_eq!(html_slug("theme-switcher"), "theme-toggle");
        assert_eq!(html_slug("button"), "button");
    }

    #[test]
    fn test_framework_round_trips_through_from_str() {
        for framework in Framework::ALL {
            assert_eq!(framework.as_str().parse::<Framework>().ok(), Some(*framework));
        }
        assert!("react".parse::<Framework>().is_err());
    }

    #[test]
    fn test_mode_and_theme_parsing() {
        assert_eq!("full".parse::<Mode>().ok(), Some(Mode::Full));
        assert_eq!("MANUAL".parse::<Mode>().ok(), Some(Mode::Manual));
        assert!("custom".parse::<Mode>().is_err());

        assert_eq!("dark".parse::<Theme>().ok(), Some(Theme::DefaultDark));
        assert_eq!(
            "default-light".parse::<Theme>().ok(),
            Some(Theme::DefaultLight)
        );
        assert!("solarized".parse::<Theme>().is_err());
    }
}
