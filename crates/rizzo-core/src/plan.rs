//! Scaffold planning
//!
//! Composes the template selector and the closure expander into the final
//! manifest the file-copy layer consumes. Planning itself performs no I/O;
//! every interactive choice comes in through the [`Prompter`] seam.

use crate::catalog::{self, Framework, Mode, Theme};
use crate::expand::{self, ExpansionResult};
use crate::select::{self, Prompter};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Fully resolved plan for a single scaffold run. Built once, handed to the
/// copier, then discarded.
#[derive(Debug, Clone)]
pub struct ScaffoldManifest {
    pub framework: Framework,
    pub mode: Mode,
    pub theme: Theme,
    /// Components to materialize: base selection first, then implicit
    /// dependencies in discovery order
    pub components: Vec<&'static str>,
    /// Components present only because something required them
    pub added_components: Vec<&'static str>,
    pub target_dir: PathBuf,
    pub css_target_path: PathBuf,
}

/// Build the manifest for a scaffold run.
///
/// `requested` overrides the mode's base selection when given (the CLI
/// `--components` path); otherwise the selector resolves the base, prompting
/// for manual mode. Expansion always runs for the component frameworks; the
/// plain HTML full scaffold already contains everything, so it skips it.
pub fn plan_scaffold<P: Prompter>(
    framework: Framework,
    mode: Mode,
    requested: Option<&[&'static str]>,
    theme: Theme,
    target_dir: &Path,
    prompter: &mut P,
) -> Result<ScaffoldManifest> {
    let base = match requested {
        Some(names) => names.to_vec(),
        None => select::base_components(framework, mode, prompter)?,
    };

    let skip_expansion = framework == Framework::Html && mode == Mode::Full && requested.is_none();

    let (components, added_components) = if skip_expansion {
        (base, Vec::new())
    } else {
        let result = expand::expand_with_dependencies(framework, &base);
        (result.final_components, result.added_components)
    };

    Ok(ScaffoldManifest {
        framework,
        mode,
        theme,
        components,
        added_components,
        target_dir: target_dir.to_path_buf(),
        css_target_path: target_dir.join(framework.css_dir()),
    })
}

impl ScaffoldManifest {
    /// Expansion view of the manifest, for the added-dependency report
    pub fn expansion(&self) -> ExpansionResult {
        ExpansionResult {
            final_components: self.components.clone(),
            added_components: self.added_components.clone(),
        }
    }
}

/// One consolidated, human-readable line describing which components were
/// pulled in implicitly, grouped by the component that required them.
/// Returns `None` when nothing was added. Pure formatting, no state.
pub fn report_added_dependencies(result: &ExpansionResult, framework: Framework) -> Option<String> {
    if !result.added_anything() {
        return None;
    }

    // parent -> the added components it is (first) responsible for
    let mut groups: Vec<(&'static str, Vec<&'static str>)> = Vec::new();

    for &added in &result.added_components {
        let parent = result
            .final_components
            .iter()
            .copied()
            .find(|&name| catalog::dependencies_of(framework, name).contains(&added))
            .unwrap_or(added);

        match groups.iter_mut().find(|(p, _)| *p == parent) {
            Some((_, members)) => members.push(added),
            None => groups.push((parent, vec![added])),
        }
    }

    let parts: Vec<String> = groups
        .iter()
        .map(|(parent, members)| format!("{} (required by {})", members.join(", "), parent))
        .collect();

    Some(format!("Also including {}", parts.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::expand_with_dependencies;
    use crate::select::test_support::FakePrompter;

    fn plan(
        framework: Framework,
        mode: Mode,
        requested: Option<&[&'static str]>,
    ) -> ScaffoldManifest {
        let mut prompter = FakePrompter::picking(&["card", "navbar"]);
        plan_scaffold(
            framework,
            mode,
            requested,
            Theme::Default,
            Path::new("my-app"),
            &mut prompter,
        )
        .unwrap()
    }

    #[test]
    fn test_full_svelte_plan_covers_the_catalog() {
        let manifest = plan(Framework::Svelte, Mode::Full, None);
        assert_eq!(
            manifest.components,
            catalog::components(Framework::Svelte)
        );
        assert!(manifest.added_components.is_empty());
        assert_eq!(manifest.css_target_path, Path::new("my-app/src/lib/styles"));
    }

    #[test]
    fn test_minimal_plan_expands_the_recommended_subset() {
        let manifest = plan(Framework::Astro, Mode::Minimal, None);
        // recommended already contains every dependency it needs
        assert_eq!(
            manifest.components.len(),
            catalog::recommended(Framework::Astro).len() + manifest.added_components.len()
        );
        for name in catalog::recommended(Framework::Astro) {
            assert!(manifest.components.contains(&name));
        }
    }

    #[test]
    fn test_manual_plan_expands_the_picker_result() {
        let manifest = plan(Framework::Svelte, Mode::Manual, None);
        // picker returned card + navbar; navbar drags in its dependencies
        assert_eq!(
            manifest.components,
            vec!["card", "navbar", "search", "settings", "theme-switcher"]
        );
        assert_eq!(
            manifest.added_components,
            vec!["search", "settings", "theme-switcher"]
        );
    }

    #[test]
    fn test_explicit_components_override_the_mode() {
        let manifest = plan(Framework::Svelte, Mode::Minimal, Some(&["toast"]));
        assert_eq!(manifest.components, vec!["toast", "alert"]);
    }

    #[test]
    fn test_html_full_scaffold_skips_expansion() {
        let manifest = plan(Framework::Html, Mode::Full, None);
        assert_eq!(manifest.components, catalog::components(Framework::Html));
        assert!(manifest.added_components.is_empty());
    }

    #[test]
    fn test_html_add_flow_still_expands() {
        let manifest = plan(Framework::Html, Mode::Full, Some(&["navbar"]));
        assert_eq!(
            manifest.components,
            vec!["navbar", "search", "settings", "theme-switcher"]
        );
    }

    #[test]
    fn test_report_groups_by_requiring_parent() {
        let result = expand_with_dependencies(Framework::Svelte, &["navbar"]);
        let line = report_added_dependencies(&result, Framework::Svelte).unwrap();
        assert_eq!(
            line,
            "Also including search, settings (required by navbar); theme-switcher (required by settings)"
        );
    }

    #[test]
    fn test_report_is_silent_when_nothing_was_added() {
        let result = expand_with_dependencies(Framework::Svelte, &["button"]);
        assert!(report_added_dependencies(&result, Framework::Svelte).is_none());
    }
}
