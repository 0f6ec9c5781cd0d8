//! Base component selection per template mode
//!
//! Maps (framework, mode) to the component set that seeds dependency
//! expansion. Interactive choices go through the [`Prompter`] trait so the
//! planner never touches the terminal directly and tests can supply canned
//! answers.

use crate::catalog::{self, Framework, Mode};
use anyhow::Result;

/// Interactive prompt capability injected into the planner. The cliclack
/// implementation lives behind the `tui` feature.
pub trait Prompter {
    /// Pick one option; returns the index into `options`
    fn select(&mut self, prompt: &str, options: &[&str]) -> Result<usize>;

    /// Pick any number of options, starting from `preselected`
    fn multi_select(
        &mut self,
        prompt: &str,
        options: &[&'static str],
        preselected: &[&'static str],
    ) -> Result<Vec<&'static str>>;
}

/// Base component list for a framework and template mode, before expansion.
/// Assumes a valid enum pair; parsing/rejection happens at the CLI boundary.
pub fn base_components<P: Prompter>(
    framework: Framework,
    mode: Mode,
    prompter: &mut P,
) -> Result<Vec<&'static str>> {
    match mode {
        Mode::Full => Ok(catalog::components(framework).to_vec()),
        Mode::Minimal => Ok(catalog::recommended(framework)),
        Mode::Manual => prompter.multi_select(
            "Select components (dependencies are added automatically)",
            catalog::components(framework),
            &catalog::recommended(framework),
        ),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakePrompter;
    use super::*;

    #[test]
    fn test_full_mode_returns_whole_catalog() {
        let mut prompter = FakePrompter::picking(&[]);
        let base = base_components(Framework::Svelte, Mode::Full, &mut prompter).unwrap();
        assert_eq!(base, catalog::components(Framework::Svelte));
    }

    #[test]
    fn test_minimal_mode_returns_recommended_subset() {
        let mut prompter = FakePrompter::picking(&[]);
        let base = base_components(Framework::Astro, Mode::Minimal, &mut prompter).unwrap();
        assert_eq!(base, catalog::recommended(Framework::Astro));
        assert!(base.len() < catalog::components(Framework::Astro).len());
    }

    #[test]
    fn test_minimal_mode_respects_framework_availability() {
        // toast is recommended but not shipped for the HTML target
        let mut prompter = FakePrompter::picking(&[]);
        let base = base_components(Framework::Html, Mode::Minimal, &mut prompter).unwrap();
        assert!(!base.contains(&"toast"));
    }

    #[test]
    fn test_manual_mode_uses_the_prompter() {
        let mut prompter = FakePrompter::picking(&["button", "card"]);
        let base = base_components(Framework::Svelte, Mode::Manual, &mut prompter).unwrap();
        assert_eq!(base, vec!["button", "card"]);
    }

    #[test]
    fn test_manual_mode_preseeds_recommended() {
        let mut prompter = FakePrompter::picking(&["button"]);
        base_components(Framework::Svelte, Mode::Manual, &mut prompter).unwrap();
        assert_eq!(
            prompter.seen_preselected,
            catalog::recommended(Framework::Svelte)
        );
    }
}
