//! Transitive dependency expansion over the component catalog
//!
//! Given a requested component set, compute everything those components need
//! to function. The traversal is an explicit worklist with a visited set, so
//! it terminates regardless of table shape and never iterates a collection
//! it is mutating.

use crate::catalog::{self, Framework};
use std::collections::HashSet;
use std::collections::VecDeque;

/// Outcome of expanding a requested component set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionResult {
    /// Requested names first, in their original order, then every implicitly
    /// added dependency in discovery order. Each name appears exactly once.
    pub final_components: Vec<&'static str>,

    /// Names present in `final_components` that were not requested
    pub added_components: Vec<&'static str>,
}

impl ExpansionResult {
    pub fn added_anything(&self) -> bool {
        !self.added_components.is_empty()
    }
}

/// Expand `requested` to the full set needed for every selected component to
/// function. Requested duplicates are collapsed, keeping the first position.
pub fn expand_with_dependencies(framework: Framework, requested: &[&'static str]) -> ExpansionResult {
    debug_assert!(catalog::verify_acyclic(framework).is_ok());

    let mut seen: HashSet<&'static str> = HashSet::with_capacity(requested.len());
    let mut final_components: Vec<&'static str> = Vec::with_capacity(requested.len());

    for &name in requested {
        if seen.insert(name) {
            final_components.push(name);
        }
    }

    let mut queue: VecDeque<&'static str> = final_components.iter().copied().collect();
    let mut added_components = Vec::new();

    while let Some(name) = queue.pop_front() {
        for &dep in catalog::dependencies_of(framework, name) {
            if seen.insert(dep) {
                final_components.push(dep);
                added_components.push(dep);
                queue.push_back(dep);
            }
        }
    }

    ExpansionResult {
        final_components,
        added_components,
    }
}

/// Split user-supplied names into canonical catalog entries and rejects.
/// Rejected names are reported by the caller and dropped, never an error.
pub fn validate_components(framework: Framework, names: &[String]) -> (Vec<&'static str>, Vec<String>) {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();

    for name in names {
        match catalog::canonical(framework, name) {
            Some(canonical) if !valid.contains(&canonical) => valid.push(canonical),
            Some(_) => {} // duplicate of an earlier valid name
            None => rejected.push(name.clone()),
        }
    }

    (valid, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Framework;

    const FW: Framework = Framework::Svelte;

    #[test]
    fn test_navbar_pulls_its_transitive_dependencies() {
        let result = expand_with_dependencies(FW, &["navbar"]);
        assert_eq!(
            result.final_components,
            vec!["navbar", "search", "settings", "theme-switcher"]
        );
        assert_eq!(
            result.added_components,
            vec!["search", "settings", "theme-switcher"]
        );
    }

    #[test]
    fn test_unrelated_selections_do_not_duplicate() {
        let result = expand_with_dependencies(FW, &["toast", "settings"]);
        assert_eq!(
            result.final_components,
            vec!["toast", "settings", "alert", "theme-switcher"]
        );
        assert_eq!(result.added_components, vec!["alert", "theme-switcher"]);
    }

    #[test]
    fn test_empty_request_yields_empty_result() {
        let result = expand_with_dependencies(FW, &[]);
        assert!(result.final_components.is_empty());
        assert!(result.added_components.is_empty());
        assert!(!result.added_anything());
    }

    #[test]
    fn test_leaf_components_pass_through_unchanged() {
        let result = expand_with_dependencies(FW, &["button", "badge"]);
        assert_eq!(result.final_components, vec!["button", "badge"]);
        assert!(result.added_components.is_empty());
    }

    #[test]
    fn test_diamond_dependency_appears_once() {
        // dialog and dropdown both require button
        let result = expand_with_dependencies(FW, &["dialog", "dropdown"]);
        let buttons = result
            .final_components
            .iter()
            .filter(|name| **name == "button")
            .count();
        assert_eq!(buttons, 1);
        assert_eq!(result.added_components, vec!["button"]);
    }

    #[test]
    fn test_requested_dependency_is_not_reported_as_added() {
        // settings is requested and also a dependency of navbar
        let result = expand_with_dependencies(FW, &["navbar", "settings"]);
        assert!(!result.added_components.contains(&"settings"));
        assert_eq!(
            result.final_components,
            vec!["navbar", "settings", "search", "theme-switcher"]
        );
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let once = expand_with_dependencies(FW, &["navbar", "toast", "dialog"]);
        let twice = expand_with_dependencies(FW, &once.final_components);
        assert_eq!(twice.final_components, once.final_components);
        assert!(twice.added_components.is_empty());
    }

    #[test]
    fn test_result_is_a_superset_with_stable_prefix() {
        let requested = ["card", "sidebar", "pagination"];
        let result = expand_with_dependencies(FW, &requested);
        assert_eq!(&result.final_components[..requested.len()], &requested);
        for name in &requested {
            assert!(result.final_components.contains(name));
        }
    }

    #[test]
    fn test_no_duplicates_for_any_selection() {
        let result = expand_with_dependencies(FW, &["navbar", "sidebar", "toast", "dialog"]);
        let mut unique = result.final_components.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), result.final_components.len());
    }

    #[test]
    fn test_added_equals_final_minus_requested() {
        let requested = ["navbar", "toast"];
        let result = expand_with_dependencies(FW, &requested);
        for name in &result.added_components {
            assert!(result.final_components.contains(name));
            assert!(!requested.contains(name));
        }
        assert_eq!(
            result.final_components.len(),
            requested.len() + result.added_components.len()
        );
    }

    #[test]
    fn test_full_catalog_expansion_is_a_noop() {
        for framework in Framework::ALL {
            let catalog = crate::catalog::components(*framework);
            let result = expand_with_dependencies(*framework, catalog);
            assert_eq!(result.final_components, catalog);
            assert!(result.added_components.is_empty());
        }
    }

    #[test]
    fn test_duplicate_requests_collapse_to_first_position() {
        let result = expand_with_dependencies(FW, &["button", "card", "button"]);
        assert_eq!(result.final_components, vec!["button", "card"]);
    }

    #[test]
    fn test_html_table_expands_in_add_flow() {
        let result = expand_with_dependencies(Framework::Html, &["navbar"]);
        assert_eq!(
            result.final_components,
            vec!["navbar", "search", "settings", "theme-switcher"]
        );
    }

    #[test]
    fn test_validate_components_drops_unknown_names() {
        let input = vec![
            "Navbar".to_string(),
            "carousel".to_string(),
            "button".to_string(),
            "BUTTON".to_string(),
        ];
        let (valid, rejected) = validate_components(FW, &input);
        assert_eq!(valid, vec!["navbar", "button"]);
        assert_eq!(rejected, vec!["carousel".to_string()]);
    }
}
