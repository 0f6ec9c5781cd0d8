//! Materializing planned components into a project directory

use crate::bundle::fetcher::BundleFetcher;
use crate::bundle::manifest::FrameworkManifest;
use crate::catalog::{self, Framework};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Token substitutions applied to text files on the way in, e.g.
/// `("project_name", "my-app")` rewrites every `{{project_name}}`
pub type Replacements<'a> = &'a [(&'a str, String)];

/// Bundle lookup keys for a component selection. The plain HTML target keys
/// its standalone fragments by slug; the component frameworks use the
/// catalog names directly.
pub fn bundle_slugs<'a>(framework: Framework, components: &[&'a str]) -> Vec<&'a str> {
    match framework {
        Framework::Html => components.iter().map(|&c| catalog::html_slug(c)).collect(),
        Framework::Svelte | Framework::Astro => components.to_vec(),
    }
}

/// Copy the files for a component selection into the target directory.
/// `include_base` controls whether the always-present files (reset, tokens,
/// themes) come along; the `add` flow sets it to false since the project
/// already has them.
pub async fn copy_components(
    fetcher: &mut BundleFetcher,
    framework: Framework,
    manifest: &FrameworkManifest,
    target_dir: &Path,
    components: &[&str],
    replacements: Replacements<'_>,
    include_base: bool,
) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let slugs = bundle_slugs(framework, components);
    let files = if include_base {
        manifest.files_for(&slugs)
    } else {
        let mut only_components = manifest.clone();
        only_components.base.clear();
        only_components.files_for(&slugs)
    };

    let mut copied_files = Vec::new();

    for file_path in &files {
        let target_path = target_dir.join(file_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = fetcher
            .fetch_file_bytes(framework.as_str(), file_path)
            .await?;
        let content = apply_replacements(content, replacements);
        fs::write(&target_path, &content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        copied_files.push(file_path.clone());
    }

    Ok(copied_files)
}

/// Substitute `{{token}}` placeholders. Binary files (anything that is not
/// valid UTF-8) pass through untouched.
fn apply_replacements(content: Vec<u8>, replacements: Replacements<'_>) -> Vec<u8> {
    if replacements.is_empty() {
        return content;
    }
    match String::from_utf8(content) {
        Ok(mut text) => {
            for (token, value) in replacements {
                let needle = format!("{{{{{}}}}}", token);
                if text.contains(&needle) {
                    text = text.replace(&needle, value);
                }
            }
            text.into_bytes()
        }
        Err(err) => err.into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replacements_substitutes_tokens() {
        let content = b"# {{project_name}}\ntheme: {{theme}}\n".to_vec();
        let replacements = [
            ("project_name", "my-app".to_string()),
            ("theme", "default-dark".to_string()),
        ];
        let result = apply_replacements(content, &replacements);
        assert_eq!(result, b"# my-app\ntheme: default-dark\n".to_vec());
    }

    #[test]
    fn test_apply_replacements_leaves_unknown_tokens() {
        let content = b"{{project_name}} {{other}}".to_vec();
        let replacements = [("project_name", "x".to_string())];
        let result = apply_replacements(content, &replacements);
        assert_eq!(result, b"x {{other}}".to_vec());
    }

    #[test]
    fn test_apply_replacements_passes_binary_through() {
        let content = vec![0xff, 0xfe, 0x00, 0x7b];
        let replacements = [("project_name", "x".to_string())];
        assert_eq!(
            apply_replacements(content.clone(), &replacements),
            content
        );
    }

    #[test]
    fn test_bundle_slugs_map_html_names() {
        let slugs = bundle_slugs(Framework::Html, &["navbar", "button", "theme-switcher"]);
        assert_eq!(slugs, vec!["site-nav", "button", "theme-toggle"]);
    }

    #[test]
    fn test_bundle_slugs_are_identity_for_component_frameworks() {
        let slugs = bundle_slugs(Framework::Svelte, &["navbar", "theme-switcher"]);
        assert_eq!(slugs, vec!["navbar", "theme-switcher"]);
    }

    #[test]
    fn test_bundle_slugs_outlive_the_selection_slice() {
        let selection = vec!["navbar", "button"];
        let slugs = {
            let view: &[&str] = &selection;
            bundle_slugs(Framework::Html, view)
        };
        assert_eq!(slugs, vec!["site-nav", "button"]);
    }
}
