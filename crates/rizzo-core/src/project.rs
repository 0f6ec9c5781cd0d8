//! Project marker file (`rizzo.yaml`)
//!
//! Written at the root of every scaffolded project so the `add` flow can
//! recover the framework, theme, and already-installed components without
//! asking again.

use crate::catalog::{Framework, Theme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

pub const MARKER_FILE: &str = "rizzo.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMarker {
    pub framework: Framework,
    pub theme: Theme,
    /// Stylesheet directory relative to the project root
    pub css_dir: String,
    /// Installed components, in install order
    pub components: Vec<String>,
}

impl ProjectMarker {
    pub fn new(framework: Framework, theme: Theme, components: &[&str]) -> Self {
        Self {
            framework,
            theme,
            css_dir: framework.css_dir().to_string(),
            components: components.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load the marker from a project directory
    pub async fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(MARKER_FILE);
        let content = fs::read_to_string(&path).await.with_context(|| {
            format!(
                "No {} found in {} (not a Rizzo project? run `rizzo-css new` first)",
                MARKER_FILE,
                project_dir.display()
            )
        })?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the marker into a project directory
    pub async fn save(&self, project_dir: &Path) -> Result<()> {
        let path = project_dir.join(MARKER_FILE);
        let content = serde_yaml::to_string(self).context("Failed to serialize project marker")?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Record newly installed components, skipping ones already present
    pub fn record_components(&mut self, names: &[&str]) {
        for name in names {
            if !self.components.iter().any(|c| c == name) {
                self.components.push(name.to_string());
            }
        }
    }

    /// Components from `names` that are not installed yet
    pub fn missing<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .copied()
            .filter(|name| !self.components.iter().any(|c| c == name))
            .collect()
    }
}
