//! Rizzo Core - library behind the `rizzo-css` scaffolding CLI
//!
//! Scaffolds new projects with the Rizzo CSS design system, or adds
//! components to existing ones, for three targets: plain HTML, Svelte, and
//! Astro.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure planning** - the component catalog, dependency
//!   expansion, template selection, and scaffold planning. No I/O; fully
//!   testable with a fake [`select::Prompter`].
//! - **Layer 2: Collaborators** - asset bundle fetching/copying, the
//!   project marker file, and package-manager probing.
//! - **Layer 3: CLI/TUI Interface** - cliclack-based prompt flows
//!   (feature-gated).
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flows
//!
//! # Example Usage (without TUI)
//!
//! ```
//! use rizzo_core::catalog::Framework;
//! use rizzo_core::expand;
//!
//! let result = expand::expand_with_dependencies(Framework::Svelte, &["navbar"]);
//! assert!(result.final_components.contains(&"theme-switcher"));
//! ```

pub mod bundle;
pub mod catalog;
pub mod expand;
pub mod plan;
pub mod project;
pub mod runtime;
pub mod select;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use bundle::{copy_components, BundleFetcher, BundleSource, FrameworkManifest, RootManifest};
pub use catalog::{CatalogError, Framework, Mode, Theme};
pub use expand::{expand_with_dependencies, validate_components, ExpansionResult};
pub use plan::{plan_scaffold, report_added_dependencies, ScaffoldManifest};
pub use project::ProjectMarker;
pub use runtime::{detect_package_manager, PackageManager};
pub use select::{base_components, Prompter};

#[cfg(feature = "tui")]
pub use tui::{run_add, run_new, AddArgs, NewArgs};

/// CLI version - used for bundle compatibility checking.
/// Each binary should define its own version; this provides a fallback.
pub const DEFAULT_CLI_VERSION: &str = "0.4.0";

/// Default location of the published asset bundle
pub const DEFAULT_BUNDLE_URL: &str =
    "https://raw.githubusercontent.com/rizzo-css/rizzo/main/dist/bundle";

/// Environment variable overriding the bundle URL
pub const BUNDLE_URL_ENV: &str = "RIZZO_BUNDLE_URL";

/// User agent for bundle HTTP requests
pub const USER_AGENT: &str = "rizzo-css";

/// Design system documentation
pub const DOCS_URL: &str = "https://rizzo-css.com/docs";

/// Upgrade command shown in version warnings
pub const UPGRADE_COMMAND: &str = "cargo install rizzo-cli --force";
