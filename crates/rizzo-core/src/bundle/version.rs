//! Version comparison between the CLI and the asset bundle

use anyhow::Result;
use semver::Version;

/// Compare the CLI version against the version a framework bundle declares.
/// Returns a warning message if the CLI is older than the bundle expects.
pub fn check_compatibility(cli_version: &str, bundle_version: &str) -> Option<String> {
    let cli_ver = match Version::parse(cli_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let bundle_ver = match Version::parse(bundle_version) {
        Ok(v) => v,
        Err(_) => return None,
    };

    if cli_ver < bundle_ver {
        Some(format!(
            "This bundle targets rizzo-css {} or newer; you are running {}.\n\
             Consider updating: {}",
            bundle_version,
            cli_version,
            crate::UPGRADE_COMMAND
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading 'v'
#[allow(dead_code)]
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_bundle() {
        let warning = check_compatibility("0.1.0", "0.2.0");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_bundle() {
        assert!(check_compatibility("0.4.0", "0.4.0").is_none());
    }

    #[test]
    fn test_cli_newer_than_bundle() {
        assert!(check_compatibility("0.4.0", "0.3.1").is_none());
    }

    #[test]
    fn test_invalid_versions_skip_the_warning() {
        assert!(check_compatibility("invalid", "0.1.0").is_none());
        assert!(check_compatibility("0.1.0", "invalid").is_none());
    }

    #[test]
    fn test_parse_version_strips_leading_v() {
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(parse_version("not-a-version").is_err());
    }
}
