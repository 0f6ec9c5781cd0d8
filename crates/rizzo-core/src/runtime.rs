//! Package manager detection and dependency installation
//!
//! The Svelte and Astro scaffolds ship a package.json; after copying we
//! offer to install dependencies with whatever package manager the machine
//! has, probed in order of preference.

use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Supported package managers, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Bun,
    Yarn,
    Npm,
}

impl PackageManager {
    pub const ALL: &'static [PackageManager] = &[
        PackageManager::Pnpm,
        PackageManager::Bun,
        PackageManager::Yarn,
        PackageManager::Npm,
    ];

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.command())
    }

    pub fn run_dev_command(&self) -> String {
        match self {
            PackageManager::Npm => "npm run dev".to_string(),
            _ => format!("{} dev", self.command()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pnpm" => Ok(PackageManager::Pnpm),
            "bun" => Ok(PackageManager::Bun),
            "yarn" => Ok(PackageManager::Yarn),
            "npm" => Ok(PackageManager::Npm),
            _ => Err(format!(
                "unknown package manager '{}' (expected one of: pnpm, bun, yarn, npm)",
                s
            )),
        }
    }
}

/// Check whether a package manager responds to `--version`
pub fn is_available(pm: PackageManager) -> bool {
    std::process::Command::new(pm.command())
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// First available package manager, in preference order
pub fn detect_package_manager() -> Option<PackageManager> {
    PackageManager::ALL.iter().copied().find(|pm| is_available(*pm))
}

/// Run `<pm> install` in the project directory, streaming its output
pub async fn install_dependencies(pm: PackageManager, project_dir: &Path) -> Result<()> {
    let mut child = TokioCommand::new(pm.command())
        .arg("install")
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().expect("Failed to capture stdout");
    let stderr = child.stderr.take().expect("Failed to capture stderr");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    loop {
        tokio::select! {
            line = stdout_reader.next_line() => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => break,
                    Err(_) => break,
                }
            }
            line = stderr_reader.next_line() => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line),
                    Ok(None) => {}
                    Err(_) => {}
                }
            }
        }
    }

    let status = child.wait().await?;
    if !status.success() {
        anyhow::bail!(
            "{} failed with exit code {}. You can run it manually in {}.",
            pm.install_command(),
            status.code().unwrap_or(-1),
            project_dir.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_commands() {
        assert_eq!(PackageManager::Pnpm.install_command(), "pnpm install");
        assert_eq!(PackageManager::Npm.install_command(), "npm install");
    }

    #[test]
    fn test_run_dev_command_uses_npm_run() {
        assert_eq!(PackageManager::Npm.run_dev_command(), "npm run dev");
        assert_eq!(PackageManager::Bun.run_dev_command(), "bun dev");
    }

    #[test]
    fn test_package_manager_parsing() {
        assert_eq!("PNPM".parse::<PackageManager>().ok(), Some(PackageManager::Pnpm));
        assert!("cargo".parse::<PackageManager>().is_err());
    }
}
