//! Asset bundle fetching from remote (GitHub releases) or a local checkout
//!
//! Both sources go through zip archives:
//! - Remote: pre-built `<framework>.zip` files next to the root `bundle.yaml`
//! - Local: zips are built on the fly from the bundle directory
//!
//! This keeps development against a local checkout identical to production.

use super::manifest::{FrameworkManifest, RootManifest, SharedFile};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Where the CSS asset bundle comes from
#[derive(Debug, Clone)]
pub enum BundleSource {
    Remote(Url),
    Local(PathBuf),
}

impl BundleSource {
    /// Remote source from the default URL, overridable via environment
    pub fn from_env() -> Result<Self> {
        let url_str = std::env::var(crate::BUNDLE_URL_ENV)
            .unwrap_or_else(|_| crate::DEFAULT_BUNDLE_URL.to_string());
        let url = Url::parse(&url_str).with_context(|| format!("Invalid bundle URL: {}", url_str))?;
        Ok(Self::Remote(url))
    }

    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Cached framework assets extracted from a zip
#[derive(Debug, Clone)]
struct FrameworkCache {
    manifest: FrameworkManifest,
    files: HashMap<String, Vec<u8>>,
}

/// Retrieves bundle manifests and files, caching each framework's archive
pub struct BundleFetcher {
    source: BundleSource,
    client: reqwest::Client,
    framework_cache: HashMap<String, FrameworkCache>,
}

impl BundleFetcher {
    pub fn new(source: BundleSource) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(crate::USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            framework_cache: HashMap::new(),
        }
    }

    /// Remote fetcher from the default/env-overridden URL
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(BundleSource::from_env()?))
    }

    /// Fetcher over a local bundle checkout
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(BundleSource::local(path))
    }

    /// Append a path segment to a base URL, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// Fetch the root manifest listing available frameworks
    pub async fn fetch_root_manifest(&self) -> Result<RootManifest> {
        match &self.source {
            BundleSource::Remote(base_url) => {
                let url = Self::build_url(base_url, "bundle.yaml")?;
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch bundle manifest from {}", url))?;

                if !response.status().is_success() {
                    anyhow::bail!(
                        "Failed to fetch bundle manifest from {}: HTTP {}",
                        url,
                        response.status()
                    );
                }

                let content = response.text().await?;
                serde_yaml::from_str(&content).context("Failed to parse bundle manifest")
            }
            BundleSource::Local(path) => {
                let manifest_path = path.join("bundle.yaml");
                let content = fs::read_to_string(&manifest_path)
                    .await
                    .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
                serde_yaml::from_str(&content).context("Failed to parse bundle manifest")
            }
        }
    }

    /// Build a zip for one framework from a local bundle directory. Every
    /// file under the framework directory is included, plus the shared files
    /// from the bundle root.
    pub fn build_local_zip(
        bundle_dir: &Path,
        framework_name: &str,
        shared_files: &[SharedFile],
    ) -> Result<Vec<u8>> {
        let framework_path = bundle_dir.join(framework_name);
        let manifest_path = framework_path.join("bundle.yaml");

        // Parse early so a broken manifest fails the build, not the scaffold
        let manifest_content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let _: FrameworkManifest = serde_yaml::from_str(&manifest_content)
            .with_context(|| format!("Failed to parse '{}' bundle manifest", framework_name))?;

        let mut zip_buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            for entry in WalkDir::new(&framework_path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let relative = entry
                    .path()
                    .strip_prefix(&framework_path)
                    .expect("walkdir yields paths under its root");
                let content = std::fs::read(entry.path())
                    .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                let zip_path = format!("{}/{}", framework_name, relative.display());
                zip.start_file(&zip_path, options)?;
                zip.write_all(&content)?;
            }

            // Shared files from the bundle root, with optional renaming
            for shared in shared_files {
                let source_path = bundle_dir.join(&shared.source);
                if source_path.exists() {
                    let content = std::fs::read(&source_path).with_context(|| {
                        format!("Failed to read shared file {}", source_path.display())
                    })?;
                    let zip_path = format!("{}/{}", framework_name, shared.destination());
                    zip.start_file(&zip_path, options)?;
                    zip.write_all(&content)?;
                } else {
                    eprintln!(
                        "Warning: Shared file '{}' not found in {}",
                        shared.source,
                        bundle_dir.display()
                    );
                }
            }

            zip.finish()?;
        }

        Ok(zip_buffer)
    }

    /// Extract a framework zip into the cache
    fn extract_zip_to_cache(zip_bytes: &[u8], framework_name: &str) -> Result<FrameworkCache> {
        let cursor = Cursor::new(zip_bytes);
        let mut archive = ZipArchive::new(cursor)
            .with_context(|| format!("Failed to read zip archive for '{}'", framework_name))?;

        let mut files: HashMap<String, Vec<u8>> = HashMap::new();
        let mut manifest: Option<FrameworkManifest> = None;

        // Entries are stored as {framework_name}/path; strip the prefix
        let prefix = format!("{}/", framework_name);

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let full_path = file.name().to_string();
            let relative_path = full_path
                .strip_prefix(&prefix)
                .map(str::to_string)
                .unwrap_or(full_path);

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;

            if relative_path == "bundle.yaml" {
                let content_str = String::from_utf8_lossy(&contents);
                manifest = Some(serde_yaml::from_str(&content_str).with_context(|| {
                    format!("Failed to parse '{}' bundle manifest", framework_name)
                })?);
            }

            files.insert(relative_path, contents);
        }

        let manifest = manifest
            .ok_or_else(|| anyhow::anyhow!("'{}' zip is missing bundle.yaml", framework_name))?;

        Ok(FrameworkCache { manifest, files })
    }

    /// Fetch/build and cache one framework's archive
    async fn fetch_and_cache(&mut self, framework_name: &str) -> Result<()> {
        if self.framework_cache.contains_key(framework_name) {
            return Ok(());
        }

        let zip_bytes = match &self.source {
            BundleSource::Remote(base_url) => {
                let zip_url = Self::build_url(base_url, &format!("{}.zip", framework_name))?;
                let response = self
                    .client
                    .get(zip_url.clone())
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch bundle zip: {}", framework_name))?;

                if !response.status().is_success() {
                    anyhow::bail!(
                        "Failed to fetch '{}' bundle from {}: HTTP {}",
                        framework_name,
                        zip_url,
                        response.status()
                    );
                }

                response.bytes().await?.to_vec()
            }
            BundleSource::Local(path) => {
                let root_manifest_path = path.join("bundle.yaml");
                let root_content = std::fs::read_to_string(&root_manifest_path)
                    .with_context(|| format!("Failed to read {}", root_manifest_path.display()))?;
                let root_manifest: RootManifest =
                    serde_yaml::from_str(&root_content).context("Failed to parse bundle.yaml")?;

                Self::build_local_zip(path, framework_name, &root_manifest.shared_files)?
            }
        };

        let cache = Self::extract_zip_to_cache(&zip_bytes, framework_name)?;
        self.framework_cache.insert(framework_name.to_string(), cache);

        Ok(())
    }

    /// Fetch one framework's manifest
    pub async fn fetch_framework_manifest(
        &mut self,
        framework_name: &str,
    ) -> Result<FrameworkManifest> {
        self.fetch_and_cache(framework_name).await?;
        let cache = self
            .framework_cache
            .get(framework_name)
            .ok_or_else(|| anyhow::anyhow!("'{}' not found in bundle cache", framework_name))?;
        Ok(cache.manifest.clone())
    }

    /// Fetch a file from a framework's archive as bytes
    pub async fn fetch_file_bytes(
        &mut self,
        framework_name: &str,
        file_path: &str,
    ) -> Result<Vec<u8>> {
        self.fetch_and_cache(framework_name).await?;
        let cache = self
            .framework_cache
            .get(framework_name)
            .ok_or_else(|| anyhow::anyhow!("'{}' not found in bundle cache", framework_name))?;
        cache.files.get(file_path).cloned().ok_or_else(|| {
            anyhow::anyhow!(
                "File '{}' not found in the '{}' bundle",
                file_path,
                framework_name
            )
        })
    }

    pub fn source(&self) -> &BundleSource {
        &self.source
    }
}
