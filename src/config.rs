//! TOML configuration.
//!
//! ```toml
//! [store]
//! backend = "api"
//! project_id = "acnnui6u"
//! dataset = "production"
//!
//! [images]
//! width = 800
//!
//! [server]
//! bind = "127.0.0.1:7340"
//! ```

use anyhow::{bail, Context, Result};
use folio_core::image::{
    FitMode, ImageFormat, ImageOptions, ImageUrlBuilder, DEFAULT_IMAGE_BASE_URL, DEFAULT_QUALITY,
    DEFAULT_WIDTH,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Which store backs the query façade.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The hosted query API.
    Api,
    /// A local NDJSON export evaluated in memory.
    Fixture,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,
    /// Base URL replacing `https://{project_id}.{api|apicdn}.sanity.io`,
    /// e.g. a caching proxy.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Name of the environment variable holding a read token.
    #[serde(default)]
    pub token_env: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

fn default_backend() -> Backend {
    Backend::Api
}
fn default_dataset() -> String {
    "production".to_string()
}
fn default_api_version() -> String {
    "2023-05-03".to_string()
}
fn default_use_cdn() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default)]
    pub fit: FitMode,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            width: default_width(),
            quality: default_quality(),
            format: ImageFormat::default(),
            fit: FitMode::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}
fn default_width() -> u32 {
    DEFAULT_WIDTH
}
fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

impl ImagesConfig {
    /// Default transform options for resolved image URLs.
    pub fn options(&self) -> ImageOptions {
        ImageOptions {
            width: self.width,
            height: None,
            quality: self.quality,
            format: self.format,
            fit: self.fit,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

impl Config {
    /// Image URL builder for the configured project and dataset.
    pub fn image_builder(&self) -> ImageUrlBuilder {
        ImageUrlBuilder::new(&self.store.project_id, &self.store.dataset)
            .with_base_url(&self.images.base_url)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    match config.store.backend {
        Backend::Api => {
            if config.store.project_id.trim().is_empty() {
                bail!("store.project_id must be set when backend is 'api'");
            }
            if config.store.dataset.trim().is_empty() {
                bail!("store.dataset must be set when backend is 'api'");
            }
            if let Some(url) = &config.store.api_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    bail!("store.api_url must be an http(s) URL, got '{}'", url);
                }
            }
        }
        Backend::Fixture => match &config.store.fixture {
            None => bail!("store.fixture must be set when backend is 'fixture'"),
            Some(fixture) if fixture.is_relative() => {
                // Relative fixture paths resolve against the config file's directory.
                if let Some(dir) = path.parent() {
                    config.store.fixture = Some(dir.join(fixture));
                }
            }
            Some(_) => {}
        },
    }

    if config.store.timeout_secs == 0 {
        bail!("store.timeout_secs must be > 0");
    }

    if config.images.width == 0 {
        bail!("images.width must be > 0");
    }

    if config.images.quality > 100 {
        bail!("images.quality must be in [0, 100]");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("folio.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_defaults() {
        let (_tmp, path) = write_config("[store]\nproject_id = \"abc\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.store.backend, Backend::Api);
        assert_eq!(config.store.dataset, "production");
        assert_eq!(config.store.api_version, "2023-05-03");
        assert!(config.store.use_cdn);
        assert!(config.store.api_url.is_none());
        assert_eq!(config.images.width, 800);
        assert_eq!(config.images.quality, 80);
        assert_eq!(config.server.bind, "127.0.0.1:7340");
    }

    #[test]
    fn test_api_backend_requires_project() {
        let (_tmp, path) = write_config("[store]\nbackend = \"api\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn test_fixture_path_is_relative_to_config() {
        let (tmp, path) =
            write_config("[store]\nbackend = \"fixture\"\nfixture = \"data/export.ndjson\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(
            config.store.fixture.unwrap(),
            tmp.path().join("data/export.ndjson")
        );
    }

    #[test]
    fn test_api_url_must_be_http() {
        let (_tmp, path) =
            write_config("[store]\nproject_id = \"abc\"\napi_url = \"localhost:9000\"\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("api_url"));

        let (_tmp, path) = write_config(
            "[store]\nproject_id = \"abc\"\napi_url = \"http://127.0.0.1:9000\"\n",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.store.api_url.as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[test]
    fn test_fixture_backend_requires_path() {
        let (_tmp, path) = write_config("[store]\nbackend = \"fixture\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_quality_bound() {
        let (_tmp, path) =
            write_config("[store]\nproject_id = \"abc\"\n\n[images]\nquality = 120\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let (_tmp, path) = write_config("[store]\nbackend = \"graphql\"\n");
        assert!(load_config(&path).is_err());
    }
}
