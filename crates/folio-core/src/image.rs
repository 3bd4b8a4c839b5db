//! Image delivery URLs.
//!
//! Image assets are stored once and transformed on the fly by the
//! platform's image CDN. This module only encodes the requested width,
//! height, quality, format and fit into the CDN's URL convention.
//!
//! Asset ids have the form `image-<hash>-<width>x<height>-<ext>`; the CDN
//! path for that asset is `images/<project>/<dataset>/<hash>-<width>x<height>.<ext>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ImageAsset, ImageField};

pub const DEFAULT_IMAGE_BASE_URL: &str = "https://cdn.sanity.io";
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_QUALITY: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Webp,
    Jpg,
    Png,
}

impl ImageFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "webp" => Ok(Self::Webp),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            other => Err(format!("unknown image format '{}'", other)),
        }
    }
}

/// How the CDN fits the source into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Crop,
    #[default]
    Fill,
    Fillmax,
    Max,
    Scale,
    Clip,
    Min,
}

impl FitMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Fill => "fill",
            Self::Fillmax => "fillmax",
            Self::Max => "max",
            Self::Scale => "scale",
            Self::Clip => "clip",
            Self::Min => "min",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crop" => Ok(Self::Crop),
            "fill" => Ok(Self::Fill),
            "fillmax" => Ok(Self::Fillmax),
            "max" => Ok(Self::Max),
            "scale" => Ok(Self::Scale),
            "clip" => Ok(Self::Clip),
            "min" => Ok(Self::Min),
            other => Err(format!("unknown fit mode '{}'", other)),
        }
    }
}

/// Display options for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptions {
    pub width: u32,
    pub height: Option<u32>,
    /// Clamped to 0..=100 when the URL is built.
    pub quality: u8,
    pub format: ImageFormat,
    pub fit: FitMode,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: None,
            quality: DEFAULT_QUALITY,
            format: ImageFormat::default(),
            fit: FitMode::default(),
        }
    }
}

impl ImageOptions {
    fn query_string(&self) -> String {
        let mut parts = vec![format!("w={}", self.width)];
        if let Some(h) = self.height {
            parts.push(format!("h={}", h));
        }
        parts.push(format!("q={}", self.quality.min(100)));
        parts.push(format!("fm={}", self.format));
        parts.push(format!("fit={}", self.fit));
        parts.join("&")
    }
}

/// Anything that can point at an image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A bare asset id such as `image-abc123-1200x800-jpg`.
    AssetId(String),
    /// An image field as stored on a document.
    Field(ImageField),
    /// An expanded or referenced asset.
    Asset(ImageAsset),
}

impl ImageSource {
    /// Interpret a raw JSON value as an image source.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self::AssetId(s.clone())),
            Value::Object(map) if map.contains_key("asset") => {
                serde_json::from_value(value.clone()).ok().map(Self::Field)
            }
            Value::Object(map)
                if map.contains_key("_ref") || map.contains_key("_id") || map.contains_key("url") =>
            {
                serde_json::from_value(value.clone()).ok().map(Self::Asset)
            }
            _ => None,
        }
    }

    fn asset(&self) -> Option<&ImageAsset> {
        match self {
            Self::AssetId(_) => None,
            Self::Field(field) => field.asset.as_ref(),
            Self::Asset(asset) => Some(asset),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(id: &str) -> Self {
        Self::AssetId(id.to_string())
    }
}

/// Parsed `image-<hash>-<w>x<h>-<ext>` id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId {
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub extension: String,
}

impl AssetId {
    pub fn parse(id: &str) -> Option<Self> {
        let rest = id.strip_prefix("image-")?;
        let (rest, extension) = rest.rsplit_once('-')?;
        let (hash, dims) = rest.rsplit_once('-')?;
        let (w, h) = dims.split_once('x')?;
        if hash.is_empty() || extension.is_empty() {
            return None;
        }
        Some(Self {
            hash: hash.to_string(),
            width: w.parse().ok()?,
            height: h.parse().ok()?,
            extension: extension.to_string(),
        })
    }

    fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.hash, self.width, self.height, self.extension)
    }
}

/// Builds CDN URLs for one project and dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    pub base_url: String,
    pub project_id: String,
    pub dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a source to a delivery URL.
    ///
    /// Returns `None` when the source is absent or does not identify an
    /// asset. Never panics.
    pub fn resolve(&self, source: Option<&ImageSource>, options: &ImageOptions) -> Option<String> {
        let source = source?;
        let query = options.query_string();

        let id = match source {
            ImageSource::AssetId(id) => Some(id.as_str()),
            _ => source
                .asset()
                .and_then(|a| a.reference.as_deref().or(a.id.as_deref())),
        };
        if let Some(asset) = id.and_then(AssetId::parse) {
            return Some(format!(
                "{}/images/{}/{}/{}?{}",
                self.base_url.trim_end_matches('/'),
                self.project_id,
                self.dataset,
                asset.file_name(),
                query
            ));
        }

        let url = source.asset()?.url.as_deref().filter(|u| !u.is_empty())?;
        let joiner = if url.contains('?') { '&' } else { '?' };
        Some(format!("{}{}{}", url, joiner, query))
    }

    /// Resolve a raw JSON value; see [`ImageSource::from_value`].
    pub fn resolve_value(&self, value: &Value, options: &ImageOptions) -> Option<String> {
        self.resolve(ImageSource::from_value(value).as_ref(), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> ImageUrlBuilder {
        ImageUrlBuilder::new("proj1", "production")
    }

    #[test]
    fn test_default_options() {
        let url = builder()
            .resolve(
                Some(&"image-abc123-1200x800-jpg".into()),
                &ImageOptions::default(),
            )
            .unwrap();
        assert_eq!(
            url,
            "https://cdn.sanity.io/images/proj1/production/abc123-1200x800.jpg?w=800&q=80&fm=webp&fit=fill"
        );
    }

    #[test]
    fn test_custom_options_and_clamped_quality() {
        let opts = ImageOptions {
            width: 320,
            height: Some(240),
            quality: 150,
            format: ImageFormat::Png,
            fit: FitMode::Crop,
        };
        let url = builder()
            .resolve(Some(&"image-abc-10x20-png".into()), &opts)
            .unwrap();
        assert!(url.ends_with("abc-10x20.png?w=320&h=240&q=100&fm=png&fit=crop"));
    }

    #[test]
    fn test_absent_and_malformed_sources() {
        let opts = ImageOptions::default();
        assert_eq!(builder().resolve(None, &opts), None);
        assert_eq!(builder().resolve(Some(&"not-an-asset".into()), &opts), None);
        assert_eq!(builder().resolve(Some(&"image-abc-axb-jpg".into()), &opts), None);
        assert_eq!(builder().resolve_value(&json!(null), &opts), None);
        assert_eq!(builder().resolve_value(&json!({"alt": "x"}), &opts), None);
        assert_eq!(builder().resolve_value(&json!({"asset": null}), &opts), None);
    }

    #[test]
    fn test_field_with_reference() {
        let value = json!({"asset": {"_ref": "image-f00-640x480-png"}, "alt": "Trefoil"});
        let url = builder()
            .resolve_value(&value, &ImageOptions::default())
            .unwrap();
        assert!(url.starts_with("https://cdn.sanity.io/images/proj1/production/f00-640x480.png?"));
    }

    #[test]
    fn test_expanded_asset_url() {
        let value = json!({
            "asset": {"url": "https://cdn.example.com/a.jpg", "metadata": {"lqip": "data:"}}
        });
        let url = builder()
            .resolve_value(&value, &ImageOptions::default())
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/a.jpg?w=800&q=80&fm=webp&fit=fill");
    }

    #[test]
    fn test_parse_asset_id() {
        let id = AssetId::parse("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg").unwrap();
        assert_eq!(id.hash, "Tb9Ew8CXIwaY6R1kjMvI0uRR");
        assert_eq!((id.width, id.height), (2000, 3000));
        assert_eq!(id.extension, "jpg");
    }

    #[test]
    fn test_format_and_fit_parse() {
        assert_eq!("jpeg".parse::<ImageFormat>(), Ok(ImageFormat::Jpg));
        assert!("gif".parse::<ImageFormat>().is_err());
        assert_eq!("fillmax".parse::<FitMode>(), Ok(FitMode::Fillmax));
    }
}
