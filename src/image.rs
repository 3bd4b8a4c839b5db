//! `folio image`: resolve an asset reference to a CDN URL.

use anyhow::{bail, Result};
use folio_core::image::{FitMode, ImageFormat, ImageSource};

use crate::config::Config;

/// Per-invocation overrides of the `[images]` defaults.
#[derive(Debug, Default, Clone)]
pub struct ImageArgs {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    pub format: Option<ImageFormat>,
    pub fit: Option<FitMode>,
}

/// Resolve `reference` (an asset id such as `image-<hash>-<w>x<h>-<ext>`,
/// or a JSON image field) with the configured defaults and `args` applied.
pub fn resolve_image(config: &Config, reference: &str, args: &ImageArgs) -> Option<String> {
    let source = match serde_json::from_str(reference) {
        Ok(value) => ImageSource::from_value(&value),
        Err(_) => Some(ImageSource::from(reference)),
    };

    let mut options = config.images.options();
    if let Some(width) = args.width {
        options.width = width;
    }
    options.height = args.height.or(options.height);
    if let Some(quality) = args.quality {
        options.quality = quality;
    }
    if let Some(format) = args.format {
        options.format = format;
    }
    if let Some(fit) = args.fit {
        options.fit = fit;
    }

    config.image_builder().resolve(source.as_ref(), &options)
}

pub fn run_image(config: &Config, reference: &str, args: &ImageArgs) -> Result<()> {
    match resolve_image(config, reference, args) {
        Some(url) => {
            println!("{}", url);
            Ok(())
        }
        None => bail!("not an image asset reference: {}", reference),
    }
}
