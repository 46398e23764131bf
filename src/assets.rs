//! Fonts and images loaded for one render call.

use std::path::Path;

use log::debug;

use crate::fonts::FontSet;
use crate::images::ImageSet;

/// Everything read from the asset directory. Missing pieces are already
/// replaced by their fallbacks.
#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub fonts: FontSet,
    pub images: ImageSet,
}

impl Assets {
    /// Built-in fonts and no images.
    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn load(asset_dir: Option<&Path>) -> Self {
        match asset_dir {
            Some(dir) => debug!("Loading report assets from {}", dir.display()),
            None => debug!("No asset directory resolved"),
        }
        Self {
            fonts: FontSet::load(asset_dir),
            images: ImageSet::load(asset_dir),
        }
    }
}
