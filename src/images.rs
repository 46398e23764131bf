//! Optional logo, icon and illustration images.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use log::warn;

use crate::error::AssetError;
use crate::layout::Rect;

/// Sub-directory of the asset directory holding the images.
pub const IMAGE_SUBDIRECTORY: &str = "images";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKind {
    CoverIllustration,
    Logo,
    LogoWhite,
    PhoneIcon,
    EmailIcon,
    WebIcon,
    LocationIcon,
}

impl ImageKind {
    pub const ALL: [ImageKind; 7] = [
        ImageKind::CoverIllustration,
        ImageKind::Logo,
        ImageKind::LogoWhite,
        ImageKind::PhoneIcon,
        ImageKind::EmailIcon,
        ImageKind::WebIcon,
        ImageKind::LocationIcon,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ImageKind::CoverIllustration => "cover.png",
            ImageKind::Logo => "logo.png",
            ImageKind::LogoWhite => "logo_white.png",
            ImageKind::PhoneIcon => "icon_phone.png",
            ImageKind::EmailIcon => "icon_email.png",
            ImageKind::WebIcon => "icon_web.png",
            ImageKind::LocationIcon => "icon_location.png",
        }
    }
}

/// A decoded image ready to be placed on a page.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    kind: ImageKind,
    image: DynamicImage,
}

impl ImageAsset {
    /// Wraps a decoded image, dropping any alpha channel.
    pub fn new(kind: ImageKind, image: DynamicImage) -> Self {
        let image = match image {
            DynamicImage::ImageRgb8(_) => image,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };
        Self { kind, image }
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Pixel dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Largest rectangle with the image's aspect ratio centred in `frame`.
    pub fn fit_within(&self, frame: Rect) -> Rect {
        let (width, height) = self.dimensions();
        fit_aspect(width, height, frame)
    }
}

fn fit_aspect(px_width: u32, px_height: u32, frame: Rect) -> Rect {
    if px_width == 0 || px_height == 0 || frame.width <= 0.0 || frame.height <= 0.0 {
        return Rect::new(frame.x, frame.y, 0.0, 0.0);
    }

    let scale = (frame.width / f64::from(px_width)).min(frame.height / f64::from(px_height));
    let width = f64::from(px_width) * scale;
    let height = f64::from(px_height) * scale;
    Rect::new(
        frame.x + (frame.width - width) / 2.0,
        frame.y + (frame.height - height) / 2.0,
        width,
        height,
    )
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: &Path) -> Result<DynamicImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let reader = image::io::Reader::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    reader
        .with_guessed_format()
        .map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads the image of `kind` from `<asset_dir>/images`.
pub fn load_image(asset_dir: &Path, kind: ImageKind) -> Result<ImageAsset, AssetError> {
    let path = asset_dir.join(IMAGE_SUBDIRECTORY).join(kind.file_name());
    decode_image_from_path(&path).map(|image| ImageAsset::new(kind, image))
}

/// The images available to one report; missing ones are simply absent.
#[derive(Clone, Debug, Default)]
pub struct ImageSet {
    images: Vec<ImageAsset>,
}

impl ImageSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(asset_dir: Option<&Path>) -> Self {
        let Some(asset_dir) = asset_dir else {
            return Self::empty();
        };

        let images = ImageKind::ALL
            .iter()
            .filter_map(|&kind| match load_image(asset_dir, kind) {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!("Image {:?} skipped: {}", kind, err);
                    None
                }
            })
            .collect();

        Self { images }
    }

    pub fn get(&self, kind: ImageKind) -> Option<&ImageAsset> {
        self.images.iter().find(|image| image.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::fs;

    #[test]
    fn wide_images_fit_the_frame_width() {
        let fitted = fit_aspect(200, 100, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(fitted, Rect::new(0.0, 25.0, 100.0, 50.0));

        let tall = fit_aspect(50, 100, Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(tall, Rect::new(35.0, 10.0, 50.0, 100.0));
    }

    #[test]
    fn loads_present_images_and_skips_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let images = dir.path().join(IMAGE_SUBDIRECTORY);
        fs::create_dir_all(&images).expect("create images dir");

        let logo = ImageBuffer::from_pixel(8, 4, Rgba([15u8, 118, 110, 255]));
        DynamicImage::ImageRgba8(logo)
            .save(images.join(ImageKind::Logo.file_name()))
            .expect("write logo");
        fs::write(images.join(ImageKind::PhoneIcon.file_name()), b"garbage").expect("write icon");

        let set = ImageSet::load(Some(dir.path()));
        assert_eq!(set.len(), 1);
        let logo = set.get(ImageKind::Logo).expect("logo loaded");
        assert_eq!(logo.dimensions(), (8, 4));
        assert!(matches!(logo.image(), DynamicImage::ImageRgb8(_)));
        assert!(set.get(ImageKind::PhoneIcon).is_none());

        assert!(matches!(
            load_image(dir.path(), ImageKind::PhoneIcon),
            Err(AssetError::Decode { .. })
        ));
    }
}
