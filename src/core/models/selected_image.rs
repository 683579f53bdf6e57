use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;

use crate::global_constants::LOG_TAG_SELECTED_IMAGE;

/// The picture the user chose, decoded once and shared cheaply between states.
#[derive(Clone)]
pub struct SelectedImage {
    pub source: PathBuf,
    pixels: Arc<DynamicImage>,
}

impl std::fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedImage")
            .field("source", &self.source)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl SelectedImage {
    pub fn build_from_decoded(source: PathBuf, pixels: DynamicImage) -> Self {
        log::debug!(
            "{} {:?} decoded to {}x{}",
            LOG_TAG_SELECTED_IMAGE,
            source,
            pixels.width(),
            pixels.height()
        );

        Self {
            source,
            pixels: Arc::new(pixels),
        }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_same_as(&self, other: &SelectedImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// How one picker invocation ended.
#[derive(Debug, Clone)]
pub enum PickOutcome {
    Selected(SelectedImage),
    Cancelled,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> SelectedImage {
        let pixels = DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
        SelectedImage::build_from_decoded(PathBuf::from("photo.png"), pixels)
    }

    #[test]
    fn test_selected_image_reports_dimensions() {
        let image = create_test_image(40, 30);

        assert_eq!(image.width(), 40);
        assert_eq!(image.height(), 30);
    }

    #[test]
    fn test_clones_share_pixels_but_new_picks_do_not() {
        let first = create_test_image(4, 4);
        let clone = first.clone();
        let second = create_test_image(4, 4);

        assert!(first.is_same_as(&clone));
        assert!(!first.is_same_as(&second));
    }
}
