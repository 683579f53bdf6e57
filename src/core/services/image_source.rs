use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::DynamicImage;

use crate::core::interfaces::ports::ImagePicker;
use crate::core::models::{PickOutcome, SelectedImage};
use crate::global_constants::LOG_TAG_IMAGE_SOURCE;

/// Runs the host picker and decodes whatever file it hands back.
pub struct ImageSource {
    picker: Arc<dyn ImagePicker>,
}

impl ImageSource {
    pub fn new(picker: Arc<dyn ImagePicker>) -> Self {
        Self { picker }
    }

    pub async fn pick_image(&self) -> PickOutcome {
        log::info!("{} handing control to the image picker", LOG_TAG_IMAGE_SOURCE);

        let chosen_path = match self.picker.pick_image_file().await {
            Ok(Some(path)) => path,
            Ok(None) => {
                log::info!("{} picker cancelled", LOG_TAG_IMAGE_SOURCE);
                return PickOutcome::Cancelled;
            }
            Err(error) => {
                log::error!("{} picker failed: {:#}", LOG_TAG_IMAGE_SOURCE, error);
                return PickOutcome::Failed(format!("{:#}", error));
            }
        };

        match Self::decode_file(&chosen_path).await {
            Ok(pixels) => {
                log::info!(
                    "{} loaded {:?} ({}x{})",
                    LOG_TAG_IMAGE_SOURCE,
                    chosen_path,
                    pixels.width(),
                    pixels.height()
                );
                PickOutcome::Selected(SelectedImage::build_from_decoded(chosen_path, pixels))
            }
            Err(error) => {
                log::error!(
                    "{} could not load {:?}: {:#}",
                    LOG_TAG_IMAGE_SOURCE,
                    chosen_path,
                    error
                );
                PickOutcome::Failed(format!("{:#}", error))
            }
        }
    }

    async fn decode_file(path: &Path) -> Result<DynamicImage> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {:?}", path))?;

        log::debug!(
            "{} decoding {} bytes from {:?}",
            LOG_TAG_IMAGE_SOURCE,
            bytes.len(),
            path
        );

        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .context("Image decoder task aborted")?
            .context("File is not a supported image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct MockImagePicker {
        chosen: Option<PathBuf>,
    }

    #[async_trait]
    impl ImagePicker for MockImagePicker {
        async fn pick_image_file(&self) -> Result<Option<PathBuf>> {
            Ok(self.chosen.clone())
        }
    }

    struct BrokenImagePicker;

    #[async_trait]
    impl ImagePicker for BrokenImagePicker {
        async fn pick_image_file(&self) -> Result<Option<PathBuf>> {
            anyhow::bail!("picker closed unexpectedly")
        }
    }

    fn create_source(chosen: Option<PathBuf>) -> ImageSource {
        ImageSource::new(Arc::new(MockImagePicker { chosen }))
    }

    #[tokio::test]
    async fn test_cancelled_picker_yields_no_pixels() {
        let source = create_source(None);

        assert!(matches!(source.pick_image().await, PickOutcome::Cancelled));
    }

    #[tokio::test]
    async fn test_picked_png_is_decoded() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("photo.png");
        image::RgbaImage::from_pixel(32, 16, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        let source = create_source(Some(path.clone()));

        match source.pick_image().await {
            PickOutcome::Selected(selected) => {
                assert_eq!(selected.source, path);
                assert_eq!(selected.width(), 32);
                assert_eq!(selected.height(), 16);
            }
            other => panic!("expected a selected image, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "definitely not pixels").unwrap();
        let source = create_source(Some(path));

        assert!(matches!(source.pick_image().await, PickOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let source = create_source(Some(PathBuf::from("/nonexistent/photo.jpg")));

        match source.pick_image().await {
            PickOutcome::Failed(reason) => assert!(reason.contains("Failed to read")),
            other => panic!("expected a failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_picker_error_is_reported_as_failure() {
        let source = ImageSource::new(Arc::new(BrokenImagePicker));

        match source.pick_image().await {
            PickOutcome::Failed(reason) => assert!(reason.contains("picker closed")),
            other => panic!("expected a failure, got {:?}", other),
        }
    }
}
