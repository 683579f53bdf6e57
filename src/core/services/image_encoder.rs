use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::core::models::{EncoderSettings, EncodingError, SelectedImage};
use crate::global_constants::LOG_TAG_ENCODER;

/// Scales, JPEG-compresses and base64-encodes a picture for the request payload.
#[derive(Debug, Clone, Copy)]
pub struct ImageEncoder {
    target_width: u32,
    target_height: u32,
    jpeg_quality: u8,
}

impl ImageEncoder {
    pub fn from_settings(settings: &EncoderSettings) -> Self {
        Self {
            target_width: settings.target_width.max(1),
            target_height: settings.target_height.max(1),
            jpeg_quality: settings.jpeg_quality.clamp(1, 100),
        }
    }

    pub fn encode(&self, image: &SelectedImage) -> Result<String, EncodingError> {
        self.encode_pixels(image.pixels())
    }

    /// Same as [`encode`](Self::encode) but on the blocking pool.
    pub async fn encode_in_background(&self, image: SelectedImage) -> Result<String, EncodingError> {
        let encoder = *self;
        tokio::task::spawn_blocking(move || encoder.encode(&image))
            .await
            .map_err(|error| EncodingError::Aborted(error.to_string()))?
    }

    fn encode_pixels(&self, pixels: &DynamicImage) -> Result<String, EncodingError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(EncodingError::EmptyImage {
                width: pixels.width(),
                height: pixels.height(),
            });
        }

        log::debug!(
            "{} scaling {}x{} to {}x{}",
            LOG_TAG_ENCODER,
            pixels.width(),
            pixels.height(),
            self.target_width,
            self.target_height
        );

        // Aspect ratio is not preserved; the service accepts the stretched image.
        let scaled = pixels
            .resize_exact(self.target_width, self.target_height, FilterType::Nearest)
            .to_rgb8();

        let mut jpeg_bytes = Vec::new();
        scaled
            .write_with_encoder(JpegEncoder::new_with_quality(
                &mut jpeg_bytes,
                self.jpeg_quality,
            ))
            .map_err(|error| EncodingError::Compression(error.to_string()))?;

        let encoded = base64::engine::general_purpose::STANDARD_NO_PAD.encode(&jpeg_bytes);

        log::info!(
            "{} encoded {} jpeg bytes into {} base64 characters",
            LOG_TAG_ENCODER,
            jpeg_bytes.len(),
            encoded.len()
        );

        Ok(encoded)
    }
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::from_settings(&EncoderSettings::default())
    }
}
