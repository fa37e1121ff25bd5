use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use editopia_application::{ApplicationError, ImageEncoder};
use editopia_domain::ImageBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, Rgb, RgbImage};

pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Always writes baseline JPEG, whatever the target extension says.
#[derive(Debug, Clone, Copy)]
pub struct JpegImageEncoder {
    quality: u8,
}

impl JpegImageEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegImageEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageEncoder for JpegImageEncoder {
    fn encode(&self, image: &ImageBuffer, path: &Path) -> Result<(), ApplicationError> {
        if image.is_empty() {
            return Err(ApplicationError::EncodeWrite(
                "cannot encode an image with zero dimensions".to_string(),
            ));
        }
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|error| ApplicationError::EncodeWrite(error.to_string()))?;
        }

        let file =
            File::create(path).map_err(|error| ApplicationError::EncodeWrite(error.to_string()))?;
        let mut writer = BufWriter::new(file);
        let rgb = rgb_image_from_buffer(image);
        JpegEncoder::new_with_quality(&mut writer, self.quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|error| ApplicationError::EncodeWrite(error.to_string()))?;
        writer
            .flush()
            .map_err(|error| ApplicationError::EncodeWrite(error.to_string()))?;
        log::debug!(
            "wrote {} ({}x{}, quality {})",
            path.display(),
            rgb.width(),
            rgb.height(),
            self.quality
        );
        Ok(())
    }
}

pub fn rgb_image_from_buffer(image: &ImageBuffer) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (target, pixel) in out.pixels_mut().zip(image.pixels()) {
        *target = Rgb([pixel.red, pixel.green, pixel.blue]);
    }
    out
}
