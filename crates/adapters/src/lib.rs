pub mod fs;
pub mod presenters;
pub mod preview;

pub use fs::{rgb_image_from_buffer, JpegImageEncoder, DEFAULT_JPEG_QUALITY};
pub use presenters::{
    present_export, present_export_failure, present_session, present_session_json,
};
pub use preview::{pack_rgb, render_preview, unpack_rgb, PreviewCanvas};

use std::path::Path;

use editopia_application::{ApplicationError, ImageDecoder};
use editopia_domain::{DomainError, ImageBuffer, Rgb};
use image::io::Reader as ImageReader;
use image::RgbaImage;

#[derive(Debug, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<ImageBuffer, ApplicationError> {
        let image = ImageReader::open(path)
            .map_err(DomainError::undecodable)?
            .with_guessed_format()
            .map_err(DomainError::undecodable)?
            .decode()
            .map_err(DomainError::undecodable)?;
        log::debug!(
            "decoded {} as {:?} ({}x{})",
            path.display(),
            image.color(),
            image.width(),
            image.height()
        );
        Ok(buffer_from_rgba(&image.to_rgba8()))
    }
}

/// Flattens onto a black background, the same way an opaque RGB canvas
/// would receive the image.
pub fn buffer_from_rgba(source: &RgbaImage) -> ImageBuffer {
    ImageBuffer::from_fn(source.width(), source.height(), |x, y| {
        let [red, green, blue, alpha] = source.get_pixel(x, y).0;
        Rgb::new(
            over_black(red, alpha),
            over_black(green, alpha),
            over_black(blue, alpha),
        )
    })
}

fn over_black(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use editopia_domain::InvalidImageReason;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn decodes_png_and_flattens_alpha() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("layer.png");
        let source = RgbaImage::from_fn(3, 2, |x, _y| {
            if x == 0 {
                Rgba([200_u8, 100_u8, 50_u8, 255_u8])
            } else if x == 1 {
                Rgba([200_u8, 100_u8, 50_u8, 0_u8])
            } else {
                Rgba([200_u8, 100_u8, 50_u8, 128_u8])
            }
        });
        source.save(&path).expect("save png");

        let decoded = ImageCrateDecoder.decode(&path).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
        assert_eq!(decoded.get_pixel(0, 1), Some(Rgb::new(200, 100, 50)));
        assert_eq!(decoded.get_pixel(1, 0), Some(Rgb::gray(0)));
        assert_eq!(decoded.get_pixel(2, 0), Some(Rgb::new(100, 50, 25)));
    }

    #[test]
    fn undecodable_file_is_an_invalid_image() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").expect("write");

        assert!(matches!(
            ImageCrateDecoder.decode(&path),
            Err(ApplicationError::Domain(DomainError::InvalidImage {
                reason: InvalidImageReason::Undecodable(_)
            }))
        ));
        assert!(matches!(
            ImageCrateDecoder.decode(&dir.path().join("missing.jpg")),
            Err(ApplicationError::Domain(DomainError::InvalidImage {
                reason: InvalidImageReason::Undecodable(_)
            }))
        ));
    }
}
