use serde::{Deserialize, Serialize};

use crate::{DomainError, InvalidImageReason};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }
}

/// Owned row-major RGB raster. Always holds exactly `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl ImageBuffer {
    pub fn from_pixel(width: u32, height: u32, pixel: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; pixel_count(width, height)],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(pixel_count(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, DomainError> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(DomainError::PixelCountMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Builds a new buffer of the same size by mapping every pixel.
    pub fn map_pixels(&self, f: impl Fn(Rgb) -> Rgb) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|pixel| f(*pixel)).collect(),
        }
    }

    pub fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::InvalidImage {
                reason: InvalidImageReason::ZeroDimensions {
                    width: self.width,
                    height: self.height,
                },
            });
        }
        Ok(())
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_rejects_wrong_length() {
        let result = ImageBuffer::from_pixels(2, 2, vec![Rgb::gray(0); 3]);
        assert!(matches!(
            result,
            Err(DomainError::PixelCountMismatch {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn from_fn_is_row_major() {
        let image = ImageBuffer::from_fn(3, 2, |x, y| Rgb::new(x as u8, y as u8, 0));
        assert_eq!(image.pixels().len(), 6);
        assert_eq!(image.get_pixel(2, 1), Some(Rgb::new(2, 1, 0)));
        assert_eq!(image.pixels()[3], Rgb::new(0, 1, 0));
        assert_eq!(image.get_pixel(3, 0), None);
    }

    #[test]
    fn zero_dimension_images_are_not_editable() {
        let empty = ImageBuffer::from_pixel(0, 5, Rgb::gray(10));
        assert!(empty.is_empty());
        assert!(matches!(
            empty.ensure_editable(),
            Err(DomainError::InvalidImage {
                reason: InvalidImageReason::ZeroDimensions {
                    width: 0,
                    height: 5
                }
            })
        ));
        assert!(ImageBuffer::from_pixel(1, 1, Rgb::gray(10))
            .ensure_editable()
            .is_ok());
    }
}
