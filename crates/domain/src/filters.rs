//! Pure pixel transforms. Every function reads its input and returns a new
//! buffer of the same size; an empty buffer comes back unchanged.

use crate::{FilterKind, Hsb, ImageBuffer, Rgb};

const WARM_BOOST: f64 = 1.2;
const WARM_CUT: f64 = 0.8;
const VINTAGE_HUE_SHIFT: f32 = 0.05;
const VINTAGE_SATURATION_SCALE: f32 = 0.8;
const VINTAGE_FADE_SCALE: f32 = 0.9;
const VINTAGE_FADE_LIFT: f32 = 0.1;
const MONO_CONTRAST_PIVOT: i32 = 128;
const MONO_CONTRAST_PUSH: i32 = 10;

/// Dispatches a named filter. `FilterKind::None` yields an unmodified copy.
pub fn apply_filter(image: &ImageBuffer, kind: FilterKind) -> ImageBuffer {
    match kind {
        FilterKind::None => image.clone(),
        FilterKind::Warm => warm(image),
        FilterKind::Cool => cool(image),
        FilterKind::Vintage => vintage(image),
        FilterKind::Sepia => sepia(image),
        FilterKind::BlackAndWhite => black_and_white(image),
    }
}

pub fn warm(image: &ImageBuffer) -> ImageBuffer {
    image.map_pixels(|pixel| {
        Rgb::new(
            scale_channel(pixel.red, WARM_BOOST),
            pixel.green,
            scale_channel(pixel.blue, WARM_CUT),
        )
    })
}

pub fn cool(image: &ImageBuffer) -> ImageBuffer {
    image.map_pixels(|pixel| {
        Rgb::new(
            scale_channel(pixel.red, WARM_CUT),
            pixel.green,
            scale_channel(pixel.blue, WARM_BOOST),
        )
    })
}

pub fn vintage(image: &ImageBuffer) -> ImageBuffer {
    image.map_pixels(|pixel| {
        let mut hsb = Hsb::from_rgb(pixel);
        hsb.hue = (hsb.hue + VINTAGE_HUE_SHIFT) % 1.0;
        hsb.saturation = (hsb.saturation * VINTAGE_SATURATION_SCALE).min(1.0);
        hsb.brightness = (hsb.brightness * VINTAGE_FADE_SCALE + VINTAGE_FADE_LIFT).min(1.0);
        hsb.to_rgb()
    })
}

pub fn sepia(image: &ImageBuffer) -> ImageBuffer {
    image.map_pixels(|pixel| {
        let red = f64::from(pixel.red);
        let green = f64::from(pixel.green);
        let blue = f64::from(pixel.blue);
        Rgb::new(
            cap_channel(0.393 * red + 0.769 * green + 0.189 * blue),
            cap_channel(0.349 * red + 0.686 * green + 0.168 * blue),
            cap_channel(0.272 * red + 0.534 * green + 0.131 * blue),
        )
    })
}

pub fn black_and_white(image: &ImageBuffer) -> ImageBuffer {
    image.map_pixels(|pixel| {
        let luminance = (0.299 * f64::from(pixel.red)
            + 0.587 * f64::from(pixel.green)
            + 0.114 * f64::from(pixel.blue)) as i32;
        let pushed = if luminance < MONO_CONTRAST_PIVOT {
            luminance - MONO_CONTRAST_PUSH
        } else {
            luminance + MONO_CONTRAST_PUSH
        };
        Rgb::gray(pushed.clamp(0, 255) as u8)
    })
}

/// Linear rescale with zero offset; `factor == 1.0` is the identity.
pub fn exposure(image: &ImageBuffer, factor: f32) -> ImageBuffer {
    let rescale = |channel: u8| ((f32::from(channel) * factor) as i32).clamp(0, 255) as u8;
    image.map_pixels(|pixel| {
        Rgb::new(
            rescale(pixel.red),
            rescale(pixel.green),
            rescale(pixel.blue),
        )
    })
}

pub fn saturation(image: &ImageBuffer, factor: f32) -> ImageBuffer {
    image.map_pixels(|pixel| {
        let mut hsb = Hsb::from_rgb(pixel);
        hsb.saturation = (hsb.saturation * factor).clamp(0.0, 1.0);
        hsb.to_rgb()
    })
}

fn scale_channel(channel: u8, factor: f64) -> u8 {
    ((f64::from(channel) * factor) as i32).clamp(0, 255) as u8
}

fn cap_channel(value: f64) -> u8 {
    (value as i32).min(255) as u8
}
