use crate::Rgb;

/// Hue/saturation/brightness triple, each component in `[0, 1]`.
///
/// Conversion is done in single precision and rounds channels with
/// `trunc(x * 255 + 0.5)`, which keeps the vintage and saturation filters
/// byte-for-byte stable across runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    pub fn from_rgb(pixel: Rgb) -> Self {
        let red = i32::from(pixel.red);
        let green = i32::from(pixel.green);
        let blue = i32::from(pixel.blue);
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);

        let brightness = max as f32 / 255.0;
        let saturation = if max != 0 {
            (max - min) as f32 / max as f32
        } else {
            0.0
        };

        let hue = if saturation == 0.0 {
            0.0
        } else {
            let span = (max - min) as f32;
            let red_c = (max - red) as f32 / span;
            let green_c = (max - green) as f32 / span;
            let blue_c = (max - blue) as f32 / span;
            let sector = if red == max {
                blue_c - green_c
            } else if green == max {
                2.0 + red_c - blue_c
            } else {
                4.0 + green_c - red_c
            };
            let hue = sector / 6.0;
            if hue < 0.0 {
                hue + 1.0
            } else {
                hue
            }
        };

        Self {
            hue,
            saturation,
            brightness,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        let brightness = self.brightness;
        let saturation = self.saturation;
        if saturation == 0.0 {
            return Rgb::gray(to_channel(brightness));
        }

        let h = (self.hue - self.hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));

        // Deliberate deviation: sector 6 wraps to red instead of falling through to black.
        let (red, green, blue) = match h as i32 {
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            5 => (brightness, p, q),
            _ => (brightness, t, p),
        };

        Rgb::new(to_channel(red), to_channel(green), to_channel(blue))
    }
}

fn to_channel(value: f32) -> u8 {
    ((value * 255.0 + 0.5) as i32).clamp(0, 255) as u8
}
