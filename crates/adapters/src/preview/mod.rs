use editopia_domain::{ImageBuffer, Rgb};

/// Display-only copy of an image, packed as `0x00RRGGBB` for a framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCanvas {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

/// Scales `image` to fit inside `max_width` x `max_height`, keeping the aspect
/// ratio. Nearest-neighbour sampling; the source buffer is only read.
pub fn render_preview(
    image: &ImageBuffer,
    max_width: usize,
    max_height: usize,
) -> Option<PreviewCanvas> {
    let src_width = image.width() as usize;
    let src_height = image.height() as usize;
    if src_width == 0 || src_height == 0 || max_width == 0 || max_height == 0 {
        return None;
    }

    let scale = (max_width as f32 / src_width as f32).min(max_height as f32 / src_height as f32);
    let dst_width = ((src_width as f32 * scale).round() as usize).clamp(1, max_width);
    let dst_height = ((src_height as f32 * scale).round() as usize).clamp(1, max_height);

    let source = image.pixels();
    let mut pixels = vec![0_u32; dst_width * dst_height];
    for y in 0..dst_height {
        let src_y = y * src_height / dst_height;
        for x in 0..dst_width {
            let src_x = x * src_width / dst_width;
            pixels[y * dst_width + x] = pack_rgb(source[src_y * src_width + src_x]);
        }
    }

    Some(PreviewCanvas {
        width: dst_width,
        height: dst_height,
        pixels,
    })
}

pub fn pack_rgb(pixel: Rgb) -> u32 {
    ((pixel.red as u32) << 16) | ((pixel.green as u32) << 8) | (pixel.blue as u32)
}

pub fn unpack_rgb(packed: u32) -> Rgb {
    Rgb::new(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    )
}
