use std::sync::Arc;

use anyhow::Context;

use crate::foundation::{core::Size, error::ZenithResult, math::mul_div255};

#[derive(Clone, Debug)]
/// Decoded frame in premultiplied RGBA8 form.
pub struct FrameImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl FrameImage {
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_frame(bytes: &[u8]) -> ZenithResult<FrameImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(FrameImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = premultiply_pixel([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

/// Straight-alpha RGBA8 to premultiplied, rounding to nearest.
pub(crate) fn premultiply_pixel([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    match a {
        255 => [r, g, b, a],
        0 => [0, 0, 0, 0],
        _ => {
            let mul = |c: u8| mul_div255(u16::from(c), u16::from(a));
            [mul(r), mul(g), mul(b), a]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
