use rayon::prelude::*;

use crate::{
    assets::decode::FrameImage,
    foundation::{
        core::{Affine, Rect, Viewport},
        error::{ZenithError, ZenithResult},
        math::mul_div255,
    },
};

/// A rendered canvas as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixels as straight (non-premultiplied) RGBA8, the layout PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Something a [`crate::CanvasRenderer`] can draw frames into.
///
/// Coordinates passed to [`DrawSurface::draw_image`] are logical; implementations apply the
/// device pixel ratio themselves.
pub trait DrawSurface {
    fn viewport(&self) -> Viewport;

    /// Reallocate the backing store for `viewport`. Must be safe to repeat.
    fn resize(&mut self, viewport: Viewport) -> ZenithResult<()>;

    fn clear(&mut self);

    fn draw_image(&mut self, image: &FrameImage, dest: Rect) -> ZenithResult<()>;
}

/// CPU canvas with a device-pixel backing store.
#[derive(Clone, Debug)]
pub struct Surface {
    viewport: Viewport,
    width: u32,
    height: u32,
    clear_rgba: [u8; 4],
    data: Vec<u8>,
}

impl Surface {
    /// `clear_rgba` is premultiplied.
    pub fn new(viewport: Viewport, clear_rgba: [u8; 4]) -> ZenithResult<Self> {
        let mut out = Self {
            viewport,
            width: 0,
            height: 0,
            clear_rgba,
            data: Vec::new(),
        };
        out.resize(viewport)?;
        Ok(out)
    }

    /// Backing-store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Logical-to-device transform.
    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.viewport.dpr)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }
}

impl DrawSurface for Surface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) -> ZenithResult<()> {
        viewport.validate()?;
        let (width, height) = viewport.device_size();
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| ZenithError::render("surface backing store size overflow"))?;

        self.viewport = viewport;
        self.width = width;
        self.height = height;
        self.data = vec![0u8; len];
        self.clear();
        tracing::debug!(width, height, dpr = viewport.dpr, "surface reallocated");
        Ok(())
    }

    fn clear(&mut self) {
        let c = self.clear_rgba;
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }

    fn draw_image(&mut self, image: &FrameImage, dest: Rect) -> ZenithResult<()> {
        if image.width == 0 || image.height == 0 {
            return Err(ZenithError::render("cannot draw an empty image"));
        }
        let dev = self.device_transform().transform_rect_bbox(dest);
        if dev.width() <= 0.0 || dev.height() <= 0.0 {
            return Ok(());
        }

        let clip = dev.intersect(Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        if clip.width() <= 0.0 || clip.height() <= 0.0 {
            return Ok(());
        }

        let x0 = clip.x0.floor() as u32;
        let x1 = (clip.x1.ceil() as u32).min(self.width);
        let y0 = clip.y0.floor() as u32;
        let y1 = (clip.y1.ceil() as u32).min(self.height);

        let row_bytes = self.width as usize * 4;
        let sx = f64::from(image.width) / dev.width();
        let sy = f64::from(image.height) / dev.height();
        let rows = &mut self.data[y0 as usize * row_bytes..y1 as usize * row_bytes];

        rows.par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(i, row)| {
                let y = y0 + i as u32;
                let v = ((f64::from(y) + 0.5 - dev.y0) * sy).floor();
                if v < 0.0 || v >= f64::from(image.height) {
                    return;
                }
                for x in x0..x1 {
                    let u = ((f64::from(x) + 0.5 - dev.x0) * sx).floor();
                    if u < 0.0 || u >= f64::from(image.width) {
                        continue;
                    }
                    let src = image.pixel(u as u32, v as u32);
                    let at = x as usize * 4;
                    let dst = [row[at], row[at + 1], row[at + 2], row[at + 3]];
                    row[at..at + 4].copy_from_slice(&over(dst, src));
                }
            });
        Ok(())
    }
}

fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
