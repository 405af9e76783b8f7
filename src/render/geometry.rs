use crate::foundation::core::{Point, Rect, Size};

/// Placement of an image scaled to cover a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the image.
    pub scale: f64,
    /// Destination rectangle in surface coordinates; may extend past the surface on one axis.
    pub dest: Rect,
}

impl CoverFit {
    pub fn offset(&self) -> Point {
        self.dest.origin()
    }

    pub fn draw_size(&self) -> Size {
        self.dest.size()
    }
}

/// Scale `image` uniformly so it fills `surface`, centred, clipping the overflowing axis.
///
/// Returns `None` for degenerate sizes.
pub fn cover_fit(surface: Size, image: Size) -> Option<CoverFit> {
    let dims = [surface.width, surface.height, image.width, image.height];
    if dims.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return None;
    }

    let scale = (surface.width / image.width).max(surface.height / image.height);
    let draw = Size::new(image.width * scale, image.height * scale);
    let origin = Point::new(
        (surface.width - draw.width) / 2.0,
        (surface.height - draw.height) / 2.0,
    );
    Some(CoverFit {
        scale,
        dest: Rect::from_origin_size(origin, draw),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
