use crate::foundation::error::{ZenithError, ZenithResult};

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear mapping of `x` through control points `xs -> ys`.
///
/// `xs` must be non-decreasing. Inputs outside `[xs[0], xs[last]]` clamp to the end values.
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> ZenithResult<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return Err(ZenithError::validation(
            "interpolate expects equal-length, non-empty control point lists",
        ));
    }
    if !xs.windows(2).all(|w| w[0] <= w[1]) {
        return Err(ZenithError::validation(
            "interpolate control inputs must be non-decreasing",
        ));
    }

    let last = xs.len() - 1;
    if x <= xs[0] {
        return Ok(ys[0]);
    }
    if x >= xs[last] {
        return Ok(ys[last]);
    }

    let idx = xs.partition_point(|&k| k <= x);
    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    let span = x1 - x0;
    if span <= 0.0 {
        return Ok(y1);
    }
    Ok(lerp(y0, y1, (x - x0) / span))
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
