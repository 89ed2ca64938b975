//! Integer raster primitives over [`Canvas`].
//!
//! Everything here draws with integer arithmetic only and clips silently at
//! the canvas edges, so a given call sequence is reproducible byte-for-byte
//! on any platform. Line endpoints are inclusive; 2px strokes are centered
//! on the line path and cover the two pixels either side of it.

use crate::core::{Canvas, Rgb8};

/// Fills `[x, x+w) x [y, y+h)`. Non-positive extents draw nothing.
pub fn fill_rect(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, color: Rgb8) {
    for yy in y..y.saturating_add(h) {
        for xx in x..x.saturating_add(w) {
            canvas.set(xx, yy, color);
        }
    }
}

/// 1px horizontal line, endpoints inclusive.
pub fn hline(canvas: &mut Canvas, x0: i32, x1: i32, y: i32, color: Rgb8) {
    for x in x0.min(x1)..=x0.max(x1) {
        canvas.set(x, y, color);
    }
}

/// 1px vertical line, endpoints inclusive.
pub fn vline(canvas: &mut Canvas, x: i32, y0: i32, y1: i32, color: Rgb8) {
    for y in y0.min(y1)..=y0.max(y1) {
        canvas.set(x, y, color);
    }
}

/// 2px horizontal line centered on row `y` (covers rows `y-1` and `y`).
pub fn hline2(canvas: &mut Canvas, x0: i32, x1: i32, y: i32, color: Rgb8) {
    let (lo, hi) = (x0.min(x1), x0.max(x1));
    fill_rect(canvas, lo, y - 1, hi - lo + 1, 2, color);
}

/// 2px vertical line centered on column `x` (covers columns `x-1` and `x`).
pub fn vline2(canvas: &mut Canvas, x: i32, y0: i32, y1: i32, color: Rgb8) {
    let (lo, hi) = (y0.min(y1), y0.max(y1));
    fill_rect(canvas, x - 1, lo, 2, hi - lo + 1, color);
}

/// 2px line of arbitrary slope: Bresenham, stamping a 2x2 block at each
/// step. Degenerate (zero-length) input stamps a single 2x2 dot.
pub fn line2(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb8) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        fill_rect(canvas, x - 1, y - 1, 2, 2, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled ellipse inscribed in `[x, x+w) x [y, y+h)`.
///
/// A pixel is inside when its center satisfies the scaled inequality
/// `(2i+1-w)^2 h^2 + (2j+1-h)^2 w^2 <= w^2 h^2`, evaluated in wide integers.
pub fn fill_ellipse(canvas: &mut Canvas, x: i32, y: i32, w: i32, h: i32, color: Rgb8) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (wi, hi) = (i128::from(w), i128::from(h));
    let bound = wi * wi * hi * hi;
    for j in 0..h {
        let dy = i128::from(2 * j + 1) - hi;
        let dy2 = dy * dy * wi * wi;
        for i in 0..w {
            let dx = i128::from(2 * i + 1) - wi;
            if dx * dx * hi * hi + dy2 <= bound {
                canvas.set(x + i, y + j, color);
            }
        }
    }
}
