//! Status-line compositing.
//!
//! Each frame copies a prerendered card variant into the output canvas and
//! stamps the 10-character info line over the info row, one character per
//! fixed cell. Glyphs come from an embedded 8x8 bitmap covering the
//! info-line alphabet and are scaled to the row height by integer
//! nearest-neighbor sampling, so composition stays deterministic and never
//! depends on platform fonts.

use crate::{
    card,
    core::{Canvas, Rgb8},
    error::UeitResult,
    geometry::Grid,
};

/// Maximum characters drawn per frame; the info row has exactly this many
/// cells.
pub const INFO_CELLS: i64 = 10;

const GLYPH_SIZE: i32 = 8;

/// Rows are bitmaps, MSB leftmost. Only the characters the info line can
/// contain are present; anything else renders as blank.
fn glyph(ch: char) -> Option<&'static [u8; 8]> {
    static DIGITS: [[u8; 8]; 10] = [
        [0x3C, 0x66, 0x6E, 0x76, 0x66, 0x66, 0x3C, 0x00],
        [0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00],
        [0x3C, 0x66, 0x06, 0x0C, 0x30, 0x60, 0x7E, 0x00],
        [0x3C, 0x66, 0x06, 0x1C, 0x06, 0x66, 0x3C, 0x00],
        [0x0C, 0x1C, 0x3C, 0x6C, 0x7E, 0x0C, 0x0C, 0x00],
        [0x7E, 0x60, 0x7C, 0x06, 0x06, 0x66, 0x3C, 0x00],
        [0x3C, 0x60, 0x60, 0x7C, 0x66, 0x66, 0x3C, 0x00],
        [0x7E, 0x06, 0x0C, 0x18, 0x30, 0x30, 0x30, 0x00],
        [0x3C, 0x66, 0x66, 0x3C, 0x66, 0x66, 0x3C, 0x00],
        [0x3C, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x3C, 0x00],
    ];
    static F: [u8; 8] = [0x7E, 0x60, 0x60, 0x7C, 0x60, 0x60, 0x60, 0x00];
    static P: [u8; 8] = [0x7C, 0x66, 0x66, 0x7C, 0x60, 0x60, 0x60, 0x00];
    static S: [u8; 8] = [0x3C, 0x66, 0x60, 0x3C, 0x06, 0x66, 0x3C, 0x00];
    static COLON: [u8; 8] = [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00];

    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        'F' => Some(&F),
        'P' => Some(&P),
        'S' => Some(&S),
        ':' => Some(&COLON),
        _ => None,
    }
}

/// Copies `base` into `out` and draws the first `min(len, 10)` characters
/// of `info_line`, each centered in its own info-row cell.
pub fn compose(base: &Canvas, out: &mut Canvas, info_line: &str) -> UeitResult<()> {
    out.copy_from(base)?;

    let g = Grid::new(base.width(), base.height());
    let cy = g.y(7, 2 * Grid::ROWS);
    let target_h = g.row_h(1);

    for (i, ch) in info_line.chars().take(INFO_CELLS as usize).enumerate() {
        let cx = g.x(g.cols - INFO_CELLS + 1 + 2 * i as i64, 2 * g.cols);
        draw_char(out, ch, cx, cy, target_h, card::LIGHT_GRAY);
    }
    Ok(())
}

/// Stamps one glyph centered on `(cx, cy)`, scaled so the glyph box height
/// equals `target_h` (width is 3/4 of that). Unknown characters are blank.
fn draw_char(canvas: &mut Canvas, ch: char, cx: i32, cy: i32, target_h: i32, color: Rgb8) {
    let Some(rows) = glyph(ch) else {
        return;
    };
    let target_w = (target_h * 3 / 4).max(1);
    let target_h = target_h.max(1);
    let left = cx - target_w / 2;
    let top = cy - target_h / 2;

    for ty in 0..target_h {
        let sy = (ty * GLYPH_SIZE / target_h).min(GLYPH_SIZE - 1);
        let bits = rows[sy as usize];
        for tx in 0..target_w {
            let sx = (tx * GLYPH_SIZE / target_w).min(GLYPH_SIZE - 1);
            if bits & (0x80 >> sx) != 0 {
                canvas.set(left + tx, top + ty, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{card::render_card, core::FrameVariant};

    fn base() -> Canvas {
        render_card(320, 180, FrameVariant::new(0).unwrap()).unwrap()
    }

    fn diff_pixels(a: &Canvas, b: &Canvas) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..a.height() {
            for x in 0..a.width() {
                if a.get(x, y) != b.get(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn compose_without_glyphs_is_a_plain_copy() {
        let base = base();
        let mut out = Canvas::new(320, 180).unwrap();
        compose(&base, &mut out, "").unwrap();
        assert_eq!(out.words(), base.words());
    }

    #[test]
    fn glyphs_stay_inside_the_info_row() {
        let base = base();
        let g = Grid::new(320, 180);
        let mut out = Canvas::new(320, 180).unwrap();
        compose(&base, &mut out, "FPS:60 042").unwrap();

        let x0 = g.x(g.cols - 10, 2 * g.cols);
        let x1 = x0 + g.col_w(10);
        let y0 = g.row_y(3);
        let y1 = y0 + g.row_h(1);
        for (x, y) in diff_pixels(&base, &out) {
            let (x, y) = (x as i32, y as i32);
            assert!(x >= x0 && x < x1 && y >= y0 && y < y1, "({x},{y}) escaped");
        }
    }

    #[test]
    fn at_most_ten_characters_are_drawn() {
        let base = base();
        let g = Grid::new(320, 180);
        let mut ten = Canvas::new(320, 180).unwrap();
        let mut twelve = Canvas::new(320, 180).unwrap();
        compose(&base, &mut ten, "8888888888").unwrap();
        compose(&base, &mut twelve, "888888888888").unwrap();
        assert_eq!(ten.words(), twelve.words());

        // Every one of the ten cells received ink.
        for i in 0..10i64 {
            let cx = g.x(g.cols - 10 + 1 + 2 * i, 2 * g.cols) as u32;
            let cy = g.y(7, 2 * Grid::ROWS) as u32;
            let mut touched = false;
            let r = (g.row_h(1) / 2) as u32;
            for dy in 0..=r * 2 {
                for dx in 0..=r {
                    let x = (cx + dx).saturating_sub(r / 2);
                    let y = (cy + dy).saturating_sub(r);
                    if ten.get(x, y) != base.get(x, y) {
                        touched = true;
                    }
                }
            }
            assert!(touched, "cell {i} untouched");
        }
    }

    #[test]
    fn shorter_lines_touch_fewer_cells() {
        let base = base();
        let mut two = Canvas::new(320, 180).unwrap();
        compose(&base, &mut two, "88").unwrap();
        let g = Grid::new(320, 180);
        let third_cell_x = g.x(g.cols - 10 + 4, 2 * g.cols);
        for (x, _) in diff_pixels(&base, &two) {
            assert!((x as i32) < third_cell_x, "pixel past the second cell");
        }
    }
}
