//! The static test-card background.
//!
//! [`render_card`] is a pure function of `(width, height, variant)`: the
//! same inputs always produce a byte-identical canvas, which is what lets
//! the pipeline cache the 8 variants and reuse them for thousands of
//! overlay composites. All placement goes through [`Grid`]; the only
//! floating point is the gradient/grayscale color ramps.

use crate::{
    core::{Canvas, FrameVariant, Rgb8},
    error::UeitResult,
    geometry::Grid,
    raster,
};

pub(crate) const BLACK: Rgb8 = Rgb8::from_hex(0x000000);
pub(crate) const DARK_GRAY: Rgb8 = Rgb8::from_hex(0x505050);
pub(crate) const LIGHT_GRAY: Rgb8 = Rgb8::from_hex(0xC0C0C0);

const MAGENTA_75: Rgb8 = Rgb8::from_hex(0xFF6CFF);
const GREEN_75: Rgb8 = Rgb8::from_hex(0x6CFF6C);
const YELLOW_75: Rgb8 = Rgb8::from_hex(0xFFFF6C);
const BLUE_75: Rgb8 = Rgb8::from_hex(0x6C6CFF);
const RED_75: Rgb8 = Rgb8::from_hex(0xFF6C6C);
const CYAN_75: Rgb8 = Rgb8::from_hex(0x6CFFFF);

/// 75%-luma swatch row, then the saturated 100% row. Fixed order:
/// white, yellow, cyan, green, magenta, red, blue, black.
static SWATCHES_75: [Rgb8; 8] = [
    Rgb8::from_hex(0xFFFFFF),
    YELLOW_75,
    CYAN_75,
    GREEN_75,
    MAGENTA_75,
    RED_75,
    BLUE_75,
    Rgb8::from_hex(0x404040),
];

static SWATCHES_100: [Rgb8; 8] = [
    Rgb8::from_hex(0xFFFFFF),
    Rgb8::from_hex(0xFFFF00),
    Rgb8::from_hex(0x00FFFF),
    Rgb8::from_hex(0x00FF00),
    Rgb8::from_hex(0xFF00FF),
    Rgb8::from_hex(0xFF0000),
    Rgb8::from_hex(0x0000FF),
    BLACK,
];

/// Diameter of the big circle in grid units (one row/column margin).
const CIRCLE_CELLS: i64 = Grid::ROWS - 2;

/// Fixed lookup from variant to the lit indicator sub-cell.
///
/// Positions are in rectangle-local half-row coordinates: variants 0-3 sit
/// in the top rectangle's upper half-row, 4-7 in the bottom rectangle's
/// lower half-row, columns running left to right. Exactly one sub-cell is
/// lit per variant and the eight variants cover eight distinct positions.
struct IndicatorCell {
    bottom: bool,
    col: i64,
    half_row: i64,
}

static INDICATOR_CELLS: [IndicatorCell; FrameVariant::COUNT] = [
    IndicatorCell { bottom: false, col: 0, half_row: 0 },
    IndicatorCell { bottom: false, col: 1, half_row: 0 },
    IndicatorCell { bottom: false, col: 2, half_row: 0 },
    IndicatorCell { bottom: false, col: 3, half_row: 0 },
    IndicatorCell { bottom: true, col: 0, half_row: 1 },
    IndicatorCell { bottom: true, col: 1, half_row: 1 },
    IndicatorCell { bottom: true, col: 2, half_row: 1 },
    IndicatorCell { bottom: true, col: 3, half_row: 1 },
];

/// Renders the complete static card for one variant.
pub fn render_card(width: u32, height: u32, variant: FrameVariant) -> UeitResult<Canvas> {
    let mut canvas = Canvas::new(width, height)?;
    let g = Grid::new(width, height);

    canvas.fill(DARK_GRAY);
    paint_circle(&mut canvas, &g);
    paint_indicators(&mut canvas, &g, variant);
    paint_info_placeholder(&mut canvas, &g);
    paint_grid_lines(&mut canvas, &g);
    paint_reticle(&mut canvas, &g);
    paint_wedges(&mut canvas, &g);
    paint_complementary_bars(&mut canvas, &g);
    paint_gradient(&mut canvas, &g);
    paint_tick_groups(&mut canvas, &g);
    paint_black_squares(&mut canvas, &g);
    paint_fiducial(&mut canvas, &g, false, 0, 0);
    paint_fiducial(&mut canvas, &g, true, 0, g.cols - 4);
    paint_fiducial(&mut canvas, &g, true, Grid::ROWS - 4, 0);
    paint_fiducial(&mut canvas, &g, false, Grid::ROWS - 4, g.cols - 4);
    paint_swatches(&mut canvas, &g);
    paint_grayscale(&mut canvas, &g);
    paint_frame(&mut canvas, &g);

    Ok(canvas)
}

fn paint_circle(canvas: &mut Canvas, g: &Grid) {
    let x = g.x(g.cols - CIRCLE_CELLS, 2 * g.cols);
    let y = g.y(Grid::ROWS - CIRCLE_CELLS, 2 * Grid::ROWS);
    raster::fill_ellipse(canvas, x, y, g.col_w(CIRCLE_CELLS), g.row_h(CIRCLE_CELLS), LIGHT_GRAY);
}

fn paint_indicators(canvas: &mut Canvas, g: &Grid, variant: FrameVariant) {
    let x = g.x(g.cols - 4, 2 * g.cols);
    let w = g.col_w(4);
    let h = g.row_h(1);

    // Top and bottom 4x1-cell rectangles inside the circle.
    raster::fill_rect(canvas, x, g.y(3, 2 * Grid::ROWS), w, h, DARK_GRAY);
    raster::fill_rect(canvas, x, g.y(2 * Grid::ROWS - 5, 2 * Grid::ROWS), w, h, DARK_GRAY);

    let cell = &INDICATOR_CELLS[variant.index()];
    let cx = g.x((g.cols - 4) / 2 + cell.col, g.cols);
    let cy = if cell.bottom {
        g.y(2 * Grid::ROWS - 5 + cell.half_row, 2 * Grid::ROWS)
    } else {
        g.y(3 + cell.half_row, 2 * Grid::ROWS)
    };
    raster::fill_rect(canvas, cx, cy, g.col_w(1), g.y(1, 2 * Grid::ROWS), LIGHT_GRAY);
}

fn paint_info_placeholder(canvas: &mut Canvas, g: &Grid) {
    let x = g.x(g.cols - 10, 2 * g.cols);
    raster::fill_rect(canvas, x, g.row_y(3), g.col_w(10), g.row_h(1), DARK_GRAY);
}

fn paint_grid_lines(canvas: &mut Canvas, g: &Grid) {
    let right = g.width as i32 - 1;
    let bottom = g.height as i32 - 1;
    for i in 1..Grid::ROWS {
        raster::hline2(canvas, 0, right, g.row_y(i), LIGHT_GRAY);
    }
    for i in 1..g.cols {
        raster::vline2(canvas, g.col_x(i), 0, bottom, LIGHT_GRAY);
    }
}

fn paint_reticle(canvas: &mut Canvas, g: &Grid) {
    let x = g.x(g.cols - 6, 2 * g.cols);
    let y = g.row_y(8);
    let w = g.col_w(6);
    let h = g.row_h(2);

    raster::fill_rect(canvas, x, y, w, h, DARK_GRAY);
    raster::hline2(canvas, x, x + w, y, LIGHT_GRAY);
    raster::hline2(canvas, x, x + w, y + h, LIGHT_GRAY);
    raster::vline2(canvas, x, y, y + h, LIGHT_GRAY);
    raster::vline2(canvas, x + w, y, y + h, LIGHT_GRAY);

    // Centered cross and the two flanking alignment dots.
    let cx = (g.width / 2) as i32;
    let cy = (g.height / 2) as i32;
    let w = g.col_w(1);
    let h = g.row_h(1);

    raster::hline2(canvas, cx - w, cx + w, cy, LIGHT_GRAY);
    raster::vline2(canvas, cx - w, cy - h, cy + h, LIGHT_GRAY);
    raster::vline2(canvas, cx, cy - h, cy + h, LIGHT_GRAY);
    raster::vline2(canvas, cx + w, cy - h, cy + h, LIGHT_GRAY);
    raster::line2(canvas, cx - w * 2, cy, cx - w * 2, cy, LIGHT_GRAY);
    raster::line2(canvas, cx + w * 2, cy, cx + w * 2, cy, LIGHT_GRAY);
}

fn paint_wedges(canvas: &mut Canvas, g: &Grid) {
    // Left block: light over dark, a near-vertical 2px edge at 1/10 of the
    // block width, then a 2px diagonal across 3.5 cells.
    let x = g.col_x(g.cols / 2 - 3 - 5);
    let y = g.row_y(8);
    let w = g.col_w(5);
    let h = g.row_h(1);

    raster::fill_rect(canvas, x, y, w, h, LIGHT_GRAY);
    raster::fill_rect(canvas, x, y + h, w, h, BLACK);
    raster::vline2(canvas, x + w / 10, y, y + h, BLACK);
    raster::vline2(canvas, x + w / 10, y + h, y + h * 2, LIGHT_GRAY);

    let x = g.col_x(g.cols / 2 - 3 - 4);
    let y = g.row_y(9);
    let w = g.x(7, 2 * g.cols);
    raster::line2(canvas, x, y + h, x + w, y, LIGHT_GRAY);

    // Right block: mirrored, dark over light.
    let x = g.col_x(g.cols / 2 + 3);
    let y = g.row_y(8);
    let w = g.col_w(5);

    raster::fill_rect(canvas, x, y, w, h, BLACK);
    raster::fill_rect(canvas, x, y + h, w, h, LIGHT_GRAY);

    let x = g.x(g.cols + 7, 2 * g.cols);
    let w = g.x(7, 2 * g.cols);
    raster::line2(canvas, x, y + h, x + w, y, LIGHT_GRAY);
}

fn paint_complementary_bars(canvas: &mut Canvas, g: &Grid) {
    // Half-column cells across the circle width, alternating within each
    // complementary pair: 10 magenta/green, 12 yellow/blue, 10 red/cyan.
    let w = ((g.width as i64 + g.cols * 2 - 1) / (g.cols * 2)) as i32;
    let h = g.row_h(1);
    let y = g.row_y(7);

    for i in 0..32i64 {
        let color = match (i, i % 2 == 0) {
            (0..=9, true) => MAGENTA_75,
            (0..=9, false) => GREEN_75,
            (10..=21, true) => YELLOW_75,
            (10..=21, false) => BLUE_75,
            (_, true) => RED_75,
            (_, false) => CYAN_75,
        };
        let x = g.x(g.cols - CIRCLE_CELLS + i, g.cols * 2);
        raster::fill_rect(canvas, x, y, w, h, color);
    }
}

fn paint_gradient(canvas: &mut Canvas, g: &Grid) {
    let x = g.x(g.cols - CIRCLE_CELLS, 2 * g.cols);
    let y = g.row_y(10);
    let w = g.col_w(CIRCLE_CELLS);
    let h = g.row_h(1);

    for i in 0..w {
        let v = i as f32 / (w - 1).max(1) as f32;
        let color = Rgb8::new(quantize(v), quantize(1.0 - v), quantize(v));
        raster::vline(canvas, x + i, y, y + h, color);
    }
}

fn paint_tick_groups(canvas: &mut Canvas, g: &Grid) {
    let side = g.cols / 7;
    let main = g.cols - side * 6;
    let y = g.row_y(11);
    let h = g.row_h(1);

    raster::fill_rect(canvas, 0, y, g.width as i32, h, BLACK);

    // Center group: single-pixel ticks every other column.
    let x = g.x(g.cols - main, 2 * g.cols);
    let w = g.col_w(main);
    for i in (0..w).step_by(2) {
        raster::vline(canvas, x + i, y, y + h, LIGHT_GRAY);
    }

    // Flanking groups of 2px, 3px and 4px tick bundles, mirrored around
    // the center with one group width per step.
    for (offset, ticks, period) in [(1i64, 2i32, 4usize), (2, 3, 6), (3, 4, 8)] {
        let w = g.col_w(side);
        for x in [
            g.x((g.cols - main) / 2 - side * offset, g.cols),
            g.x((g.cols + main) / 2 + side * (offset - 1), g.cols),
        ] {
            for i in (0..w).step_by(period) {
                for t in 0..ticks {
                    raster::vline(canvas, x + i + t, y, y + h, LIGHT_GRAY);
                }
            }
        }
    }
}

fn paint_black_squares(canvas: &mut Canvas, g: &Grid) {
    let x = g.x(g.cols - 10 + 1, 2 * g.cols);
    let y = g.row_y(14);
    let w = g.col_w(1);
    let h = g.row_h(1);

    for i in 0..5 {
        raster::fill_rect(canvas, x + w * i * 2, y, w, h, BLACK);
    }
}

fn paint_fiducial(canvas: &mut Canvas, g: &Grid, rotate: bool, row: i64, col: i64) {
    raster::fill_ellipse(
        canvas,
        g.col_x(col),
        g.row_y(row),
        g.col_w(4),
        g.row_h(4),
        LIGHT_GRAY,
    );

    let x = g.col_x(col + 1);
    let y = g.row_y(row + 1);
    raster::fill_rect(canvas, x, y, g.col_w(2), g.row_h(2), BLACK);

    let cx = g.col_x(col + 2);
    let cy = g.row_y(row + 2);

    if rotate {
        let w = g.x(2, 3 * g.cols);
        let h = g.row_h(2);

        let mut i = y;
        while i < y + h {
            raster::hline(canvas, x - 2, x + w, i, LIGHT_GRAY);
            i += 2;
        }
        let x = x + w * 2;
        let mut i = y;
        while i < y + h {
            raster::hline(canvas, x, x + w + 2, i, LIGHT_GRAY);
            raster::hline(canvas, x, x + w + 2, i + 1, LIGHT_GRAY);
            i += 4;
        }

        raster::hline2(canvas, cx - w / 3, cx + w / 3, cy, LIGHT_GRAY);
        raster::vline2(canvas, cx, cy - w / 3, cy + w / 3, LIGHT_GRAY);
    } else {
        let w = g.col_w(2);
        let h = g.y(2, 3 * Grid::ROWS);

        let mut i = x;
        while i < x + w {
            raster::vline(canvas, i, y - 2, y + h, LIGHT_GRAY);
            i += 2;
        }
        let y = y + h * 2;
        let mut i = x;
        while i < x + w {
            raster::vline(canvas, i, y, y + h + 2, LIGHT_GRAY);
            raster::vline(canvas, i + 1, y, y + h + 2, LIGHT_GRAY);
            i += 4;
        }

        raster::hline2(canvas, cx - h / 3, cx + h / 3, cy, LIGHT_GRAY);
        raster::vline2(canvas, cx, cy - h / 3, cy + h / 3, LIGHT_GRAY);
    }
}

fn paint_swatches(canvas: &mut Canvas, g: &Grid) {
    let w = ((g.width + 7) / 8) as i32;
    let h = g.row_h(2);

    for (row_y, colors) in [(g.row_y(4), &SWATCHES_75), (g.row_y(12), &SWATCHES_100)] {
        for (i, color) in colors.iter().enumerate() {
            raster::fill_rect(canvas, g.x(i as i64, 8), row_y, w, h, *color);
        }
    }
}

fn paint_grayscale(canvas: &mut Canvas, g: &Grid) {
    let y = g.row_y(6);
    let h = g.row_h(1);
    let w = g.width as i32;

    for i in 0..w {
        let v = i as f32 / (w - 1).max(1) as f32;
        let gray = quantize(v);
        raster::vline(canvas, i, y, y + h, Rgb8::new(gray, gray, gray));
    }
}

fn paint_frame(canvas: &mut Canvas, g: &Grid) {
    let right = g.width as i32 - 1;
    let bottom = g.height as i32 - 1;
    raster::hline2(canvas, 0, right, 1, LIGHT_GRAY);
    raster::hline2(canvas, 0, right, bottom, LIGHT_GRAY);
    raster::vline2(canvas, 1, 0, bottom, LIGHT_GRAY);
    raster::vline2(canvas, right, 0, bottom, LIGHT_GRAY);
}

/// Float channel quantization: `(v * 255 + 0.5)` truncated.
fn quantize(v: f32) -> u8 {
    (v * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_is_deterministic() {
        let v = FrameVariant::new(3).unwrap();
        let a = render_card(320, 180, v).unwrap();
        let b = render_card(320, 180, v).unwrap();
        assert_eq!(a.words(), b.words());
    }

    #[test]
    fn variants_differ_only_in_indicator_cells() {
        let a = render_card(320, 180, FrameVariant::new(0).unwrap()).unwrap();
        let b = render_card(320, 180, FrameVariant::new(5).unwrap()).unwrap();
        assert_ne!(a.words(), b.words());
    }

    /// Center pixel of indicator sub-cell `(col, half_row)` of the top or
    /// bottom rectangle. Centers sit away from cell boundaries so the 2px
    /// grid lines crossing the rectangles cannot land on them.
    fn subcell_center(g: &Grid, bottom: bool, col: i64, half_row: i64) -> (u32, u32) {
        let x0 = g.x((g.cols - 4) / 2 + col, g.cols);
        let y_num = if bottom {
            2 * Grid::ROWS - 5 + half_row
        } else {
            3 + half_row
        };
        let y0 = g.y(y_num, 2 * Grid::ROWS);
        let w = g.col_w(1);
        let h = g.y(1, 2 * Grid::ROWS);
        ((x0 + w / 2) as u32, (y0 + h / 2) as u32)
    }

    #[test]
    fn each_variant_lights_exactly_one_subcell() {
        let g = Grid::new(640, 360);
        let lit_word = LIGHT_GRAY.pack();
        let mut seen = std::collections::HashSet::new();

        for variant in FrameVariant::ALL {
            let card = render_card(640, 360, variant).unwrap();
            let mut lit = Vec::new();
            for bottom in [false, true] {
                for half_row in 0..2 {
                    for col in 0..4 {
                        let (x, y) = subcell_center(&g, bottom, col, half_row);
                        if card.get(x, y) == Some(lit_word) {
                            lit.push((bottom, col, half_row));
                        }
                    }
                }
            }
            assert_eq!(lit.len(), 1, "variant {} lit {:?}", variant.index(), lit);
            seen.insert(lit[0]);
        }

        // The 8 variants cover 8 distinct positions.
        assert_eq!(seen.len(), FrameVariant::COUNT);
    }

    #[test]
    fn background_and_frame_colors_present() {
        let card = render_card(320, 180, FrameVariant::new(0).unwrap()).unwrap();
        assert_eq!(card.get(0, 0), Some(LIGHT_GRAY.pack()));
        // Row 11 band is black between ticks.
        let g = Grid::new(320, 180);
        let y = (g.row_y(11) + g.row_h(1) / 2) as u32;
        let words: Vec<u32> = (0..320).filter_map(|x| card.get(x, y)).collect();
        assert!(words.contains(&BLACK.pack()));
        assert!(words.contains(&LIGHT_GRAY.pack()));
    }
}
