//! Logical grid the whole card is placed against.
//!
//! Placement is rational: every pixel coordinate is `dimension * num / den`
//! in integer (floor) division, so identical dimensions always yield
//! identical placement on every platform. Floating point never enters
//! geometry; it is reserved for gradient color interpolation.

/// The card always has 18 logical rows.
pub const GRID_ROWS: i64 = 18;

/// Columns switch at the midpoint of the 4:3 and 16:9 aspect ratios,
/// which is the rational 14/9. Compared cross-multiplied so the boundary
/// is exact; equality selects the wide layout.
pub fn grid_cols(width: u32, height: u32) -> i64 {
    if u64::from(width) * 9 >= u64::from(height) * 14 {
        32
    } else {
        24
    }
}

/// Pixel placement for one canvas size: 18 rows by 24 or 32 columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub cols: i64,
}

impl Grid {
    pub const ROWS: i64 = GRID_ROWS;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cols: grid_cols(width, height),
        }
    }

    /// Horizontal placement: `width * num / den`, floor division.
    pub fn x(&self, num: i64, den: i64) -> i32 {
        (i64::from(self.width) * num / den) as i32
    }

    /// Vertical placement: `height * num / den`, floor division.
    pub fn y(&self, num: i64, den: i64) -> i32 {
        (i64::from(self.height) * num / den) as i32
    }

    /// Left edge of column `i`.
    pub fn col_x(&self, i: i64) -> i32 {
        self.x(i, self.cols)
    }

    /// Top edge of row `i`.
    pub fn row_y(&self, i: i64) -> i32 {
        self.y(i, Self::ROWS)
    }

    /// Width of an `n`-column span starting at the origin.
    pub fn col_w(&self, n: i64) -> i32 {
        self.x(n, self.cols)
    }

    /// Height of an `n`-row span starting at the origin.
    pub fn row_h(&self, n: i64) -> i32 {
        self.y(n, Self::ROWS)
    }
}
