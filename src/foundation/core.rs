use crate::foundation::error::{LayerModeError, LayerModeResult};

pub use kurbo::{CubicBez, Point, Rect, Vec2};

/// One interleaved pixel: three color channels followed by alpha.
///
/// Channels are RGB for the RGBA formats and `L, a, b` for [`crate::PixelFormat::LabAlpha`].
pub type Pixel = [f32; 4];

/// Index of the first color channel (red, or `L` in Lab).
pub const RED: usize = 0;
/// Index of the second color channel (green, or `a` in Lab).
pub const GREEN: usize = 1;
/// Index of the third color channel (blue, or `b` in Lab).
pub const BLUE: usize = 2;
/// Index of the alpha channel.
pub const ALPHA: usize = 3;

/// Number of `f32` components per pixel.
pub const CHANNELS: usize = 4;

/// A fully transparent black pixel.
pub const TRANSPARENT: Pixel = [0.0, 0.0, 0.0, 0.0];

pub(crate) fn load_pixel(chunk: &[f32]) -> Pixel {
    [chunk[RED], chunk[GREEN], chunk[BLUE], chunk[ALPHA]]
}

/// Integer pixel rectangle: the region of interest handed to kernels.
///
/// Pixel spans covering a `Roi` are row-major and `width * height` pixels long.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Roi {
    /// Left edge, in image coordinates.
    pub x: i32,
    /// Top edge, in image coordinates.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Roi {
    /// Build a rectangle from its origin and size.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Validated constructor from edge coordinates; `x1 < x0` or `y1 < y0` is rejected.
    pub fn from_edges(x0: i32, y0: i32, x1: i32, y1: i32) -> LayerModeResult<Self> {
        if x1 < x0 || y1 < y0 {
            return Err(LayerModeError::validation(
                "Roi edges must satisfy x0 <= x1 and y0 <= y1",
            ));
        }
        // spans of i32 edges always fit in u32 once widened
        let span = |lo: i32, hi: i32| u32::try_from(i64::from(hi) - i64::from(lo));
        Ok(Self::new(
            x0,
            y0,
            span(x0, x1).unwrap_or(u32::MAX),
            span(y0, y1).unwrap_or(u32::MAX),
        ))
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` when the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(self, x: i32, y: i32) -> bool {
        i64::from(x) >= i64::from(self.x)
            && i64::from(x) < self.right()
            && i64::from(y) >= i64::from(self.y)
            && i64::from(y) < self.bottom()
    }

    /// Overlap of two rectangles; empty rectangles are returned with zero size.
    pub fn intersect(self, other: Roi) -> Roi {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Roi::default();
        }
        Roi::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    /// Smallest rectangle enclosing both; an empty operand is ignored.
    pub fn union(self, other: Roi) -> Roi {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x0 = i64::from(self.x).min(i64::from(other.x));
        let y0 = i64::from(self.y).min(i64::from(other.y));
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Roi::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    /// Split into horizontal bands of at most `rows` rows each, top to bottom.
    pub fn row_bands(self, rows: u32) -> Vec<Roi> {
        let rows = rows.max(1);
        let mut out = Vec::with_capacity(self.height.div_ceil(rows) as usize);
        let mut offset = 0u32;
        while offset < self.height {
            let h = rows.min(self.height - offset);
            out.push(Roi::new(self.x, self.y + offset as i32, self.width, h));
            offset += h;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
