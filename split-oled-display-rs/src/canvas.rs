//! In-memory canvas that widgets draw into.
//!
//! Each widget owns a [`Canvas`] sized to its screen region. Widgets redraw
//! their canvas when their state changes; the screen later copies the
//! canvases onto the display frame buffer at their aligned positions.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};

/// A `W`×`H` monochrome pixel buffer implementing [`DrawTarget`].
///
/// Pixels outside the canvas are silently dropped, so widgets can draw
/// glyphs and images that hang over the edge (e.g. text at `y = -1`).
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas<const W: usize, const H: usize> {
    buf: [[BinaryColor; W]; H],
}

impl<const W: usize, const H: usize> Canvas<W, H> {
    /// Create a canvas filled with `background`.
    pub const fn new(background: BinaryColor) -> Self {
        Self {
            buf: [[background; W]; H],
        }
    }

    /// Fill the whole canvas with one colour.
    pub fn fill_bg(&mut self, color: BinaryColor) {
        for row in self.buf.iter_mut() {
            row.fill(color);
        }
    }

    /// Colour at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        if x < 0 || y < 0 {
            return None;
        }
        self.buf.get(y as usize)?.get(x as usize).copied()
    }

    /// Number of pixels equal to `color` inside `area`.
    pub fn count_in(&self, area: &Rectangle, color: BinaryColor) -> usize {
        area.points()
            .filter(|p| self.pixel(p.x, p.y) == Some(color))
            .count()
    }

    /// Copy the canvas onto `target` with its top-left corner at `origin`.
    pub fn draw_at<D>(&self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let area = Rectangle::new(origin, Size::new(W as u32, H as u32));
        target.fill_contiguous(&area, self.buf.iter().flatten().copied())
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Canvas<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for Canvas<W, H> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            if let Some(px) = self
                .buf
                .get_mut(point.y as usize)
                .and_then(|row| row.get_mut(point.x as usize))
            {
                *px = color;
            }
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
