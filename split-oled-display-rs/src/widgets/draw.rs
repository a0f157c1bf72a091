//! Shared drawing helpers: colour palette, filled rectangles, text labels
//! and ASCII-art masks.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

/// Font used for every label on the status screens.
pub const LABEL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Foreground / background colour pair.
///
/// The default draws lit pixels on a dark panel; [`Palette::inverted()`]
/// swaps the two for dark-on-lit screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: BinaryColor,
    pub background: BinaryColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: BinaryColor::On,
            background: BinaryColor::Off,
        }
    }
}

impl Palette {
    pub fn inverted() -> Self {
        Self {
            foreground: BinaryColor::Off,
            background: BinaryColor::On,
        }
    }

    /// Palette for the `inverted` configuration flag.
    pub fn for_inverted(inverted: bool) -> Self {
        if inverted {
            Self::inverted()
        } else {
            Self::default()
        }
    }

    /// Map an image colour (`On` = ink) to this palette.
    pub fn map(self, color: BinaryColor) -> BinaryColor {
        if color.is_on() {
            self.foreground
        } else {
            self.background
        }
    }
}

/// Horizontal placement of a label within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Fill the `w`×`h` rectangle at `(x, y)` with `color`.
pub fn fill_rect<D>(
    target: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    color: BinaryColor,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

/// Draw a single-line label in a box `max_width` wide whose top edge is `y`.
///
/// Glyphs that do not fit in the box are clipped rather than wrapped.
pub fn draw_label<D>(
    target: &mut D,
    x: i32,
    y: i32,
    max_width: u32,
    text: &str,
    color: BinaryColor,
    align: TextAlign,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let line_height = LABEL_FONT.character_size.height;
    let clip = Rectangle::new(Point::new(x, y), Size::new(max_width, line_height));

    let (anchor_x, alignment) = match align {
        TextAlign::Left => (x, Alignment::Left),
        TextAlign::Center => (x + max_width as i32 / 2, Alignment::Center),
    };
    let char_style = MonoTextStyle::new(LABEL_FONT, color);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();

    Text::with_text_style(text, Point::new(anchor_x, y), char_style, text_style)
        .draw(&mut target.clipped(&clip))?;
    Ok(())
}

/// A small image stored as rows of ASCII art.
///
/// `'#'` pixels are drawn in the foreground colour, `'.'` pixels in the
/// background colour, and anything else is transparent.
#[derive(Debug, Clone, Copy)]
pub struct AsciiMask {
    pub rows: &'static [&'static str],
}

impl AsciiMask {
    pub const fn new(rows: &'static [&'static str]) -> Self {
        Self { rows }
    }

    pub fn size(&self) -> Size {
        let width = self.rows.first().map_or(0, |r| r.len());
        Size::new(width as u32, self.rows.len() as u32)
    }

    pub fn draw<D>(&self, target: &mut D, origin: Point, palette: Palette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let pixels = self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.bytes().enumerate().filter_map(move |(x, b)| {
                let color = match b {
                    b'#' => palette.foreground,
                    b'.' => palette.background,
                    _ => return None,
                };
                Some(Pixel(origin + Point::new(x as i32, y as i32), color))
            })
        });
        target.draw_iter(pixels)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
