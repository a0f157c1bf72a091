//! Battery icon: 20×8 outline, fill proportional to charge, 2×4 nub, and
//! a lightning bolt while charging.
//!
//! ```text
//!  ┌──────────────────┐
//!  │▐██████████       ├┐   fill width = (battery + 5) / 6, max 17 px
//!  │▐██████████       ├┘
//!  └──────────────────┘
//! ```

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use super::draw::{fill_rect, AsciiMask, Palette};

/// Where the bolt is drawn, relative to the icon origin. It overhangs the
/// top edge; the overhang is clipped by the canvas.
pub const BOLT_ORIGIN: Point = Point::new(5, -3);

/// Charging bolt with a background-coloured outline so it stays visible
/// over both the fill and the empty part of the icon.
pub const BOLT: AsciiMask = AsciiMask::new(&[
    "     ...",
    "    .##.",
    "   .##. ",
    "   .##. ",
    "  .##.  ",
    "  .##.  ",
    " .#####.",
    " .#####.",
    "  ..##. ",
    "   .##. ",
    "   .##. ",
    "  .##.  ",
    "  .#.   ",
    "   .    ",
]);

/// Width in pixels of the charge fill for a state of charge in percent.
///
/// Values above 100 are treated as 100.
pub fn fill_width(battery: u8) -> u32 {
    (battery.min(100) as u32 + 5) / 6
}

/// Draw the battery outline, fill and nub with the icon's top-left at the
/// target origin.
pub fn draw_battery_icon<D>(target: &mut D, battery: u8, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fg = palette.foreground;
    let bg = palette.background;

    fill_rect(target, 0, 0, 20, 8, fg)?;
    fill_rect(target, 1, 1, 18, 6, bg)?;
    fill_rect(target, 2, 2, fill_width(battery), 4, fg)?;
    fill_rect(target, 20, 2, 2, 4, fg)?;
    fill_rect(target, 21, 3, 1, 2, bg)?;
    Ok(())
}

/// Draw the battery icon, plus the charging bolt when `charging`.
pub fn draw_battery<D>(
    target: &mut D,
    battery: u8,
    charging: bool,
    palette: Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_battery_icon(target, battery, palette)?;
    if charging {
        BOLT.draw(target, BOLT_ORIGIN, palette)?;
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────
