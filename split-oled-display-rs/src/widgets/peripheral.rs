//! Peripheral (right half) status overlay.
//!
//! A 32×16 canvas aligned to the top-right corner, drawn over the
//! slideshow art:
//!
//! ```text
//!  x=0            20 22  24 28
//!  ┌──────────────────┐┐
//!  │████████          ││        battery, 20×8 + nub
//!  └──────────────────┘┘
//!                        ■■■■   connection dot at (24, 10), 4×4
//! ```

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use split_status::status::{initial_state, PeripheralState, StatusError, StatusSource, WidgetList};

use super::battery::draw_battery_icon;
use super::draw::{fill_rect, Palette};
use crate::canvas::Canvas;
use crate::layout::{OVERLAY_HEIGHT, OVERLAY_WIDTH};

const DOT_X: i32 = 24;
const DOT_Y: i32 = 10;
const DOT_SIZE: u32 = 4;

/// Draw the battery icon and the split-link dot: filled when connected,
/// hollow when not.
pub fn draw_peripheral_battery<D>(
    target: &mut D,
    state: &PeripheralState,
    palette: Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_battery_icon(target, state.battery, palette)?;

    fill_rect(target, DOT_X, DOT_Y, DOT_SIZE, DOT_SIZE, palette.foreground)?;
    if !state.connected {
        fill_rect(target, DOT_X + 1, DOT_Y + 1, DOT_SIZE - 2, DOT_SIZE - 2, palette.background)?;
    }
    Ok(())
}

/// Peripheral overlay widget: owns the 32×16 canvas.
#[derive(Clone)]
pub struct PeripheralWidget {
    canvas: Canvas<OVERLAY_WIDTH, OVERLAY_HEIGHT>,
    palette: Palette,
    last_state: Option<PeripheralState>,
}

impl PeripheralWidget {
    pub fn new(palette: Palette) -> Self {
        Self {
            canvas: Canvas::new(palette.background),
            palette,
            last_state: None,
        }
    }

    /// Create a widget, append it to `list`, and draw the current state.
    pub fn init<S, const N: usize>(
        list: &mut WidgetList<PeripheralWidget, N>,
        source: &S,
        palette: Palette,
    ) -> Result<usize, StatusError>
    where
        S: StatusSource + ?Sized,
    {
        let mut widget = Self::new(palette);
        widget.update(&initial_state(source));
        list.append(widget)
    }

    /// Remember `state` and redraw the overlay. Returns `false` if it was
    /// already showing `state`.
    pub fn update(&mut self, state: &PeripheralState) -> bool {
        if self.last_state.as_ref() == Some(state) {
            return false;
        }
        self.last_state = Some(*state);
        self.canvas.fill_bg(self.palette.background);
        draw_peripheral_battery(&mut self.canvas, state, self.palette)
            .unwrap_or_else(|e| match e {});
        true
    }

    pub fn obj(&self) -> &Canvas<OVERLAY_WIDTH, OVERLAY_HEIGHT> {
        &self.canvas
    }

    pub fn last_state(&self) -> Option<&PeripheralState> {
        self.last_state.as_ref()
    }
}

/// Fan a new state out to every peripheral widget. Returns `true` if any
/// of them redrew.
pub fn update_widgets<const N: usize>(
    list: &mut WidgetList<PeripheralWidget, N>,
    state: &PeripheralState,
) -> bool {
    let mut redrawn = false;
    list.for_each_mut(|widget| redrawn |= widget.update(state));
    redrawn
}

// ── Tests ────────────────────────────────────────────────────────────────
