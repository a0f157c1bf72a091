//! Status screen: the widgets of one keyboard half, composed onto the panel.
//!
//! ```text
//! Central                          Peripheral
//! ┌────────────────────────────┐   ┌──────────────────────┬─────┐
//! │ StatusWidget (128×32)      │   │ Slideshow art        │ ovl │ ← 32×16
//! │                            │   │ (128×32)             └─────┤
//! └────────────────────────────┘   └────────────────────────────┘
//! ```

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use split_status::status::{
    listen, PeripheralState, StatusError, StatusEvent, StatusSource, StatusState, WidgetList,
};

use crate::layout::{screen_size, Align, DisplayConfig, Role};
use crate::widgets::{central, peripheral, Palette, PeripheralWidget, Slideshow, StatusWidget};

/// Widgets per screen. One canvas per half is all the 128×32 layout uses.
pub const WIDGETS_PER_SCREEN: usize = 1;

/// The screen shown on one half of the keyboard.
pub enum StatusScreen {
    Central {
        widgets: WidgetList<StatusWidget, WIDGETS_PER_SCREEN>,
    },
    Peripheral {
        slideshow: Slideshow,
        frame: usize,
        palette: Palette,
        widgets: WidgetList<PeripheralWidget, WIDGETS_PER_SCREEN>,
    },
}

impl StatusScreen {
    /// Build the screen for `config.role` and draw the current state.
    pub fn new<S>(config: &DisplayConfig, source: &S) -> Result<Self, StatusError>
    where
        S: StatusSource + ?Sized,
    {
        let palette = Palette::for_inverted(config.inverted);
        match config.role {
            Role::Central => {
                let mut widgets = WidgetList::new();
                StatusWidget::init(&mut widgets, source, palette)?;
                Ok(StatusScreen::Central { widgets })
            }
            Role::Peripheral => {
                let mut widgets = WidgetList::new();
                PeripheralWidget::init(&mut widgets, source, palette)?;
                Ok(StatusScreen::Peripheral {
                    slideshow: Slideshow::placeholder(config.animation_duration_ms),
                    frame: 0,
                    palette,
                    widgets,
                })
            }
        }
    }

    pub fn role(&self) -> Role {
        match self {
            StatusScreen::Central { .. } => Role::Central,
            StatusScreen::Peripheral { .. } => Role::Peripheral,
        }
    }

    /// Route an event to the screen's widgets.
    ///
    /// Returns `true` if a widget redrew and the panel needs a flush.
    /// Events the widgets are not subscribed to are ignored.
    pub fn handle_event<S>(&mut self, source: &S, event: &StatusEvent) -> bool
    where
        S: StatusSource + ?Sized,
    {
        match self {
            StatusScreen::Central { widgets } => match listen::<StatusState, _>(source, event) {
                Some(state) => central::update_widgets(widgets, &state),
                None => false,
            },
            StatusScreen::Peripheral { widgets, .. } => {
                match listen::<PeripheralState, _>(source, event) {
                    Some(state) => peripheral::update_widgets(widgets, &state),
                    None => false,
                }
            }
        }
    }

    /// Advance the slideshow to the frame due at `elapsed_ms`.
    ///
    /// Returns `true` if the frame changed. Always `false` on the central
    /// screen.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        match self {
            StatusScreen::Central { .. } => false,
            StatusScreen::Peripheral {
                slideshow, frame, ..
            } => match slideshow.frame_index_at(elapsed_ms) {
                Some(next) if next != *frame => {
                    *frame = next;
                    true
                }
                _ => false,
            },
        }
    }

    /// Milliseconds until the screen next changes on its own, or `None` if
    /// it only changes on events.
    pub fn ms_until_next_tick(&self, elapsed_ms: u64) -> Option<u64> {
        match self {
            StatusScreen::Central { .. } => None,
            StatusScreen::Peripheral { slideshow, .. } => slideshow.ms_until_next_frame(elapsed_ms),
        }
    }

    /// Compose the screen onto `target`.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            StatusScreen::Central { widgets } => {
                if let Some(widget) = widgets.get(0) {
                    let canvas = widget.obj();
                    canvas.draw_at(target, Align::TopLeft.origin(screen_size(), canvas.size()))?;
                }
            }
            StatusScreen::Peripheral {
                slideshow,
                frame,
                palette,
                widgets,
            } => {
                target.clear(palette.background)?;
                slideshow.draw_frame(target, *frame, *palette)?;
                if let Some(widget) = widgets.get(0) {
                    let canvas = widget.obj();
                    canvas.draw_at(target, Align::TopRight.origin(screen_size(), canvas.size()))?;
                }
            }
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
