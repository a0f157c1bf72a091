//! Central (left half) status widget.
//!
//! Single 128×32 canvas, aligned top-left:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ [BAT] [1] BT                                 │  ← top row, y = 0..10
//! │                                              │
//! │ NAV                                          │  ← layer row, y = 16
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The profile box reflects the active BLE profile: filled when connected,
//! outlined when bonded but disconnected, bare digit when unbonded.

use core::fmt::Write;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use heapless::String;

use split_status::status::{
    initial_state, StatusError, StatusSource, StatusState, Transport, WidgetList,
};

use super::battery::draw_battery;
use super::draw::{draw_label, fill_rect, Palette, TextAlign};
use crate::canvas::Canvas;
use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// X of the BLE profile box.
const PROFILE_X: i32 = 24;
/// Side length of the BLE profile box.
const PROFILE_SIZE: u32 = 10;
/// X of the `USB` / `BT` label.
const CONN_LABEL_X: i32 = 36;
/// Labels on the top row sit one pixel above the canvas edge.
const TOP_LABEL_Y: i32 = -1;
/// Y of the layer name row.
const LAYER_Y: i32 = 16;

/// Draw battery, BLE profile indicator and connection label.
pub fn draw_top<D>(target: &mut D, state: &StatusState, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fg = palette.foreground;
    let bg = palette.background;

    draw_battery(target, state.battery, state.charging, palette)?;

    // Up to "256" fits in 4 bytes, so the write cannot overflow.
    let mut profile: String<4> = String::new();
    write!(profile, "{}", state.active_profile_index as u16 + 1).ok();

    if state.active_profile_connected {
        fill_rect(target, PROFILE_X, 0, PROFILE_SIZE, PROFILE_SIZE, fg)?;
        draw_label(target, PROFILE_X, TOP_LABEL_Y, PROFILE_SIZE, &profile, bg, TextAlign::Center)?;
    } else if state.active_profile_bonded {
        fill_rect(target, PROFILE_X, 0, PROFILE_SIZE, PROFILE_SIZE, fg)?;
        fill_rect(target, PROFILE_X + 1, 1, PROFILE_SIZE - 2, PROFILE_SIZE - 2, bg)?;
        draw_label(target, PROFILE_X, TOP_LABEL_Y, PROFILE_SIZE, &profile, fg, TextAlign::Center)?;
    } else {
        draw_label(target, PROFILE_X, TOP_LABEL_Y, PROFILE_SIZE, &profile, fg, TextAlign::Center)?;
    }

    let conn_label = match state.selected_endpoint.transport {
        Transport::Usb => "USB",
        Transport::Ble => "BT",
    };
    draw_label(target, CONN_LABEL_X, TOP_LABEL_Y, 20, conn_label, fg, TextAlign::Left)
}

/// Draw the active layer's name, or `L<index>` when it has none.
pub fn draw_layer<D>(target: &mut D, state: &StatusState, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut fallback: String<8> = String::new();
    let name = match state.layer_label {
        Some(label) => label,
        None => {
            // "L255" is the longest fallback; 8 bytes always suffice.
            write!(fallback, "L{}", state.layer_index).ok();
            fallback.as_str()
        }
    };
    draw_label(
        target,
        0,
        LAYER_Y,
        SCREEN_WIDTH as u32,
        name,
        palette.foreground,
        TextAlign::Left,
    )
}

/// Full redraw: clear to background, then the top row and the layer row.
pub fn draw_status<D>(target: &mut D, state: &StatusState, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(palette.background)?;
    draw_top(target, state, palette)?;
    draw_layer(target, state, palette)
}

// ── Widget ───────────────────────────────────────────────────────────────

/// Central status widget: owns its full-screen canvas.
#[derive(Clone)]
pub struct StatusWidget {
    canvas: Canvas<SCREEN_WIDTH, SCREEN_HEIGHT>,
    palette: Palette,
    last_state: Option<StatusState>,
}

impl StatusWidget {
    pub fn new(palette: Palette) -> Self {
        Self {
            canvas: Canvas::new(palette.background),
            palette,
            last_state: None,
        }
    }

    /// Create a widget, append it to `list`, and draw the current state.
    ///
    /// Returns the widget's index in `list`.
    pub fn init<S, const N: usize>(
        list: &mut WidgetList<StatusWidget, N>,
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

    /// Redraw from `state`. Returns `false` when `state` equals the last
    /// drawn one and nothing was redrawn.
    pub fn update(&mut self, state: &StatusState) -> bool {
        if self.last_state.as_ref() == Some(state) {
            return false;
        }
        draw_status(&mut self.canvas, state, self.palette).unwrap_or_else(|e| match e {});
        self.last_state = Some(*state);
        true
    }

    /// The widget's canvas.
    pub fn obj(&self) -> &Canvas<SCREEN_WIDTH, SCREEN_HEIGHT> {
        &self.canvas
    }

    pub fn last_state(&self) -> Option<&StatusState> {
        self.last_state.as_ref()
    }
}

/// Fan a new state out to every central widget. Returns `true` if any of
/// them redrew.
pub fn update_widgets<const N: usize>(
    list: &mut WidgetList<StatusWidget, N>,
    state: &StatusState,
) -> bool {
    let mut redrawn = false;
    list.for_each_mut(|widget| redrawn |= widget.update(state));
    redrawn
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::Rectangle;
    use split_status::status::{EndpointInstance, HostState, StatusEvent};

    const ON: BinaryColor = BinaryColor::On;
    const OFF: BinaryColor = BinaryColor::Off;

    static NAMES: [Option<&str>; 2] = [Some("BASE"), Some("NAV")];

    fn canvas() -> Canvas<SCREEN_WIDTH, SCREEN_HEIGHT> {
        Canvas::new(OFF)
    }

    fn state() -> StatusState {
        StatusState {
            battery: 60,
            charging: false,
            selected_endpoint: EndpointInstance::ble(0),
            active_profile_index: 0,
            active_profile_connected: false,
            active_profile_bonded: false,
            layer_index: 0,
            layer_label: Some("BASE"),
        }
    }

    fn area(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    fn render(state: &StatusState) -> Canvas<SCREEN_WIDTH, SCREEN_HEIGHT> {
        let mut c = canvas();
        draw_status(&mut c, state, Palette::default()).unwrap();
        c
    }

    fn render_label(text: &str, x: i32, y: i32, w: u32) -> Canvas<SCREEN_WIDTH, SCREEN_HEIGHT> {
        let mut c = canvas();
        draw_label(&mut c, x, y, w, text, ON, TextAlign::Left).unwrap();
        c
    }

    /// Pixels of `got` equal those of `want` inside `region`.
    fn same_in(
        got: &Canvas<SCREEN_WIDTH, SCREEN_HEIGHT>,
        want: &Canvas<SCREEN_WIDTH, SCREEN_HEIGHT>,
        region: Rectangle,
    ) -> bool {
        use embedded_graphics::primitives::PointsIter;
        region.points().all(|p| got.pixel(p.x, p.y) == want.pixel(p.x, p.y))
    }

    #[test]
    fn connected_profile_is_filled_box() {
        let s = StatusState {
            active_profile_connected: true,
            active_profile_bonded: true,
            ..state()
        };
        let c = render(&s);
        // Corners and a non-glyph interior column are lit.
        assert_eq!(c.pixel(24, 0), Some(ON));
        assert_eq!(c.pixel(33, 9), Some(ON));
        assert_eq!(c.pixel(25, 5), Some(ON));
        // The digit punches background pixels into the box.
        assert!(c.count_in(&area(24, 0, 10, 10), OFF) > 0);
    }

    #[test]
    fn bonded_profile_is_outlined_box() {
        let s = StatusState {
            active_profile_bonded: true,
            ..state()
        };
        let c = render(&s);
        assert_eq!(c.pixel(24, 0), Some(ON));
        assert_eq!(c.pixel(33, 9), Some(ON));
        assert_eq!(c.pixel(24, 5), Some(ON));
        // Interior column beside the digit is background.
        assert_eq!(c.pixel(25, 5), Some(OFF));
    }

    #[test]
    fn unbonded_profile_is_bare_digit() {
        let c = render(&state());
        assert_eq!(c.pixel(24, 0), Some(OFF));
        assert_eq!(c.pixel(33, 9), Some(OFF));
        assert!(c.count_in(&area(24, 0, 10, 10), ON) > 0);
    }

    #[test]
    fn profile_digit_is_one_based() {
        let s = StatusState {
            active_profile_index: 2,
            ..state()
        };
        let mut want = canvas();
        draw_label(
            &mut want,
            PROFILE_X,
            TOP_LABEL_Y,
            PROFILE_SIZE,
            "3",
            ON,
            TextAlign::Center,
        )
        .unwrap();
        assert!(same_in(&render(&s), &want, area(24, 0, 10, 10)));
    }

    #[test]
    fn connection_label_follows_transport() {
        let usb = StatusState {
            selected_endpoint: EndpointInstance::usb(),
            ..state()
        };
        let region = area(CONN_LABEL_X, 0, 20, 10);

        let want_usb = render_label("USB", CONN_LABEL_X, TOP_LABEL_Y, 20);
        let want_bt = render_label("BT", CONN_LABEL_X, TOP_LABEL_Y, 20);
        assert!(same_in(&render(&usb), &want_usb, region));
        assert!(same_in(&render(&state()), &want_bt, region));
    }

    #[test]
    fn widest_fallback_labels_are_complete() {
        let s = StatusState {
            active_profile_index: u8::MAX,
            layer_index: u8::MAX,
            layer_label: None,
            ..state()
        };
        let got = render(&s);
        let want = render_label("L255", 0, LAYER_Y, 128);
        assert!(same_in(&got, &want, area(0, LAYER_Y, 128, 16)));

        let mut digits = canvas();
        draw_label(
            &mut digits,
            PROFILE_X,
            TOP_LABEL_Y,
            PROFILE_SIZE,
            "256",
            ON,
            TextAlign::Center,
        )
        .unwrap();
        assert!(same_in(&got, &digits, area(24, 0, 10, 10)));
    }

    #[test]
    fn named_layer_draws_label() {
        let region = area(0, LAYER_Y, 128, 16);
        let want = render_label("BASE", 0, LAYER_Y, 128);
        assert!(same_in(&render(&state()), &want, region));
    }

    #[test]
    fn unnamed_layer_draws_index() {
        let s = StatusState {
            layer_index: 7,
            layer_label: None,
            ..state()
        };
        let region = area(0, LAYER_Y, 128, 16);
        let want = render_label("L7", 0, LAYER_Y, 128);
        assert!(same_in(&render(&s), &want, region));
    }

    #[test]
    fn redraw_clears_previous_frame() {
        let mut c = canvas();
        c.fill_bg(ON);
        draw_status(&mut c, &state(), Palette::default()).unwrap();
        // Far right of the top row is never drawn on.
        assert_eq!(c.count_in(&area(100, 0, 28, 16), ON), 0);
    }

    #[test]
    fn update_skips_identical_state() {
        let mut w = StatusWidget::new(Palette::default());
        assert!(w.update(&state()));
        assert!(!w.update(&state()));
        let s = StatusState {
            battery: 10,
            ..state()
        };
        assert!(w.update(&s));
        assert_eq!(w.last_state().map(|s| s.battery), Some(10));
    }

    #[test]
    fn init_appends_and_draws_current_state() {
        let mut host = HostState::new(&NAMES);
        host.apply(&StatusEvent::LayerStateChanged { layer: 1, active: true })
            .unwrap();

        let mut list: WidgetList<StatusWidget, 1> = WidgetList::new();
        let idx = StatusWidget::init(&mut list, &host, Palette::default()).unwrap();
        assert_eq!(idx, 0);

        let widget = list.get(0).unwrap();
        assert_eq!(widget.last_state().and_then(|s| s.layer_label), Some("NAV"));
        assert_eq!(
            StatusWidget::init(&mut list, &host, Palette::default()).err(),
            Some(StatusError::WidgetListFull)
        );
    }

    #[test]
    fn update_widgets_fans_out() {
        let mut list: WidgetList<StatusWidget, 2> = WidgetList::new();
        list.append(StatusWidget::new(Palette::default())).unwrap();
        list.append(StatusWidget::new(Palette::default())).unwrap();

        assert!(update_widgets(&mut list, &state()));
        assert!(!update_widgets(&mut list, &state()));
        assert!(list.get(1).unwrap().last_state().is_some());
    }
}
