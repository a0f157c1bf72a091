//! Screen geometry and display configuration.
//!
//! Canvas sizes are compile-time constants because they size the widget
//! buffers. Everything else that a keyboard build might tune lives in
//! [`DisplayConfig`].

use embedded_graphics::prelude::*;

/// Panel width in pixels.
pub const SCREEN_WIDTH: usize = 128;
/// Panel height in pixels.
pub const SCREEN_HEIGHT: usize = 32;
/// Width of the peripheral status overlay.
pub const OVERLAY_WIDTH: usize = 32;
/// Height of the peripheral status overlay.
pub const OVERLAY_HEIGHT: usize = 16;

// ── Role ─────────────────────────────────────────────────────────────────

/// Which half of the split keyboard this display belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Left half: battery, BLE profile, output and layer.
    #[default]
    Central,
    /// Right half: slideshow art with a battery / link overlay.
    Peripheral,
}

// ── Alignment ────────────────────────────────────────────────────────────

/// Anchor of a widget canvas on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    TopRight,
}

impl Align {
    /// Top-left corner of an object of `size` anchored on a `screen`.
    pub fn origin(self, screen: Size, size: Size) -> Point {
        match self {
            Align::TopLeft => Point::zero(),
            Align::TopRight => Point::new(screen.width as i32 - size.width as i32, 0),
        }
    }
}

/// Full panel size.
pub fn screen_size() -> Size {
    Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
}

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Configuration for the status screens and display task.
///
/// [`DisplayConfig::default()`] gives a central display on a non-inverted,
/// non-rotated SSD1306 at `0x3C` with a 30 s slideshow cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Half this display belongs to. Default: central.
    pub role: Role,
    /// 7-bit I2C address of the panel. Default: `0x3C`.
    pub i2c_address: u8,
    /// Mount the panel upside down (180° rotation). Default: false.
    pub flipped: bool,
    /// Draw dark-on-lit instead of lit-on-dark. Default: false.
    pub inverted: bool,
    /// Length of one full slideshow cycle in milliseconds. Default: 30 000.
    pub animation_duration_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            role: Role::Central,
            i2c_address: 0x3C,
            flipped: false,
            inverted: false,
            animation_duration_ms: 30_000,
        }
    }
}

impl DisplayConfig {
    /// Default configuration for the peripheral half.
    pub fn peripheral() -> Self {
        Self {
            role: Role::Peripheral,
            ..Self::default()
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
