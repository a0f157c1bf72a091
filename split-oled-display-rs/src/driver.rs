//! SSD1306 128×32 panel in async buffered graphics mode.
//!
//! [`OledDriver`] owns the panel: it is built without touching the bus,
//! initialised once, and then shows one composed [`StatusScreen`] frame
//! per [`show()`](OledDriver::show) call.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async,
};

use crate::error::OledError;
use crate::layout::DisplayConfig;
use crate::screen::StatusScreen;

/// Buffered 128×32 panel behind [`OledDriver`].
pub type Display<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x32,
    BufferedGraphicsModeAsync<DisplaySize128x32>,
>;

/// Async SSD1306 128×32 driver for the status screens.
///
/// # Example
///
/// ```no_run
/// use split_oled_display_rs::{DisplayConfig, OledDriver, StatusScreen};
/// use split_status::status::HostState;
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// static NAMES: [Option<&str>; 1] = [Some("BASE")];
///
/// let config = DisplayConfig::default();
/// let mut oled = OledDriver::new(i2c, &config);
/// oled.init().await.unwrap();
///
/// let host = HostState::new(&NAMES);
/// let screen = StatusScreen::new(&config, &host).unwrap();
/// oled.show(&screen).await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    display: Display<I2C>,
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Build the driver for the address and rotation in `config`.
    ///
    /// No I2C traffic; call [`init()`](Self::init) before anything else.
    ///
    /// # Arguments
    /// * `i2c`: bus the panel sits on (owned for exclusive access).
    /// * `config`: supplies `i2c_address` and the `flipped` rotation.
    pub fn new(i2c: I2C, config: &DisplayConfig) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, config.i2c_address);
        let rotation = if config.flipped {
            DisplayRotation::Rotate180
        } else {
            DisplayRotation::Rotate0
        };

        Self {
            display: Ssd1306Async::new(interface, DisplaySize128x32, rotation)
                .into_buffered_graphics_mode(),
            initialized: false,
        }
    }

    /// Send the SSD1306 init sequence.
    ///
    /// Must succeed once before [`show()`](Self::show) will draw.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::InitFailed`] carrying the bus error if the
    /// panel does not acknowledge the sequence.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.display.init().await.map_err(OledError::InitFailed)?;
        self.initialized = true;
        Ok(())
    }

    /// Compose `screen` into the frame buffer and push it to the panel.
    ///
    /// The buffer is cleared first, so nothing from the previous frame
    /// survives. A full 512-byte frame takes roughly 10 ms at 400 kHz.
    ///
    /// # Arguments
    /// * `screen`: the status screen to render, usually owned by the
    ///   display task.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] before a successful
    /// [`init()`](Self::init), or [`OledError::Display`] if the frame
    /// transfer fails.
    pub async fn show(&mut self, screen: &StatusScreen) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.clear_buffer();
        screen.render(&mut self.display)?;
        self.display.flush().await?;
        Ok(())
    }

    /// `true` once [`init()`](Self::init) has succeeded. No I2C traffic.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
