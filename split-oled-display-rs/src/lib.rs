//! Status widgets for split-keyboard SSD1306 (128×32) OLEDs.
//!
//! The central half shows battery, charging bolt, active BLE profile,
//! output (`USB` / `BT`) and the active layer. The peripheral half plays a
//! slideshow with a small battery / split-link overlay in the top-right
//! corner.
//!
//! Widgets draw into in-memory [`Canvas`]es; a [`StatusScreen`] composes
//! them onto any `embedded-graphics` draw target, normally the buffered
//! [`OledDriver`]. With the `task` feature, [`display_update_task`] drives
//! the whole thing from a queue of [`StatusEvent`]s.
//!
//! # Quick Start
//!
//! ```ignore
//! use split_oled_display_rs::{display_update_task, DisplayConfig, OledDriver};
//!
//! let config = DisplayConfig::default();
//! let oled = OledDriver::new(i2c, &config);
//! spawner.spawn(oled_task(oled, status, events, config).unwrap());
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn oled_task(
//!     driver: OledDriver<MyI2cType>,
//!     status: &'static SharedStatus,
//!     events: &'static StatusChannel,
//!     config: DisplayConfig,
//! ) {
//!     display_update_task(driver, status, events, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: the Embassy display task and event queue.
//!
//! [`StatusEvent`]: split_status::status::StatusEvent

#![no_std]

pub mod canvas;
#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod layout;
pub mod screen;
pub mod widgets;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use canvas::Canvas;
#[cfg(feature = "task")]
pub use display_task::{
    display_update_task, publish_event, SharedStatus, StatusChannel, EVENT_QUEUE_DEPTH,
};
pub use driver::OledDriver;
pub use error::OledError;
pub use layout::{Align, DisplayConfig, Role};
pub use screen::StatusScreen;
pub use widgets::{Palette, PeripheralWidget, Slideshow, StatusWidget};
