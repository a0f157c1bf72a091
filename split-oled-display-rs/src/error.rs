//! Error type for the status display.

use display_interface::DisplayError;
use split_status::status::StatusError;

/// Why the status display could not be brought up or refreshed.
///
/// Bus failures from the `ssd1306` crate all arrive as [`DisplayError`];
/// status model failures arrive as [`StatusError`].
#[derive(Debug)]
pub enum OledError {
    /// The panel did not accept the SSD1306 init sequence.
    InitFailed(DisplayError),
    /// The driver was used before [`OledDriver::init()`](crate::OledDriver::init).
    NotInitialized,
    /// A frame transfer failed.
    Display(DisplayError),
    /// The status screen could not be built.
    Status(StatusError),
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

impl From<StatusError> for OledError {
    fn from(e: StatusError) -> Self {
        OledError::Status(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::InitFailed(_) => defmt::write!(f, "panel init rejected"),
            OledError::NotInitialized => defmt::write!(f, "panel not initialised"),
            OledError::Display(_) => defmt::write!(f, "frame transfer failed"),
            OledError::Status(e) => defmt::write!(f, "status screen: {}", e),
        }
    }
}
