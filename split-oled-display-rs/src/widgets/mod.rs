//! Status widgets and the drawing helpers they share.

pub mod art;
pub mod battery;
pub mod central;
pub mod draw;
pub mod peripheral;

pub use art::Slideshow;
pub use central::StatusWidget;
pub use draw::Palette;
pub use peripheral::PeripheralWidget;
